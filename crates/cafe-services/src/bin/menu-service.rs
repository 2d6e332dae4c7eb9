//! Menu service binary. See [`cafe_services::config`] for the environment it reads.

use cafe_services::config::{ServiceConfig, ServiceKind};
use cafe_services::lifecycle::{run_menu_service, setup_tracing, LaunchError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), LaunchError> {
    setup_tracing();

    let config = ServiceConfig::from_env(ServiceKind::Menu)?;
    info!(?config, "Starting menu-service");

    run_menu_service(config).await
}
