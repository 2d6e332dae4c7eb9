//! User service binary. See [`cafe_services::config`] for the environment it reads.

use cafe_services::config::{ServiceConfig, ServiceKind};
use cafe_services::lifecycle::{run_user_service, setup_tracing, LaunchError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), LaunchError> {
    setup_tracing();

    let config = ServiceConfig::from_env(ServiceKind::User)?;
    info!(?config, "Starting user-service");

    run_user_service(config).await
}
