//! Per-service entry points used by the binaries.

use crate::clients::{RpcChannel, RpcMenuClient, RpcUserClient, UnsupportedAddress};
use crate::config::{ConfigError, ServiceConfig, StoreBackend};
use crate::lifecycle::STORE_BUFFER;
use crate::menu_service::MenuService;
use crate::order_service::OrderService;
use crate::postgres::{self, PgMenuStore, PgOrderStore, PgUserStore, Schema};
use crate::rpc;
use crate::user_service::UserService;
use axum::Router;
use record_actor::{Record, RecordStore, ResourceActor};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Errors that stop a service from starting or make it exit.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid peer address: {0}")]
    Peer(#[from] UnsupportedAddress),

    #[error("peer service addresses are not configured")]
    MissingPeers,
}

/// A store handle plus the actor task behind it, if any.
struct OpenStore<T: Record> {
    store: Arc<dyn RecordStore<T>>,
    actor: Option<JoinHandle<()>>,
}

impl<T: Record> OpenStore<T> {
    /// Waits for the actor (if any) to drain once the last handle is gone.
    async fn close(self) -> Result<(), LaunchError> {
        drop(self.store);
        if let Some(actor) = self.actor {
            actor.await?;
        }
        Ok(())
    }
}

async fn open_store<T, S>(
    config: &ServiceConfig,
    schema: Schema,
    postgres_store: impl FnOnce(PgPool) -> S,
) -> Result<OpenStore<T>, LaunchError>
where
    T: Record,
    S: RecordStore<T> + 'static,
{
    match config.backend {
        StoreBackend::Memory => {
            warn!(service = config.kind.name(), "Using in-memory store; data is lost on exit");
            let (actor, client) = ResourceActor::<T>::new(STORE_BUFFER);
            Ok(OpenStore {
                store: Arc::new(client),
                actor: Some(tokio::spawn(actor.run())),
            })
        }
        StoreBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            postgres::migrate(&pool, schema).await?;
            Ok(OpenStore {
                store: Arc::new(postgres_store(pool)),
                actor: None,
            })
        }
    }
}

/// Serves `router` on the configured address until Ctrl-C.
async fn serve(config: &ServiceConfig, router: Router) -> Result<(), LaunchError> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        service = config.kind.name(),
        addr = %listener.local_addr()?,
        backend = ?config.backend,
        "Listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(service = config.kind.name(), "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Runs the user service.
pub async fn run_user_service(config: ServiceConfig) -> Result<(), LaunchError> {
    let opened = open_store(&config, Schema::Users, PgUserStore::new).await?;
    let service = UserService::new(opened.store.clone());
    serve(&config, rpc::user::router(service)).await?;
    opened.close().await
}

/// Runs the menu service.
pub async fn run_menu_service(config: ServiceConfig) -> Result<(), LaunchError> {
    let opened = open_store(&config, Schema::Menu, PgMenuStore::new).await?;
    let service = MenuService::new(opened.store.clone());
    serve(&config, rpc::menu::router(service)).await?;
    opened.close().await
}

/// Runs the order service, calling the user and menu services over RPC.
pub async fn run_order_service(config: ServiceConfig) -> Result<(), LaunchError> {
    let peers = config.peers.clone().ok_or(LaunchError::MissingPeers)?;
    let http = reqwest::Client::new();
    let users = RpcUserClient::new(RpcChannel::with_client(
        http.clone(),
        &peers.user_service_addr,
    )?);
    let menu = RpcMenuClient::new(RpcChannel::with_client(http, &peers.menu_service_addr)?);
    info!(
        user_service = %peers.user_service_addr,
        menu_service = %peers.menu_service_addr,
        "Peer services configured"
    );

    let opened = open_store(&config, Schema::Orders, PgOrderStore::new).await?;
    let service = OrderService::new(opened.store.clone(), Arc::new(users), Arc::new(menu));
    serve(&config, rpc::order::router(service)).await?;
    opened.close().await
}
