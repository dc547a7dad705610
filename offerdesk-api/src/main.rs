use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use offerdesk_api::{app, AppState};
use offerdesk_core::OfferRepository;
use offerdesk_store::app_config::{Config, StorageBackend};
use offerdesk_store::{DbClient, InMemoryOfferRepository, PostgresOfferRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "offerdesk_api=debug,offerdesk_store=debug,offerdesk_core=info,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting offerdesk API on port {}", config.server.port);

    let repo: Arc<dyn OfferRepository> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory offer storage");
            Arc::new(InMemoryOfferRepository::new())
        }
        StorageBackend::Postgres => {
            let db = DbClient::new(config.database_url()?, &config.database)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(PostgresOfferRepository::new(db.pool.clone()))
        }
    };

    let app = app(AppState::new(repo));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
