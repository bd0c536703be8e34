use anyhow::Result;
use mongodb::Database;
use roster_config::AppConfig;
use roster_database::initialize_database;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Long-lived resources shared by the whole backend.
#[derive(Clone)]
pub struct BackendServices {
    pub db: Database,
}

impl BackendServices {
    /// Connect to the document store and prepare its indexes.
    ///
    /// Fails fast when the store is unreachable so the process never
    /// serves requests it cannot fulfil.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db = initialize_database(&config.database).await?;

        info!(database = %config.database.database, "document store ready");

        Ok(Self { db })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
