//! trainsmart - Entitlement & Progress Service
//!
//! Serves the TrainSmart mobile app: program/exercise catalog reads,
//! entitlement-gated access checks, purchase recovery, and playback
//! progress persistence.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trainsmart::config::Config;
use trainsmart::services::recovery::NullLedger;
use trainsmart::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting trainsmart service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Database: {}", config.database_path.display());

    let db_pool = trainsmart::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    // No payment-provider integration configured; recovery routes users to
    // support until a real ledger is wired in.
    let ledger = Arc::new(NullLedger);

    let state = AppState::new(db_pool, ledger, config.support_contact.clone());
    let app = trainsmart::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
