//! trainsmart - Entitlement & Progress Service
//!
//! Backend for the TrainSmart video training app. Gates paid programs
//! behind an entitlement model, recovers purchases whose entitlement grant
//! was lost, and persists per-user playback progress. Page rendering,
//! authentication transport, and card capture live elsewhere; this service
//! exposes the function-level contract they call.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult, Error, Result};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::recovery::PaymentLedger;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Authoritative payment ledger consulted by purchase recovery
    pub ledger: Arc<dyn PaymentLedger>,
    /// Support contact handed out when no purchase is found
    pub support_contact: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, ledger: Arc<dyn PaymentLedger>, support_contact: String) -> Self {
        Self {
            db,
            ledger,
            support_contact,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::catalog_routes())
        .merge(api::entitlement_routes())
        .merge(api::progress_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
