//! Entitlement endpoints: access checks, owned-content listing, and
//! purchase recovery

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::CurrentIdentity;
use crate::db;
use crate::models::{EntitlementWithProgram, Identity, RecoveryOutcome};
use crate::services::{access, recovery};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub has_access: bool,
}

/// GET /api/programs/:id/access
///
/// Fails closed: any lookup failure reads as "no access".
pub async fn has_access(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(program_id): Path<Uuid>,
) -> Json<AccessResponse> {
    let has_access = match access::has_access(&state.db, identity, program_id).await {
        Ok(allowed) => allowed,
        Err(err) => {
            tracing::warn!(%program_id, error = %err, "Access check failed, denying");
            false
        }
    };

    Json(AccessResponse { has_access })
}

/// GET /api/entitlements
///
/// The caller's grants paired with the programs they cover. Empty for
/// anonymous callers and on store failure.
pub async fn list_entitlements(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<Vec<EntitlementWithProgram>> {
    let Identity::User(user_id) = identity else {
        return Json(Vec::new());
    };

    match db::entitlements::list_with_programs(&state.db, user_id).await {
        Ok(entries) => Json(entries),
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "Entitlement listing failed, returning empty");
            Json(Vec::new())
        }
    }
}

/// POST /api/programs/:id/verify-purchase
pub async fn verify_purchase(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(program_id): Path<Uuid>,
) -> Json<RecoveryOutcome> {
    let outcome = recovery::verify_purchase(
        &state.db,
        state.ledger.as_ref(),
        identity,
        program_id,
        &state.support_contact,
    )
    .await;

    Json(outcome)
}

/// Build entitlement routes
pub fn entitlement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/programs/:id/access", get(has_access))
        .route("/api/programs/:id/verify-purchase", post(verify_purchase))
        .route("/api/entitlements", get(list_entitlements))
}
