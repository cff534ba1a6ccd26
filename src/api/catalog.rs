//! Catalog endpoints (programs and exercises)

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::api::CurrentIdentity;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Exercise, Program};
use crate::services::access;
use crate::AppState;

/// GET /api/programs
///
/// Catalog listing, newest first. Anonymous callers see only free
/// programs. A store failure degrades to an empty listing.
pub async fn list_programs(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<Vec<Program>> {
    match access::visible_programs(&state.db, identity).await {
        Ok(programs) => Json(programs),
        Err(err) => {
            tracing::warn!(error = %err, "Program listing failed, returning empty catalog");
            Json(Vec::new())
        }
    }
}

/// GET /api/programs/:id
pub async fn get_program(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> ApiResult<Json<Program>> {
    let program = db::programs::get_program(&state.db, program_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Program {} not found", program_id)))?;

    Ok(Json(program))
}

/// GET /api/programs/:id/exercises
///
/// Exercises in canonical order (sort_order ascending).
pub async fn list_exercises(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Exercise>>> {
    if db::programs::get_program(&state.db, program_id)
        .await
        .map_err(ApiError::from)?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "Program {} not found",
            program_id
        )));
    }

    let exercises = db::exercises::list_for_program(&state.db, program_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(exercises))
}

/// Build catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/programs", get(list_programs))
        .route("/api/programs/:id", get(get_program))
        .route("/api/programs/:id/exercises", get(list_exercises))
}
