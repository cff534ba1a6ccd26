//! Progress endpoint
//!
//! The playback surface reports positions on a 5-second media-time cadence
//! and sends `ended: true` when the media-end event fires. The response is
//! 204 in every tracked case; progress persistence must never fail
//! playback.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::CurrentIdentity;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::Identity;
use crate::services::playback;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub exercise_id: Uuid,
    pub position_seconds: i64,
    /// Terminal media-end event; forces completion at full duration
    #[serde(default)]
    pub ended: bool,
}

/// POST /api/progress
pub async fn record_progress(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(update): Json<ProgressUpdate>,
) -> ApiResult<StatusCode> {
    if update.position_seconds < 0 {
        return Err(ApiError::BadRequest(
            "position_seconds must be non-negative".to_string(),
        ));
    }

    // Anonymous viewing is not tracked.
    if identity == Identity::Anonymous {
        return Ok(StatusCode::NO_CONTENT);
    }

    let exercise = db::exercises::get_exercise(&state.db, update.exercise_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Exercise {} not found", update.exercise_id))
        })?;

    if update.ended {
        playback::record_media_ended(&state.db, identity, &exercise).await;
    } else {
        let completed =
            playback::completion_reached(update.position_seconds, exercise.duration_seconds);
        playback::record_progress(
            &state.db,
            identity,
            exercise.id,
            update.position_seconds,
            completed,
        )
        .await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Build progress routes
pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/api/progress", post(record_progress))
}
