//! Playback progress tracking
//!
//! The playback surface reports positions on a media-time cadence and fires
//! a terminal event at end of media. Tracking is best-effort: it never
//! blocks or fails playback, and anonymous viewing is not tracked.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::models::{Exercise, Identity};

/// Tail tolerance absorbing buffering/precision jitter at end of media
pub const COMPLETION_TAIL_SECONDS: i64 = 2;

/// Minimum media-time spacing between persisted position updates
pub const RECORD_INTERVAL_SECONDS: i64 = 5;

/// Whether a reported position counts as having completed the exercise
pub fn completion_reached(position_seconds: i64, duration_seconds: i64) -> bool {
    duration_seconds > 0 && position_seconds >= duration_seconds - COMPLETION_TAIL_SECONDS
}

/// Cadence policy for continuous time updates: persist at most once per
/// five seconds of media time, and never at position zero.
pub fn should_record(position_seconds: i64) -> bool {
    position_seconds > 0 && position_seconds % RECORD_INTERVAL_SECONDS == 0
}

/// Persist a progress checkpoint. One upsert per call; no buffering.
///
/// Anonymous callers are a silent no-op. Store failures are logged and
/// swallowed.
pub async fn record_progress(
    pool: &SqlitePool,
    identity: Identity,
    exercise_id: Uuid,
    position_seconds: i64,
    completed: bool,
) {
    let Some(user_id) = identity.user_id() else {
        return;
    };

    if let Err(err) =
        db::progress::upsert_progress(pool, user_id, exercise_id, position_seconds, completed)
            .await
    {
        tracing::warn!(%user_id, %exercise_id, error = %err, "Progress write failed");
    }
}

/// Terminal end-of-media event: force position to the full duration and
/// mark completed, regardless of the last reported position.
pub async fn record_media_ended(pool: &SqlitePool, identity: Identity, exercise: &Exercise) {
    record_progress(
        pool,
        identity,
        exercise.id,
        exercise.duration_seconds,
        true,
    )
    .await;
}
