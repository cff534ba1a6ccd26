//! Playback progress persistence

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::ProgressRecord;

/// Upsert the progress checkpoint for a (user, exercise) pair
///
/// Position follows last-write-wins (progress is advisory, not
/// authoritative). The completed flag is monotonic: once a row has
/// completed = 1, a later write cannot clear it.
pub async fn upsert_progress(
    pool: &SqlitePool,
    user_id: Uuid,
    exercise_id: Uuid,
    position_seconds: i64,
    completed: bool,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, exercise_id, last_position_seconds, completed, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id, exercise_id) DO UPDATE SET
            last_position_seconds = excluded.last_position_seconds,
            completed = user_progress.completed OR excluded.completed,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(exercise_id)
    .bind(position_seconds)
    .bind(completed)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the progress checkpoint for a (user, exercise) pair, if any
pub async fn get_progress(
    pool: &SqlitePool,
    user_id: Uuid,
    exercise_id: Uuid,
) -> Result<Option<ProgressRecord>> {
    let record = sqlx::query_as::<_, ProgressRecord>(
        r#"
        SELECT user_id, exercise_id, last_position_seconds, completed, updated_at
        FROM user_progress
        WHERE user_id = ? AND exercise_id = ?
        "#,
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
