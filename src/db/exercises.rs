//! Exercise catalog queries (read-only)

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Exercise;

/// Fetch the exercises of a program in canonical order
///
/// Ordered by sort_order ascending; insertion order breaks ties so the
/// listing is stable under re-fetch.
pub async fn list_for_program(pool: &SqlitePool, program_id: Uuid) -> Result<Vec<Exercise>> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, program_id, title, description, sort_order,
               duration_seconds, video_url, created_at
        FROM exercises
        WHERE program_id = ?
        ORDER BY sort_order ASC, created_at ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

/// Fetch a single exercise by id
pub async fn get_exercise(pool: &SqlitePool, exercise_id: Uuid) -> Result<Option<Exercise>> {
    let exercise = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, program_id, title, description, sort_order,
               duration_seconds, video_url, created_at
        FROM exercises
        WHERE id = ?
        "#,
    )
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?;

    Ok(exercise)
}
