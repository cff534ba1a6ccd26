//! Program catalog queries (read-only)

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Program;

/// Fetch all programs, newest first
pub async fn list_programs(pool: &SqlitePool) -> Result<Vec<Program>> {
    let programs = sqlx::query_as::<_, Program>(
        r#"
        SELECT id, title, description, is_free, price_cents,
               exercise_count, duration_minutes, created_at
        FROM programs
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

/// Fetch only free programs, newest first
///
/// Serves the anonymous catalog view.
pub async fn list_free_programs(pool: &SqlitePool) -> Result<Vec<Program>> {
    let programs = sqlx::query_as::<_, Program>(
        r#"
        SELECT id, title, description, is_free, price_cents,
               exercise_count, duration_minutes, created_at
        FROM programs
        WHERE is_free = 1
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

/// Fetch a single program by id
pub async fn get_program(pool: &SqlitePool, program_id: Uuid) -> Result<Option<Program>> {
    let program = sqlx::query_as::<_, Program>(
        r#"
        SELECT id, title, description, is_free, price_cents,
               exercise_count, duration_minutes, created_at
        FROM programs
        WHERE id = ?
        "#,
    )
    .bind(program_id)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}
