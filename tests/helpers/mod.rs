//! Test utilities
//!
//! Seeding helpers and database setup shared by the integration tests.

#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

/// Create a temporary test database with the schema applied
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for the
/// duration of the test
pub async fn create_test_db() -> Result<(TempDir, SqlitePool)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test_trainsmart.db");

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    trainsmart::db::init_tables(&pool).await?;

    Ok((temp_dir, pool))
}

pub async fn seed_program(
    pool: &SqlitePool,
    title: &str,
    is_free: bool,
    price_cents: i64,
) -> Result<Uuid> {
    seed_program_at(pool, title, is_free, price_cents, Utc::now()).await
}

pub async fn seed_program_at(
    pool: &SqlitePool,
    title: &str,
    is_free: bool,
    price_cents: i64,
    created_at: DateTime<Utc>,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO programs (id, title, description, is_free, price_cents,
                              exercise_count, duration_minutes, created_at)
        VALUES (?, ?, NULL, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(is_free)
    .bind(price_cents)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn seed_exercise(
    pool: &SqlitePool,
    program_id: Uuid,
    title: &str,
    sort_order: i64,
    duration_seconds: i64,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO exercises (id, program_id, title, description, sort_order,
                               duration_seconds, video_url, created_at)
        VALUES (?, ?, ?, NULL, ?, ?, 'https://cdn.test/video.mp4', ?)
        "#,
    )
    .bind(id)
    .bind(program_id)
    .bind(title)
    .bind(sort_order)
    .bind(duration_seconds)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn seed_entitlement(
    pool: &SqlitePool,
    user_id: Uuid,
    program_id: Option<Uuid>,
    is_subscriber: bool,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO entitlements (id, user_id, program_id, is_subscriber, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(program_id)
    .bind(is_subscriber)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn count_entitlements(
    pool: &SqlitePool,
    user_id: Uuid,
    program_id: Uuid,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM entitlements WHERE user_id = ? AND program_id = ?",
    )
    .bind(user_id)
    .bind(program_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn count_progress_rows(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_progress")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
