//! Entitlement queries and the reconciliation insert

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Entitlement, EntitlementWithProgram, Program};

/// Check whether a user holds any grant covering a program, either a
/// direct grant on that program or a subscriber-wide grant.
pub async fn grant_exists(pool: &SqlitePool, user_id: Uuid, program_id: Uuid) -> Result<bool> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM entitlements
        WHERE user_id = ? AND (program_id = ? OR is_subscriber = 1)
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(program_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Fetch the direct grant for an exact (user, program) pair, if any
///
/// Subscriber-wide grants are deliberately not matched here; reconciliation
/// only cares about the per-program row it would otherwise create.
pub async fn find_program_grant(
    pool: &SqlitePool,
    user_id: Uuid,
    program_id: Uuid,
) -> Result<Option<Entitlement>> {
    let entitlement = sqlx::query_as::<_, Entitlement>(
        r#"
        SELECT id, user_id, program_id, is_subscriber, created_at
        FROM entitlements
        WHERE user_id = ? AND program_id = ?
        "#,
    )
    .bind(user_id)
    .bind(program_id)
    .fetch_optional(pool)
    .await?;

    Ok(entitlement)
}

/// Insert a single-program grant unless one already exists
///
/// The conditional insert rides on the unique (user_id, program_id) index,
/// so concurrent reconciliation attempts for the same pair cannot create
/// duplicate rows. The conflict target repeats the index's partial-index
/// predicate; SQLite rejects the clause without it. Returns true when a
/// new row was written.
pub async fn insert_program_grant(
    pool: &SqlitePool,
    user_id: Uuid,
    program_id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO entitlements (id, user_id, program_id, is_subscriber, created_at)
        VALUES (?, ?, ?, 0, ?)
        ON CONFLICT(user_id, program_id) WHERE program_id IS NOT NULL DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(program_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Fetch a user's entitlements together with the programs they grant
///
/// Subscriber-wide grants carry no program. A grant whose program has
/// vanished from the catalog is skipped rather than failing the listing.
pub async fn list_with_programs(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<EntitlementWithProgram>> {
    let rows = sqlx::query(
        r#"
        SELECT e.id, e.user_id, e.program_id, e.is_subscriber, e.created_at,
               p.id AS p_id, p.title AS p_title, p.description AS p_description,
               p.is_free AS p_is_free, p.price_cents AS p_price_cents,
               p.exercise_count AS p_exercise_count,
               p.duration_minutes AS p_duration_minutes,
               p.created_at AS p_created_at
        FROM entitlements e
        LEFT JOIN programs p ON p.id = e.program_id
        WHERE e.user_id = ?
        ORDER BY e.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let entitlement = Entitlement {
            id: row.get("id"),
            user_id: row.get("user_id"),
            program_id: row.get("program_id"),
            is_subscriber: row.get("is_subscriber"),
            created_at: row.get("created_at"),
        };

        let program = row.get::<Option<Uuid>, _>("p_id").map(|id| Program {
            id,
            title: row.get("p_title"),
            description: row.get("p_description"),
            is_free: row.get("p_is_free"),
            price_cents: row.get("p_price_cents"),
            exercise_count: row.get("p_exercise_count"),
            duration_minutes: row.get("p_duration_minutes"),
            created_at: row.get("p_created_at"),
        });

        // Dangling reference: the entitled program no longer exists.
        if entitlement.program_id.is_some() && program.is_none() {
            tracing::warn!(
                entitlement_id = %entitlement.id,
                program_id = ?entitlement.program_id,
                "Skipping entitlement for missing program"
            );
            continue;
        }

        entries.push(EntitlementWithProgram {
            entitlement,
            program,
        });
    }

    Ok(entries)
}
