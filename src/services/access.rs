//! Entitlement resolution
//!
//! Access to a program is granted when the program is free, or when the
//! caller holds an entitlement matching the program directly or carrying
//! the subscriber flag. Read-only; callers decide how to degrade on store
//! failure (the API layer fails closed).

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::Result;
use crate::models::{Identity, Program};

/// Decide whether a caller may view a program.
///
/// The free-program check runs first and short-circuits every lookup for
/// the caller's identity, so anonymous viewers reach free content without
/// touching the entitlements table. A program id with no catalog row yields
/// no access.
pub async fn has_access(
    pool: &SqlitePool,
    identity: Identity,
    program_id: Uuid,
) -> Result<bool> {
    let program = db::programs::get_program(pool, program_id).await?;
    match program {
        Some(Program { is_free: true, .. }) => return Ok(true),
        Some(_) => {}
        None => return Ok(false),
    }

    let Some(user_id) = identity.user_id() else {
        return Ok(false);
    };

    db::entitlements::grant_exists(pool, user_id, program_id).await
}

/// Programs visible in the catalog listing, newest first.
///
/// Anonymous callers see only free programs; authenticated callers see the
/// full catalog (per-exercise playback is still gated by `has_access`).
pub async fn visible_programs(pool: &SqlitePool, identity: Identity) -> Result<Vec<Program>> {
    match identity {
        Identity::Anonymous => db::programs::list_free_programs(pool).await,
        Identity::User(_) => db::programs::list_programs(pool).await,
    }
}
