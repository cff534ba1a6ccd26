//! Domain models
//!
//! Catalog rows (programs, exercises) are read-only from this service;
//! entitlements and progress records are the state it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller identity, resolved by the boundary layer.
///
/// Every core operation takes this explicitly; there is no ambient
/// "current user" state inside the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(Uuid),
}

impl Identity {
    /// User id when authenticated, None for anonymous callers
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Identity::Anonymous => None,
            Identity::User(id) => Some(*id),
        }
    }
}

/// A purchasable (or free) training program
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Program {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Universal bypass flag: free programs are viewable by anyone,
    /// including anonymous callers
    pub is_free: bool,
    pub price_cents: i64,
    pub exercise_count: i64,
    pub duration_minutes: i64,
    pub created_at: DateTime<Utc>,
}

/// A single video exercise within a program
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub program_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Canonical ordering within the program (ties broken by insertion order)
    pub sort_order: i64,
    pub duration_seconds: i64,
    /// None means "not playable"
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A grant permitting a user to view one program, or every program when
/// `is_subscriber` is set (in which case `program_id` is None).
///
/// Entitlements are never mutated once created; refunds and cancellations
/// are handled outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entitlement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub program_id: Option<Uuid>,
    pub is_subscriber: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-user, per-exercise playback checkpoint. At most one row per
/// (user_id, exercise_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub exercise_id: Uuid,
    pub last_position_seconds: i64,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// An entitlement joined with the program it grants, as served to the
/// "my content" listing. `program` is None for subscriber-wide grants.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementWithProgram {
    pub entitlement: Entitlement,
    pub program: Option<Program>,
}

/// User-facing outcome of a purchase recovery attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_contact: Option<String>,
}

impl RecoveryOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            support_contact: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            support_contact: None,
        }
    }

    pub fn with_support_contact(mut self, contact: impl Into<String>) -> Self {
        self.support_contact = Some(contact.into());
        self
    }
}

/// Authoritative record of a completed payment, as reported by the
/// external payment ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub user_id: Uuid,
    pub program_id: Uuid,
    pub amount_cents: i64,
    pub paid_at: DateTime<Utc>,
}
