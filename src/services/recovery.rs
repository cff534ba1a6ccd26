//! Purchase recovery
//!
//! When a payment went through but the entitlement row was never written
//! (webhook lost, app closed mid-checkout), the user can ask for their
//! purchase to be re-verified. The recovery path consults the authoritative
//! payment ledger and re-creates the missing grant.
//!
//! Every outcome is a value; no error crosses this component's boundary.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::Result;
use crate::models::{Identity, PaymentRecord, RecoveryOutcome};

/// Authoritative payment ledger lookup.
///
/// Implemented by the payment-provider integration; tests use an in-memory
/// fake. A `None` result means no completed payment is on record for the
/// pair.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    async fn find_completed_payment(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> Result<Option<PaymentRecord>>;
}

/// Ledger stand-in for deployments without a payment-provider integration.
/// Never reports a payment, so recovery always routes users to support.
pub struct NullLedger;

#[async_trait]
impl PaymentLedger for NullLedger {
    async fn find_completed_payment(
        &self,
        _user_id: Uuid,
        _program_id: Uuid,
    ) -> Result<Option<PaymentRecord>> {
        Ok(None)
    }
}

/// Verify a purchase and recover the entitlement if the ledger confirms it.
///
/// Idempotent: repeated calls for the same (user, program) never create a
/// second grant, whether the grant came from checkout or a prior recovery.
pub async fn verify_purchase(
    pool: &SqlitePool,
    ledger: &dyn PaymentLedger,
    identity: Identity,
    program_id: Uuid,
    support_contact: &str,
) -> RecoveryOutcome {
    let Some(user_id) = identity.user_id() else {
        return RecoveryOutcome::failure("Bitte melde dich zuerst an.");
    };

    match try_verify(pool, ledger, user_id, program_id, support_contact).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(%user_id, %program_id, error = %err, "Purchase verification failed");
            RecoveryOutcome::failure(
                "Die Überprüfung ist fehlgeschlagen. Bitte versuche es später erneut.",
            )
        }
    }
}

async fn try_verify(
    pool: &SqlitePool,
    ledger: &dyn PaymentLedger,
    user_id: Uuid,
    program_id: Uuid,
    support_contact: &str,
) -> Result<RecoveryOutcome> {
    if db::entitlements::find_program_grant(pool, user_id, program_id)
        .await?
        .is_some()
    {
        return Ok(RecoveryOutcome::success(
            "Du hast bereits Zugriff auf dieses Programm!",
        ));
    }

    if let Some(payment) = ledger.find_completed_payment(user_id, program_id).await? {
        let inserted = db::entitlements::insert_program_grant(pool, user_id, program_id).await?;
        tracing::info!(
            %user_id, %program_id,
            amount_cents = payment.amount_cents,
            newly_granted = inserted,
            "Recovered entitlement from payment ledger"
        );
        return Ok(RecoveryOutcome::success(
            "Dein Kauf wurde bestätigt. Viel Spaß beim Training!",
        ));
    }

    Ok(RecoveryOutcome::failure(
        "Kein Kauf gefunden. Bitte kontaktiere unseren Support für Hilfe.",
    )
    .with_support_contact(support_contact))
}
