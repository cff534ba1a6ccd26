//! Business logic for the entitlement and progress subsystem
//!
//! Three components: access resolution (who may view what), purchase
//! recovery (re-deriving a missing entitlement from the payment ledger),
//! and playback progress tracking.

pub mod access;
pub mod playback;
pub mod recovery;
