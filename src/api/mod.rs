//! HTTP boundary for the presentation layer
//!
//! The mobile app talks JSON to these routes. Identity is resolved per
//! request from the bearer session token; the core never reads ambient
//! session state.

pub mod catalog;
pub mod entitlements;
pub mod health;
pub mod identity;
pub mod progress;

pub use catalog::catalog_routes;
pub use entitlements::entitlement_routes;
pub use health::health_routes;
pub use identity::CurrentIdentity;
pub use progress::progress_routes;
