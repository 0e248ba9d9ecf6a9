//! Seams between the reconciliation engine and the outside world.

pub mod match_key;
pub mod role_sync;
pub mod user_store;
