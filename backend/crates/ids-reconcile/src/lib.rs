//! Applies decoded identity events to the local user store and mirrors the
//! committed role back to the provider.

mod outcome;
mod reconciler;

pub use outcome::{ReconcileOutcome, RoleSyncStatus};
pub use reconciler::Reconciler;
