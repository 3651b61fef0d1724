//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the evaluation core and the host process. The host persists profiles,
//! decisions, and feedback; the core only reads and returns them through
//! these traits. Adapters implement the ports.

mod decision_store;
mod profile_store;

pub use decision_store::DecisionStore;
pub use profile_store::ProfileStore;

use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// The core has no retry semantics; these propagate to the host as-is.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored record is corrupted: {0}")]
    Corrupted(String),
}
