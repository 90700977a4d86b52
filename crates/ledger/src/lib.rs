//! Owned state stores for the locking ledger.
//!
//! Two stores with exclusive mutation through `&mut self`:
//! - `PoolRegistry`: the set of approved singularity pools and their
//!   aggregate deposit accounting
//! - `PositionLedger`: lock positions keyed by position id
//!
//! No ambient global state; callers own the stores and decide the
//! mutual-exclusion discipline around them.

/// Lock position store.
pub mod positions;
/// Singularity pool registry.
pub mod registry;
/// Composition of both stores.
pub mod state;

pub use positions::PositionLedger;
pub use registry::PoolRegistry;
pub use state::LedgerState;
