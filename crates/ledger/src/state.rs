//! Composition of the two ledger stores.

use crate::{PoolRegistry, PositionLedger};

/// The full ledger state. Guarded by a single writer lock in concurrent
/// hosts so that pool lookup, position mutation and accounting form one
/// critical section.
#[derive(Debug, Default)]
pub struct LedgerState {
    /// Approved singularity pools.
    pub registry: PoolRegistry,
    /// Lock positions keyed by position id.
    pub positions: PositionLedger,
}

impl LedgerState {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
