//! Lock position store keyed by position id.

use std::collections::HashMap;
use timelock_lp_domain::entities::LockPosition;
use timelock_lp_domain::ids::PositionId;

/// Stores lock positions. Ids are allocated externally; the store only
/// records and clears state.
///
/// A missing id reads back as an all-zero position, mirroring the external
/// zero-as-absence contract. `lookup` gives the explicit optional for
/// internal callers.
#[derive(Debug, Default)]
pub struct PositionLedger {
    positions: HashMap<PositionId, LockPosition>,
}

impl PositionLedger {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new position. The id must be fresh; the position registry is
    /// authoritative for id uniqueness.
    pub fn create(&mut self, id: PositionId, position: LockPosition) {
        debug_assert!(
            !self.positions.get(&id).is_some_and(LockPosition::exists),
            "position id reused while a live record exists"
        );
        self.positions.insert(id, position);
    }

    /// Reads the position at `id`; all-zero when absent.
    #[must_use]
    pub fn get(&self, id: PositionId) -> LockPosition {
        self.positions.get(&id).copied().unwrap_or_default()
    }

    /// Explicit-optional read for internal callers.
    #[must_use]
    pub fn lookup(&self, id: PositionId) -> Option<&LockPosition> {
        self.positions.get(&id)
    }

    /// Zeroes the record at `id`. Idempotent.
    pub fn clear(&mut self, id: PositionId) {
        self.positions.remove(&id);
    }

    /// Number of live positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over live positions.
    pub fn iter(&self) -> impl Iterator<Item = (&PositionId, &LockPosition)> {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timelock_lp_domain::ids::AssetId;

    #[test]
    fn test_missing_position_reads_back_zeroed() {
        let ledger = PositionLedger::new();
        let position = ledger.get(PositionId(42));

        assert_eq!(position.amount, 0);
        assert_eq!(position.lock_duration, 0);
        assert_eq!(position.lock_time, 0);
        assert!(ledger.lookup(PositionId(42)).is_none());
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let mut ledger = PositionLedger::new();
        let position = LockPosition::new(100_000_000, 10, 1_000, AssetId(7));
        ledger.create(PositionId(0), position);

        assert_eq!(ledger.get(PositionId(0)), position);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.iter().count(), 1);
    }

    #[test]
    fn test_clear_zeroes_and_is_idempotent() {
        let mut ledger = PositionLedger::new();
        ledger.create(PositionId(0), LockPosition::new(1, 1, 1, AssetId(1)));

        ledger.clear(PositionId(0));
        assert!(!ledger.get(PositionId(0)).exists());

        ledger.clear(PositionId(0));
        assert!(ledger.is_empty());
    }
}
