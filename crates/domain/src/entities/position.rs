use crate::ids::AssetId;
use serde::{Deserialize, Serialize};

/// A single time-locked deposit. An all-zero record means the position does
/// not exist; callers must treat `amount == 0` as absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockPosition {
    /// Deposited amount in asset units (never vault shares).
    pub amount: u128,
    /// Requested lock duration in seconds.
    pub lock_duration: u64,
    /// Unix timestamp of creation.
    pub lock_time: u64,
    /// Asset id of the pool at lock time. Immutable snapshot; the pool may be
    /// unregistered later without invalidating this key.
    pub asset_id: AssetId,
}

impl LockPosition {
    #[must_use]
    pub fn new(amount: u128, lock_duration: u64, lock_time: u64, asset_id: AssetId) -> Self {
        Self {
            amount,
            lock_duration,
            lock_time,
            asset_id,
        }
    }

    /// Whether a live position is recorded here.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.amount != 0
    }

    /// First instant at which the position may be unlocked.
    #[must_use]
    pub fn expiry(&self) -> u64 {
        self.lock_time.saturating_add(self.lock_duration)
    }

    /// Expiry boundary is inclusive: a 10 second lock opened at t is
    /// unlockable starting exactly at t + 10.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_position_is_all_zero() {
        let position = LockPosition::default();
        assert!(!position.exists());
        assert_eq!(position.amount, 0);
        assert_eq!(position.lock_duration, 0);
        assert_eq!(position.lock_time, 0);
        assert_eq!(position.asset_id, AssetId::ZERO);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let position = LockPosition::new(100, 10, 1_000, AssetId(7));
        assert_eq!(position.expiry(), 1_010);
        assert!(!position.is_expired(1_009));
        assert!(position.is_expired(1_010));
        assert!(position.is_expired(1_011));
    }
}
