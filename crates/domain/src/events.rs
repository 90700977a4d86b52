//! Ledger events for pool and position observability.

use crate::ids::{Address, AssetId, PositionId};
use serde::{Deserialize, Serialize};

/// Type of ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEventType {
    /// A singularity pool was registered.
    PoolRegistered,
    /// A singularity pool was unregistered.
    PoolUnregistered,
    /// A lock position was created.
    PositionCreated,
    /// A lock position was released.
    PositionReleased,
}

/// A recorded ledger event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Event ID.
    pub id: String,
    /// Event type.
    pub event_type: LedgerEventType,
    /// Timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Event-specific data.
    pub data: EventData,
}

impl LedgerEvent {
    /// Creates a new ledger event.
    #[must_use]
    pub fn new(event_type: LedgerEventType, data: EventData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type,
            timestamp: chrono::Utc::now(),
            data,
        }
    }
}

/// Event-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventData {
    /// Pool registered data.
    PoolRegistered(PoolRegisteredData),
    /// Pool unregistered data.
    PoolUnregistered(PoolUnregisteredData),
    /// Position created data.
    PositionCreated(PositionCreatedData),
    /// Position released data.
    PositionReleased(PositionReleasedData),
}

/// Data for a pool registration event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRegisteredData {
    /// Pool address.
    pub pool: Address,
    /// Asset id assigned by the vault.
    pub asset_id: AssetId,
}

/// Data for a pool unregistration event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolUnregisteredData {
    /// Pool address.
    pub pool: Address,
    /// Asset id the pool was registered under.
    pub asset_id: AssetId,
}

/// Data for a position creation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionCreatedData {
    /// Recipient the position was minted to.
    pub recipient: Address,
    /// Asset id of the pool.
    pub asset_id: AssetId,
    /// The new position id.
    pub position_id: PositionId,
    /// Locked amount in asset units.
    pub amount: u128,
    /// Lock duration in seconds.
    pub lock_duration: u64,
    /// Lock creation timestamp.
    pub lock_time: u64,
}

/// Data for a position release event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionReleasedData {
    /// Recipient the value was released to.
    pub recipient: Address,
    /// Asset id of the pool.
    pub asset_id: AssetId,
    /// The released position id.
    pub position_id: PositionId,
    /// Released amount in asset units.
    pub amount: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_event_creation() {
        let event = LedgerEvent::new(
            LedgerEventType::PositionCreated,
            EventData::PositionCreated(PositionCreatedData {
                recipient: Address::from("depositor"),
                asset_id: AssetId(7),
                position_id: PositionId(0),
                amount: 100_000_000,
                lock_duration: 10,
                lock_time: 1_000,
            }),
        );

        assert_eq!(event.event_type, LedgerEventType::PositionCreated);
        assert!(!event.id.is_empty());
    }
}
