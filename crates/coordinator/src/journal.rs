//! Append-only journal of ledger events.

use timelock_lp_domain::events::{
    EventData, LedgerEvent, LedgerEventType, PoolRegisteredData, PoolUnregisteredData,
    PositionCreatedData, PositionReleasedData,
};
use timelock_lp_domain::ids::{Address, AssetId};
use tokio::sync::RwLock;
use tracing::info;

/// Records every ledger event in order of commit.
#[derive(Debug, Default)]
pub struct EventJournal {
    events: RwLock<Vec<LedgerEvent>>,
}

impl EventJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pool registration.
    pub async fn record_pool_registered(&self, pool: Address, asset_id: AssetId) {
        info!(pool = %pool, asset_id = %asset_id, "Singularity registered");
        self.append(LedgerEvent::new(
            LedgerEventType::PoolRegistered,
            EventData::PoolRegistered(PoolRegisteredData { pool, asset_id }),
        ))
        .await;
    }

    /// Records a pool unregistration.
    pub async fn record_pool_unregistered(&self, pool: Address, asset_id: AssetId) {
        info!(pool = %pool, asset_id = %asset_id, "Singularity unregistered");
        self.append(LedgerEvent::new(
            LedgerEventType::PoolUnregistered,
            EventData::PoolUnregistered(PoolUnregisteredData { pool, asset_id }),
        ))
        .await;
    }

    /// Records a position creation.
    pub async fn record_position_created(&self, data: PositionCreatedData) {
        info!(
            recipient = %data.recipient,
            asset_id = %data.asset_id,
            position_id = %data.position_id,
            amount = data.amount,
            lock_duration = data.lock_duration,
            "Position created"
        );
        self.append(LedgerEvent::new(
            LedgerEventType::PositionCreated,
            EventData::PositionCreated(data),
        ))
        .await;
    }

    /// Records a position release.
    pub async fn record_position_released(&self, data: PositionReleasedData) {
        info!(
            recipient = %data.recipient,
            asset_id = %data.asset_id,
            position_id = %data.position_id,
            amount = data.amount,
            "Position released"
        );
        self.append(LedgerEvent::new(
            LedgerEventType::PositionReleased,
            EventData::PositionReleased(data),
        ))
        .await;
    }

    /// All recorded events in commit order.
    pub async fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().await.clone()
    }

    /// Recorded events of one type, in commit order.
    pub async fn events_of(&self, event_type: LedgerEventType) -> Vec<LedgerEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether no event has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    async fn append(&self, event: LedgerEvent) {
        self.events.write().await.push(event);
    }
}
