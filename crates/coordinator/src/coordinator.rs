//! Create-lock and release-lock workflow orchestration.
//!
//! The coordinator validates inputs and pool status, moves value through the
//! vault, asks the position registry for unique ids, and keeps the ledger
//! stores consistent. Every multi-step workflow holds the ledger writer lock
//! for its whole duration, so pool lookup, custody movement and accounting
//! update form one critical section.

use crate::admin::AdminGate;
use crate::clock::Clock;
use crate::custody::Vault;
use crate::error::CoordinatorError;
use crate::journal::EventJournal;
use crate::tokens::PositionTokens;
use std::sync::Arc;
use timelock_lp_domain::entities::{LockPosition, SingularityPool};
use timelock_lp_domain::error::LedgerError;
use timelock_lp_domain::events::{PositionCreatedData, PositionReleasedData};
use timelock_lp_domain::ids::{Address, AssetId, PositionId};
use timelock_lp_ledger::LedgerState;
use tokio::sync::RwLock;
use tracing::debug;

/// Orchestrates the locking ledger workflows.
pub struct LockCoordinator {
    /// Pool registry and position store under a single writer lock.
    state: Arc<RwLock<LedgerState>>,
    /// External custody and share accounting.
    vault: Arc<dyn Vault>,
    /// External unique-id issuance and ownership tracking.
    tokens: Arc<dyn PositionTokens>,
    /// Administrator capability gate.
    admin: Arc<dyn AdminGate>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Recorded events.
    journal: EventJournal,
    /// Custody account owned by the coordinator itself.
    custodian: Address,
}

impl LockCoordinator {
    /// Creates a coordinator over an empty ledger.
    #[must_use]
    pub fn new(
        custodian: Address,
        vault: Arc<dyn Vault>,
        tokens: Arc<dyn PositionTokens>,
        admin: Arc<dyn AdminGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::new())),
            vault,
            tokens,
            admin,
            clock,
            journal: EventJournal::new(),
            custodian,
        }
    }

    /// Registers a singularity pool under the given asset id.
    /// Administrator only.
    pub async fn register_singularity(
        &self,
        caller: &Address,
        pool: Address,
        asset_id: AssetId,
    ) -> Result<(), CoordinatorError> {
        if !self.admin.is_administrator(caller) {
            return Err(LedgerError::Unauthorized.into());
        }

        let mut state = self.state.write().await;
        state.registry.register(pool.clone(), asset_id)?;
        self.journal.record_pool_registered(pool, asset_id).await;
        Ok(())
    }

    /// Unregisters the pool at `pool`. Administrator only.
    ///
    /// Unregistration is permitted with outstanding locked positions; those
    /// positions keep their snapshot asset id and unlock only once a pool
    /// with the same asset id is registered at this address again.
    pub async fn unregister_singularity(
        &self,
        caller: &Address,
        pool: &Address,
    ) -> Result<(), CoordinatorError> {
        if !self.admin.is_administrator(caller) {
            return Err(LedgerError::Unauthorized.into());
        }

        let mut state = self.state.write().await;
        let asset_id = state.registry.unregister(pool)?;
        self.journal
            .record_pool_unregistered(pool.clone(), asset_id)
            .await;
        Ok(())
    }

    /// Active singularity asset ids in registration order, net of removals.
    pub async fn singularities(&self) -> Vec<AssetId> {
        self.state.read().await.registry.active_asset_ids().to_vec()
    }

    /// The pool record at `pool`; all-zero when not registered.
    pub async fn singularity_of(&self, pool: &Address) -> SingularityPool {
        self.state
            .read()
            .await
            .registry
            .pool_of(pool)
            .cloned()
            .unwrap_or_default()
    }

    /// The position at `id`; all-zero when it does not exist.
    pub async fn position(&self, id: PositionId) -> LockPosition {
        self.state.read().await.positions.get(id)
    }

    /// Total position ids minted so far.
    pub async fn minted_positions(&self) -> u64 {
        self.tokens.minted().await
    }

    /// Recorded events.
    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Converts `amount` of `depositor`'s pool deposit into a time-locked
    /// position minted to `recipient`. Returns the new position id.
    ///
    /// All-or-nothing: ledger mutations happen only after every fallible
    /// external call has succeeded, and a mint failure after a successful
    /// deposit hands custody back to the depositor before surfacing the
    /// error.
    pub async fn lock(
        &self,
        depositor: &Address,
        recipient: &Address,
        pool: &Address,
        lock_duration: u64,
        amount: u128,
    ) -> Result<PositionId, CoordinatorError> {
        if lock_duration == 0 {
            return Err(LedgerError::InvalidDuration.into());
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount.into());
        }

        let mut state = self.state.write().await;
        let asset_id = state
            .registry
            .pool_of(pool)
            .map(|p| p.asset_id)
            .ok_or(LedgerError::PoolNotActive)?;

        let shares = self
            .vault
            .deposit(asset_id, depositor, &self.custodian, amount, 0)
            .await?;

        let position_id = match self.tokens.mint(recipient).await {
            Ok(id) => id,
            Err(err) => {
                self.vault
                    .transfer(&self.custodian, depositor, asset_id, shares)
                    .await?;
                return Err(err.into());
            }
        };

        let lock_time = self.clock.now();
        state.positions.create(
            position_id,
            LockPosition::new(amount, lock_duration, lock_time, asset_id),
        );
        state.registry.accumulate(pool, amount)?;

        debug!(
            depositor = %depositor,
            pool = %pool,
            position_id = %position_id,
            shares,
            "lock committed"
        );
        self.journal
            .record_position_created(PositionCreatedData {
                recipient: recipient.clone(),
                asset_id,
                position_id,
                amount,
                lock_duration,
                lock_time,
            })
            .await;
        Ok(position_id)
    }

    /// Releases an expired position: burns its id, clears the ledger entry
    /// and pays the underlying value out to `recipient`.
    ///
    /// The custody transfer runs before any state mutation, so a vault
    /// failure aborts with nothing changed.
    pub async fn unlock(
        &self,
        caller: &Address,
        position_id: PositionId,
        pool: &Address,
        recipient: &Address,
    ) -> Result<(), CoordinatorError> {
        let mut state = self.state.write().await;

        let position = state.positions.get(position_id);
        if !position.exists() {
            return Err(LedgerError::PositionNotFound.into());
        }

        if !position.is_expired(self.clock.now()) {
            return Err(LedgerError::LockNotExpired.into());
        }

        // The pool currently registered at this address must carry the
        // position's snapshot asset id; an absent pool reads as zero and
        // fails the same way.
        let pool_asset = state
            .registry
            .pool_of(pool)
            .map(|p| p.asset_id)
            .unwrap_or_default();
        if pool_asset != position.asset_id {
            return Err(LedgerError::PoolMismatch.into());
        }

        if !self.tokens.is_owner_or_approved(caller, position_id).await? {
            return Err(LedgerError::Unauthorized.into());
        }

        let total = state
            .registry
            .pool_of(pool)
            .map(|p| p.total_deposited)
            .unwrap_or_default();
        if total < position.amount {
            return Err(LedgerError::AccountingUnderflow.into());
        }

        let shares = self
            .vault
            .to_share(position.asset_id, position.amount, false)
            .await?;
        self.vault
            .transfer(&self.custodian, recipient, position.asset_id, shares)
            .await?;

        // Unreachable after the ownership check; pull the shares back rather
        // than leave a half-released position.
        if let Err(err) = self.tokens.burn(position_id).await {
            self.vault
                .transfer(recipient, &self.custodian, position.asset_id, shares)
                .await?;
            return Err(err.into());
        }

        state.positions.clear(position_id);
        state.registry.release(pool, position.amount)?;

        debug!(
            caller = %caller,
            pool = %pool,
            position_id = %position_id,
            shares,
            "unlock committed"
        );
        self.journal
            .record_position_released(PositionReleasedData {
                recipient: recipient.clone(),
                asset_id: position.asset_id,
                position_id,
                amount: position.amount,
            })
            .await;
        Ok(())
    }
}
