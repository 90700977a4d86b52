//! Registry of approved singularity pools.

use std::collections::HashMap;
use timelock_lp_domain::entities::SingularityPool;
use timelock_lp_domain::error::LedgerError;
use timelock_lp_domain::ids::{Address, AssetId};
use tracing::debug;

/// Maintains the set of approved pools and their deposit accounting.
///
/// The active asset id list preserves registration order net of removals, so
/// readers observe the ids in the order the pools were approved.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<Address, SingularityPool>,
    active_asset_ids: Vec<AssetId>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool under the given asset id.
    ///
    /// Fails with `AlreadyRegistered` if the address already has an active
    /// entry, or if another active pool holds the same asset id (at most one
    /// pool per asset id at any time).
    pub fn register(&mut self, address: Address, asset_id: AssetId) -> Result<(), LedgerError> {
        if self.pools.contains_key(&address) || self.active_asset_ids.contains(&asset_id) {
            return Err(LedgerError::AlreadyRegistered);
        }

        self.active_asset_ids.push(asset_id);
        self.pools
            .insert(address.clone(), SingularityPool::new(address.clone(), asset_id));

        debug!(pool = %address, asset_id = %asset_id, "pool registered");
        Ok(())
    }

    /// Unregisters the pool at the given address, returning its asset id.
    ///
    /// Outstanding positions keep their snapshot asset id; their unlocks fail
    /// the pool-match check until a pool with the same asset id is registered
    /// at this address again.
    pub fn unregister(&mut self, address: &Address) -> Result<AssetId, LedgerError> {
        let pool = self
            .pools
            .remove(address)
            .ok_or(LedgerError::NotRegistered)?;

        // Stable removal: relative order of the remaining ids is observable.
        self.active_asset_ids.retain(|id| *id != pool.asset_id);

        debug!(pool = %address, asset_id = %pool.asset_id, "pool unregistered");
        Ok(pool.asset_id)
    }

    /// Active asset ids in registration order, net of removals.
    #[must_use]
    pub fn active_asset_ids(&self) -> &[AssetId] {
        &self.active_asset_ids
    }

    /// The pool registered at `address`, if any.
    #[must_use]
    pub fn pool_of(&self, address: &Address) -> Option<&SingularityPool> {
        self.pools.get(address)
    }

    /// Number of active pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Adds `delta` to the pool's total deposited amount.
    pub fn accumulate(&mut self, address: &Address, delta: u128) -> Result<(), LedgerError> {
        let pool = self
            .pools
            .get_mut(address)
            .ok_or(LedgerError::PoolNotActive)?;
        pool.total_deposited += delta;
        Ok(())
    }

    /// Subtracts `amount` from the pool's total deposited amount.
    ///
    /// Fails with `AccountingUnderflow` before mutating if the pool's total
    /// is smaller than `amount`.
    pub fn release(&mut self, address: &Address, amount: u128) -> Result<(), LedgerError> {
        let pool = self
            .pools
            .get_mut(address)
            .ok_or(LedgerError::PoolNotActive)?;
        pool.total_deposited = pool
            .total_deposited
            .checked_sub(amount)
            .ok_or(LedgerError::AccountingUnderflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(name: &str) -> Address {
        Address::from(name)
    }

    #[test]
    fn test_register_tracks_asset_ids_in_order() {
        let mut registry = PoolRegistry::new();
        assert!(registry.active_asset_ids().is_empty());

        registry.register(pool("sgl-a"), AssetId(7)).unwrap();
        registry.register(pool("sgl-b"), AssetId(8)).unwrap();
        registry.register(pool("sgl-c"), AssetId(9)).unwrap();

        assert_eq!(
            registry.active_asset_ids(),
            &[AssetId(7), AssetId(8), AssetId(9)]
        );
        assert_eq!(registry.pool_of(&pool("sgl-b")).unwrap().asset_id, AssetId(8));
        assert_eq!(registry.pool_of(&pool("sgl-b")).unwrap().total_deposited, 0);
    }

    #[test]
    fn test_register_duplicate_address_fails() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();

        assert_eq!(
            registry.register(pool("sgl-a"), AssetId(8)),
            Err(LedgerError::AlreadyRegistered)
        );
    }

    #[test]
    fn test_register_duplicate_asset_id_fails() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();

        assert_eq!(
            registry.register(pool("sgl-b"), AssetId(7)),
            Err(LedgerError::AlreadyRegistered)
        );
    }

    #[test]
    fn test_unregister_preserves_order_of_survivors() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();
        registry.register(pool("sgl-b"), AssetId(8)).unwrap();
        registry.register(pool("sgl-c"), AssetId(9)).unwrap();

        let removed = registry.unregister(&pool("sgl-b")).unwrap();
        assert_eq!(removed, AssetId(8));
        assert_eq!(registry.active_asset_ids(), &[AssetId(7), AssetId(9)]);
        assert!(registry.pool_of(&pool("sgl-b")).is_none());
    }

    #[test]
    fn test_unregister_twice_fails_and_leaves_state_unchanged() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();
        registry.register(pool("sgl-b"), AssetId(8)).unwrap();

        registry.unregister(&pool("sgl-a")).unwrap();
        assert_eq!(
            registry.unregister(&pool("sgl-a")),
            Err(LedgerError::NotRegistered)
        );
        assert_eq!(registry.active_asset_ids(), &[AssetId(8)]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_asset_id_can_be_reused_after_unregistration() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();
        registry.unregister(&pool("sgl-a")).unwrap();

        registry.register(pool("sgl-b"), AssetId(7)).unwrap();
        assert_eq!(registry.active_asset_ids(), &[AssetId(7)]);
    }

    #[test]
    fn test_accumulate_and_release_accounting() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();

        registry.accumulate(&pool("sgl-a"), 100_000_000).unwrap();
        registry.accumulate(&pool("sgl-a"), 50).unwrap();
        assert_eq!(
            registry.pool_of(&pool("sgl-a")).unwrap().total_deposited,
            100_000_050
        );

        registry.release(&pool("sgl-a"), 100_000_000).unwrap();
        assert_eq!(registry.pool_of(&pool("sgl-a")).unwrap().total_deposited, 50);
    }

    #[test]
    fn test_release_underflow_fails_without_mutating() {
        let mut registry = PoolRegistry::new();
        registry.register(pool("sgl-a"), AssetId(7)).unwrap();
        registry.accumulate(&pool("sgl-a"), 100).unwrap();

        assert_eq!(
            registry.release(&pool("sgl-a"), 101),
            Err(LedgerError::AccountingUnderflow)
        );
        assert_eq!(registry.pool_of(&pool("sgl-a")).unwrap().total_deposited, 100);
    }

    #[test]
    fn test_accounting_on_unknown_pool_fails() {
        let mut registry = PoolRegistry::new();
        assert_eq!(
            registry.accumulate(&pool("sgl-a"), 1),
            Err(LedgerError::PoolNotActive)
        );
        assert_eq!(
            registry.release(&pool("sgl-a"), 1),
            Err(LedgerError::PoolNotActive)
        );
    }
}
