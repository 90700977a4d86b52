//! Vault custody seam and in-memory implementation.
//!
//! The vault custodies assets and converts raw amounts to shares. The
//! coordinator consumes it through this narrow interface; the ledger itself
//! always stores amounts, never shares.

use crate::error::CustodyError;
use async_trait::async_trait;
use std::collections::HashMap;
use timelock_lp_domain::ids::{Address, AssetId};
use tokio::sync::RwLock;
use tracing::debug;

/// External custody and share accounting service.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Moves `amount` asset units from `payer` into `beneficiary` custody.
    /// Returns the shares credited; fails if they fall below
    /// `min_shares_out`.
    async fn deposit(
        &self,
        asset_id: AssetId,
        payer: &Address,
        beneficiary: &Address,
        amount: u128,
        min_shares_out: u128,
    ) -> Result<u128, CustodyError>;

    /// Transfers `shares` of `asset_id` between custody accounts.
    async fn transfer(
        &self,
        from: &Address,
        to: &Address,
        asset_id: AssetId,
        shares: u128,
    ) -> Result<(), CustodyError>;

    /// Share balance held by `holder` for `asset_id`.
    async fn balance_of(&self, holder: &Address, asset_id: AssetId) -> u128;

    /// Converts an amount of `asset_id` to shares at the current rate.
    async fn to_share(
        &self,
        asset_id: AssetId,
        amount: u128,
        round_up: bool,
    ) -> Result<u128, CustodyError>;
}

/// Amount-to-share conversion rate for one asset.
#[derive(Debug, Clone, Copy)]
struct ShareRate {
    numerator: u128,
    denominator: u128,
}

impl ShareRate {
    fn to_share(self, amount: u128, round_up: bool) -> u128 {
        let scaled = amount * self.numerator;
        if round_up {
            scaled.div_ceil(self.denominator)
        } else {
            scaled / self.denominator
        }
    }
}

#[derive(Debug, Default)]
struct VaultState {
    assets: HashMap<AssetId, ShareRate>,
    /// Share balances keyed by holder and asset.
    balances: HashMap<(Address, AssetId), u128>,
}

/// In-memory vault with per-asset share rates.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    inner: RwLock<VaultState>,
}

impl InMemoryVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset at a 1:1 amount-to-share rate.
    pub async fn register_asset(&self, asset_id: AssetId) {
        self.register_asset_with_rate(asset_id, 1, 1).await;
    }

    /// Registers an asset converting at `numerator / denominator` shares per
    /// unit.
    pub async fn register_asset_with_rate(
        &self,
        asset_id: AssetId,
        numerator: u128,
        denominator: u128,
    ) {
        assert!(denominator > 0, "share rate denominator must be non-zero");
        let mut state = self.inner.write().await;
        state.assets.insert(
            asset_id,
            ShareRate {
                numerator,
                denominator,
            },
        );
    }

    /// Mints free balance into `holder`'s custody. Fixture helper standing in
    /// for an upstream token deposit.
    pub async fn credit(
        &self,
        holder: &Address,
        asset_id: AssetId,
        amount: u128,
    ) -> Result<u128, CustodyError> {
        let mut state = self.inner.write().await;
        let rate = *state
            .assets
            .get(&asset_id)
            .ok_or(CustodyError::UnknownAsset(asset_id))?;
        let shares = rate.to_share(amount, false);
        *state
            .balances
            .entry((holder.clone(), asset_id))
            .or_default() += shares;
        Ok(shares)
    }
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn deposit(
        &self,
        asset_id: AssetId,
        payer: &Address,
        beneficiary: &Address,
        amount: u128,
        min_shares_out: u128,
    ) -> Result<u128, CustodyError> {
        let mut state = self.inner.write().await;
        let rate = *state
            .assets
            .get(&asset_id)
            .ok_or(CustodyError::UnknownAsset(asset_id))?;

        let shares = rate.to_share(amount, false);
        if shares < min_shares_out {
            return Err(CustodyError::SlippageExceeded);
        }

        let payer_key = (payer.clone(), asset_id);
        let payer_balance = state.balances.get(&payer_key).copied().unwrap_or(0);
        let remaining = payer_balance
            .checked_sub(shares)
            .ok_or(CustodyError::InsufficientBalance)?;
        state.balances.insert(payer_key, remaining);
        *state
            .balances
            .entry((beneficiary.clone(), asset_id))
            .or_default() += shares;

        debug!(asset_id = %asset_id, payer = %payer, beneficiary = %beneficiary, shares, "deposit");
        Ok(shares)
    }

    async fn transfer(
        &self,
        from: &Address,
        to: &Address,
        asset_id: AssetId,
        shares: u128,
    ) -> Result<(), CustodyError> {
        let mut state = self.inner.write().await;
        if !state.assets.contains_key(&asset_id) {
            return Err(CustodyError::UnknownAsset(asset_id));
        }

        let from_key = (from.clone(), asset_id);
        let from_balance = state.balances.get(&from_key).copied().unwrap_or(0);
        let remaining = from_balance
            .checked_sub(shares)
            .ok_or(CustodyError::InsufficientBalance)?;
        state.balances.insert(from_key, remaining);
        *state.balances.entry((to.clone(), asset_id)).or_default() += shares;

        debug!(asset_id = %asset_id, from = %from, to = %to, shares, "transfer");
        Ok(())
    }

    async fn balance_of(&self, holder: &Address, asset_id: AssetId) -> u128 {
        let state = self.inner.read().await;
        state
            .balances
            .get(&(holder.clone(), asset_id))
            .copied()
            .unwrap_or(0)
    }

    async fn to_share(
        &self,
        asset_id: AssetId,
        amount: u128,
        round_up: bool,
    ) -> Result<u128, CustodyError> {
        let state = self.inner.read().await;
        let rate = state
            .assets
            .get(&asset_id)
            .ok_or(CustodyError::UnknownAsset(asset_id))?;
        Ok(rate.to_share(amount, round_up))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deposit_moves_custody_between_accounts() {
        let vault = InMemoryVault::new();
        let payer = Address::from("depositor");
        let custodian = Address::from("coordinator");
        vault.register_asset(AssetId(7)).await;
        vault.credit(&payer, AssetId(7), 100_000_000).await.unwrap();

        let shares = vault
            .deposit(AssetId(7), &payer, &custodian, 100_000_000, 0)
            .await
            .unwrap();

        assert_eq!(shares, 100_000_000);
        assert_eq!(vault.balance_of(&payer, AssetId(7)).await, 0);
        assert_eq!(vault.balance_of(&custodian, AssetId(7)).await, 100_000_000);
    }

    #[tokio::test]
    async fn test_deposit_fails_on_insufficient_balance() {
        let vault = InMemoryVault::new();
        let payer = Address::from("depositor");
        vault.register_asset(AssetId(7)).await;
        vault.credit(&payer, AssetId(7), 50).await.unwrap();

        let result = vault
            .deposit(AssetId(7), &payer, &Address::from("coordinator"), 51, 0)
            .await;

        assert_eq!(result, Err(CustodyError::InsufficientBalance));
        assert_eq!(vault.balance_of(&payer, AssetId(7)).await, 50);
    }

    #[tokio::test]
    async fn test_deposit_enforces_min_shares_out() {
        let vault = InMemoryVault::new();
        let payer = Address::from("depositor");
        vault.register_asset_with_rate(AssetId(7), 1, 2).await;
        vault.credit(&payer, AssetId(7), 100).await.unwrap();

        let result = vault
            .deposit(AssetId(7), &payer, &Address::from("coordinator"), 100, 51)
            .await;

        assert_eq!(result, Err(CustodyError::SlippageExceeded));
    }

    #[tokio::test]
    async fn test_to_share_applies_rate_and_rounding() {
        let vault = InMemoryVault::new();
        vault.register_asset_with_rate(AssetId(7), 1, 3).await;

        assert_eq!(vault.to_share(AssetId(7), 10, false).await.unwrap(), 3);
        assert_eq!(vault.to_share(AssetId(7), 10, true).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_unknown_asset_is_rejected() {
        let vault = InMemoryVault::new();
        let result = vault.to_share(AssetId(9), 1, false).await;
        assert_eq!(result, Err(CustodyError::UnknownAsset(AssetId(9))));
    }
}
