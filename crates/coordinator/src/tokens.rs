//! Position token registry seam and in-memory implementation.
//!
//! The registry is the authority for position id uniqueness and ownership.
//! The ledger never assumes anything about transferability beyond querying
//! the current owner/approval relation.

use crate::error::TokenError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use timelock_lp_domain::ids::{Address, PositionId};
use tokio::sync::RwLock;
use tracing::debug;

/// External unique-id issuance and ownership tracking.
#[async_trait]
pub trait PositionTokens: Send + Sync {
    /// Mints a fresh id owned by `owner`. Allocation is linearizable: no two
    /// concurrent calls receive the same id.
    async fn mint(&self, owner: &Address) -> Result<PositionId, TokenError>;

    /// Burns the id. The id is discarded and never reused.
    async fn burn(&self, id: PositionId) -> Result<(), TokenError>;

    /// Current owner of the id; fails if the id does not exist.
    async fn owner_of(&self, id: PositionId) -> Result<Address, TokenError>;

    /// Whether `caller` is the owner of the id or an approved operator.
    async fn is_owner_or_approved(
        &self,
        caller: &Address,
        id: PositionId,
    ) -> Result<bool, TokenError>;

    /// Total ids minted so far; never decreases.
    async fn minted(&self) -> u64;
}

#[derive(Debug, Default)]
struct TokenState {
    next_id: u64,
    owners: HashMap<PositionId, Address>,
    /// (owner, operator) pairs with approval-for-all.
    operators: HashSet<(Address, Address)>,
}

/// In-memory position token registry with sequential id allocation.
#[derive(Debug, Default)]
pub struct InMemoryPositionTokens {
    inner: RwLock<TokenState>,
}

impl InMemoryPositionTokens {
    /// Creates an empty registry. The first minted id is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants or revokes operator rights over all of `owner`'s ids.
    pub async fn set_approval_for_all(&self, owner: &Address, operator: &Address, approved: bool) {
        let mut state = self.inner.write().await;
        let pair = (owner.clone(), operator.clone());
        if approved {
            state.operators.insert(pair);
        } else {
            state.operators.remove(&pair);
        }
    }
}

#[async_trait]
impl PositionTokens for InMemoryPositionTokens {
    async fn mint(&self, owner: &Address) -> Result<PositionId, TokenError> {
        let mut state = self.inner.write().await;
        let id = PositionId(state.next_id);
        state.next_id += 1;
        state.owners.insert(id, owner.clone());

        debug!(id = %id, owner = %owner, "token minted");
        Ok(id)
    }

    async fn burn(&self, id: PositionId) -> Result<(), TokenError> {
        let mut state = self.inner.write().await;
        state.owners.remove(&id).ok_or(TokenError::UnknownId)?;

        debug!(id = %id, "token burned");
        Ok(())
    }

    async fn owner_of(&self, id: PositionId) -> Result<Address, TokenError> {
        let state = self.inner.read().await;
        state.owners.get(&id).cloned().ok_or(TokenError::UnknownId)
    }

    async fn is_owner_or_approved(
        &self,
        caller: &Address,
        id: PositionId,
    ) -> Result<bool, TokenError> {
        let state = self.inner.read().await;
        let owner = state.owners.get(&id).ok_or(TokenError::UnknownId)?;
        Ok(owner == caller || state.operators.contains(&(owner.clone(), caller.clone())))
    }

    async fn minted(&self) -> u64 {
        self.inner.read().await.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mint_allocates_sequential_ids_from_zero() {
        let tokens = InMemoryPositionTokens::new();
        assert_eq!(tokens.minted().await, 0);

        let first = tokens.mint(&Address::from("user-a")).await.unwrap();
        let second = tokens.mint(&Address::from("user-b")).await.unwrap();

        assert_eq!(first, PositionId(0));
        assert_eq!(second, PositionId(1));
        assert_eq!(tokens.minted().await, 2);
    }

    #[tokio::test]
    async fn test_burned_id_is_gone_and_never_reused() {
        let tokens = InMemoryPositionTokens::new();
        let id = tokens.mint(&Address::from("user-a")).await.unwrap();

        tokens.burn(id).await.unwrap();
        assert_eq!(tokens.owner_of(id).await, Err(TokenError::UnknownId));
        assert_eq!(tokens.burn(id).await, Err(TokenError::UnknownId));

        let next = tokens.mint(&Address::from("user-a")).await.unwrap();
        assert_ne!(next, id);
    }

    #[tokio::test]
    async fn test_owner_and_operator_authorization() {
        let tokens = InMemoryPositionTokens::new();
        let owner = Address::from("user-a");
        let operator = Address::from("operator");
        let stranger = Address::from("user-b");
        let id = tokens.mint(&owner).await.unwrap();

        assert!(tokens.is_owner_or_approved(&owner, id).await.unwrap());
        assert!(!tokens.is_owner_or_approved(&operator, id).await.unwrap());
        assert!(!tokens.is_owner_or_approved(&stranger, id).await.unwrap());

        tokens.set_approval_for_all(&owner, &operator, true).await;
        assert!(tokens.is_owner_or_approved(&operator, id).await.unwrap());

        tokens.set_approval_for_all(&owner, &operator, false).await;
        assert!(!tokens.is_owner_or_approved(&operator, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_mints_receive_distinct_ids() {
        use std::sync::Arc;

        let tokens = Arc::new(InMemoryPositionTokens::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let tokens = Arc::clone(&tokens);
            handles.push(tokio::spawn(async move {
                tokens.mint(&Address::new(format!("user-{i}"))).await.unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 16);
        assert_eq!(tokens.minted().await, 16);
    }
}
