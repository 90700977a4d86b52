use crate::ids::{Address, AssetId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingularityPool {
    pub address: Address,
    pub asset_id: AssetId,
    pub total_deposited: u128, // asset units, not vault shares
}

impl SingularityPool {
    #[must_use]
    pub fn new(address: Address, asset_id: AssetId) -> Self {
        Self {
            address,
            asset_id,
            total_deposited: 0,
        }
    }

    /// An all-zero record reads back for pools that are not registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.asset_id != AssetId::ZERO
    }
}
