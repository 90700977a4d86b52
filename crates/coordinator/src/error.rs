//! Error types for coordinator workflows.

use thiserror::Error;
use timelock_lp_domain::error::LedgerError;
use timelock_lp_domain::ids::AssetId;

/// Errors surfaced by vault custody operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// The asset id is not registered with the vault.
    #[error("asset {0} is not registered with the vault")]
    UnknownAsset(AssetId),
    /// The payer's custody balance cannot cover the transfer.
    #[error("insufficient custody balance")]
    InsufficientBalance,
    /// The share output fell below the requested minimum.
    #[error("share output below requested minimum")]
    SlippageExceeded,
}

/// Errors surfaced by the position token registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token exists at the given id.
    #[error("token id does not exist")]
    UnknownId,
}

/// Top-level error for coordinator workflows.
///
/// The ledger taxonomy stays in `LedgerError`; seam failures keep their own
/// types because the vault and position registry are external collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// A ledger invariant or validation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// A vault custody operation failed.
    #[error("custody operation failed: {0}")]
    Custody(#[from] CustodyError),
    /// A position token operation failed.
    #[error("position token operation failed: {0}")]
    Tokens(#[from] TokenError),
}

impl CoordinatorError {
    /// The underlying ledger error, if this is one.
    #[must_use]
    pub fn ledger(&self) -> Option<LedgerError> {
        match self {
            Self::Ledger(err) => Some(*err),
            _ => None,
        }
    }
}
