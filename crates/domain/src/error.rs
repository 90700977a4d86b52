use thiserror::Error;

/// Ledger errors.
///
/// All failures are synchronous and local; there is no transient class to
/// retry. No partial mutation is visible on any failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller does not hold the required capability.
    #[error("caller is not authorized")]
    Unauthorized,
    /// The pool address or its asset id already has an active entry.
    #[error("singularity already registered")]
    AlreadyRegistered,
    /// No active entry exists for the pool address.
    #[error("singularity not registered")]
    NotRegistered,
    /// Lock duration must be greater than zero.
    #[error("lock duration must be greater than zero")]
    InvalidDuration,
    /// Lock amount must be greater than zero.
    #[error("lock amount must be greater than zero")]
    InvalidAmount,
    /// The referenced pool is not currently registered.
    #[error("singularity not active")]
    PoolNotActive,
    /// No live position is recorded at the given id.
    #[error("position does not exist")]
    PositionNotFound,
    /// The position's lock has not expired yet.
    #[error("lock has not expired")]
    LockNotExpired,
    /// The position's asset id does not match the referenced pool.
    #[error("position does not belong to this singularity")]
    PoolMismatch,
    /// Release exceeds the pool's recorded total. Unreachable under correct
    /// bookkeeping.
    #[error("release exceeds total deposited")]
    AccountingUnderflow,
}
