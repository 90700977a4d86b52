//! Lock workflow orchestration over the position ledger.
//!
//! This crate provides:
//! - The `LockCoordinator` driving the create-lock and release-lock workflows
//! - Trait seams for the external vault, position registry, administrator
//!   gate and time source
//! - In-memory implementations of those seams for tests and demos
//! - An append-only event journal for observability

/// Administrator capability gate.
pub mod admin;
/// Time source abstraction.
pub mod clock;
/// Lock and release workflow orchestration.
pub mod coordinator;
/// Vault custody seam.
pub mod custody;
/// Coordinator error types.
pub mod error;
/// Event journal.
pub mod journal;
/// Position token registry seam.
pub mod tokens;

pub use admin::{AdminGate, SingleAdmin};
pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinator::LockCoordinator;
pub use custody::{InMemoryVault, Vault};
pub use error::{CoordinatorError, CustodyError, TokenError};
pub use journal::EventJournal;
pub use tokens::{InMemoryPositionTokens, PositionTokens};
