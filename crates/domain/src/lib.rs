//! Core domain model for the time-locked liquidity position ledger.
//!
//! This crate defines:
//! - Identifier newtypes shared across the workspace
//! - The singularity pool and lock position entities
//! - Ledger events for observability
//! - The ledger error taxonomy

/// Pool and position entities.
pub mod entities;
/// Ledger error taxonomy.
pub mod error;
/// Ledger events.
pub mod events;
/// Identifier newtypes.
pub mod ids;
