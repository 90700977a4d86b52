pub mod pool;
pub mod position;

// Re-export for easier access
pub use pool::SingularityPool;
pub use position::LockPosition;
