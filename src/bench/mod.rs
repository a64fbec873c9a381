//! Benchmark engine module
//!
//! Contains the gauntlet runner that sweeps payload sizes against a
//! storage backend.

pub mod gauntlet;

// Re-export commonly used types
pub use gauntlet::Gauntlet;
