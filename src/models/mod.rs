//! Data models module
//!
//! Contains the per-size phase timings collected by the gauntlet.

pub mod result;

// Re-export commonly used types
pub use result::{PhaseTimings, TimingResults};
