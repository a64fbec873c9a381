//! Utility functions module
//!
//! Human-readable sizes and durations for log and progress output.

pub mod units;

pub use units::{format_elapsed, format_size};
