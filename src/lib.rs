//! bench-db - storage latency gauntlet
//!
//! Times batched write/read/delete cycles against a remote column store and
//! the local disk across a sweep of payload sizes, and renders the results
//! as a LaTeX table.

use std::fmt;

pub mod bench;
pub mod config;
pub mod driver;
pub mod io;
pub mod models;
pub mod report;
pub mod store;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BenchDbError {
    /// Disk I/O operation failed
    IoError(std::io::Error),
    /// Column store client failed
    StoreError(String),
    /// A column expected under a row was not found
    MissingColumn {
        /// Row key that was queried
        row: String,
        /// Column that was absent
        column: String,
    },
    /// Read-back payloads did not match what was written
    VerificationFailed {
        /// Payload size of the failing bucket
        size: u64,
        /// Round (1-based) in which the mismatch was seen
        round: usize,
    },
    /// Configuration validation error
    ConfigError(String),
    /// Report rendering or output error
    ReportError(String),
}

impl fmt::Display for BenchDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchDbError::IoError(err) => write!(f, "I/O error: {}", err),
            BenchDbError::StoreError(msg) => write!(f, "Column store error: {}", msg),
            BenchDbError::MissingColumn { row, column } => {
                write!(f, "Column '{}' missing from row '{}'", column, row)
            }
            BenchDbError::VerificationFailed { size, round } => write!(
                f,
                "Read-back mismatch for {} byte payloads in round {}",
                size, round
            ),
            BenchDbError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BenchDbError::ReportError(msg) => write!(f, "Report error: {}", msg),
        }
    }
}

impl std::error::Error for BenchDbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchDbError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchDbError {
    fn from(err: std::io::Error) -> Self {
        BenchDbError::IoError(err)
    }
}

impl From<redis::RedisError> for BenchDbError {
    fn from(err: redis::RedisError) -> Self {
        BenchDbError::StoreError(err.to_string())
    }
}

/// Result type alias for bench-db operations
pub type Result<T> = std::result::Result<T, BenchDbError>;

// Common types and constants
pub const COLUMN_STORE_REPORT_FILE: &str = "cass.tex";
pub const LOCAL_DISK_REPORT_FILE: &str = "local.tex";
pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379/";
pub const TEMP_DIR_PREFIX: &str = "bench_db-";
pub const ROW_KEY_PREFIX: &str = "bench_db-";

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_keeps_source() {
        let err: BenchDbError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, BenchDbError::IoError(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_display_messages() {
        let missing = BenchDbError::MissingColumn {
            row: "bench_db-0.5".to_string(),
            column: "3".to_string(),
        };
        assert_eq!(missing.to_string(), "Column '3' missing from row 'bench_db-0.5'");

        let mismatch = BenchDbError::VerificationFailed { size: 100, round: 2 };
        assert!(mismatch.to_string().contains("100 byte"));
        assert!(mismatch.source().is_none());
    }
}
