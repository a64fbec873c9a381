//! Configuration module
//!
//! Holds the parameters of a gauntlet sweep. The values used by the binary
//! are the hard-coded defaults; tests build smaller sweeps with the builder
//! methods.

use crate::{BenchDbError, Result, DEFAULT_STORE_URL};
use std::ops::RangeInclusive;

/// Gauntlet configuration containing all sweep parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GauntletConfig {
    /// Payload sizes in bytes, processed in this order
    pub sizes: Vec<u64>,
    /// Rounds per size; also the number of payloads per batch
    pub num_rounds: usize,
    /// Connection URL of the column store
    pub store_url: String,
    /// Whether to draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for GauntletConfig {
    fn default() -> Self {
        Self {
            sizes: powers_of_ten(0..=6),
            num_rounds: 10,
            store_url: DEFAULT_STORE_URL.to_string(),
            show_progress: true,
        }
    }
}

impl GauntletConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(BenchDbError::ConfigError(
                "At least one payload size is required".to_string(),
            ));
        }

        if let Some(size) = self.sizes.iter().find(|s| usize::try_from(**s).is_err()) {
            return Err(BenchDbError::ConfigError(format!(
                "Payload size {} does not fit in memory on this platform",
                size
            )));
        }

        if self.num_rounds == 0 {
            return Err(BenchDbError::ConfigError(
                "Round count must be greater than 0".to_string(),
            ));
        }

        if self.store_url.trim().is_empty() {
            return Err(BenchDbError::ConfigError(
                "Column store URL must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the payload sizes
    pub fn with_sizes(mut self, sizes: Vec<u64>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Set the number of rounds per size
    pub fn with_rounds(mut self, num_rounds: usize) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    /// Set the column store URL
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = url.into();
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Total write/read/delete cycles in the sweep
    pub fn total_rounds(&self) -> u64 {
        (self.sizes.len() * self.num_rounds) as u64
    }
}

/// `10^k` for every `k` in `exponents`
pub fn powers_of_ten(exponents: RangeInclusive<u32>) -> Vec<u64> {
    exponents.map(|k| 10u64.pow(k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = GauntletConfig::default();
        assert_eq!(
            config.sizes,
            vec![1, 10, 100, 1_000, 10_000, 100_000, 1_000_000]
        );
        assert_eq!(config.num_rounds, 10);
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert!(config.validate().is_ok());
        assert_eq!(config.total_rounds(), 70);
    }

    #[test]
    fn test_validate_rejects_empty_sizes() {
        let config = GauntletConfig::new().with_sizes(Vec::new());
        assert!(matches!(config.validate(), Err(BenchDbError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_rounds() {
        let config = GauntletConfig::new().with_rounds(0);
        assert!(matches!(config.validate(), Err(BenchDbError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let config = GauntletConfig::new().with_store_url("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_size_is_allowed() {
        let config = GauntletConfig::new().with_sizes(vec![0, 10]);
        assert!(config.validate().is_ok());
    }
}
