//! Gauntlet runner
//!
//! For every configured size the runner generates one batch of `num_rounds`
//! payloads and pushes that whole batch through write, read and delete once
//! per round. Each phase's wall-clock time is divided by `num_rounds`, and
//! only the last round's numbers are kept for the size.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::config::GauntletConfig;
use crate::io::PayloadGenerator;
use crate::models::{PhaseTimings, TimingResults};
use crate::store::{BatchHandle, StorageAdapter};
use crate::util::units::{format_elapsed, format_size};
use crate::{BenchDbError, Result};

/// Drives a size sweep against one storage backend
pub struct Gauntlet {
    config: GauntletConfig,
    generator: PayloadGenerator,
}

impl Gauntlet {
    /// Create a runner with an entropy-seeded payload generator
    pub fn new(config: GauntletConfig) -> Result<Self> {
        Self::with_generator(config, PayloadGenerator::from_entropy())
    }

    /// Create a runner drawing payloads from `generator`
    pub fn with_generator(config: GauntletConfig, generator: PayloadGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, generator })
    }

    /// Run the full sweep against `adapter`
    ///
    /// The first failing write, read or delete aborts the sweep, as does a
    /// read that does not return the batch exactly as written.
    pub fn run<A: StorageAdapter>(&mut self, adapter: &mut A) -> Result<TimingResults> {
        let progress = self.progress_bar(adapter.name());
        self.run_with_progress(adapter, &progress)
    }

    /// Run the sweep, advancing `progress` once per round
    ///
    /// The bar is cleared on success and abandoned where the sweep stopped on
    /// any error.
    pub fn run_with_progress<A: StorageAdapter>(
        &mut self,
        adapter: &mut A,
        progress: &ProgressBar,
    ) -> Result<TimingResults> {
        let started = Instant::now();
        info!(
            "{}: running {} sizes x {} rounds",
            adapter.name(),
            self.config.sizes.len(),
            self.config.num_rounds
        );

        match self.sweep(adapter, progress) {
            Ok(results) => {
                progress.finish_and_clear();
                info!(
                    "{}: finished in {}",
                    adapter.name(),
                    format_elapsed(started.elapsed())
                );
                Ok(results)
            }
            Err(e) => {
                progress.abandon();
                Err(e)
            }
        }
    }

    fn sweep<A: StorageAdapter>(
        &mut self,
        adapter: &mut A,
        progress: &ProgressBar,
    ) -> Result<TimingResults> {
        let num_rounds = self.config.num_rounds;
        let mut results = TimingResults::new();

        for &size in &self.config.sizes {
            let payload_len = usize::try_from(size).map_err(|_| {
                BenchDbError::ConfigError(format!("Payload size {} is too large", size))
            })?;
            let batch = self.generator.generate_batch(payload_len, num_rounds);
            progress.set_message(format_size(size));

            for round in 1..=num_rounds {
                let write_start = Instant::now();
                let mut handle = adapter.write_batch(&batch)?;
                let write = PhaseTimings::normalize(write_start.elapsed(), num_rounds);

                let read_start = Instant::now();
                let read_back = handle.read()?;
                let read = PhaseTimings::normalize(read_start.elapsed(), num_rounds);
                if read_back != batch {
                    return Err(BenchDbError::VerificationFailed { size, round });
                }

                let delete_start = Instant::now();
                handle.delete()?;
                let delete = PhaseTimings::normalize(delete_start.elapsed(), num_rounds);

                results.record(size, PhaseTimings::new(write, read, delete));
                progress.inc(1);
            }

            if let Some(timings) = results.get(size) {
                debug!(
                    "{}: {} -> write {:.5}s read {:.5}s delete {:.5}s",
                    adapter.name(),
                    format_size(size),
                    timings.write,
                    timings.read,
                    timings.delete
                );
            }
        }

        Ok(results)
    }

    fn progress_bar(&self, backend: &str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(self.config.total_rounds());
        if let Ok(style) =
            ProgressStyle::with_template("{prefix} {bar:30} {pos}/{len} rounds ({eta}) {msg}")
        {
            pb.set_style(style);
        }
        pb.set_prefix(backend.to_string());
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Payload;

    /// Keeps batches in memory and counts calls
    #[derive(Default)]
    struct RecordingAdapter {
        writes: usize,
        batch_lens: Vec<usize>,
        corrupt: bool,
    }

    struct RecordingBatch {
        payloads: Vec<Payload>,
        corrupt: bool,
    }

    impl StorageAdapter for RecordingAdapter {
        type Batch = RecordingBatch;

        fn name(&self) -> &str {
            "Recording"
        }

        fn write_batch(&mut self, payloads: &[Payload]) -> Result<RecordingBatch> {
            self.writes += 1;
            self.batch_lens.push(payloads.len());
            Ok(RecordingBatch {
                payloads: payloads.to_vec(),
                corrupt: self.corrupt,
            })
        }
    }

    impl BatchHandle for RecordingBatch {
        fn read(&mut self) -> Result<Vec<Payload>> {
            let mut payloads = self.payloads.clone();
            if self.corrupt {
                payloads.reverse();
            }
            Ok(payloads)
        }

        fn delete(&mut self) -> Result<()> {
            self.payloads.clear();
            Ok(())
        }
    }

    /// Fails every write
    struct FailingAdapter;

    impl StorageAdapter for FailingAdapter {
        type Batch = RecordingBatch;

        fn name(&self) -> &str {
            "Failing"
        }

        fn write_batch(&mut self, _payloads: &[Payload]) -> Result<RecordingBatch> {
            Err(BenchDbError::StoreError("unreachable".to_string()))
        }
    }

    fn quiet_config(sizes: Vec<u64>, rounds: usize) -> GauntletConfig {
        GauntletConfig::new()
            .with_sizes(sizes)
            .with_rounds(rounds)
            .with_progress(false)
    }

    #[test]
    fn test_single_size_two_rounds() {
        let mut gauntlet =
            Gauntlet::with_generator(quiet_config(vec![10], 2), PayloadGenerator::seeded(1))
                .unwrap();
        let mut adapter = RecordingAdapter::default();

        let results = gauntlet.run(&mut adapter).unwrap();
        assert_eq!(results.sizes().collect::<Vec<_>>(), vec![10]);
        let timings = results.get(10).unwrap().as_array();
        assert_eq!(timings.len(), 3);
        assert!(timings.iter().all(|t| *t >= 0.0 && t.is_finite()));

        // whole batch of `num_rounds` payloads, written once per round
        assert_eq!(adapter.writes, 2);
        assert_eq!(adapter.batch_lens, vec![2, 2]);
    }

    #[test]
    fn test_every_size_is_recorded() {
        let mut gauntlet = Gauntlet::with_generator(
            quiet_config(vec![100, 1, 10], 3),
            PayloadGenerator::seeded(2),
        )
        .unwrap();
        let mut adapter = RecordingAdapter::default();

        let results = gauntlet.run(&mut adapter).unwrap();
        assert_eq!(results.sizes().collect::<Vec<_>>(), vec![1, 10, 100]);
        assert_eq!(adapter.writes, 9);
    }

    #[test]
    fn test_mismatch_aborts_run() {
        let mut gauntlet = Gauntlet::with_generator(
            quiet_config(vec![10, 100], 2),
            PayloadGenerator::seeded(3),
        )
        .unwrap();
        let mut adapter = RecordingAdapter {
            corrupt: true,
            ..Default::default()
        };

        match gauntlet.run(&mut adapter) {
            Err(BenchDbError::VerificationFailed { size, round }) => {
                assert_eq!(size, 10);
                assert_eq!(round, 1);
            }
            other => panic!("expected VerificationFailed, got {:?}", other.is_ok()),
        }
        assert_eq!(adapter.writes, 1);
    }

    #[test]
    fn test_adapter_error_propagates() {
        let mut gauntlet =
            Gauntlet::with_generator(quiet_config(vec![10], 1), PayloadGenerator::seeded(4))
                .unwrap();
        assert!(matches!(
            gauntlet.run(&mut FailingAdapter),
            Err(BenchDbError::StoreError(_))
        ));
    }

    #[test]
    fn test_progress_abandoned_on_adapter_error() {
        let mut gauntlet =
            Gauntlet::with_generator(quiet_config(vec![10], 3), PayloadGenerator::seeded(5))
                .unwrap();
        let progress = ProgressBar::hidden();
        progress.set_length(3);

        assert!(gauntlet
            .run_with_progress(&mut FailingAdapter, &progress)
            .is_err());
        assert!(progress.is_finished());
        assert_eq!(progress.position(), 0);
    }

    #[test]
    fn test_progress_counts_completed_rounds() {
        let mut gauntlet = Gauntlet::with_generator(
            quiet_config(vec![1, 10], 2),
            PayloadGenerator::seeded(6),
        )
        .unwrap();
        let progress = ProgressBar::hidden();
        progress.set_length(4);

        gauntlet
            .run_with_progress(&mut RecordingAdapter::default(), &progress)
            .unwrap();
        assert!(progress.is_finished());
        assert_eq!(progress.position(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Gauntlet::new(quiet_config(vec![10], 0)).is_err());
        assert!(Gauntlet::new(quiet_config(Vec::new(), 1)).is_err());
    }
}
