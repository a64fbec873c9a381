use std::fs;
use std::path::{Path, PathBuf};

use log::trace;

use super::{BatchHandle, StorageAdapter};
use crate::io::Payload;
use crate::{BenchDbError, Result, TEMP_DIR_PREFIX};

/// Local filesystem backend: one temporary directory per batch, one file per
/// payload
#[derive(Debug, Clone, Default)]
pub struct LocalDiskAdapter {
    root: Option<PathBuf>,
}

impl LocalDiskAdapter {
    /// Create batches under the system temporary directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create batches under `root` instead of the system temporary directory
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn create_batch_dir(&self) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match &self.root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        // Only the batch's delete removes the directory; a crash before that
        // leaves it behind.
        Ok(dir.keep())
    }
}

impl StorageAdapter for LocalDiskAdapter {
    type Batch = LocalDiskBatch;

    fn name(&self) -> &str {
        "Local Disk"
    }

    fn write_batch(&mut self, payloads: &[Payload]) -> Result<LocalDiskBatch> {
        let dir = self.create_batch_dir()?;
        for (index, payload) in payloads.iter().enumerate() {
            fs::write(payload_path(&dir, index), payload)?;
        }
        trace!("wrote {} payloads to {}", payloads.len(), dir.display());

        Ok(LocalDiskBatch {
            dir,
            len: payloads.len(),
        })
    }
}

/// A batch stored as numbered files inside a temporary directory
#[derive(Debug)]
pub struct LocalDiskBatch {
    dir: PathBuf,
    len: usize,
}

impl LocalDiskBatch {
    /// Directory holding the batch's files
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl BatchHandle for LocalDiskBatch {
    fn read(&mut self) -> Result<Vec<Payload>> {
        (0..self.len)
            .map(|index| fs::read(payload_path(&self.dir, index)).map_err(BenchDbError::from))
            .collect()
    }

    /// Fails with a `NotFound` I/O error if the batch was already deleted
    fn delete(&mut self) -> Result<()> {
        fs::remove_dir_all(&self.dir)?;
        trace!("removed {}", self.dir.display());
        Ok(())
    }
}

/// File holding payload `index`: zero-padded to eight digits
fn payload_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{:08}", index))
}
