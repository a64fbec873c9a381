//! Storage backends module
//!
//! Both backends expose the same capability: persist a batch of payloads and
//! hand back a handle that can read the batch back in order or delete it.

pub mod column;
pub mod local;

pub use column::{
    ColumnConnector, ColumnFamily, ColumnStoreAdapter, ColumnStoreBatch, MemoryColumnFamily,
    MemoryColumnStore, RedisColumnFamily, RedisConnector,
};
pub use local::{LocalDiskAdapter, LocalDiskBatch};

use crate::io::Payload;
use crate::Result;

/// A backend the gauntlet can write batches to
pub trait StorageAdapter {
    /// Handle bound to one written batch
    type Batch: BatchHandle;

    /// Human-readable backend name, used in logs and reports
    fn name(&self) -> &str;

    /// Persist `payloads` under a fresh, independent location
    fn write_batch(&mut self, payloads: &[Payload]) -> Result<Self::Batch>;
}

/// Read and delete operations bound to a single written batch
pub trait BatchHandle {
    /// Read every payload back in the order it was written
    fn read(&mut self) -> Result<Vec<Payload>>;

    /// Remove every artifact belonging to the batch
    fn delete(&mut self) -> Result<()>;
}
