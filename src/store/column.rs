//! Remote column store backend
//!
//! A batch becomes one wide row: a random row key with one column per
//! payload, named by the payload's index. The client side is abstracted
//! behind [`ColumnConnector`] / [`ColumnFamily`] so the same adapter drives
//! the networked Redis client and the in-process store used by tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use log::trace;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{BatchHandle, StorageAdapter};
use crate::io::Payload;
use crate::{BenchDbError, Result, ROW_KEY_PREFIX};

/// Opens connections to a column store
pub trait ColumnConnector {
    /// Connection type handed out by [`connect`](ColumnConnector::connect)
    type Family: ColumnFamily;

    /// Open a new connection
    fn connect(&self) -> Result<Self::Family>;
}

/// Row/column operations against one column family
pub trait ColumnFamily {
    /// Write `columns` under `row`, replacing existing values
    fn insert(&mut self, row: &str, columns: &[(&str, &[u8])]) -> Result<()>;

    /// Fetch `columns` from `row`; absent columns are left out of the map
    fn get(&mut self, row: &str, columns: &[&str]) -> Result<HashMap<String, Vec<u8>>>;

    /// Remove the whole row. Removing a missing row is not an error.
    fn remove(&mut self, row: &str) -> Result<()>;
}

/// Column store backend
pub struct ColumnStoreAdapter<C: ColumnConnector> {
    connector: C,
    rng: SmallRng,
}

impl<C: ColumnConnector> ColumnStoreAdapter<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Use a seeded generator for row keys
    pub fn with_seed(connector: C, seed: u64) -> Self {
        Self {
            connector,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn next_row_key(&mut self) -> String {
        format!("{}{:.6}", ROW_KEY_PREFIX, self.rng.gen::<f64>())
    }
}

impl<C: ColumnConnector> StorageAdapter for ColumnStoreAdapter<C> {
    type Batch = ColumnStoreBatch<C::Family>;

    fn name(&self) -> &str {
        "Column Store"
    }

    fn write_batch(&mut self, payloads: &[Payload]) -> Result<Self::Batch> {
        let mut family = self.connector.connect()?;
        let row = self.next_row_key();

        for (index, payload) in payloads.iter().enumerate() {
            let column = index.to_string();
            family.insert(&row, &[(column.as_str(), payload.as_slice())])?;
        }
        trace!("wrote {} columns under row {}", payloads.len(), row);

        Ok(ColumnStoreBatch {
            family,
            row,
            len: payloads.len(),
        })
    }
}

/// A batch stored as one row; owns the connection it was written with
pub struct ColumnStoreBatch<F: ColumnFamily> {
    family: F,
    row: String,
    len: usize,
}

impl<F: ColumnFamily> ColumnStoreBatch<F> {
    /// Row key the batch was written under
    pub fn row_key(&self) -> &str {
        &self.row
    }
}

impl<F: ColumnFamily> BatchHandle for ColumnStoreBatch<F> {
    /// Fails with [`BenchDbError::MissingColumn`] once the row is deleted
    fn read(&mut self) -> Result<Vec<Payload>> {
        let mut payloads = Vec::with_capacity(self.len);
        for index in 0..self.len {
            let column = index.to_string();
            let mut found = self.family.get(&self.row, &[column.as_str()])?;
            let payload = found
                .remove(&column)
                .ok_or_else(|| BenchDbError::MissingColumn {
                    row: self.row.clone(),
                    column: column.clone(),
                })?;
            payloads.push(payload);
        }
        Ok(payloads)
    }

    /// Removing an already removed row succeeds
    fn delete(&mut self) -> Result<()> {
        self.family.remove(&self.row)?;
        trace!("removed row {}", self.row);
        Ok(())
    }
}

/// Connects to a Redis-protocol server, storing each row as a hash
#[derive(Debug, Clone)]
pub struct RedisConnector {
    url: String,
}

impl RedisConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ColumnConnector for RedisConnector {
    type Family = RedisColumnFamily;

    fn connect(&self) -> Result<RedisColumnFamily> {
        let client = redis::Client::open(self.url.as_str()).map_err(|err| {
            BenchDbError::StoreError(format!("Failed to open client for {}: {}", self.url, err))
        })?;
        let con = client.get_connection().map_err(|err| {
            BenchDbError::StoreError(format!("Failed to connect to {}: {}", self.url, err))
        })?;
        Ok(RedisColumnFamily { con })
    }
}

/// Live connection to a Redis-protocol server
pub struct RedisColumnFamily {
    con: redis::Connection,
}

impl ColumnFamily for RedisColumnFamily {
    fn insert(&mut self, row: &str, columns: &[(&str, &[u8])]) -> Result<()> {
        if columns.is_empty() {
            return Ok(());
        }
        let mut cmd = redis::cmd("HSET");
        cmd.arg(row);
        for (column, value) in columns {
            cmd.arg(*column).arg(*value);
        }
        cmd.query::<()>(&mut self.con)?;
        Ok(())
    }

    fn get(&mut self, row: &str, columns: &[&str]) -> Result<HashMap<String, Vec<u8>>> {
        if columns.is_empty() {
            return Ok(HashMap::new());
        }
        let values: Vec<Option<Vec<u8>>> = redis::cmd("HMGET")
            .arg(row)
            .arg(columns)
            .query(&mut self.con)?;

        Ok(columns
            .iter()
            .zip(values)
            .filter_map(|(column, value)| value.map(|v| (column.to_string(), v)))
            .collect())
    }

    fn remove(&mut self, row: &str) -> Result<()> {
        redis::cmd("DEL").arg(row).query::<()>(&mut self.con)?;
        Ok(())
    }
}

type Rows = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// In-process column store; every connection shares the same rows
#[derive(Debug, Clone, Default)]
pub struct MemoryColumnStore {
    rows: Arc<Mutex<Rows>>,
}

impl MemoryColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored
    pub fn row_count(&self) -> Result<usize> {
        Ok(lock_rows(&self.rows)?.len())
    }

    /// Whether `row` currently exists
    pub fn contains_row(&self, row: &str) -> Result<bool> {
        Ok(lock_rows(&self.rows)?.contains_key(row))
    }
}

impl ColumnConnector for MemoryColumnStore {
    type Family = MemoryColumnFamily;

    fn connect(&self) -> Result<MemoryColumnFamily> {
        Ok(MemoryColumnFamily {
            rows: Arc::clone(&self.rows),
        })
    }
}

/// Connection to a [`MemoryColumnStore`]
#[derive(Debug, Clone)]
pub struct MemoryColumnFamily {
    rows: Arc<Mutex<Rows>>,
}

impl ColumnFamily for MemoryColumnFamily {
    fn insert(&mut self, row: &str, columns: &[(&str, &[u8])]) -> Result<()> {
        let mut rows = lock_rows(&self.rows)?;
        let entry = rows.entry(row.to_string()).or_default();
        for (column, value) in columns {
            entry.insert(column.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn get(&mut self, row: &str, columns: &[&str]) -> Result<HashMap<String, Vec<u8>>> {
        let rows = lock_rows(&self.rows)?;
        let Some(entry) = rows.get(row) else {
            return Ok(HashMap::new());
        };
        Ok(columns
            .iter()
            .filter_map(|column| {
                entry
                    .get(*column)
                    .map(|value| (column.to_string(), value.clone()))
            })
            .collect())
    }

    fn remove(&mut self, row: &str) -> Result<()> {
        lock_rows(&self.rows)?.remove(row);
        Ok(())
    }
}

fn lock_rows(rows: &Mutex<Rows>) -> Result<MutexGuard<'_, Rows>> {
    rows.lock()
        .map_err(|_| BenchDbError::StoreError("Memory store lock poisoned".to_string()))
}
