//! redb-based persistence gateway
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection key | JSON blob | Domain collections (`shops`, `orders`) |
//! | `meta` | `schema_version` | `u64` | Store schema version |
//!
//! The gateway has no knowledge of the domain beyond opaque key names
//! and JSON-serializable payloads; it performs no shape validation.
//! Corrupt or missing payloads load as `None` so callers can fall back
//! to empty collections, but read/write failures are returned to the
//! caller rather than swallowed.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: a committed
//! write is persistent before `save` returns, and the copy-on-write
//! design keeps the file consistent across power loss.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Order, Shop};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for domain collections: key = collection name, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Table for store metadata: key = meta key, value = u64
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Schema version written into new databases
pub const SCHEMA_VERSION: u64 = 1;

/// Collection key for the shop collection
pub const SHOPS_KEY: &str = "shops";
/// Collection key for the order collection
pub const ORDERS_KEY: &str = "orders";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: u64, supported: u64 },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shared::error::AppError {
    fn from(e: StorageError) -> Self {
        shared::error::AppError::persistence(e.to_string())
    }
}

/// Both persisted collections, loaded together at session start
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub shops: Vec<Shop>,
    pub orders: Vec<Order>,
}

/// Key/value blob store backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    ///
    /// Initializes tables and stamps the schema version on first open.
    /// A database written by a newer engine fails with
    /// [`StorageError::SchemaTooNew`] instead of being misread.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::initialize(db)
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::initialize(db)
    }

    fn initialize(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;

            let mut meta_table = write_txn.open_table(META_TABLE)?;
            let recorded = meta_table.get(SCHEMA_VERSION_KEY)?.map(|g| g.value());
            match recorded {
                None => {
                    meta_table.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION)?;
                }
                Some(found) if found > SCHEMA_VERSION => {
                    return Err(StorageError::SchemaTooNew {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
                Some(_) => {}
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Schema version recorded in the store
    pub fn schema_version(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(META_TABLE)?;
        Ok(table
            .get(SCHEMA_VERSION_KEY)?
            .map(|g| g.value())
            .unwrap_or(SCHEMA_VERSION))
    }

    // ========== Collection Operations ==========

    /// Serialize a collection and overwrite the blob under `key`
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let payload = serde_json::to_vec(value)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, payload.as_slice())?;
        }
        txn.commit()?;
        tracing::debug!(key = %key, bytes = payload.len(), "collection saved");
        Ok(())
    }

    /// Load and deserialize the blob under `key`
    ///
    /// Returns `Ok(None)` when the key is absent or the payload is
    /// unparsable; corrupt data falls back to empty collections at the
    /// caller, it never aborts a session.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(key)? {
            Some(value) => match serde_json::from_slice(value.value()) {
                Ok(parsed) => Ok(Some(parsed)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "corrupt payload, ignoring");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Load both domain collections, defaulting each to empty
    pub fn load_app_data(&self) -> StorageResult<AppData> {
        let shops: Vec<Shop> = self.load(SHOPS_KEY)?.unwrap_or_default();
        let orders: Vec<Order> = self.load(ORDERS_KEY)?.unwrap_or_default();
        tracing::debug!(
            shops = shops.len(),
            orders = orders.len(),
            "app data loaded"
        );
        Ok(AppData { shops, orders })
    }
}
