//! In-memory storage for records keyed by a store-assigned integer id.
//!
//! A [`Table`] hands out ids from a monotonically increasing sequence that
//! starts at 1. Ids are never reused, even after the record holding one is
//! removed, and iteration order is ascending id (insertion order).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Record identifier assigned by a [`Table`].
pub type RecordId = i64;

/// Storage error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DbError {
    #[error("record not found: {table}/{id}")]
    NotFound { table: &'static str, id: RecordId },
    #[error("storage error: {0}")]
    Storage(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// A table of records of type `T`.
pub struct Table<T> {
    name: &'static str,
    rows: RwLock<BTreeMap<RecordId, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, BTreeMap<RecordId, T>>> {
        self.rows
            .read()
            .map_err(|_| DbError::Storage(format!("table '{}' lock poisoned", self.name)))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, BTreeMap<RecordId, T>>> {
        self.rows
            .write()
            .map_err(|_| DbError::Storage(format!("table '{}' lock poisoned", self.name)))
    }

    fn not_found(&self, id: RecordId) -> DbError {
        DbError::NotFound {
            table: self.name,
            id,
        }
    }

    /// Insert a record built from a freshly allocated id.
    pub fn insert_with(&self, build: impl FnOnce(RecordId) -> T) -> DbResult<T> {
        let mut rows = self.write()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = build(id);
        rows.insert(id, record.clone());
        tracing::debug!(target: "bookshelf-db", table = self.name, id, "record inserted");
        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> DbResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in ascending id order.
    pub fn all(&self) -> DbResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub fn count(&self) -> DbResult<usize> {
        Ok(self.read()?.len())
    }

    /// Replace the record stored under `id` with the result of `update`.
    pub fn update_with(&self, id: RecordId, update: impl FnOnce(T) -> T) -> DbResult<T> {
        let mut rows = self.write()?;
        let current = rows.get(&id).cloned().ok_or_else(|| self.not_found(id))?;
        let updated = update(current);
        rows.insert(id, updated.clone());
        tracing::debug!(target: "bookshelf-db", table = self.name, id, "record updated");
        Ok(updated)
    }

    /// Remove the record stored under `id`.
    pub fn remove(&self, id: RecordId) -> DbResult<T> {
        let removed = self.write()?.remove(&id).ok_or_else(|| self.not_found(id))?;
        tracing::debug!(target: "bookshelf-db", table = self.name, id, "record removed");
        Ok(removed)
    }
}
