use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::errors::StoreError;
use crate::persistence::{load_records, write_records};
use crate::state::record::{Record, SEED_NAME, SEED_VALUE};

/// Shared store type used across the app.
pub type SharedStore = Arc<Store>;

/// Ordered collection of records mirrored to a single JSON file.
///
/// Writers are serialized by `writer`, which is held across the whole
/// mutate-and-persist sequence. Each mutation is staged on a copy of the
/// collection and only published to `records` once the file write succeeded,
/// so a failed write leaves memory and disk in agreement.
///
/// Readers only take `records` for the time it takes to scan or clone it.
/// They never wait for file I/O.
pub struct Store {
    path: PathBuf,
    atomic_writes: bool,
    records: RwLock<Vec<Record>>,
    writer: Mutex<IdAllocator>,
}

/// Monotonic id source, only touched with the writer lock held.
struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    fn starting_after(records: &[Record]) -> Self {
        let max = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            next: max.saturating_add(1).max(1),
        }
    }

    /// Next id that is non-negative and not used by a live record.
    fn allocate(&mut self, live: &[Record]) -> i64 {
        let mut id = self.next;
        while id < 0 || live.iter().any(|r| r.id == id) {
            id = id.checked_add(1).unwrap_or(0);
        }
        self.next = id.checked_add(1).unwrap_or(0);
        id
    }
}

impl Store {
    /// Load the store from `path`, seeding and writing a default record when
    /// the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>, atomic_writes: bool) -> Result<Self, StoreError> {
        let path = path.into();

        let records = match load_records(&path)? {
            Some(records) => records,
            None => {
                let seeded = vec![Record::new(1, SEED_NAME, SEED_VALUE)];
                write_records(&path, &seeded, atomic_writes)?;
                tracing::info!("Seeded {} with a default record", path.display());
                seeded
            }
        };

        Ok(Self {
            path,
            atomic_writes,
            writer: Mutex::new(IdAllocator::starting_after(&records)),
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Copy of the whole collection, in insertion order.
    pub fn all(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Record> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Record> {
        self.records.read().iter().find(|r| r.name == name).cloned()
    }

    /// Create a record called `name`, or return the existing one untouched.
    ///
    /// The boolean is `true` when a new record was written.
    pub fn create(&self, name: &str, value: &str) -> Result<(Record, bool), StoreError> {
        let mut ids = self.writer.lock();

        if let Some(existing) = self.find_by_name(name) {
            return Ok((existing, false));
        }

        let mut staged = self.all();
        let record = Record::new(ids.allocate(&staged), name, value);
        staged.push(record.clone());
        self.commit(staged)?;

        tracing::debug!("Created record {} ({})", record.id, record.name);
        Ok((record, true))
    }

    /// Overwrite the value of the record called `name`.
    ///
    /// Returns `Ok(None)` if there is no such record.
    pub fn update(&self, name: &str, value: &str) -> Result<Option<Record>, StoreError> {
        let _guard = self.writer.lock();

        let mut staged = self.all();
        let Some(record) = staged.iter_mut().find(|r| r.name == name) else {
            return Ok(None);
        };
        record.set_value(value);
        let updated = record.clone();
        self.commit(staged)?;

        Ok(Some(updated))
    }

    pub fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.delete_where(|r| r.id == id)
    }

    pub fn delete_by_name(&self, name: &str) -> Result<bool, StoreError> {
        self.delete_where(|r| r.name == name)
    }

    /// Empty the collection and persist an empty list. Returns how many
    /// records were dropped.
    pub fn delete_all(&self) -> Result<usize, StoreError> {
        let _guard = self.writer.lock();

        let removed = self.len();
        self.commit(Vec::new())?;

        tracing::info!("Deleted all {} records", removed);
        Ok(removed)
    }

    /// Rewrite the file from the published collection.
    pub fn persist(&self) -> Result<(), StoreError> {
        let _guard = self.writer.lock();
        write_records(&self.path, &self.records.read(), self.atomic_writes)
    }

    fn delete_where(&self, matches: impl Fn(&Record) -> bool) -> Result<bool, StoreError> {
        let _guard = self.writer.lock();

        let mut staged = self.all();
        let before = staged.len();
        staged.retain(|r| !matches(r));
        if staged.len() == before {
            return Ok(false);
        }
        self.commit(staged)?;

        Ok(true)
    }

    /// Write `staged` to disk, then publish it. Caller holds the writer lock.
    fn commit(&self, staged: Vec<Record>) -> Result<(), StoreError> {
        write_records(&self.path, &staged, self.atomic_writes)?;
        *self.records.write() = staged;
        Ok(())
    }
}
