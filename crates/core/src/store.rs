//! Generic record store.
//!
//! One [`RecordStore`] exists per entity type. It owns the ordered in-memory list for
//! that type and keeps two files in step with it:
//!
//! - the binary snapshot, loaded once by [`RecordStore::open`] and rewritten in full on
//!   every mutation
//! - the CSV mirror, rewritten in full alongside the snapshot and never read back
//!
//! Collections with an append-only log (appointments, lab reports) also get one CSV line
//! per [`RecordStore::add`]. Updates and deletes never touch the log.
//!
//! ## Matching
//!
//! Ids are compared ignoring case. `update` replaces the first match only, `delete`
//! removes every match, and `add` never checks for an existing id, so duplicates are
//! kept in insertion order.
//!
//! ## Locking
//!
//! Every method takes the store's mutex for its full duration, including the file
//! writes of a mutation. Stores never call one another, so they cannot deadlock.
//!
//! ## Failure
//!
//! When a write fails the in-memory change stands: the list remains the source of truth
//! for the rest of the session and the error is logged and returned to the caller.

use crate::constants::Collection;
use crate::error::{RecordError, RecordResult};
use hms_files::DataDirectory;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// An entity that can be kept in a [`RecordStore`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The files this entity type is persisted to.
    const COLLECTION: Collection;

    /// Lookup key, compared ignoring case.
    fn record_id(&self) -> &str;

    /// Field values in [`Collection::header`] order, unescaped.
    fn csv_fields(&self) -> Vec<String>;

    fn matches_record_id(&self, id: &str) -> bool {
        hms_types::eq_ignore_case(self.record_id(), id)
    }
}

/// In-memory list of one entity type plus its on-disk snapshot, mirror and log.
#[derive(Debug)]
pub struct RecordStore<T> {
    files: DataDirectory,
    records: Mutex<Vec<T>>,
}

impl<T: Record> RecordStore<T> {
    /// Loads the collection's snapshot, or starts empty when none has been written.
    ///
    /// An unreadable snapshot is handled as in [`RecordStore::open_recovering`]; the
    /// problem is logged and otherwise dropped.
    pub fn open(files: DataDirectory) -> RecordResult<Self> {
        Self::open_recovering(files).map(|(store, _)| store)
    }

    /// Loads the collection's snapshot, setting an unreadable one aside.
    ///
    /// When the snapshot exists but cannot be read or decoded it is renamed to
    /// `<blob>.corrupt` and the store starts empty. The second value then carries a
    /// [`RecordError::Unreadable`] for the caller to report.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Load`] if an unreadable snapshot cannot be moved aside.
    /// The store refuses to start rather than overwrite it.
    pub fn open_recovering(files: DataDirectory) -> RecordResult<(Self, Option<RecordError>)> {
        let collection = T::COLLECTION;

        let (records, warning) = match files.read_snapshot::<Vec<T>>(collection.blob) {
            Ok(records) => (records.unwrap_or_default(), None),
            Err(source) => {
                tracing::error!("failed to load {}: {}", collection.name, source);
                let moved_to = files.set_aside(collection.blob).map_err(|source| {
                    tracing::error!("failed to set {} aside: {}", collection.blob, source);
                    RecordError::Load {
                        collection: collection.name,
                        source,
                    }
                })?;
                tracing::warn!(
                    "starting {} empty; unreadable snapshot kept at {}",
                    collection.name,
                    moved_to.display()
                );
                let warning = RecordError::Unreadable {
                    file: collection.blob,
                    moved_to,
                    source,
                };
                (Vec::new(), Some(warning))
            }
        };

        tracing::debug!("loaded {} {}", records.len(), collection.name);

        Ok((
            Self {
                files,
                records: Mutex::new(records),
            },
            warning,
        ))
    }

    /// Appends `record` and persists the whole collection.
    pub fn add(&self, record: T) -> RecordResult<()> {
        let mut records = self.lock();
        let logged = record.clone();
        records.push(record);

        let persisted = self.persist(&records);
        let appended = self.append_log(&logged);
        persisted.and(appended)
    }

    /// Adds `records` in one write, only if the store is currently empty.
    ///
    /// Returns `true` if the records were added.
    pub fn populate_if_empty(&self, records: Vec<T>) -> RecordResult<bool> {
        let mut current = self.lock();
        if !current.is_empty() {
            return Ok(false);
        }

        current.extend(records);
        self.persist(&current)?;
        Ok(true)
    }

    /// Replaces the first record whose id matches `record`'s.
    ///
    /// Returns `false`, without writing anything, when no record matches.
    pub fn update(&self, record: T) -> RecordResult<bool> {
        let mut records = self.lock();

        let Some(slot) = records
            .iter_mut()
            .find(|existing| existing.matches_record_id(record.record_id()))
        else {
            return Ok(false);
        };

        *slot = record;
        self.persist(&records)?;
        Ok(true)
    }

    /// Removes every record whose id matches `id`, returning how many were removed.
    ///
    /// The collection is persisted even when nothing matched.
    pub fn delete(&self, id: &str) -> RecordResult<usize> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| !r.matches_record_id(id));
        let removed = before - records.len();

        self.persist(&records)?;
        Ok(removed)
    }

    /// Copy of every record in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.lock().clone()
    }

    /// First record whose id matches `id`, ignoring case.
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.lock()
            .iter()
            .find(|r| r.matches_record_id(id))
            .cloned()
    }

    /// Copies of every record satisfying `predicate`, in insertion order.
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.lock()
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        // A panic while holding the lock cannot leave the Vec half-written, so the data
        // is still usable.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Rewrites the snapshot and then the mirror; both are attempted.
    fn persist(&self, records: &[T]) -> RecordResult<()> {
        let collection = T::COLLECTION;

        let snapshot = self
            .files
            .write_snapshot(collection.blob, &records)
            .map(|bytes| {
                tracing::debug!(
                    "saved {} {} ({} bytes)",
                    records.len(),
                    collection.name,
                    bytes
                );
            })
            .map_err(|source| {
                tracing::error!("failed to save {}: {}", collection.blob, source);
                RecordError::Snapshot {
                    file: collection.blob,
                    source,
                }
            });

        let mirror = self
            .files
            .write_table(
                collection.mirror,
                collection.header,
                records.iter().map(Record::csv_fields),
            )
            .map_err(|source| {
                tracing::error!("failed to write {}: {}", collection.mirror, source);
                RecordError::Mirror {
                    file: collection.mirror,
                    source,
                }
            });

        snapshot.and(mirror)
    }

    fn append_log(&self, record: &T) -> RecordResult<()> {
        let collection = T::COLLECTION;
        let Some(log) = collection.log else {
            return Ok(());
        };

        self.files
            .append_row(log, collection.header, &record.csv_fields())
            .map(|created| {
                if created {
                    tracing::debug!("started {}", log);
                }
            })
            .map_err(|source| {
                tracing::error!("failed to append to {}: {}", log, source);
                RecordError::LogAppend { file: log, source }
            })
    }
}
