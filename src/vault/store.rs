//! In-memory credential store with persistence.
//!
//! `CredentialStore` keeps entries in insertion order and rejects
//! structural duplicates.  It is `Sync`: share it behind an `Arc` and call
//! it from any number of threads.  Every mutation runs under one
//! exclusive lock, so callers observe a single linear history and a
//! failed call never leaves a partial change behind.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{Result, SafePassError};

use super::entry::CredentialEntry;
use super::format;

/// The credential collection.
#[derive(Default)]
pub struct CredentialStore {
    /// Ordered entries.  No two are structurally equal.
    entries: Mutex<Vec<CredentialEntry>>,

    /// Serializes `save` and `load` against each other so an older
    /// snapshot can never be written over a newer one.
    persist: Mutex<()>,
}

impl CredentialStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and fill it from the file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append `entry`.
    ///
    /// Fails with `DuplicateEntry` if a structurally equal entry is
    /// already present; the store is unchanged in that case.
    pub fn add(&self, entry: CredentialEntry) -> Result<()> {
        entry.validate()?;

        let mut entries = self.lock_entries();
        if entries.contains(&entry) {
            return Err(SafePassError::DuplicateEntry {
                username: entry.username().to_string(),
                target: entry.target().to_string(),
            });
        }
        entries.push(entry);
        tracing::debug!(count = entries.len(), "credential added");
        Ok(())
    }

    /// Remove the entry structurally equal to `entry` and return it.
    pub fn remove(&self, entry: &CredentialEntry) -> Result<CredentialEntry> {
        entry.validate()?;

        let mut entries = self.lock_entries();
        let pos = entries
            .iter()
            .position(|e| e == entry)
            .ok_or_else(|| SafePassError::EntryNotFound {
                username: entry.username().to_string(),
                target: entry.target().to_string(),
            })?;
        let removed = entries.remove(pos);
        tracing::debug!(count = entries.len(), "credential removed");
        Ok(removed)
    }

    /// Remove every entry.  Calling this on an empty store is a no-op.
    pub fn clear(&self) {
        let mut entries = self.lock_entries();
        if !entries.is_empty() {
            tracing::debug!(count = entries.len(), "store cleared");
            entries.clear();
        }
    }

    /// Snapshot of all entries in insertion order.
    ///
    /// The returned vector is a copy; changing it never affects the store.
    pub fn list(&self) -> Vec<CredentialEntry> {
        self.lock_entries().clone()
    }

    /// Entries whose target contains `query` (case-insensitive).
    pub fn find_by_target(&self, query: &str) -> Vec<CredentialEntry> {
        let needle = query.to_lowercase();
        self.lock_entries()
            .iter()
            .filter(|e| e.target().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Entries tagged with `folder`.
    pub fn in_folder(&self, folder: &str) -> Vec<CredentialEntry> {
        self.lock_entries()
            .iter()
            .filter(|e| e.folder() == Some(folder))
            .cloned()
            .collect()
    }

    /// Returns `true` if a structurally equal entry is stored.
    pub fn contains(&self, entry: &CredentialEntry) -> bool {
        self.lock_entries().contains(entry)
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write a snapshot of the store to `path`, replacing the file.
    ///
    /// The snapshot is taken under the entries lock; the disk write runs
    /// after releasing it so in-memory operations are not blocked on IO.
    pub fn save(&self, path: &Path) -> Result<()> {
        let _persist = self.lock_persist();
        let snapshot = self.list();

        format::write_store(path, &snapshot)?;
        tracing::info!(path = %path.display(), entries = snapshot.len(), "store saved");
        Ok(())
    }

    /// Replace the store contents with the entries saved at `path`.
    ///
    /// On any error the current contents are left untouched.  Returns the
    /// number of entries loaded.
    pub fn load(&self, path: &Path) -> Result<usize> {
        let _persist = self.lock_persist();
        let loaded = format::read_store(path)?;
        let count = loaded.len();

        *self.lock_entries() = loaded;
        tracing::info!(path = %path.display(), entries = count, "store loaded");
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Locking
    // ------------------------------------------------------------------

    // No code path panics while holding either lock, and the entry list
    // is valid after every statement, so a poisoned guard is still usable.
    fn lock_entries(&self) -> MutexGuard<'_, Vec<CredentialEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_persist(&self) -> MutexGuard<'_, ()> {
        self.persist.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
