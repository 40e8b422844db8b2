//! Folder registry.
//!
//! Folders are plain labels for grouping entries.  The registry is an
//! ordinary value: whoever needs one builds it (usually from the app
//! config) and passes it by reference.

use std::collections::BTreeMap;

use crate::errors::{Result, SafePassError};

/// Folders every registry starts with.  `clear` never removes these.
pub const DEFAULT_FOLDERS: [&str; 3] = ["Websites", "Applications", "Email Accounts"];

/// A named folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: String,
}

impl Folder {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for one of the built-in folders.
    pub fn is_default(&self) -> bool {
        is_default_folder(&self.name)
    }
}

fn is_default_folder(name: &str) -> bool {
    DEFAULT_FOLDERS.contains(&name)
}

/// Name → folder map.
#[derive(Debug, Clone)]
pub struct FolderRegistry {
    folders: BTreeMap<String, Folder>,
}

impl Default for FolderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FolderRegistry {
    /// A registry holding only the default folders.
    pub fn with_defaults() -> Self {
        let folders = DEFAULT_FOLDERS
            .iter()
            .map(|name| {
                (
                    (*name).to_string(),
                    Folder {
                        name: (*name).to_string(),
                    },
                )
            })
            .collect();
        Self { folders }
    }

    /// The defaults plus every non-blank name in `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::with_defaults();
        for name in extra {
            // Blank names in config are skipped rather than fatal.
            let _ = registry.add(name.as_ref());
        }
        registry
    }

    /// Register `name`.  Adding an existing name is a no-op.
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SafePassError::Validation(
                "folder name cannot be empty".into(),
            ));
        }
        self.folders
            .entry(name.to_string())
            .or_insert_with(|| Folder {
                name: name.to_string(),
            });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Folder> {
        self.folders.get(name)
    }

    /// Remove `name`.  Returns `false` if it was not registered.
    pub fn delete(&mut self, name: &str) -> bool {
        self.folders.remove(name).is_some()
    }

    /// Remove every folder except the defaults.
    pub fn clear(&mut self) {
        self.folders.retain(|name, _| is_default_folder(name));
    }

    pub fn exists(&self, name: &str) -> bool {
        self.folders.contains_key(name)
    }

    /// All folder names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.folders.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
