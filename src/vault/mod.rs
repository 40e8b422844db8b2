//! Vault module: credential storage.
//!
//! This module provides:
//! - The validated `CredentialEntry` value type (`entry`)
//! - Versioned, checksummed store file format (`format`)
//! - The thread-safe `CredentialStore` (`store`)
//! - The `FolderRegistry` of entry folders (`folders`)

pub mod entry;
pub mod folders;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::CredentialEntry;
pub use folders::{Folder, FolderRegistry, DEFAULT_FOLDERS};
pub use format::{default_store_path, StoreHeader};
pub use store::CredentialStore;
