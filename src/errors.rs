use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in SafePass.
#[derive(Debug, Error)]
pub enum SafePassError {
    // --- Entry / store errors ---
    #[error("Invalid credential entry: {0}")]
    Validation(String),

    #[error("Credential for '{username}' on '{target}' already exists")]
    DuplicateEntry { username: String, target: String },

    #[error("Credential for '{username}' on '{target}' not found")]
    EntryNotFound { username: String, target: String },

    // --- Store file errors ---
    #[error("Store file not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("Store already exists at {0}")]
    StoreAlreadyExists(PathBuf),

    #[error("Invalid store format: {0}")]
    InvalidStoreFormat(String),

    #[error("Permission denied for {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Crypto errors ---
    #[error("Hashing algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),

    #[error("No character class selected: enable letters, digits, or special characters")]
    NoCharacterClassSelected,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Machine-readable classification of a [`SafePassError`].
///
/// Front ends report this alongside the human-readable message so a
/// caller can branch on the failure without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DuplicateEntry,
    NotFound,
    Format,
    Io,
    Permission,
    AlgorithmUnavailable,
    NoCharacterClass,
    Config,
    Command,
    Audit,
}

impl ErrorKind {
    /// Stable snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DuplicateEntry => "duplicate_entry",
            Self::NotFound => "not_found",
            Self::Format => "format",
            Self::Io => "io",
            Self::Permission => "permission",
            Self::AlgorithmUnavailable => "algorithm_unavailable",
            Self::NoCharacterClass => "no_character_class",
            Self::Config => "config",
            Self::Command => "command",
            Self::Audit => "audit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SafePassError {
    /// Classify this error.
    ///
    /// IO errors whose kind is `PermissionDenied` count as permission
    /// failures even when they arrived through the `?` conversion.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
            Self::EntryNotFound { .. } | Self::StoreNotFound(_) => ErrorKind::NotFound,
            Self::InvalidStoreFormat(_) | Self::SerializationError(_) => ErrorKind::Format,
            Self::PermissionDenied { .. } => ErrorKind::Permission,
            Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorKind::Permission
            }
            Self::Io(_) => ErrorKind::Io,
            Self::AlgorithmUnavailable(_) => ErrorKind::AlgorithmUnavailable,
            Self::NoCharacterClassSelected => ErrorKind::NoCharacterClass,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::StoreAlreadyExists(_) | Self::CommandFailed(_) => ErrorKind::Command,
            Self::AuditError(_) => ErrorKind::Audit,
        }
    }

    /// `true` for environment failures where retrying cannot help.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AlgorithmUnavailable(_))
    }

    /// Map an IO error raised while touching `path` to the matching variant.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::StoreNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => Self::Io(err),
        }
    }

    /// Like [`from_io`](Self::from_io) for writes: a missing directory is
    /// an IO failure, not a missing store.
    pub(crate) fn from_io_write(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => Self::Io(err),
        }
    }
}

/// Convenience type alias for SafePass results.
pub type Result<T> = std::result::Result<T, SafePassError>;
