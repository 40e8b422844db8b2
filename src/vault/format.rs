//! Binary store file format.
//!
//! A `.spv` file has this layout:
//!
//! ```text
//! [SPWD: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON]
//! ([record_len: 4 bytes LE][record JSON])*
//! [SHA-256: 32 bytes]
//! ```
//!
//! - **Magic** (`SPWD`): identifies the file as a SafePass store.
//! - **Version**: format version (currently `1`).
//! - **Header JSON**: serialized `StoreHeader`, including the entry count.
//! - **Records**: one length-prefixed JSON object per entry, in store order.
//! - **SHA-256**: checksum over every preceding byte, so truncation and
//!   bit rot are reported as format errors instead of bad data.
//!
//! Secrets are stored in plaintext; the file is not encrypted.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use super::entry::CredentialEntry;
use crate::errors::{Result, SafePassError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every store file.
const MAGIC: &[u8; 4] = b"SPWD";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Size of the checksum appended to the file (SHA-256 = 32 bytes).
const CHECKSUM_LEN: usize = 32;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

/// Size of a record length prefix.
const LEN_PREFIX: usize = 4;

/// Default store file name inside the user's home directory.
pub const DEFAULT_FILE_NAME: &str = "passwords.spv";

// ---------------------------------------------------------------------------
// Header and record types
// ---------------------------------------------------------------------------

/// Metadata stored at the beginning of a store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHeader {
    /// Format version (mirrors the prefix byte).
    pub version: u8,

    /// When this file was written.
    pub saved_at: DateTime<Utc>,

    /// Number of records that follow.
    pub entry_count: u32,
}

/// On-disk shape of one entry.
#[derive(Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
struct StoredRecord {
    username: String,
    password: String,
    website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    folder: Option<String>,
}

impl From<&CredentialEntry> for StoredRecord {
    fn from(entry: &CredentialEntry) -> Self {
        Self {
            username: entry.username().to_string(),
            password: entry.secret().to_string(),
            website: entry.target().to_string(),
            folder: entry.folder().map(str::to_string),
        }
    }
}

impl StoredRecord {
    fn into_entry(self) -> Result<CredentialEntry> {
        let entry = CredentialEntry::new(
            self.username.as_str(),
            self.password.as_str(),
            self.website.as_str(),
        )?;
        Ok(match self.folder.as_deref() {
            Some(folder) => entry.with_folder(folder),
            None => entry,
        })
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode `entries` into the full binary file contents.
///
/// The returned buffer holds plaintext secrets and is wiped on drop.
pub fn encode_entries(entries: &[CredentialEntry]) -> Result<Zeroizing<Vec<u8>>> {
    let entry_count = u32::try_from(entries.len()).map_err(|_| {
        SafePassError::SerializationError(format!(
            "entry count {} exceeds u32::MAX",
            entries.len()
        ))
    })?;

    let header = StoreHeader {
        version: CURRENT_VERSION,
        saved_at: Utc::now(),
        entry_count,
    };
    let header_bytes = serde_json::to_vec(&header)
        .map_err(|e| SafePassError::SerializationError(format!("header: {e}")))?;

    let mut buf = Zeroizing::new(Vec::with_capacity(
        PREFIX_LEN + header_bytes.len() + entries.len() * 64 + CHECKSUM_LEN,
    ));

    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(&length_prefix(header_bytes.len(), "header")?);
    buf.extend_from_slice(&header_bytes);

    for entry in entries {
        let record = StoredRecord::from(entry);
        let mut record_bytes = serde_json::to_vec(&record)
            .map_err(|e| SafePassError::SerializationError(format!("record: {e}")))?;
        buf.extend_from_slice(&length_prefix(record_bytes.len(), "record")?);
        buf.extend_from_slice(&record_bytes);
        record_bytes.zeroize();
    }

    let checksum = Sha256::digest(buf.as_slice());
    buf.extend_from_slice(&checksum); // 32 bytes

    Ok(buf)
}

fn length_prefix(len: usize, what: &str) -> Result<[u8; LEN_PREFIX]> {
    let len = u32::try_from(len).map_err(|_| {
        SafePassError::SerializationError(format!("{what} length {len} exceeds u32::MAX"))
    })?;
    Ok(len.to_le_bytes())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode full file contents back into an ordered entry list.
///
/// Every structural problem (empty input, bad magic, unknown version,
/// checksum mismatch, short records, invalid or duplicate entries) is an
/// `InvalidStoreFormat` error.
pub fn decode_entries(data: &[u8]) -> Result<Vec<CredentialEntry>> {
    if data.is_empty() {
        return Err(SafePassError::InvalidStoreFormat("file is empty".into()));
    }

    if data.len() < PREFIX_LEN + CHECKSUM_LEN {
        return Err(SafePassError::InvalidStoreFormat(
            "file too small to be a valid store".into(),
        ));
    }

    // --- Fixed-size prefix ---

    if &data[0..4] != MAGIC {
        return Err(SafePassError::InvalidStoreFormat(
            "missing SPWD magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(SafePassError::InvalidStoreFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    // --- Checksum before trusting any length field ---

    let body_end = data.len() - CHECKSUM_LEN;
    let computed = Sha256::digest(&data[..body_end]);
    if computed.as_slice() != &data[body_end..] {
        return Err(SafePassError::InvalidStoreFormat(
            "checksum mismatch: file is truncated or corrupted".into(),
        ));
    }

    let body = &data[..body_end];
    let mut cursor = 5;

    let header_bytes = read_chunk(body, &mut cursor, "header")?;
    let header: StoreHeader = serde_json::from_slice(header_bytes)
        .map_err(|e| SafePassError::InvalidStoreFormat(format!("header JSON: {e}")))?;

    if header.version != version {
        return Err(SafePassError::InvalidStoreFormat(format!(
            "header version {} does not match prefix version {version}",
            header.version
        )));
    }

    // --- Records ---

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    while cursor < body.len() {
        let index = entries.len();
        let record_bytes = read_chunk(body, &mut cursor, "record")?;
        let record: StoredRecord = serde_json::from_slice(record_bytes)
            .map_err(|e| SafePassError::InvalidStoreFormat(format!("record {index}: {e}")))?;
        let entry = record
            .into_entry()
            .map_err(|e| SafePassError::InvalidStoreFormat(format!("record {index}: {e}")))?;

        if !seen.insert(entry.clone()) {
            return Err(SafePassError::InvalidStoreFormat(format!(
                "record {index} duplicates an earlier entry"
            )));
        }
        entries.push(entry);
    }

    if entries.len() != header.entry_count as usize {
        return Err(SafePassError::InvalidStoreFormat(format!(
            "header declares {} entries but file holds {}",
            header.entry_count,
            entries.len()
        )));
    }

    Ok(entries)
}

/// Read one `[len: u32 LE][bytes]` chunk starting at `cursor`.
fn read_chunk<'a>(body: &'a [u8], cursor: &mut usize, what: &str) -> Result<&'a [u8]> {
    let len_end = *cursor + LEN_PREFIX;
    if len_end > body.len() {
        return Err(SafePassError::InvalidStoreFormat(format!(
            "{what} length prefix is truncated"
        )));
    }

    let len_u32 = u32::from_le_bytes(
        body[*cursor..len_end]
            .try_into()
            .map_err(|_| SafePassError::InvalidStoreFormat(format!("bad {what} length")))?,
    );
    let len = usize::try_from(len_u32).map_err(|_| {
        SafePassError::InvalidStoreFormat(format!(
            "{what} length {len_u32} exceeds platform address space"
        ))
    })?;

    let end = len_end
        .checked_add(len)
        .filter(|end| *end <= body.len())
        .ok_or_else(|| {
            SafePassError::InvalidStoreFormat(format!("{what} length exceeds file size"))
        })?;

    *cursor = end;
    Ok(&body[len_end..end])
}

// ---------------------------------------------------------------------------
// File IO
// ---------------------------------------------------------------------------

/// Write the store file **atomically**.
///
/// 1. Encode all entries.
/// 2. Write to a temp file in the same directory and fsync it.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file.  On failure
/// the temp file is removed and the previous file is left untouched.
pub fn write_store(path: &Path, entries: &[CredentialEntry]) -> Result<()> {
    let buf = encode_entries(entries)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = write_synced(&tmp_path, &buf).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(SafePassError::from_io_write(path, e));
    }

    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    // A temp file left by an interrupted save keeps its old mode; start fresh.
    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    // Owner-only read/write: the file holds plaintext secrets.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Read and decode the store file at `path`.
pub fn read_store(path: &Path) -> Result<Vec<CredentialEntry>> {
    let data = Zeroizing::new(fs::read(path).map_err(|e| SafePassError::from_io(path, e))?);
    decode_entries(&data)
}

/// Default store location: `<home>/passwords.spv`.
pub fn default_store_path() -> Result<std::path::PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_FILE_NAME))
        .ok_or_else(|| SafePassError::ConfigError("cannot determine home directory".into()))
}
