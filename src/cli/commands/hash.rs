//! `safepass hash` / `safepass verify`: salted secret hashing.

use crate::cli::output;
use crate::cli::read_secret;
use crate::crypto::SaltedHash;
use crate::errors::{Result, SafePassError};

/// Execute the `hash` command: print `{ "salt": ..., "hash": ... }`.
pub fn execute_hash() -> Result<()> {
    let secret = read_secret("Enter secret to hash", true)?;
    let pair = SaltedHash::derive(secret.as_bytes())?;

    let json = serde_json::to_string_pretty(&pair)
        .map_err(|e| SafePassError::SerializationError(format!("hash output: {e}")))?;
    println!("{json}");

    Ok(())
}

/// Execute the `verify` command.
pub fn execute_verify(salt: &str, hash: &str) -> Result<()> {
    let pair = SaltedHash::from_base64(salt, hash)?;
    let secret = read_secret("Enter secret to verify", false)?;

    if pair.verify(secret.as_bytes())? {
        output::success("Secret matches.");
        Ok(())
    } else {
        Err(SafePassError::CommandFailed(
            "secret does not match the given hash".into(),
        ))
    }
}
