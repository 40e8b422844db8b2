//! Salted secret hashing using PBKDF2-HMAC-SHA256.
//!
//! A secret is never stored by this module.  Instead we derive a 256-bit
//! key from the secret and a random 16-byte salt, and keep the
//! `(salt, hash)` pair.  Verification re-derives the key from a candidate
//! secret with the stored salt and compares in constant time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::Hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::errors::{Result, SafePassError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 10_000;

/// Length of the derived key in bytes (256 bits).
pub const HASH_LEN: usize = 32;

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Derive the base64-encoded PBKDF2-HMAC-SHA256 hash of `secret`.
///
/// Deterministic for the same `(secret, salt)`.  The raw derived bytes
/// are zeroized before returning; only the encoded form leaves.
pub fn hash_secret(secret: &[u8], salt: &[u8]) -> Result<String> {
    let mut derived = derive(secret, salt)?;
    let encoded = BASE64.encode(derived);
    derived.zeroize();
    Ok(encoded)
}

/// Check `candidate` against a stored salt and base64 hash.
///
/// Returns `Ok(false)` for a wrong secret.  A stored hash that is not
/// valid base64 is a format error, not a mismatch.
pub fn verify_secret(candidate: &[u8], salt: &[u8], expected_hash: &str) -> Result<bool> {
    let mut expected = BASE64
        .decode(expected_hash.trim())
        .map_err(|e| SafePassError::SerializationError(format!("hash is not base64: {e}")))?;

    let mut derived = derive(candidate, salt)?;
    let matches: bool = derived.as_slice().ct_eq(expected.as_slice()).into();

    derived.zeroize();
    expected.zeroize();
    Ok(matches)
}

fn derive(secret: &[u8], salt: &[u8]) -> Result<[u8; HASH_LEN]> {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, salt, ITERATIONS, &mut out).map_err(|e| {
        SafePassError::AlgorithmUnavailable(format!("PBKDF2-HMAC-SHA256 rejected input: {e}"))
    })?;
    Ok(out)
}

/// Serde adapter storing raw bytes as a base64 string.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(s).map_err(serde::de::Error::custom)
    }
}

/// A salt and the hash derived with it.  The two always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltedHash {
    /// Raw salt bytes (base64 in JSON).
    #[serde(with = "base64_bytes")]
    pub salt: Vec<u8>,

    /// Base64-encoded derived key.
    pub hash: String,
}

impl SaltedHash {
    /// Hash `secret` with a freshly generated salt.
    pub fn derive(secret: &[u8]) -> Result<Self> {
        let salt = generate_salt();
        let hash = hash_secret(secret, &salt)?;
        Ok(Self {
            salt: salt.to_vec(),
            hash,
        })
    }

    /// Returns `true` if `candidate` hashes to the stored value.
    pub fn verify(&self, candidate: &[u8]) -> Result<bool> {
        verify_secret(candidate, &self.salt, &self.hash)
    }

    /// The salt as base64, for display next to `hash`.
    pub fn salt_base64(&self) -> String {
        BASE64.encode(&self.salt)
    }

    /// Rebuild a pair from its two base64 strings.
    pub fn from_base64(salt: &str, hash: &str) -> Result<Self> {
        let salt = BASE64
            .decode(salt.trim())
            .map_err(|e| SafePassError::SerializationError(format!("salt is not base64: {e}")))?;
        Ok(Self {
            salt,
            hash: hash.trim().to_string(),
        })
    }
}
