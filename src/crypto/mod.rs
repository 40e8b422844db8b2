//! Cryptographic primitives for SafePass.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 salted secret hashing (`hasher`)
//! - CSPRNG-backed random secret generation (`generator`)

pub mod generator;
pub mod hasher;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{generate_salt, hash_secret, generate_secret, ...};
pub use generator::{generate_secret, CharacterClasses};
pub use hasher::{generate_salt, hash_secret, verify_secret, SaltedHash};
