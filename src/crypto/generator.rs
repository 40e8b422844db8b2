//! Random secret generation from configurable character classes.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{Result, SafePassError};

/// Upper- and lower-case ASCII letters.
pub const ALPHA_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits.
pub const DIGIT_CHARS: &str = "0123456789";

/// The fixed special-character set.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[{]};:'\\\",<.>/?";

/// Which character classes a generated secret may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterClasses {
    pub special: bool,
    pub digits: bool,
    pub alpha: bool,
}

impl Default for CharacterClasses {
    fn default() -> Self {
        Self::all()
    }
}

impl CharacterClasses {
    /// Every class enabled.
    pub fn all() -> Self {
        Self {
            special: true,
            digits: true,
            alpha: true,
        }
    }

    /// Build the character pool for the enabled classes.
    ///
    /// Fails when no class is enabled.
    pub fn pool(&self) -> Result<Vec<char>> {
        let mut pool = Vec::new();
        if self.alpha {
            pool.extend(ALPHA_CHARS.chars());
        }
        if self.digits {
            pool.extend(DIGIT_CHARS.chars());
        }
        if self.special {
            pool.extend(SPECIAL_CHARS.chars());
        }

        if pool.is_empty() {
            return Err(SafePassError::NoCharacterClassSelected);
        }
        Ok(pool)
    }
}

/// Generate a random secret of exactly `length` characters.
///
/// Every position is drawn independently and uniformly from the pool of
/// enabled classes, so a short secret may not contain every class.  A
/// `length` of zero returns an empty string.
pub fn generate_secret(classes: CharacterClasses, length: usize) -> Result<Zeroizing<String>> {
    let pool = classes.pool()?;

    let mut rng = rand::rng();
    let mut secret = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        let idx = rng.random_range(0..pool.len());
        secret.push(pool[idx]);
    }

    Ok(secret)
}
