//! The `CredentialEntry` value type.
//!
//! An entry is a username/secret/target triple plus an optional folder
//! tag.  Identity is structural over the triple: two entries with the same
//! username, secret and target are the same credential whatever their
//! folder.

use std::fmt;
use std::hash::{Hash, Hasher};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Result, SafePassError};

/// A single stored login.
///
/// Only constructible through [`CredentialEntry::new`], which rejects
/// blank fields.  All string fields are wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CredentialEntry {
    username: String,
    secret: String,
    target: String,
    folder: Option<String>,
}

impl CredentialEntry {
    /// Build a validated entry.
    ///
    /// Each field must contain something other than whitespace.  Values
    /// are stored exactly as given (no trimming).
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self> {
        let entry = Self {
            username: username.into(),
            secret: secret.into(),
            target: target.into(),
            folder: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Return a copy tagged with `folder`.  A blank folder clears the tag.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        let folder = folder.into();
        self.folder = if folder.trim().is_empty() {
            None
        } else {
            Some(folder)
        };
        self
    }

    /// Check the non-empty invariant on the three primary fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("username", &self.username),
            ("secret", &self.secret),
            ("target", &self.target),
        ] {
            if value.trim().is_empty() {
                return Err(SafePassError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }
}

impl PartialEq for CredentialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.secret == other.secret
            && self.target == other.target
    }
}

impl Eq for CredentialEntry {}

impl Hash for CredentialEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.username.hash(state);
        self.secret.hash(state);
        self.target.hash(state);
    }
}

// Never print the secret.
impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("target", &self.target)
            .field("folder", &self.folder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn accessors_return_fields() {
        let e = CredentialEntry::new("john_doe", "password123", "example.com").unwrap();
        assert_eq!(e.username(), "john_doe");
        assert_eq!(e.secret(), "password123");
        assert_eq!(e.target(), "example.com");
        assert_eq!(e.folder(), None);
    }

    #[test]
    fn rejects_blank_fields() {
        for (u, s, t) in [
            ("", "pw", "site"),
            ("user", "", "site"),
            ("user", "pw", ""),
            ("   ", "pw", "site"),
            ("user", "pw", "\t\n"),
        ] {
            let err = CredentialEntry::new(u, s, t).unwrap_err();
            assert!(matches!(err, SafePassError::Validation(_)), "{u:?} {s:?} {t:?}");
        }
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let e = CredentialEntry::new(" user ", "pw", "site").unwrap();
        assert_eq!(e.username(), " user ");
    }

    #[test]
    fn equality_ignores_folder() {
        let a = CredentialEntry::new("u", "p", "t").unwrap().with_folder("Websites");
        let b = CredentialEntry::new("u", "p", "t").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn different_secret_is_a_different_entry() {
        let a = CredentialEntry::new("u", "p1", "t").unwrap();
        let b = CredentialEntry::new("u", "p2", "t").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn blank_folder_clears_tag() {
        let e = CredentialEntry::new("u", "p", "t").unwrap().with_folder("  ");
        assert_eq!(e.folder(), None);
    }

    #[test]
    fn debug_redacts_secret() {
        let e = CredentialEntry::new("u", "topsecret", "t").unwrap();
        let dbg = format!("{e:?}");
        assert!(!dbg.contains("topsecret"));
        assert!(dbg.contains("<redacted>"));
    }
}
