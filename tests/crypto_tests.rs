//! Integration tests for secret generation and salted hashing.

use std::collections::HashSet;

use safepass::crypto::generator::{ALPHA_CHARS, DIGIT_CHARS, SPECIAL_CHARS};
use safepass::crypto::hasher::{HASH_LEN, SALT_LEN};
use safepass::crypto::{
    generate_salt, generate_secret, hash_secret, verify_secret, CharacterClasses, SaltedHash,
};
use safepass::ErrorKind;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

#[test]
fn no_character_class_is_an_error() {
    let classes = CharacterClasses {
        special: false,
        digits: false,
        alpha: false,
    };
    let err = generate_secret(classes, 6).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoCharacterClass);
}

#[test]
fn all_classes_produce_requested_length_from_pool() {
    let secret = generate_secret(CharacterClasses::all(), 12).unwrap();
    assert_eq!(secret.chars().count(), 12);

    let pool: HashSet<char> = format!("{ALPHA_CHARS}{DIGIT_CHARS}{SPECIAL_CHARS}")
        .chars()
        .collect();
    assert!(secret.chars().all(|c| pool.contains(&c)));
}

#[test]
fn zero_length_gives_empty_secret() {
    let secret = generate_secret(CharacterClasses::all(), 0).unwrap();
    assert!(secret.is_empty());
}

#[test]
fn digits_only_contains_only_digits() {
    let classes = CharacterClasses {
        special: false,
        digits: true,
        alpha: false,
    };
    let secret = generate_secret(classes, 64).unwrap();
    assert!(secret.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn special_only_contains_only_specials() {
    let classes = CharacterClasses {
        special: true,
        digits: false,
        alpha: false,
    };
    let secret = generate_secret(classes, 64).unwrap();
    assert!(secret.chars().all(|c| SPECIAL_CHARS.contains(c)));
}

#[test]
fn consecutive_secrets_differ() {
    let a = generate_secret(CharacterClasses::all(), 32).unwrap();
    let b = generate_secret(CharacterClasses::all(), 32).unwrap();
    assert_ne!(*a, *b);
}

// ---------------------------------------------------------------------------
// Salt
// ---------------------------------------------------------------------------

#[test]
fn salts_have_fixed_length() {
    assert_eq!(generate_salt().len(), SALT_LEN);
}

#[test]
fn ten_thousand_salts_are_unique() {
    let salts: HashSet<[u8; SALT_LEN]> = (0..10_000).map(|_| generate_salt()).collect();
    assert_eq!(salts.len(), 10_000);
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

#[test]
fn hash_is_deterministic_for_same_inputs() {
    let salt = generate_salt();
    let a = hash_secret(b"hunter2", &salt).unwrap();
    let b = hash_secret(b"hunter2", &salt).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hash_changes_with_secret() {
    let salt = generate_salt();
    let a = hash_secret(b"hunter2", &salt).unwrap();
    let b = hash_secret(b"hunter3", &salt).unwrap();
    assert_ne!(a, b);
}

#[test]
fn hash_changes_with_salt() {
    let a = hash_secret(b"hunter2", &[1u8; SALT_LEN]).unwrap();
    let b = hash_secret(b"hunter2", &[2u8; SALT_LEN]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn hash_is_base64_of_fixed_length() {
    let hash = hash_secret(b"hunter2", &generate_salt()).unwrap();
    let raw = BASE64.decode(&hash).unwrap();
    assert_eq!(raw.len(), HASH_LEN);
}

#[test]
fn verify_accepts_right_secret_and_rejects_wrong_one() {
    let salt = generate_salt();
    let hash = hash_secret(b"correct horse", &salt).unwrap();

    assert!(verify_secret(b"correct horse", &salt, &hash).unwrap());
    assert!(!verify_secret(b"battery staple", &salt, &hash).unwrap());
}

#[test]
fn verify_rejects_non_base64_hash() {
    let err = verify_secret(b"x", &generate_salt(), "not base64 !!").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn salted_hash_survives_base64_transport() {
    let original = SaltedHash::derive("pässwörd".as_bytes()).unwrap();
    let restored = SaltedHash::from_base64(&original.salt_base64(), &original.hash).unwrap();

    assert!(restored.verify("pässwörd".as_bytes()).unwrap());
    assert!(!restored.verify(b"password").unwrap());
}
