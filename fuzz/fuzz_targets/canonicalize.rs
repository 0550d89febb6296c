//! Fuzz harness for `canonicalize`.
//!
//! Feeds arbitrary bytes as packed points and checks that canonicalization
//! never panics, never touches its input, and that every key it produces is
//! a fixed point that survives the persisted form.

#![no_main]
use libfuzzer_sys::fuzz_target;
use sigil_canonical::{canonicalize, SigilKey};

fuzz_target!(|data: &[u8]| {
    let original = data.to_vec();
    let Some(key) = canonicalize(data) else {
        assert_eq!(data, &original[..]);
        return;
    };
    assert_eq!(data, &original[..]);

    assert_eq!(key.as_bytes().len(), data.len());
    assert!(key.looks_canonical(), "{original:?} -> {key}");

    let again = canonicalize(key.as_bytes()).expect("canonical bytes must stay valid");
    assert_eq!(again.as_bytes(), key.as_bytes());

    let persisted = serde_json::to_vec(&key).expect("key serializes");
    let restored: SigilKey = serde_json::from_slice(&persisted).expect("key deserializes");
    assert_eq!(restored, key);
});
