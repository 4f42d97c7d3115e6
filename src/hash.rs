//! Hash keys for Monkey hash literals
//!
//! A key is the value's kind plus a SHA-1 digest (base64) of its canonical
//! text, so equal strings held in distinct values still find the same entry.
//! Digests are memoized per `(kind, literal)` for the life of the thread.

use std::cell::RefCell;
use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha1::{Digest, Sha1};

/// The hashable value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKeyKind {
    Integer,
    Bool,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKeyKind,
    pub digest: String,
}

thread_local! {
    static CACHE: RefCell<HashMap<(HashKeyKind, String), HashKey>> = RefCell::new(HashMap::new());
}

impl HashKey {
    /// Key for a literal of the given kind, computed once and then reused
    pub fn new(kind: HashKeyKind, literal: &str) -> Self {
        CACHE.with(|cache| {
            let mut cache = cache.borrow_mut();
            if let Some(key) = cache.get(&(kind, literal.to_string())) {
                return key.clone();
            }
            let key = HashKey {
                kind,
                digest: digest(literal),
            };
            cache.insert((kind, literal.to_string()), key.clone());
            key
        })
    }
}

fn digest(literal: &str) -> String {
    STANDARD.encode(Sha1::digest(literal.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_base64_digest() {
        assert_eq!(digest(""), "2jmj7l5rSw0yVb/vlWAYkK/YBwk=");
    }

    #[test]
    fn test_same_literal_same_key() {
        let a = HashKey::new(HashKeyKind::String, "monkey");
        let b = HashKey::new(HashKeyKind::String, "monkey");
        assert_eq!(a, b);
    }

    #[test]
    fn test_kind_distinguishes_keys() {
        let int = HashKey::new(HashKeyKind::Integer, "1");
        let string = HashKey::new(HashKeyKind::String, "1");
        assert_eq!(int.digest, string.digest);
        assert_ne!(int, string);
    }
}
