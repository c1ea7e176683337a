//! Cryptographic helpers.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the input and returns it hex-encoded.
///
/// Used for keying per-IP rate-limit counters without storing raw addresses.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a random alphanumeric token of the given length.
///
/// Used for anti-forgery tokens attached to wizard sessions.
pub fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("192.168.1.10"), sha256_hex("192.168.1.10"));
    }

    #[test]
    fn test_sha256_hex_distinct_inputs() {
        assert_ne!(sha256_hex("192.168.1.10"), sha256_hex("192.168.1.11"));
    }

    #[test]
    fn test_random_token_length() {
        assert_eq!(random_token(32).len(), 32);
        assert_eq!(random_token(0).len(), 0);
    }

    #[test]
    fn test_random_token_unique() {
        assert_ne!(random_token(32), random_token(32));
    }

    #[test]
    fn test_random_token_alphanumeric() {
        assert!(random_token(64).chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
