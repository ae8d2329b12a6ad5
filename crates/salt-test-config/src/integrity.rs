//! SHA-256 verification of fetched documents.

use sha2::{Digest, Sha256};

use crate::error::LoadError;

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Check `bytes` against an expected hex digest (case-insensitive).
pub fn verify(target: &str, bytes: &[u8], expected: &str) -> Result<(), LoadError> {
    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected.trim()) {
        return Ok(());
    }
    Err(LoadError::Integrity {
        target: target.to_string(),
        expected: expected.trim().to_ascii_lowercase(),
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_sha256_hex() {
        assert_eq!(sha256_hex(b""), EMPTY_SHA256);
    }

    #[test]
    fn test_verify_accepts_uppercase_digest() {
        assert!(verify("skiplist.toml", b"", &EMPTY_SHA256.to_uppercase()).is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let err = verify("skiplist.toml", b"[unit]\n", EMPTY_SHA256).unwrap_err();
        match err {
            LoadError::Integrity {
                expected, actual, ..
            } => {
                assert_eq!(expected, EMPTY_SHA256);
                assert_ne!(actual, EMPTY_SHA256);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
