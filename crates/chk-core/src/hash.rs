use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{ChkError, ErrorInfo};
use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of the canonical JSON of `value`.
///
/// Identical reports hash identically regardless of map insertion order.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String, ChkError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Checks that `recorded` is the content hash of `value`.
///
/// A report edited after it was written fails with code `hash-mismatch`.
pub fn verify_content_hash<T: Serialize>(value: &T, recorded: &str) -> Result<(), ChkError> {
    let computed = content_hash(value)?;
    if computed == recorded {
        return Ok(());
    }
    Err(ChkError::Serde(
        ErrorInfo::new("hash-mismatch", "recorded hash does not match report contents")
            .with_context("recorded", recorded)
            .with_context("computed", computed),
    ))
}
