//! Hash functions for Stela
//!
//! SHA3-256 is the only digest used across claim encoding, identity
//! derivation, and state roots.

use sha3::{Digest, Sha3_256};

/// Compute SHA3-256 hash
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA3-256 hash of multiple byte slices
pub fn sha3_256_multi(data: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for d in data {
        hasher.update(d);
    }
    hasher.finalize().into()
}

/// Convert a u64 to a 32-byte representation (big-endian, left-padded)
pub fn u64_to_bytes32(value: u64) -> [u8; 32] {
    let mut result = [0u8; 32];
    result[24..32].copy_from_slice(&value.to_be_bytes());
    result
}

/// Convert an i64 to a 32-byte representation (big-endian, left-padded)
pub fn i64_to_bytes32(value: i64) -> [u8; 32] {
    let mut result = [0u8; 32];
    result[24..32].copy_from_slice(&value.to_be_bytes());
    result
}
