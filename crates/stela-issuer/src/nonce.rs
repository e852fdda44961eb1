//! Revocation nonce generation

use rand::rngs::OsRng;
use rand::RngCore;

use stela_core::ports::{NonceError, NonceGenerator};

/// Draws nonces from the OS entropy source.
///
/// Nonces stay below 2^63 so they survive storage as a signed BIGINT.
#[derive(Default)]
pub struct OsNonceGenerator;

impl OsNonceGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl NonceGenerator for OsNonceGenerator {
    fn next(&self) -> Result<u64, NonceError> {
        let mut bytes = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| NonceError::Entropy(e.to_string()))?;
        Ok(u64::from_le_bytes(bytes) >> 1)
    }
}
