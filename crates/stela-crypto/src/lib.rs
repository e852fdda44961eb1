//! Stela Crypto
//!
//! Signing and hashing primitives for the Stela credential issuer.
//! Uses Ed25519 signatures and SHA3-256 digests.

pub mod ed25519;
pub mod hash;

pub use ed25519::{KeyError, Keypair, PublicKey, SecretKey, Signature};
pub use hash::{sha3_256, sha3_256_multi, u64_to_bytes32};
