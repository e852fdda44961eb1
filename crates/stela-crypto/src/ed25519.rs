//! Ed25519 signatures
//!
//! Key material for issuing identities. Secret keys are zeroed on drop
//! and never appear in Debug output.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte width of an encoded public key.
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Byte width of an encoded signature.
pub const SIGNATURE_BYTES: usize = 64;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid secret key")]
    InvalidSecretKey,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signature verification failed")]
    VerificationFailed,
}

/// Ed25519 public key
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_BYTES] =
            bytes.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    /// Get raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.key.to_bytes()
    }

    /// Compute hash of the public key (for identity binding)
    pub fn hash(&self) -> [u8; 32] {
        crate::hash::sha3_256(&self.to_bytes())
    }

    /// Verify a signature
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        self.key
            .verify(message, &signature.inner)
            .map_err(|_| KeyError::VerificationFailed)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({} bytes)", PUBLIC_KEY_BYTES)
    }
}

/// Ed25519 secret key (zeroed on drop for security)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; PUBLIC_KEY_BYTES],
}

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_BYTES] =
            bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { bytes })
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        let key = SigningKey::from_bytes(&self.bytes);
        PublicKey {
            key: key.verifying_key(),
        }
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> Signature {
        let key = SigningKey::from_bytes(&self.bytes);
        Signature {
            inner: key.sign(message),
        }
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

/// Ed25519 signature
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    inner: ed25519_dalek::Signature,
}

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_BYTES] =
            bytes.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self {
            inner: ed25519_dalek::Signature::from_bytes(&bytes),
        })
    }

    /// Decode from a hex string
    pub fn from_hex(encoded: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(encoded).map_err(|_| KeyError::InvalidSignature)?;
        Self::from_bytes(&bytes)
    }

    /// Get raw bytes
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        self.inner.to_bytes()
    }

    /// Hex encoding, as embedded in signature proofs
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({} bytes)", SIGNATURE_BYTES)
    }
}

/// Ed25519 keypair
pub struct Keypair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl Keypair {
    /// Generate a new keypair from the OS entropy source
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        Self {
            public_key: PublicKey {
                key: signing.verifying_key(),
            },
            secret_key: SecretKey {
                bytes: signing.to_bytes(),
            },
        }
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret_key.sign(message)
    }

    /// Verify a signature
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        self.public_key.verify(message, signature)
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}
