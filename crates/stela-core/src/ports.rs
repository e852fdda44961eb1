//! Traits the issuance pipeline is assembled from.
//!
//! Each seam owns its error enum so implementations in other crates can
//! fail precisely without reaching across module boundaries.

use serde_json::Value;
use thiserror::Error;

use crate::claim::{AuthClaim, Claim, ClaimRequest, CoreClaim, EncodeOptions};
use crate::credential::{CredentialStatus, SignatureProof, VerifiableCredential};
use crate::did::Did;
use crate::identity::Identity;
use crate::schema::Schema;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema fetch failed: {0}")]
    Fetch(String),

    #[error("Schema parse failed: {0}")]
    Parse(String),

    #[error("Schema not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("State computation failed: {0}")]
    State(String),
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Credential assembly failed: {0}")]
    Assembly(String),
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid credential subject: {0}")]
    InvalidSubject(String),

    #[error("Value does not fit a data slot: {0}")]
    SlotOverflow(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Claim not found")]
    NotFound,

    #[error("Claim already exists: issuer {issuer}, nonce {nonce}")]
    Duplicate { issuer: String, nonce: u64 },

    #[error("Storage error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum NonceError {
    #[error("Entropy source failed: {0}")]
    Entropy(String),
}

/// Trait for loading and parsing credential schemas by URL.
#[async_trait::async_trait]
pub trait SchemaResolver: Send + Sync {
    /// Fetch the schema document at `url` and parse its metadata.
    async fn load(&self, url: &str) -> Result<Schema, SchemaError>;
}

/// Trait for identity lifecycle and signing operations.
#[async_trait::async_trait]
pub trait IdentityManager: Send + Sync {
    /// Mint a new issuing identity reachable at `origin`.
    async fn create(&self, origin: &str) -> Result<Identity, IdentityError>;

    /// Fetch the auth claim of a managed identity.
    async fn auth_claim(&self, issuer: &Did) -> Result<AuthClaim, IdentityError>;

    /// Sign a core claim digest with the key behind `auth_claim`.
    async fn sign_claim(
        &self,
        issuer: &Did,
        auth_claim: &AuthClaim,
        core_claim: &CoreClaim,
    ) -> Result<SignatureProof, IdentityError>;
}

/// Trait for assembling W3C credential envelopes.
pub trait CredentialBuilder: Send + Sync {
    /// Build the credential for one issuance request.
    fn build(
        &self,
        request: &ClaimRequest,
        schema: &Schema,
        revocation_nonce: u64,
    ) -> Result<VerifiableCredential, CredentialError>;

    /// Status entry pointing at the revocation endpoint for `nonce`.
    fn revocation_source(&self, issuer: &Did, nonce: u64) -> CredentialStatus;
}

/// Trait for translating a credential into its core claim encoding.
pub trait ClaimEncoder: Send + Sync {
    fn encode(
        &self,
        schema: &Schema,
        credential_type: &str,
        credential: &VerifiableCredential,
        opts: &EncodeOptions,
    ) -> Result<CoreClaim, EncodeError>;
}

/// Trait for claim persistence backends.
#[async_trait::async_trait]
pub trait ClaimStore: Send + Sync {
    /// Persist a fully assembled claim, assigning its id.
    async fn save(&self, claim: Claim) -> Result<Claim, StoreError>;

    /// Mark the claim with `nonce` issued by `issuer` as revoked.
    async fn revoke(&self, issuer: &Did, nonce: u64, description: &str) -> Result<(), StoreError>;

    /// Look up a claim by issuer and revocation nonce.
    async fn get_by_revocation_nonce(&self, issuer: &Did, nonce: u64)
        -> Result<Claim, StoreError>;
}

/// Trait for revocation nonce sources.
pub trait NonceGenerator: Send + Sync {
    fn next(&self) -> Result<u64, NonceError>;
}

/// Subject document helpers shared by encoder implementations.
pub fn subject_id(credential_subject: &Value) -> Option<&str> {
    credential_subject.get("id").and_then(Value::as_str)
}
