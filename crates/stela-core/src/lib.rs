//! Stela Core
//!
//! Core domain types for the Stela credential issuance platform.
//! This crate defines the data structures shared across the entire
//! Stela ecosystem, plus the capability traits the issuance
//! orchestrator consumes.

pub mod claim;
pub mod credential;
pub mod did;
pub mod identity;
pub mod ports;
pub mod schema;

pub use claim::{
    AuthClaim, Claim, ClaimRequest, CoreClaim, EncodeOptions, MerklizedRootPosition,
    SubjectPosition,
};
pub use credential::{
    CredentialSchema, CredentialStatus, IssuerData, IssuerState, SignatureProof,
    VerifiableCredential,
};
pub use did::{Did, DidError};
pub use identity::{Identity, IdentityState, StateStatus};
pub use ports::{
    ClaimEncoder, ClaimStore, CredentialBuilder, CredentialError, EncodeError, IdentityError,
    IdentityManager, NonceError, NonceGenerator, SchemaError, SchemaResolver, StoreError,
};
pub use schema::{Schema, SchemaHash, SchemaMetadata, SlotAssignment};
