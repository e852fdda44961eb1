//! Stela Issuer
//!
//! Orchestrates credential issuance: identity management, revocation nonce
//! generation, credential assembly and the issuance pipeline itself. The
//! pipeline seams are the traits in `stela-core`; this crate provides the
//! default implementations and the service that drives them.

pub mod credential;
pub mod identity;
pub mod nonce;
pub mod service;

pub use credential::VcBuilder;
pub use identity::{LocalIdentityManager, AUTH_CLAIM_TYPE};
pub use nonce::OsNonceGenerator;
pub use service::{CreateClaimInput, IssueError, IssuerService, RevokeError};
