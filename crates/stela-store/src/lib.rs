//! Stela Store
//!
//! Claim persistence backends: an in-memory map for development and
//! testing, and PostgreSQL for durable deployments. Both enforce
//! (issuer, revocation nonce) uniqueness.

pub mod memory;
pub mod postgres;

pub use memory::MemoryClaimStore;
pub use postgres::{DatabaseConfig, PostgresClaimStore};
