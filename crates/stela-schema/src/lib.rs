//! Stela Schema
//!
//! Credential schema resolution and schema-driven core-claim encoding.

pub mod encoder;
pub mod resolver;

pub use encoder::CoreClaimEncoder;
pub use resolver::{HttpSchemaResolver, InMemorySchemaResolver};
