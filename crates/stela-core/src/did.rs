//! Decentralized identifier handling
//!
//! Stela binds every credential to a DID. Identifiers follow the
//! `did:<method>:<method-specific-id>` syntax; parsing is strict so that
//! malformed identifiers are rejected before any collaborator is invoked.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// DID method used for identities created by the local identity manager.
pub const DID_METHOD: &str = "stela";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DidError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier must start with 'did:'")]
    MissingScheme,

    #[error("DID method must be non-empty lowercase alphanumeric")]
    InvalidMethod,

    #[error("DID method-specific id is empty")]
    EmptyId,
}

/// A parsed decentralized identifier.
///
/// Construction goes through [`Did::parse`], so a `Did` value is always
/// well-formed. Serialized as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    method: String,
    id: String,
}

impl Did {
    /// Parse a raw identifier string.
    pub fn parse(input: &str) -> Result<Self, DidError> {
        if input.is_empty() {
            return Err(DidError::Empty);
        }

        let rest = input.strip_prefix("did:").ok_or(DidError::MissingScheme)?;
        let (method, id) = rest.split_once(':').ok_or(DidError::EmptyId)?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(DidError::InvalidMethod);
        }
        if id.is_empty() {
            return Err(DidError::EmptyId);
        }

        Ok(Self {
            method: method.to_string(),
            id: id.to_string(),
        })
    }

    /// Build a DID under the given method from a method-specific id.
    pub fn from_parts(method: &str, id: &str) -> Result<Self, DidError> {
        Self::parse(&format!("did:{}:{}", method, id))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "did:{}:{}", self.method, self.id)
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Did::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for Did {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Did::parse(s)
    }
}
