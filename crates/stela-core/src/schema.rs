//! Resolved schema metadata
//!
//! A [`Schema`] is the output of the schema resolver: the URIs advertised by
//! the schema document (the JSON-LD context in particular), the optional
//! explicit slot serialization, and the list of required subject fields.
//! Issuance cannot proceed past credential-type derivation without a
//! resolvable JSON-LD context URI.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::claim::MerklizedRootPosition;

/// Key of the JSON-LD context entry in [`SchemaMetadata::uris`].
pub const URI_JSON_LD_CONTEXT: &str = "jsonLdContext";

/// Key of the JSON schema entry in [`SchemaMetadata::uris`].
pub const URI_JSON_SCHEMA: &str = "jsonSchema";

/// 16-byte schema identifier derived from the fully qualified credential
/// type (`<jsonLdContext>#<type>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaHash([u8; 16]);

impl SchemaHash {
    /// Derive the hash for a fully qualified credential type.
    pub fn from_type_id(type_id: &str) -> Self {
        let digest: [u8; 32] = Sha3_256::digest(type_id.as_bytes()).into();
        let mut hash = [0u8; 16];
        hash.copy_from_slice(&digest[..16]);
        Self(hash)
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for SchemaHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SchemaHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("schema hash must be 16 bytes"))?;
        Ok(Self(bytes))
    }
}

/// Explicit subject-field-to-slot assignment declared by a schema.
///
/// When a schema carries one, its claims are not merklized: named subject
/// fields are serialized straight into the core-claim data slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotAssignment {
    #[serde(rename = "indexDataSlotA", default)]
    pub index_slot_a: Option<String>,

    #[serde(rename = "indexDataSlotB", default)]
    pub index_slot_b: Option<String>,

    #[serde(rename = "valueDataSlotA", default)]
    pub value_slot_a: Option<String>,

    #[serde(rename = "valueDataSlotB", default)]
    pub value_slot_b: Option<String>,
}

/// Structural metadata extracted from a schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    /// URIs advertised by the document, keyed by role
    /// (see [`URI_JSON_LD_CONTEXT`], [`URI_JSON_SCHEMA`]).
    pub uris: HashMap<String, String>,

    /// Explicit slot serialization, when the schema declares one.
    pub serialization: Option<SlotAssignment>,

    /// Subject fields the schema marks as required.
    pub required: Vec<String>,
}

/// A resolved schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// URL the schema was resolved from.
    pub url: String,

    /// Schema type name (e.g. `"KYCAgeCredential"`).
    pub schema_type: String,

    pub metadata: SchemaMetadata,
}

impl Schema {
    /// The JSON-LD context URI, if the schema advertises one.
    pub fn json_ld_context(&self) -> Option<&str> {
        self.metadata
            .uris
            .get(URI_JSON_LD_CONTEXT)
            .map(String::as_str)
    }
}

/// Resolve the merklized-root position for a claim.
///
/// A schema with an explicit slot serialization is never merklized. Absent
/// that, the requested position wins, and the default is `Index`.
pub fn define_merklized_root_position(
    metadata: &SchemaMetadata,
    requested: Option<MerklizedRootPosition>,
) -> MerklizedRootPosition {
    if metadata.serialization.is_some() {
        return MerklizedRootPosition::None;
    }
    match requested {
        Some(position) => position,
        None => MerklizedRootPosition::Index,
    }
}
