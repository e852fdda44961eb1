//! Claim types
//!
//! [`CoreClaim`] is the canonical cryptographic encoding of a claim: a
//! fixed-shape binary structure that is the pre-image for the auth-claim
//! signature. [`Claim`] is the persisted record handed to the claim store,
//! and [`ClaimRequest`] the transient per-call description of what is to be
//! claimed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha3::{Digest, Sha3_256};
use uuid::Uuid;

use crate::did::Did;
use crate::schema::SchemaHash;

/// Fixed byte width of the [`CoreClaim`] wire layout.
pub const CORE_CLAIM_BYTES: usize = 136;

/// Where the subject binding sits within the claim structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectPosition {
    #[default]
    Index,
    Value,
}

/// Where the merklized root of the claim data sits, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerklizedRootPosition {
    None,
    Index,
    Value,
}

/// Options driving core-claim encoding, assembled by the orchestrator.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub revocation_nonce: u64,
    pub merklized_root_position: MerklizedRootPosition,
    pub version: u32,
    pub subject_position: SubjectPosition,
    pub updatable: bool,
}

/// The canonical claim encoding.
///
/// Immutable once constructed; [`CoreClaim::digest`] over the fixed
/// [`CoreClaim::to_bytes`] layout is what the issuer's auth claim signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreClaim {
    schema_hash: SchemaHash,
    version: u32,
    subject: Option<Did>,
    subject_position: SubjectPosition,
    merklized_root_position: MerklizedRootPosition,
    updatable: bool,
    revocation_nonce: u64,
    expiration: Option<DateTime<Utc>>,
    index_slot: [u8; 32],
    value_slot: [u8; 32],
}

impl CoreClaim {
    pub fn new(
        schema_hash: SchemaHash,
        subject: Option<Did>,
        expiration: Option<DateTime<Utc>>,
        index_slot: [u8; 32],
        value_slot: [u8; 32],
        opts: &EncodeOptions,
    ) -> Self {
        Self {
            schema_hash,
            version: opts.version,
            subject,
            subject_position: opts.subject_position,
            merklized_root_position: opts.merklized_root_position,
            updatable: opts.updatable,
            revocation_nonce: opts.revocation_nonce,
            expiration,
            index_slot,
            value_slot,
        }
    }

    pub fn schema_hash(&self) -> SchemaHash {
        self.schema_hash
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn subject(&self) -> Option<&Did> {
        self.subject.as_ref()
    }

    pub fn subject_position(&self) -> SubjectPosition {
        self.subject_position
    }

    pub fn merklized_root_position(&self) -> MerklizedRootPosition {
        self.merklized_root_position
    }

    pub fn updatable(&self) -> bool {
        self.updatable
    }

    pub fn revocation_nonce(&self) -> u64 {
        self.revocation_nonce
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    pub fn index_slot(&self) -> &[u8; 32] {
        &self.index_slot
    }

    pub fn value_slot(&self) -> &[u8; 32] {
        &self.value_slot
    }

    fn flags(&self) -> u8 {
        let mut flags = 0u8;
        if self.subject.is_some() {
            flags |= 0b0000_0001;
        }
        if self.subject_position == SubjectPosition::Value {
            flags |= 0b0000_0010;
        }
        flags |= match self.merklized_root_position {
            MerklizedRootPosition::None => 0b0000_0000,
            MerklizedRootPosition::Index => 0b0000_0100,
            MerklizedRootPosition::Value => 0b0000_1000,
        };
        if self.updatable {
            flags |= 0b0001_0000;
        }
        flags
    }

    /// Serialize into the fixed wire layout:
    ///
    /// ```text
    /// [0..16)    schema hash
    /// [16]       flags (subject set, subject position, mrp, updatable)
    /// [17..20)   reserved, zero
    /// [20..24)   version, u32 LE
    /// [24..32)   revocation nonce, u64 LE
    /// [32..40)   expiration unix seconds, i64 LE, zero when absent
    /// [40..72)   subject binding (SHA3-256 of the subject DID, zero for self)
    /// [72..104)  index data slot
    /// [104..136) value data slot
    /// ```
    pub fn to_bytes(&self) -> [u8; CORE_CLAIM_BYTES] {
        let mut out = [0u8; CORE_CLAIM_BYTES];
        out[..16].copy_from_slice(self.schema_hash.as_bytes());
        out[16] = self.flags();
        out[20..24].copy_from_slice(&self.version.to_le_bytes());
        out[24..32].copy_from_slice(&self.revocation_nonce.to_le_bytes());
        let expiration = self.expiration.map(|t| t.timestamp()).unwrap_or(0);
        out[32..40].copy_from_slice(&expiration.to_le_bytes());
        if let Some(subject) = &self.subject {
            let binding: [u8; 32] = Sha3_256::digest(subject.to_string().as_bytes()).into();
            out[40..72].copy_from_slice(&binding);
        }
        out[72..104].copy_from_slice(&self.index_slot);
        out[104..136].copy_from_slice(&self.value_slot);
        out
    }

    /// SHA3-256 digest of the wire layout; the signing pre-image.
    pub fn digest(&self) -> [u8; 32] {
        Sha3_256::digest(self.to_bytes()).into()
    }

    /// Hex encoding of the wire layout, as persisted and embedded in proofs.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// The identity's own claim, used to authorize signing of other claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaim {
    pub core_claim: CoreClaim,
}

impl AuthClaim {
    pub fn revocation_nonce(&self) -> u64 {
        self.core_claim.revocation_nonce()
    }
}

/// Transient description of one issuance call. Never persisted.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub did: Did,
    pub schema_url: String,
    pub credential_subject: Value,
    pub expiration: Option<DateTime<Utc>>,
    pub claim_type: String,
    pub version: u32,
    pub subject_position: SubjectPosition,
    pub merklized_root_position: Option<MerklizedRootPosition>,
}

/// The persisted claim record.
///
/// `id` is assigned by the store on save. Before save, `issuer` and
/// `identifier` must both carry the issuer DID string, and the three JSON
/// payload fields must be populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: Option<Uuid>,
    pub identifier: Option<String>,
    pub issuer: String,
    pub schema_hash: String,
    pub schema_url: String,
    pub schema_type: String,
    pub other_identifier: String,
    /// Unix seconds; zero when the claim does not expire.
    pub expiration: i64,
    pub updatable: bool,
    pub version: u32,
    pub rev_nonce: u64,
    pub core_claim: String,
    pub data: Value,
    pub signature_proof: Value,
    pub credential_status: Value,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
    pub revocation_description: Option<String>,
}

impl Claim {
    /// Build the record shape from an encoded core claim.
    pub fn from_core_claim(core_claim: &CoreClaim, schema_url: &str, schema_type: &str) -> Self {
        Self {
            id: None,
            identifier: None,
            issuer: String::new(),
            schema_hash: core_claim.schema_hash().to_hex(),
            schema_url: schema_url.to_string(),
            schema_type: schema_type.to_string(),
            other_identifier: core_claim
                .subject()
                .map(|did| did.to_string())
                .unwrap_or_default(),
            expiration: core_claim.expiration().map(|t| t.timestamp()).unwrap_or(0),
            updatable: core_claim.updatable(),
            version: core_claim.version(),
            rev_nonce: core_claim.revocation_nonce(),
            core_claim: core_claim.to_hex(),
            data: Value::Null,
            signature_proof: Value::Null,
            credential_status: Value::Null,
            created_at: Utc::now(),
            revoked: false,
            revocation_description: None,
        }
    }
}
