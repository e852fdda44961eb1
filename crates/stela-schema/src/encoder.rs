//! Core-claim encoding
//!
//! Turns an assembled credential into its canonical [`CoreClaim`] form.
//! Subject data reaches the two 32-byte data slots one of two ways: a
//! schema-declared slot assignment serializes named fields directly, and
//! everything else is digested into the slot named by the merklized-root
//! position.

use serde_json::{Map, Value};

use stela_core::claim::{CoreClaim, EncodeOptions, MerklizedRootPosition};
use stela_core::credential::VerifiableCredential;
use stela_core::did::Did;
use stela_core::ports::{self, ClaimEncoder, EncodeError};
use stela_core::schema::{Schema, SchemaHash, SlotAssignment};
use stela_crypto::hash::{i64_to_bytes32, sha3_256, sha3_256_multi, u64_to_bytes32};

pub struct CoreClaimEncoder;

impl CoreClaimEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoreClaimEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimEncoder for CoreClaimEncoder {
    fn encode(
        &self,
        schema: &Schema,
        credential_type: &str,
        credential: &VerifiableCredential,
        opts: &EncodeOptions,
    ) -> Result<CoreClaim, EncodeError> {
        let subject = credential
            .credential_subject
            .as_object()
            .ok_or_else(|| {
                EncodeError::InvalidSubject("credentialSubject must be a JSON object".to_string())
            })?;

        for field in &schema.metadata.required {
            if !subject.contains_key(field) {
                return Err(EncodeError::MissingField(field.clone()));
            }
        }

        let subject_did = match ports::subject_id(&credential.credential_subject) {
            Some(raw) => {
                Some(Did::parse(raw).map_err(|e| EncodeError::InvalidSubject(e.to_string()))?)
            }
            None => None,
        };

        let (index_slot, value_slot) = match opts.merklized_root_position {
            MerklizedRootPosition::None => {
                let assignment = schema.metadata.serialization.as_ref().ok_or_else(|| {
                    EncodeError::MissingField("$metadata.serialization".to_string())
                })?;
                assigned_slots(assignment, subject)?
            }
            MerklizedRootPosition::Index => (subject_digest(subject)?, [0u8; 32]),
            MerklizedRootPosition::Value => ([0u8; 32], subject_digest(subject)?),
        };

        Ok(CoreClaim::new(
            SchemaHash::from_type_id(credential_type),
            subject_did,
            credential.expiration_date,
            index_slot,
            value_slot,
            opts,
        ))
    }
}

fn assigned_slots(
    assignment: &SlotAssignment,
    subject: &Map<String, Value>,
) -> Result<([u8; 32], [u8; 32]), EncodeError> {
    let index = combine(
        assignment.index_slot_a.as_deref(),
        assignment.index_slot_b.as_deref(),
        subject,
    )?;
    let value = combine(
        assignment.value_slot_a.as_deref(),
        assignment.value_slot_b.as_deref(),
        subject,
    )?;
    Ok((index, value))
}

/// One packed field fills the slot directly; two are digested together.
fn combine(
    a: Option<&str>,
    b: Option<&str>,
    subject: &Map<String, Value>,
) -> Result<[u8; 32], EncodeError> {
    match (a, b) {
        (None, None) => Ok([0u8; 32]),
        (Some(field), None) | (None, Some(field)) => pack_field(field, subject),
        (Some(a), Some(b)) => {
            let a = pack_field(a, subject)?;
            let b = pack_field(b, subject)?;
            Ok(sha3_256_multi(&[a.as_slice(), b.as_slice()]))
        }
    }
}

fn pack_field(name: &str, subject: &Map<String, Value>) -> Result<[u8; 32], EncodeError> {
    let value = subject
        .get(name)
        .ok_or_else(|| EncodeError::MissingField(name.to_string()))?;

    match value {
        Value::Bool(flag) => Ok(u64_to_bytes32(u64::from(*flag))),
        Value::Number(number) => {
            if let Some(v) = number.as_u64() {
                Ok(u64_to_bytes32(v))
            } else if let Some(v) = number.as_i64() {
                Ok(i64_to_bytes32(v))
            } else {
                Err(EncodeError::SlotOverflow(format!(
                    "{name} is not an integer"
                )))
            }
        }
        Value::String(text) => Ok(sha3_256(text.as_bytes())),
        _ => Err(EncodeError::SlotOverflow(format!(
            "{name} cannot be serialized into a data slot"
        ))),
    }
}

/// Digest of the full subject document. serde_json renders object members
/// in key order, so the digest is deterministic.
fn subject_digest(subject: &Map<String, Value>) -> Result<[u8; 32], EncodeError> {
    let rendered =
        serde_json::to_string(subject).map_err(|e| EncodeError::InvalidSubject(e.to_string()))?;
    Ok(sha3_256(rendered.as_bytes()))
}
