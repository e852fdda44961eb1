//! W3C Verifiable Credential envelope and the issuer signature proof.
//!
//! Serde rename attributes map between Rust snake_case and the W3C VC
//! JSON field names (camelCase / `@`-prefixed). The envelope is rigid;
//! `credential_subject` stays extensible per the data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base JSON-LD context every issued credential carries first.
pub const W3C_CREDENTIAL_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Type string all credentials include.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Type string of the `credentialSchema` entry.
pub const CREDENTIAL_SCHEMA_TYPE: &str = "JsonSchemaValidator2018";

/// Type string of the `credentialStatus` entry.
pub const CREDENTIAL_STATUS_TYPE: &str = "StelaRevocationStatus";

/// Proof type attached by the signing identity.
pub const SIGNATURE_PROOF_TYPE: &str = "Ed25519Signature2023";

/// A W3C Verifiable Credential as assembled during issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs; the base W3C context comes first.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential identifier, a `urn:uuid:` URI.
    pub id: String,

    /// Credential type(s); includes [`VERIFIABLE_CREDENTIAL_TYPE`].
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the issuing identity.
    pub issuer: String,

    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Extensible subject document; carries `id` and `type` members.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,

    #[serde(rename = "credentialStatus")]
    pub credential_status: CredentialStatus,

    #[serde(rename = "credentialSchema")]
    pub credential_schema: CredentialSchema,
}

/// Where and how revocation of this credential can be checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialStatus {
    /// Resolvable status URL for this credential's revocation nonce.
    pub id: String,

    #[serde(rename = "type")]
    pub status_type: String,

    #[serde(rename = "revocationNonce")]
    pub revocation_nonce: u64,
}

/// Pointer to the JSON schema the credential was validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSchema {
    pub id: String,

    #[serde(rename = "type")]
    pub schema_type: String,
}

impl CredentialSchema {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: url.into(),
            schema_type: CREDENTIAL_SCHEMA_TYPE.to_string(),
        }
    }
}

/// Signature proof produced by the issuer's auth claim over a core claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureProof {
    #[serde(rename = "type")]
    pub proof_type: String,

    #[serde(rename = "issuerData")]
    pub issuer_data: IssuerData,

    /// Hex encoding of the signed core claim.
    #[serde(rename = "coreClaim")]
    pub core_claim: String,

    /// Hex-encoded signature over the core claim digest.
    pub signature: String,
}

/// Identity material embedded in a signature proof so verifiers can
/// check the signing auth claim without a registry lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerData {
    /// Issuer DID.
    pub id: String,

    pub state: IssuerState,

    /// Hex encoding of the issuer's auth core claim.
    #[serde(rename = "authCoreClaim")]
    pub auth_core_claim: String,

    /// Revocation status of the auth claim itself.
    #[serde(
        rename = "credentialStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credential_status: Option<CredentialStatus>,
}

/// Issuer state snapshot at signing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerState {
    #[serde(rename = "claimsTreeRoot")]
    pub claims_tree_root: String,

    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_credential() -> VerifiableCredential {
        VerifiableCredential {
            context: vec![
                W3C_CREDENTIAL_CONTEXT.to_string(),
                "https://schemas.example/kyc.jsonld".to_string(),
            ],
            id: "urn:uuid:0b2a4e1e-9d6a-4b54-8a4e-2f6d9a42c001".to_string(),
            credential_type: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                "KYCAgeCredential".to_string(),
            ],
            issuer: "did:stela:issuer1".to_string(),
            issuance_date: Utc::now(),
            expiration_date: None,
            credential_subject: json!({
                "id": "did:stela:holder1",
                "type": "KYCAgeCredential",
                "birthday": 19960424
            }),
            credential_status: CredentialStatus {
                id: "https://issuer.example/v1/did:stela:issuer1/claims/revocation/status/42"
                    .to_string(),
                status_type: CREDENTIAL_STATUS_TYPE.to_string(),
                revocation_nonce: 42,
            },
            credential_schema: CredentialSchema::new("https://schemas.example/kyc.json"),
        }
    }

    #[test]
    fn json_field_names_match_w3c() {
        let val = serde_json::to_value(sample_credential()).unwrap();

        assert!(val.get("@context").is_some());
        assert!(val.get("type").is_some());
        assert!(val.get("issuanceDate").is_some());
        assert!(val.get("credentialSubject").is_some());
        assert!(val.get("credentialStatus").is_some());
        assert!(val.get("credentialSchema").is_some());
        assert!(val.get("credential_type").is_none());
        assert!(val.get("issuance_date").is_none());

        let status = val.get("credentialStatus").unwrap();
        assert_eq!(status.get("revocationNonce").unwrap(), 42);
        assert_eq!(
            status.get("type").unwrap(),
            CREDENTIAL_STATUS_TYPE
        );
    }

    #[test]
    fn expiration_omitted_when_absent() {
        let rendered = serde_json::to_string(&sample_credential()).unwrap();
        assert!(!rendered.contains("expirationDate"));
    }

    #[test]
    fn envelope_round_trips() {
        let credential = sample_credential();
        let rendered = serde_json::to_string(&credential).unwrap();
        let parsed: VerifiableCredential = serde_json::from_str(&rendered).unwrap();
        assert_eq!(credential, parsed);
    }

    #[test]
    fn proof_field_names_match_wire_shape() {
        let proof = SignatureProof {
            proof_type: SIGNATURE_PROOF_TYPE.to_string(),
            issuer_data: IssuerData {
                id: "did:stela:issuer1".to_string(),
                state: IssuerState {
                    claims_tree_root: "00".repeat(32),
                    value: "11".repeat(32),
                },
                auth_core_claim: "22".repeat(136),
                credential_status: Some(CredentialStatus {
                    id: "https://issuer.example/v1/did:stela:issuer1/claims/revocation/status/7"
                        .to_string(),
                    status_type: CREDENTIAL_STATUS_TYPE.to_string(),
                    revocation_nonce: 7,
                }),
            },
            core_claim: "33".repeat(136),
            signature: "44".repeat(64),
        };

        let val = serde_json::to_value(&proof).unwrap();
        assert!(val.get("issuerData").is_some());
        assert!(val.get("coreClaim").is_some());
        assert!(val["issuerData"].get("authCoreClaim").is_some());
        assert!(val["issuerData"].get("credentialStatus").is_some());
        assert!(val["issuerData"]["state"].get("claimsTreeRoot").is_some());
    }
}
