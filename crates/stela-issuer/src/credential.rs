//! W3C credential assembly

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use stela_core::claim::ClaimRequest;
use stela_core::credential::{
    CredentialSchema, CredentialStatus, VerifiableCredential, CREDENTIAL_STATUS_TYPE,
    VERIFIABLE_CREDENTIAL_TYPE, W3C_CREDENTIAL_CONTEXT,
};
use stela_core::did::Did;
use stela_core::ports::{CredentialBuilder, CredentialError};
use stela_core::schema::Schema;

/// Assembles credential envelopes and revocation-status descriptors.
pub struct VcBuilder {
    base_url: String,
}

impl VcBuilder {
    /// `base_url` is the externally reachable issuer origin,
    /// e.g. `https://issuer.example:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn status_url(&self, issuer: &Did, nonce: u64) -> String {
        format!(
            "{}/v1/{}/claims/revocation/status/{}",
            self.base_url, issuer, nonce
        )
    }
}

impl CredentialBuilder for VcBuilder {
    fn build(
        &self,
        request: &ClaimRequest,
        schema: &Schema,
        revocation_nonce: u64,
    ) -> Result<VerifiableCredential, CredentialError> {
        let mut credential_subject = request.credential_subject.clone();
        let subject = credential_subject.as_object_mut().ok_or_else(|| {
            CredentialError::Assembly("credentialSubject must be a JSON object".to_string())
        })?;
        subject.insert(
            "type".to_string(),
            Value::String(request.claim_type.clone()),
        );

        let mut context = vec![W3C_CREDENTIAL_CONTEXT.to_string()];
        if let Some(json_ld_context) = schema.json_ld_context() {
            context.push(json_ld_context.to_string());
        }

        Ok(VerifiableCredential {
            context,
            id: format!("urn:uuid:{}", Uuid::new_v4()),
            credential_type: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                request.claim_type.clone(),
            ],
            issuer: request.did.to_string(),
            issuance_date: Utc::now(),
            expiration_date: request.expiration,
            credential_subject,
            credential_status: self.revocation_source(&request.did, revocation_nonce),
            credential_schema: CredentialSchema::new(request.schema_url.clone()),
        })
    }

    fn revocation_source(&self, issuer: &Did, nonce: u64) -> CredentialStatus {
        CredentialStatus {
            id: self.status_url(issuer, nonce),
            status_type: CREDENTIAL_STATUS_TYPE.to_string(),
            revocation_nonce: nonce,
        }
    }
}
