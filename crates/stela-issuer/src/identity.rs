//! In-process identity management
//!
//! Identities live in memory together with their Ed25519 key material and
//! the auth claim that authorizes signatures. Key material never leaves the
//! manager; callers only ever see public state and finished proofs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use stela_core::claim::{
    AuthClaim, CoreClaim, EncodeOptions, MerklizedRootPosition, SubjectPosition,
};
use stela_core::credential::{IssuerData, IssuerState, SignatureProof, SIGNATURE_PROOF_TYPE};
use stela_core::did::{Did, DID_METHOD};
use stela_core::identity::{Identity, IdentityState, StateStatus};
use stela_core::ports::{IdentityError, IdentityManager, NonceGenerator};
use stela_core::schema::SchemaHash;
use stela_crypto::{sha3_256, sha3_256_multi, Keypair, PublicKey};

/// Fully qualified type of the auth claim every identity self-issues.
pub const AUTH_CLAIM_TYPE: &str = "https://schemas.stela.id/core/auth.jsonld#AuthKeyCredential";

struct ManagedIdentity {
    identity: Identity,
    auth_claim: AuthClaim,
    keypair: Keypair,
}

/// Identity manager backed by process memory.
///
/// Suitable for single-node deployments; a registry-backed manager with
/// externally held keys is the extension point for anything larger.
pub struct LocalIdentityManager {
    identities: RwLock<HashMap<String, ManagedIdentity>>,
    nonces: Arc<dyn NonceGenerator>,
}

impl LocalIdentityManager {
    pub fn new(nonces: Arc<dyn NonceGenerator>) -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
            nonces,
        }
    }

    /// Public key bound to `issuer` through its auth claim.
    pub fn verifying_key(&self, issuer: &Did) -> Result<PublicKey, IdentityError> {
        let identities = self
            .identities
            .read()
            .map_err(|e| IdentityError::State(e.to_string()))?;
        identities
            .get(&issuer.to_string())
            .map(|managed| managed.keypair.public_key.clone())
            .ok_or_else(|| IdentityError::UnknownIdentity(issuer.to_string()))
    }

    fn derive_did(public_key: &PublicKey) -> Result<Did, IdentityError> {
        let digest = sha3_256(&public_key.to_bytes());
        Did::from_parts(DID_METHOD, &hex::encode(&digest[..16]))
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))
    }

    fn auth_claim_for(public_key: &PublicKey, revocation_nonce: u64) -> AuthClaim {
        let mut index_slot = [0u8; 32];
        index_slot.copy_from_slice(&public_key.to_bytes());
        let core_claim = CoreClaim::new(
            SchemaHash::from_type_id(AUTH_CLAIM_TYPE),
            None,
            None,
            index_slot,
            [0u8; 32],
            &EncodeOptions {
                revocation_nonce,
                merklized_root_position: MerklizedRootPosition::None,
                version: 0,
                subject_position: SubjectPosition::Index,
                updatable: false,
            },
        );
        AuthClaim { core_claim }
    }

    fn genesis_state(auth_claim: &AuthClaim) -> IdentityState {
        let claims_root = auth_claim.core_claim.digest();
        let revocation_root = [0u8; 32];
        let root_of_roots = [0u8; 32];
        let state = sha3_256_multi(&[
            claims_root.as_slice(),
            revocation_root.as_slice(),
            root_of_roots.as_slice(),
        ]);
        let now = Utc::now();
        IdentityState {
            state: hex::encode(state),
            claims_tree_root: hex::encode(claims_root),
            revocation_tree_root: hex::encode(revocation_root),
            root_of_roots: hex::encode(root_of_roots),
            previous_state: None,
            block_number: None,
            block_timestamp: None,
            tx_id: None,
            status: StateStatus::Created,
            created_at: now,
            modified_at: now,
        }
    }
}

#[async_trait::async_trait]
impl IdentityManager for LocalIdentityManager {
    async fn create(&self, origin: &str) -> Result<Identity, IdentityError> {
        let keypair = Keypair::generate();
        let did = Self::derive_did(&keypair.public_key)?;

        let auth_nonce = self
            .nonces
            .next()
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))?;
        let auth_claim = Self::auth_claim_for(&keypair.public_key, auth_nonce);

        let identity = Identity {
            identifier: did.to_string(),
            immutable: false,
            relay: false,
            state: Self::genesis_state(&auth_claim),
        };

        let mut identities = self
            .identities
            .write()
            .map_err(|e| IdentityError::State(e.to_string()))?;
        identities.insert(
            did.to_string(),
            ManagedIdentity {
                identity: identity.clone(),
                auth_claim,
                keypair,
            },
        );

        tracing::info!("Created identity {} served from {}", did, origin);
        Ok(identity)
    }

    async fn auth_claim(&self, issuer: &Did) -> Result<AuthClaim, IdentityError> {
        let identities = self
            .identities
            .read()
            .map_err(|e| IdentityError::State(e.to_string()))?;
        identities
            .get(&issuer.to_string())
            .map(|managed| managed.auth_claim.clone())
            .ok_or_else(|| IdentityError::UnknownIdentity(issuer.to_string()))
    }

    async fn sign_claim(
        &self,
        issuer: &Did,
        auth_claim: &AuthClaim,
        core_claim: &CoreClaim,
    ) -> Result<SignatureProof, IdentityError> {
        let identities = self
            .identities
            .read()
            .map_err(|e| IdentityError::State(e.to_string()))?;
        let managed = identities
            .get(&issuer.to_string())
            .ok_or_else(|| IdentityError::UnknownIdentity(issuer.to_string()))?;

        let signature = managed.keypair.sign(&core_claim.digest());

        Ok(SignatureProof {
            proof_type: SIGNATURE_PROOF_TYPE.to_string(),
            issuer_data: IssuerData {
                id: issuer.to_string(),
                state: IssuerState {
                    claims_tree_root: managed.identity.state.claims_tree_root.clone(),
                    value: managed.identity.state.state.clone(),
                },
                auth_core_claim: auth_claim.core_claim.to_hex(),
                // Filled by the orchestrator once it knows the auth claim's
                // revocation endpoint.
                credential_status: None,
            },
            core_claim: core_claim.to_hex(),
            signature: signature.to_hex(),
        })
    }
}
