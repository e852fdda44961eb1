//! Claim issuance orchestration
//!
//! [`IssuerService`] wires the five pipeline seams together and owns the
//! issuance order: validate, resolve the schema, draw a nonce, assemble the
//! credential, encode, sign, persist. Failures split into validation errors
//! (the caller sent something unusable) and resource errors (a collaborator
//! broke); the transport layer maps the two onto status codes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use stela_core::claim::{
    Claim, ClaimRequest, EncodeOptions, MerklizedRootPosition, SubjectPosition,
};
use stela_core::did::Did;
use stela_core::identity::Identity;
use stela_core::ports::{
    ClaimEncoder, ClaimStore, CredentialBuilder, IdentityError, IdentityManager, NonceGenerator,
    SchemaResolver, StoreError,
};
use stela_core::schema::define_merklized_root_position;

#[derive(Error, Debug)]
pub enum IssueError {
    /// The request itself is unusable.
    #[error("{0}")]
    Validation(String),

    /// A pipeline collaborator failed.
    #[error("{0}")]
    Resource(String),
}

#[derive(Error, Debug)]
pub enum RevokeError {
    #[error("{0}")]
    Validation(String),

    #[error("the claim does not exist")]
    NotFound,

    #[error("{0}")]
    Store(String),
}

/// One issuance request, as accepted at the service boundary.
#[derive(Debug, Clone)]
pub struct CreateClaimInput {
    /// URL of the JSON schema describing the credential.
    pub credential_schema: String,

    /// Short credential type name, e.g. `KYCAgeCredential`.
    pub claim_type: String,

    /// Subject document; must be a JSON object. An `id` member binds the
    /// claim to that subject, its absence makes the claim self-issued.
    pub credential_subject: Value,

    pub expiration: Option<DateTime<Utc>>,

    pub version: Option<u32>,

    pub subject_position: Option<SubjectPosition>,

    pub merklized_root_position: Option<MerklizedRootPosition>,
}

/// The issuance orchestrator.
pub struct IssuerService {
    schemas: Arc<dyn SchemaResolver>,
    identities: Arc<dyn IdentityManager>,
    credentials: Arc<dyn CredentialBuilder>,
    encoder: Arc<dyn ClaimEncoder>,
    store: Arc<dyn ClaimStore>,
    nonces: Arc<dyn NonceGenerator>,
    origin: String,
}

impl IssuerService {
    pub fn new(
        schemas: Arc<dyn SchemaResolver>,
        identities: Arc<dyn IdentityManager>,
        credentials: Arc<dyn CredentialBuilder>,
        encoder: Arc<dyn ClaimEncoder>,
        store: Arc<dyn ClaimStore>,
        nonces: Arc<dyn NonceGenerator>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            schemas,
            identities,
            credentials,
            encoder,
            store,
            nonces,
            origin: origin.into(),
        }
    }

    /// Mint a new issuing identity.
    pub async fn create_identity(&self) -> Result<Identity, IdentityError> {
        self.identities.create(&self.origin).await.map_err(|e| {
            tracing::error!("Identity creation failed: {}", e);
            e
        })
    }

    /// Issue a claim on behalf of `identifier` and return the stored id.
    pub async fn issue_claim(
        &self,
        identifier: &str,
        input: CreateClaimInput,
    ) -> Result<Uuid, IssueError> {
        if identifier.trim().is_empty() {
            tracing::warn!("Rejected claim request with empty identifier");
            return Err(IssueError::Validation(
                "Invalid request identifier".to_string(),
            ));
        }
        let did = Did::parse(identifier).map_err(|e| {
            tracing::warn!("Rejected claim request: {}", e);
            IssueError::Validation(e.to_string())
        })?;

        let schema = self
            .schemas
            .load(&input.credential_schema)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load schema {}: {}", input.credential_schema, e);
                IssueError::Validation(e.to_string())
            })?;

        let request = ClaimRequest {
            did: did.clone(),
            schema_url: input.credential_schema,
            credential_subject: input.credential_subject,
            expiration: input.expiration,
            claim_type: input.claim_type,
            version: input.version.unwrap_or(0),
            subject_position: input.subject_position.unwrap_or_default(),
            merklized_root_position: input.merklized_root_position,
        };

        let revocation_nonce = self.nonces.next().map_err(|e| {
            tracing::error!("Nonce generation failed: {}", e);
            IssueError::Resource(e.to_string())
        })?;

        let credential = self
            .credentials
            .build(&request, &schema, revocation_nonce)
            .map_err(|e| {
                tracing::error!("Credential assembly failed: {}", e);
                IssueError::Resource(e.to_string())
            })?;

        let json_ld_context = schema.json_ld_context().ok_or_else(|| {
            tracing::warn!("Schema {} declares no jsonLdContext", schema.url);
            IssueError::Validation("invalid jsonLdContext".to_string())
        })?;
        let credential_type = format!("{}#{}", json_ld_context, request.claim_type);

        let merklized_root_position =
            define_merklized_root_position(&schema.metadata, request.merklized_root_position);
        let opts = EncodeOptions {
            revocation_nonce,
            merklized_root_position,
            version: request.version,
            subject_position: request.subject_position,
            updatable: false,
        };
        let core_claim = self
            .encoder
            .encode(&schema, &credential_type, &credential, &opts)
            .map_err(|e| {
                tracing::warn!("Claim encoding failed: {}", e);
                IssueError::Validation(e.to_string())
            })?;

        let mut claim = Claim::from_core_claim(&core_claim, &request.schema_url, &credential_type);

        let auth_claim = self.identities.auth_claim(&did).await.map_err(|e| {
            tracing::error!("Auth claim lookup failed for {}: {}", did, e);
            IssueError::Resource(e.to_string())
        })?;

        let mut proof = self
            .identities
            .sign_claim(&did, &auth_claim, &core_claim)
            .await
            .map_err(|e| {
                tracing::error!("Claim signing failed for {}: {}", did, e);
                IssueError::Resource(e.to_string())
            })?;

        claim.identifier = Some(did.to_string());
        claim.issuer = did.to_string();
        proof.issuer_data.credential_status = Some(
            self.credentials
                .revocation_source(&did, auth_claim.revocation_nonce()),
        );

        claim.signature_proof = serde_json::to_value(&proof).map_err(|e| {
            tracing::error!("Proof serialization failed: {}", e);
            IssueError::Resource(e.to_string())
        })?;
        claim.data = serde_json::to_value(&credential).map_err(|e| {
            tracing::error!("Credential serialization failed: {}", e);
            IssueError::Resource(e.to_string())
        })?;
        claim.credential_status = serde_json::to_value(&credential.credential_status).map_err(
            |e| {
                tracing::error!("Credential status serialization failed: {}", e);
                IssueError::Resource(e.to_string())
            },
        )?;

        let saved = self.store.save(claim).await.map_err(|e| {
            tracing::error!("Claim save failed: {}", e);
            IssueError::Resource(e.to_string())
        })?;

        let id = saved.id.ok_or_else(|| {
            IssueError::Resource("store returned a claim without an id".to_string())
        })?;
        tracing::info!("Issued claim {} for {}", id, did);
        Ok(id)
    }

    /// Mark the claim with `nonce` issued by `identifier` as revoked.
    pub async fn revoke_claim(&self, identifier: &str, nonce: u64) -> Result<(), RevokeError> {
        let did = Did::parse(identifier).map_err(|e| {
            tracing::warn!("Rejected revocation request: {}", e);
            RevokeError::Validation(e.to_string())
        })?;

        match self.store.revoke(&did, nonce, "").await {
            Ok(()) => {
                tracing::info!("Revocation of nonce {} for {} is pending", nonce, did);
                Ok(())
            }
            Err(StoreError::NotFound) => {
                tracing::warn!("Revocation of unknown nonce {} for {}", nonce, did);
                Err(RevokeError::NotFound)
            }
            Err(e) => {
                tracing::error!("Revocation failed: {}", e);
                Err(RevokeError::Store(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use stela_core::claim::{AuthClaim, CoreClaim};
    use stela_core::credential::{CredentialStatus, SignatureProof, VerifiableCredential};
    use stela_core::ports::{
        CredentialError, EncodeError, NonceError, SchemaError,
    };
    use stela_core::schema::{Schema, SchemaMetadata, SlotAssignment, URI_JSON_LD_CONTEXT};
    use stela_schema::{CoreClaimEncoder, InMemorySchemaResolver};
    use stela_store::MemoryClaimStore;

    use crate::credential::VcBuilder;
    use crate::identity::LocalIdentityManager;
    use crate::nonce::OsNonceGenerator;

    const BASE_URL: &str = "https://issuer.example:3001";
    const KYC_SCHEMA_URL: &str = "https://schemas.example/kyc.json";
    const KYC_CONTEXT: &str = "https://schemas.example/kyc.jsonld";

    #[derive(Default)]
    struct Counts {
        schema_loads: AtomicUsize,
        nonce_draws: AtomicUsize,
        builds: AtomicUsize,
        encodes: AtomicUsize,
        auth_lookups: AtomicUsize,
        signs: AtomicUsize,
        saves: AtomicUsize,
    }

    struct CountingResolver {
        counts: Arc<Counts>,
        inner: Arc<InMemorySchemaResolver>,
    }

    #[async_trait::async_trait]
    impl SchemaResolver for CountingResolver {
        async fn load(&self, url: &str) -> Result<Schema, SchemaError> {
            self.counts.schema_loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(url).await
        }
    }

    struct CountingIdentities {
        counts: Arc<Counts>,
        inner: Arc<LocalIdentityManager>,
    }

    #[async_trait::async_trait]
    impl IdentityManager for CountingIdentities {
        async fn create(&self, origin: &str) -> Result<Identity, IdentityError> {
            self.inner.create(origin).await
        }

        async fn auth_claim(&self, issuer: &Did) -> Result<AuthClaim, IdentityError> {
            self.counts.auth_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.auth_claim(issuer).await
        }

        async fn sign_claim(
            &self,
            issuer: &Did,
            auth_claim: &AuthClaim,
            core_claim: &CoreClaim,
        ) -> Result<SignatureProof, IdentityError> {
            self.counts.signs.fetch_add(1, Ordering::SeqCst);
            self.inner.sign_claim(issuer, auth_claim, core_claim).await
        }
    }

    struct CountingBuilder {
        counts: Arc<Counts>,
        inner: VcBuilder,
    }

    impl CredentialBuilder for CountingBuilder {
        fn build(
            &self,
            request: &ClaimRequest,
            schema: &Schema,
            revocation_nonce: u64,
        ) -> Result<VerifiableCredential, CredentialError> {
            self.counts.builds.fetch_add(1, Ordering::SeqCst);
            self.inner.build(request, schema, revocation_nonce)
        }

        fn revocation_source(&self, issuer: &Did, nonce: u64) -> CredentialStatus {
            self.inner.revocation_source(issuer, nonce)
        }
    }

    struct CountingEncoder {
        counts: Arc<Counts>,
        inner: CoreClaimEncoder,
    }

    impl ClaimEncoder for CountingEncoder {
        fn encode(
            &self,
            schema: &Schema,
            credential_type: &str,
            credential: &VerifiableCredential,
            opts: &EncodeOptions,
        ) -> Result<CoreClaim, EncodeError> {
            self.counts.encodes.fetch_add(1, Ordering::SeqCst);
            self.inner.encode(schema, credential_type, credential, opts)
        }
    }

    struct CountingStore {
        counts: Arc<Counts>,
        inner: Arc<MemoryClaimStore>,
    }

    #[async_trait::async_trait]
    impl ClaimStore for CountingStore {
        async fn save(&self, claim: Claim) -> Result<Claim, StoreError> {
            self.counts.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(claim).await
        }

        async fn revoke(
            &self,
            issuer: &Did,
            nonce: u64,
            description: &str,
        ) -> Result<(), StoreError> {
            self.inner.revoke(issuer, nonce, description).await
        }

        async fn get_by_revocation_nonce(
            &self,
            issuer: &Did,
            nonce: u64,
        ) -> Result<Claim, StoreError> {
            self.inner.get_by_revocation_nonce(issuer, nonce).await
        }
    }

    struct CountingNonce {
        counts: Arc<Counts>,
        inner: Arc<dyn NonceGenerator>,
    }

    impl NonceGenerator for CountingNonce {
        fn next(&self) -> Result<u64, NonceError> {
            self.counts.nonce_draws.fetch_add(1, Ordering::SeqCst);
            self.inner.next()
        }
    }

    struct FixedNonce(u64);

    impl NonceGenerator for FixedNonce {
        fn next(&self) -> Result<u64, NonceError> {
            Ok(self.0)
        }
    }

    struct FailingNonce;

    impl NonceGenerator for FailingNonce {
        fn next(&self) -> Result<u64, NonceError> {
            Err(NonceError::Entropy("entropy pool unavailable".to_string()))
        }
    }

    struct TestBed {
        service: IssuerService,
        counts: Arc<Counts>,
        store: Arc<MemoryClaimStore>,
        resolver: Arc<InMemorySchemaResolver>,
    }

    fn test_bed(nonces: Arc<dyn NonceGenerator>) -> TestBed {
        let counts = Arc::new(Counts::default());
        let resolver = Arc::new(InMemorySchemaResolver::new());
        let store = Arc::new(MemoryClaimStore::new());
        let identities = Arc::new(LocalIdentityManager::new(Arc::new(OsNonceGenerator::new())));

        let service = IssuerService::new(
            Arc::new(CountingResolver {
                counts: counts.clone(),
                inner: resolver.clone(),
            }),
            Arc::new(CountingIdentities {
                counts: counts.clone(),
                inner: identities,
            }),
            Arc::new(CountingBuilder {
                counts: counts.clone(),
                inner: VcBuilder::new(BASE_URL),
            }),
            Arc::new(CountingEncoder {
                counts: counts.clone(),
                inner: CoreClaimEncoder::new(),
            }),
            Arc::new(CountingStore {
                counts: counts.clone(),
                inner: store.clone(),
            }),
            Arc::new(CountingNonce {
                counts: counts.clone(),
                inner: nonces,
            }),
            BASE_URL,
        );

        TestBed {
            service,
            counts,
            store,
            resolver,
        }
    }

    fn kyc_schema(with_context: bool) -> Schema {
        let mut metadata = SchemaMetadata::default();
        if with_context {
            metadata
                .uris
                .insert(URI_JSON_LD_CONTEXT.to_string(), KYC_CONTEXT.to_string());
        }
        metadata.serialization = Some(SlotAssignment {
            index_slot_a: Some("birthday".to_string()),
            index_slot_b: Some("documentType".to_string()),
            ..Default::default()
        });
        metadata.required = vec!["birthday".to_string(), "documentType".to_string()];
        Schema {
            url: KYC_SCHEMA_URL.to_string(),
            schema_type: "KYCAgeCredential".to_string(),
            metadata,
        }
    }

    fn age_input(credential_subject: Value) -> CreateClaimInput {
        CreateClaimInput {
            credential_schema: KYC_SCHEMA_URL.to_string(),
            claim_type: "KYCAgeCredential".to_string(),
            credential_subject,
            expiration: None,
            version: None,
            subject_position: None,
            merklized_root_position: None,
        }
    }

    fn valid_subject() -> Value {
        json!({
            "id": "did:stela:holder1",
            "birthday": 19960424,
            "documentType": 2
        })
    }

    #[tokio::test]
    async fn empty_identifier_is_rejected_before_any_work() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));

        let err = bed
            .service
            .issue_claim("  ", age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid request identifier");
        assert_eq!(bed.counts.schema_loads.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.nonce_draws.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.builds.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.encodes.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.signs.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_identifier_is_rejected_before_schema_load() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));

        let err = bed
            .service
            .issue_claim("not-a-did", age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Validation(_)));
        assert_eq!(bed.counts.schema_loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_schema_fails_validation() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        let identity = bed.service.create_identity().await.unwrap();

        let err = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Validation(_)));
        assert!(err.to_string().contains(KYC_SCHEMA_URL));
        assert_eq!(bed.counts.nonce_draws.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_json_ld_context_rejects_the_claim() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        bed.resolver.insert(kyc_schema(false)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();

        let err = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid jsonLdContext");
        // The nonce is drawn and the envelope built before the context check.
        assert_eq!(bed.counts.nonce_draws.load(Ordering::SeqCst), 1);
        assert_eq!(bed.counts.builds.load(Ordering::SeqCst), 1);
        assert_eq!(bed.counts.encodes.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.signs.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn entropy_failure_surfaces_as_resource_error() {
        let bed = test_bed(Arc::new(FailingNonce));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();

        let err = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Resource(_)));
        assert_eq!(bed.counts.builds.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_required_field_fails_validation() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();

        let subject = json!({ "id": "did:stela:holder1", "birthday": 19960424 });
        let err = bed
            .service
            .issue_claim(&identity.identifier, age_input(subject))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Validation(_)));
        assert!(err.to_string().contains("documentType"));
        assert_eq!(bed.counts.auth_lookups.load(Ordering::SeqCst), 0);
        assert_eq!(bed.counts.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_issuer_cannot_sign() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        bed.resolver.insert(kyc_schema(true)).unwrap();

        let err = bed
            .service
            .issue_claim("did:stela:deadbeef", age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Resource(_)));
        assert_eq!(bed.counts.encodes.load(Ordering::SeqCst), 1);
        assert_eq!(bed.counts.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn issued_claims_are_persisted_with_issuer_binding() {
        let bed = test_bed(Arc::new(FixedNonce(7)));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();
        let did = Did::parse(&identity.identifier).unwrap();

        let expiration = Utc::now() + chrono::Duration::days(365);
        let mut input = age_input(valid_subject());
        input.expiration = Some(expiration);

        let id = bed
            .service
            .issue_claim(&identity.identifier, input)
            .await
            .unwrap();

        let claim = bed.store.get_by_revocation_nonce(&did, 7).await.unwrap();
        assert_eq!(claim.id, Some(id));
        assert_eq!(claim.identifier.as_deref(), Some(identity.identifier.as_str()));
        assert_eq!(claim.issuer, identity.identifier);
        assert_eq!(claim.rev_nonce, 7);
        assert_eq!(claim.other_identifier, "did:stela:holder1");
        assert_eq!(claim.expiration, expiration.timestamp());
        assert_eq!(
            claim.schema_type,
            format!("{}#{}", KYC_CONTEXT, "KYCAgeCredential")
        );

        assert_ne!(claim.data, Value::Null);
        assert_ne!(claim.signature_proof, Value::Null);
        assert_ne!(claim.credential_status, Value::Null);
        assert_eq!(claim.data["credentialStatus"]["revocationNonce"], json!(7));
        assert_eq!(claim.credential_status["revocationNonce"], json!(7));
        // The proof's status entry tracks the auth claim, not this claim.
        let proof_status = &claim.signature_proof["issuerData"]["credentialStatus"];
        assert!(proof_status["id"]
            .as_str()
            .is_some_and(|url| url.starts_with(BASE_URL)));
        assert_ne!(proof_status["revocationNonce"], json!(7));
    }

    #[tokio::test]
    async fn repeated_nonces_are_refused() {
        let bed = test_bed(Arc::new(FixedNonce(7)));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();

        bed.service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap();
        let err = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Resource(_)));
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn distinct_claims_get_distinct_ids() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();

        let first = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap();
        let second = bed
            .service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(bed.store.len(), 2);
    }

    #[tokio::test]
    async fn revoking_an_issued_claim_marks_it_revoked() {
        let bed = test_bed(Arc::new(FixedNonce(7)));
        bed.resolver.insert(kyc_schema(true)).unwrap();
        let identity = bed.service.create_identity().await.unwrap();
        let did = Did::parse(&identity.identifier).unwrap();

        bed.service
            .issue_claim(&identity.identifier, age_input(valid_subject()))
            .await
            .unwrap();

        bed.service
            .revoke_claim(&identity.identifier, 7)
            .await
            .unwrap();
        let claim = bed.store.get_by_revocation_nonce(&did, 7).await.unwrap();
        assert!(claim.revoked);

        // Revoking again stays successful.
        bed.service
            .revoke_claim(&identity.identifier, 7)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn revoking_an_unknown_claim_is_not_found() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));
        let identity = bed.service.create_identity().await.unwrap();

        let err = bed
            .service
            .revoke_claim(&identity.identifier, 424242)
            .await
            .unwrap_err();

        assert!(matches!(err, RevokeError::NotFound));
        assert_eq!(err.to_string(), "the claim does not exist");
    }

    #[tokio::test]
    async fn revoke_validates_the_identifier() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));

        let err = bed.service.revoke_claim("banana", 1).await.unwrap_err();
        assert!(matches!(err, RevokeError::Validation(_)));
    }

    #[tokio::test]
    async fn create_identity_returns_a_usable_did() {
        let bed = test_bed(Arc::new(OsNonceGenerator::new()));

        let identity = bed.service.create_identity().await.unwrap();
        assert!(Did::parse(&identity.identifier).is_ok());
    }
}
