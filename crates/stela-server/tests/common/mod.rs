//! Test utilities for integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use stela_core::ports::{NonceError, NonceGenerator};
use stela_core::schema::{Schema, SchemaMetadata, SlotAssignment, URI_JSON_LD_CONTEXT};
use stela_schema::InMemorySchemaResolver;
use stela_server::config::Settings;
use stela_server::state::AppState;
use stela_store::MemoryClaimStore;

pub const KYC_SCHEMA_URL: &str = "https://schemas.example/kyc.json";
pub const KYC_CONTEXT: &str = "https://schemas.example/kyc.jsonld";

/// Nonce generator that always yields the same value.
pub struct FixedNonce(pub u64);

impl NonceGenerator for FixedNonce {
    fn next(&self) -> Result<u64, NonceError> {
        Ok(self.0)
    }
}

/// Test application wrapper
pub struct TestApp {
    router: Router,
    schemas: Arc<InMemorySchemaResolver>,
}

impl TestApp {
    /// Create a new test application with in-memory storage
    pub async fn new() -> Self {
        Self::with_nonces(Arc::new(stela_issuer::OsNonceGenerator::new())).await
    }

    /// Create a test application drawing every revocation nonce from `nonce`
    pub async fn with_nonce(nonce: u64) -> Self {
        Self::with_nonces(Arc::new(FixedNonce(nonce))).await
    }

    async fn with_nonces(nonces: Arc<dyn NonceGenerator>) -> Self {
        let settings = Settings::default();
        let schemas = Arc::new(InMemorySchemaResolver::new());
        let state = AppState::with_components(
            &settings,
            schemas.clone(),
            Arc::new(MemoryClaimStore::new()),
            nonces,
            false,
        );
        let router = stela_server::create_router(state);

        Self { router, schemas }
    }

    /// Get the router for making requests
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Register a schema with the in-memory resolver
    pub fn seed_schema(&self, schema: Schema) {
        self.schemas.insert(schema).unwrap();
    }

    /// Mint an identity through the API and return its DID string
    pub async fn create_identity(&self) -> String {
        let response = self
            .router()
            .oneshot(post_empty("/v1/identities"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        body["identifier"].as_str().unwrap().to_string()
    }
}

/// Schema document for a KYC age credential with explicit slot assignment
pub fn kyc_schema(with_context: bool) -> Schema {
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

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
