//! Schema resolution
//!
//! Loads credential schema documents and lifts their `$metadata` section
//! into [`Schema`] values the issuance pipeline can act on.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Deserialize;
use stela_core::ports::{SchemaError, SchemaResolver};
use stela_core::schema::{Schema, SchemaMetadata, SlotAssignment};

/// Wire shape of a credential schema document.
///
/// Only the members the issuer acts on are modelled; the rest of the
/// JSON Schema body passes through untouched.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(rename = "$metadata")]
    metadata: DocumentMetadata,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    required: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentMetadata {
    #[serde(default)]
    uris: HashMap<String, String>,

    #[serde(default)]
    serialization: Option<SlotAssignment>,
}

impl SchemaDocument {
    fn into_schema(self, url: &str) -> Schema {
        Schema {
            url: url.to_string(),
            schema_type: self.title.unwrap_or_default(),
            metadata: SchemaMetadata {
                uris: self.metadata.uris,
                serialization: self.metadata.serialization,
                required: self.required,
            },
        }
    }
}

/// Resolver that fetches schema documents over HTTP.
pub struct HttpSchemaResolver {
    client: reqwest::Client,
}

impl HttpSchemaResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSchemaResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SchemaResolver for HttpSchemaResolver {
    async fn load(&self, url: &str) -> Result<Schema, SchemaError> {
        tracing::debug!("Loading schema from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SchemaError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SchemaError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let document: SchemaDocument = response
            .json()
            .await
            .map_err(|e| SchemaError::Parse(e.to_string()))?;

        Ok(document.into_schema(url))
    }
}

/// In-memory resolver (for development/testing)
pub struct InMemorySchemaResolver {
    schemas: RwLock<HashMap<String, Schema>>,
}

impl InMemorySchemaResolver {
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Register an already resolved schema under its URL.
    pub fn insert(&self, schema: Schema) -> Result<(), SchemaError> {
        let mut schemas = self
            .schemas
            .write()
            .map_err(|e| SchemaError::Fetch(e.to_string()))?;
        schemas.insert(schema.url.clone(), schema);
        Ok(())
    }

    /// Parse a raw schema document and register it under `url`.
    pub fn insert_document(&self, url: &str, document: &str) -> Result<(), SchemaError> {
        let parsed: SchemaDocument =
            serde_json::from_str(document).map_err(|e| SchemaError::Parse(e.to_string()))?;
        self.insert(parsed.into_schema(url))
    }
}

impl Default for InMemorySchemaResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SchemaResolver for InMemorySchemaResolver {
    async fn load(&self, url: &str) -> Result<Schema, SchemaError> {
        let schemas = self
            .schemas
            .read()
            .map_err(|e| SchemaError::Fetch(e.to_string()))?;
        schemas
            .get(url)
            .cloned()
            .ok_or_else(|| SchemaError::NotFound(url.to_string()))
    }
}
