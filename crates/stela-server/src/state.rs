//! Application state

use std::sync::Arc;

use stela_core::ports::{ClaimStore, NonceGenerator, SchemaResolver};
use stela_issuer::{IssuerService, LocalIdentityManager, OsNonceGenerator, VcBuilder};
use stela_schema::{CoreClaimEncoder, HttpSchemaResolver};
use stela_store::{DatabaseConfig, MemoryClaimStore, PostgresClaimStore};

use crate::config::Settings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The issuance pipeline.
    pub issuer: Arc<IssuerService>,

    /// Whether claims are persisted in Postgres.
    pub db_configured: bool,
}

impl AppState {
    /// Wire the pipeline from settings, connecting to Postgres when a
    /// database URL is configured.
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let schemas = Arc::new(HttpSchemaResolver::new());
        let nonces = Arc::new(OsNonceGenerator::new());
        match &settings.database_url {
            Some(url) => {
                let store = PostgresClaimStore::connect(&DatabaseConfig::new(url)).await?;
                Ok(Self::with_components(
                    settings,
                    schemas,
                    Arc::new(store),
                    nonces,
                    true,
                ))
            }
            None => {
                tracing::warn!("No database configured, claims are kept in memory");
                Ok(Self::with_components(
                    settings,
                    schemas,
                    Arc::new(MemoryClaimStore::new()),
                    nonces,
                    false,
                ))
            }
        }
    }

    /// Assemble state from explicit components. `from_settings` is the
    /// production path; tests wire in-memory components through this.
    pub fn with_components(
        settings: &Settings,
        schemas: Arc<dyn SchemaResolver>,
        store: Arc<dyn ClaimStore>,
        nonces: Arc<dyn NonceGenerator>,
        db_configured: bool,
    ) -> Self {
        let identities = Arc::new(LocalIdentityManager::new(nonces.clone()));
        let issuer = IssuerService::new(
            schemas,
            identities,
            Arc::new(VcBuilder::new(settings.origin())),
            Arc::new(CoreClaimEncoder::new()),
            store,
            nonces,
            settings.origin(),
        );
        Self {
            issuer: Arc::new(issuer),
            db_configured,
        }
    }
}
