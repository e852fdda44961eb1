//! PostgreSQL claim store

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use stela_core::claim::Claim;
use stela_core::did::Did;
use stela_core::ports::{ClaimStore, StoreError};

/// Database pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of idle connections
    pub min_connections: u32,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Row shape of the claims table.
#[derive(Debug, Clone, FromRow)]
struct ClaimRow {
    id: Uuid,
    identifier: String,
    issuer: String,
    schema_hash: String,
    schema_url: String,
    schema_type: String,
    other_identifier: String,
    expiration: i64,
    updatable: bool,
    version: i64,
    rev_nonce: i64,
    core_claim: String,
    data: serde_json::Value,
    signature_proof: serde_json::Value,
    credential_status: serde_json::Value,
    revoked: bool,
    revocation_description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Self {
            id: Some(row.id),
            identifier: Some(row.identifier),
            issuer: row.issuer,
            schema_hash: row.schema_hash,
            schema_url: row.schema_url,
            schema_type: row.schema_type,
            other_identifier: row.other_identifier,
            expiration: row.expiration,
            updatable: row.updatable,
            version: row.version as u32,
            rev_nonce: row.rev_nonce as u64,
            core_claim: row.core_claim,
            data: row.data,
            signature_proof: row.signature_proof,
            credential_status: row.credential_status,
            created_at: row.created_at,
            revoked: row.revoked,
            revocation_description: row.revocation_description,
        }
    }
}

/// Claim store backed by PostgreSQL. Nonce uniqueness per issuer is
/// enforced by the `claims_issuer_rev_nonce_key` index.
pub struct PostgresClaimStore {
    pool: PgPool,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, run migrations, and return a ready store.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!(
            "Connecting to database with max_connections={}, min_connections={}",
            config.max_connections, config.min_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        info!("Database connection pool established");

        Ok(Self::new(pool))
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ClaimStore for PostgresClaimStore {
    async fn save(&self, claim: Claim) -> Result<Claim, StoreError> {
        let id = claim.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (id, identifier, issuer, schema_hash, schema_url, schema_type,
                                other_identifier, expiration, updatable, version, rev_nonce,
                                core_claim, data, signature_proof, credential_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(claim.identifier.clone().unwrap_or_default())
        .bind(&claim.issuer)
        .bind(&claim.schema_hash)
        .bind(&claim.schema_url)
        .bind(&claim.schema_type)
        .bind(&claim.other_identifier)
        .bind(claim.expiration)
        .bind(claim.updatable)
        .bind(claim.version as i64)
        .bind(claim.rev_nonce as i64)
        .bind(&claim.core_claim)
        .bind(&claim.data)
        .bind(&claim.signature_proof)
        .bind(&claim.credential_status)
        .bind(claim.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("claims_issuer_rev_nonce_key") {
                    return StoreError::Duplicate {
                        issuer: claim.issuer.clone(),
                        nonce: claim.rev_nonce,
                    };
                }
            }
            StoreError::Backend(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn revoke(&self, issuer: &Did, nonce: u64, description: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE claims SET revoked = TRUE, revocation_description = $3
             WHERE issuer = $1 AND rev_nonce = $2",
        )
        .bind(issuer.to_string())
        .bind(nonce as i64)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn get_by_revocation_nonce(
        &self,
        issuer: &Did,
        nonce: u64,
    ) -> Result<Claim, StoreError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            "SELECT * FROM claims WHERE issuer = $1 AND rev_nonce = $2",
        )
        .bind(issuer.to_string())
        .bind(nonce as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.map(Claim::from).ok_or(StoreError::NotFound)
    }
}
