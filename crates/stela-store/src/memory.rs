//! In-memory claim store (for development/testing)

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use stela_core::claim::Claim;
use stela_core::did::Did;
use stela_core::ports::{ClaimStore, StoreError};

/// Claims keyed by (issuer DID, revocation nonce), mirroring the unique
/// index the Postgres backend enforces.
pub struct MemoryClaimStore {
    claims: RwLock<HashMap<(String, u64), Claim>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self {
            claims: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored claims.
    pub fn len(&self) -> usize {
        self.claims.read().map(|claims| claims.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryClaimStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn save(&self, mut claim: Claim) -> Result<Claim, StoreError> {
        let mut claims = self
            .claims
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let key = (claim.issuer.clone(), claim.rev_nonce);
        if claims.contains_key(&key) {
            return Err(StoreError::Duplicate {
                issuer: claim.issuer.clone(),
                nonce: claim.rev_nonce,
            });
        }

        claim.id = Some(Uuid::new_v4());
        claims.insert(key, claim.clone());
        Ok(claim)
    }

    async fn revoke(&self, issuer: &Did, nonce: u64, description: &str) -> Result<(), StoreError> {
        let mut claims = self
            .claims
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let claim = claims
            .get_mut(&(issuer.to_string(), nonce))
            .ok_or(StoreError::NotFound)?;

        // Re-revocation is a no-op success.
        claim.revoked = true;
        claim.revocation_description = Some(description.to_string());
        Ok(())
    }

    async fn get_by_revocation_nonce(
        &self,
        issuer: &Did,
        nonce: u64,
    ) -> Result<Claim, StoreError> {
        let claims = self
            .claims
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        claims
            .get(&(issuer.to_string(), nonce))
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
