//! Identity and identity-state types
//!
//! An [`Identity`] is a DID under management together with its anchored
//! state summary. The state sub-entity is owned and mutated exclusively by
//! the identity manager; everything else only reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an identity state.
///
/// Freshly created states start as `Created`; the remaining statuses track
/// the on-chain anchoring flow, which is driven outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateStatus {
    Created,
    Transacted,
    Confirmed,
    Failed,
}

impl StateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateStatus::Created => "created",
            StateStatus::Transacted => "transacted",
            StateStatus::Confirmed => "confirmed",
            StateStatus::Failed => "failed",
        }
    }
}

/// An identity's anchored summary at a point in time.
///
/// Roots and the composite state hash are hex-encoded 32-byte values.
/// A state is superseded by a newer one, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityState {
    /// Composite state hash over the three roots.
    pub state: String,

    /// Root of the claims tree.
    pub claims_tree_root: String,

    /// Root of the revocation tree.
    pub revocation_tree_root: String,

    /// Root of the roots tree.
    pub root_of_roots: String,

    /// Hash of the state this one superseded, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<String>,

    /// Block number of the last on-chain anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,

    /// Block timestamp of the last on-chain anchor (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<i64>,

    /// Transaction id that anchored this state, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,

    pub status: StateStatus,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

/// A decentralized identity under management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// DID string naming this identity.
    pub identifier: String,

    /// Whether the identity's key material is immutable.
    pub immutable: bool,

    /// Whether the identity is operated through a relay.
    pub relay: bool,

    /// Current state snapshot.
    pub state: IdentityState,
}
