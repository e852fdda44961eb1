//! HTTP route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use stela_core::claim::{MerklizedRootPosition, SubjectPosition};
use stela_core::identity::Identity;
use stela_issuer::{CreateClaimInput, IssueError, RevokeError};

use crate::state::AppState;

type ApiError = (StatusCode, Json<Value>);

fn error_message(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({ "message": message.into() })),
    )
}

/// Mint a new issuing identity
pub async fn create_identity(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Identity>), ApiError> {
    let identity = state
        .issuer
        .create_identity()
        .await
        .map_err(|e| error_message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(identity)))
}

/// Claim creation request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub credential_schema: String,

    #[serde(rename = "type")]
    pub claim_type: String,

    pub credential_subject: Value,

    /// Expiration as unix seconds.
    #[serde(default)]
    pub expiration: Option<i64>,

    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub subject_position: Option<SubjectPosition>,

    #[serde(default)]
    pub merklized_root_position: Option<MerklizedRootPosition>,
}

/// Claim creation response body
#[derive(Debug, Serialize)]
pub struct CreateClaimResponse {
    pub id: Uuid,
}

/// Issue a claim on behalf of the identity in the path
pub async fn create_claim(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<CreateClaimResponse>), ApiError> {
    let expiration = match request.expiration {
        Some(seconds) => Some(
            DateTime::<Utc>::from_timestamp(seconds, 0)
                .ok_or_else(|| error_message(StatusCode::BAD_REQUEST, "invalid expiration"))?,
        ),
        None => None,
    };

    let input = CreateClaimInput {
        credential_schema: request.credential_schema,
        claim_type: request.claim_type,
        credential_subject: request.credential_subject,
        expiration,
        version: request.version,
        subject_position: request.subject_position,
        merklized_root_position: request.merklized_root_position,
    };

    let id = state
        .issuer
        .issue_claim(&identifier, input)
        .await
        .map_err(|e| match e {
            IssueError::Validation(message) => error_message(StatusCode::BAD_REQUEST, message),
            IssueError::Resource(message) => {
                error_message(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        })?;

    Ok((StatusCode::CREATED, Json(CreateClaimResponse { id })))
}

/// Mark a claim revoked by issuer and revocation nonce
pub async fn revoke_claim(
    State(state): State<AppState>,
    Path((identifier, nonce)): Path<(String, u64)>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .issuer
        .revoke_claim(&identifier, nonce)
        .await
        .map_err(|e| match e {
            RevokeError::Validation(message) => error_message(StatusCode::BAD_REQUEST, message),
            RevokeError::NotFound => error_message(StatusCode::NOT_FOUND, e.to_string()),
            RevokeError::Store(message) => {
                error_message(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "pending" })),
    ))
}

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "up",
        "db": state.db_configured,
    }))
}
