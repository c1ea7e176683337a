//! Token-issuing login endpoint.
//!
//! Rate limited per client IP before anything else runs. Every validation
//! failure (missing field, wrong type, unknown client type) collapses into
//! the same generic 401 so the response never reveals which field was wrong.

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

use crate::app::AppState;
use crate::error::ApiError;
use crate::rate_limit::RetryAfter;
use crate::services::auth::authenticate;

const CLIENT_TYPES: &[&str] = &["mobile", "web"];

/// Validated login payload.
#[derive(Debug, PartialEq)]
struct LoginPayload {
    identifier: String,
    secret: String,
    client_type: String,
}

impl LoginPayload {
    /// Single-pass validation over the raw JSON body; any defect yields
    /// `None` and the caller's generic rejection.
    fn parse(body: &Value) -> Option<Self> {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        };
        let identifier = field("identifier")?;
        let secret = field("secret")?;
        let client_type = field("client_type").filter(|ct| CLIENT_TYPES.contains(ct))?;

        Some(Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            client_type: client_type.to_string(),
        })
    }
}

/// Best-effort client IP: the first X-Forwarded-For hop, then the peer
/// address. `None` makes the rate limiter fail closed.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    state
        .login_limiter
        .check(ip.as_deref())
        .map_err(|RetryAfter(retry_after)| ApiError::RateLimited { retry_after })?;

    let payload = LoginPayload::parse(&body).ok_or(ApiError::InvalidCredentials)?;

    let staff = authenticate(&state.staff(), &payload.identifier, &payload.secret)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::InvalidCredentials)?;

    let tokens = state
        .token_signer
        .issue_pair(staff.id, staff.role.as_str())
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(json!({
        "access_token": tokens.access_token,
        "expires_in": tokens.expires_in,
        "refresh_token": tokens.refresh_token,
        "token_type": "Bearer",
        "scope": payload.client_type,
    })))
}
