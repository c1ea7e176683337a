//! Dashboard session extractor.
//!
//! Guards staff-only routes. Unauthenticated requests get a 401 carrying a
//! `login_url` with the attempted path as `redirect_to`, mirroring the
//! dashboard's redirect-to-login behavior in a JSON surface.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::app::AppState;
use shared::session::SessionId;

/// The authenticated dashboard visitor.
#[derive(Debug, Clone)]
pub struct DashboardAuth {
    pub session_id: SessionId,
    pub staff_id: i64,
    pub email: String,
    pub role: String,
    pub display_name: String,
}

impl DashboardAuth {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// 401 rejection carrying the login URL.
pub struct Unauthenticated {
    login_url: String,
}

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": "Login required",
                "login_url": self.login_url,
            })),
        )
            .into_response()
    }
}

fn login_url_for(parts: &Parts) -> String {
    let attempted = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!(
        "/bookit-dashboard/?redirect_to={}",
        percent_encode(attempted)
    )
}

/// Minimal percent-encoding for the redirect_to query value.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[async_trait]
impl FromRequestParts<AppState> for DashboardAuth {
    type Rejection = Unauthenticated;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let reject = || Unauthenticated {
            login_url: login_url_for(parts),
        };

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&state.config.session.dashboard_cookie)
            .ok_or_else(reject)?;
        let session_id = SessionId::parse(cookie.value()).ok_or_else(reject)?;

        // load applies lazy expiry, so a stale login comes back logged out
        let snapshot = state
            .dashboard_sessions
            .load(&session_id)
            .ok_or_else(reject)?;
        let session = snapshot.state;

        match (session.logged_in, session.staff_id) {
            (true, Some(staff_id)) => Ok(DashboardAuth {
                session_id,
                staff_id,
                email: session.email,
                role: session.role,
                display_name: session.display_name,
            }),
            _ => Err(reject()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_passes_unreserved() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn test_percent_encode_escapes_reserved() {
        assert_eq!(
            percent_encode("/dashboard?tab=today&x=1"),
            "%2Fdashboard%3Ftab%3Dtoday%26x%3D1"
        );
        assert_eq!(percent_encode("a b"), "a%20b");
    }
}
