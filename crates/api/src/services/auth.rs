//! Staff authentication.
//!
//! Used by both login surfaces: the token-issuing REST endpoint and the
//! cookie-session dashboard. Lookups only see usable (active, not deleted)
//! staff, so an inactive account fails exactly like an unknown email or a
//! wrong password.

use serde_json::json;
use thiserror::Error;

use domain::models::Staff;
use persistence::repositories::StaffRepository;
use shared::password::verify_password;
use shared::redact::redact;
use shared::session::{SessionId, SessionStore};

/// Errors from the authentication path. Credential failures are not errors;
/// they come back as `Ok(None)`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Dashboard session state for one logged-in staff member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSession {
    pub staff_id: Option<i64>,
    pub email: String,
    pub role: String,
    pub display_name: String,
    pub logged_in: bool,
}

/// Decides a login attempt given the looked-up candidate row.
///
/// Pure so the outcome table is testable without a database: no candidate
/// (unknown email, or filtered out as inactive/deleted), unusable lifecycle,
/// or a failed password check all collapse to `None`.
pub fn resolve_login(candidate: Option<Staff>, password: &str) -> Option<Staff> {
    let staff = candidate?;
    if !staff.lifecycle.is_usable() {
        return None;
    }
    match verify_password(password, &staff.password_hash) {
        Ok(true) => Some(staff),
        // a wrong password and an unreadable stored hash look the same
        Ok(false) | Err(_) => None,
    }
}

/// Verifies staff credentials, logging the outcome either way.
pub async fn authenticate(
    repo: &StaffRepository,
    email: &str,
    password: &str,
) -> Result<Option<Staff>, AuthError> {
    let candidate = repo.find_usable_by_email(email).await?.map(Staff::from);

    match resolve_login(candidate, password) {
        Some(staff) => {
            tracing::info!(
                context = %redact(&json!({ "staff_id": staff.id, "email": email, "role": staff.role.as_str() })),
                "Staff login successful"
            );
            Ok(Some(staff))
        }
        None => {
            tracing::warn!(
                context = %redact(&json!({ "email": email })),
                "Staff login failed"
            );
            Ok(None)
        }
    }
}

/// Seeds the dashboard session for a verified staff member and regenerates
/// the session id against fixation. Returns the id the cookie should carry.
pub fn login_to_session(
    store: &SessionStore<DashboardSession>,
    session_id: &SessionId,
    staff: &Staff,
) -> Option<SessionId> {
    store.update(session_id, |session| {
        *session = DashboardSession {
            staff_id: Some(staff.id),
            email: staff.email.clone(),
            role: staff.role.as_str().to_string(),
            display_name: staff.display_name(),
            logged_in: true,
        };
    })?;
    store.regenerate(session_id)
}
