//! Booking wizard session endpoints.
//!
//! `GET /api/v1/wizard/session` reads (and on first touch creates) the
//! visitor's wizard session; `POST` applies a partial update. Both apply the
//! 8-hour lazy expiry through the session store. Mutations require the
//! session's anti-forgery token in the `X-Booking-Token` header, and a step
//! change rotates the session id.

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use domain::wizard::{self, WizardState, WizardUpdate};
use shared::session::{SessionId, Snapshot};

/// Header carrying the wizard anti-forgery token.
pub const CSRF_HEADER: &str = "x-booking-token";

pub(crate) fn session_cookie(name: &str, id: &SessionId) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Finds the visitor's wizard session from the cookie, creating one (and
/// updating the jar) when absent or stale.
pub(crate) fn resolve_session(state: &AppState, jar: CookieJar) -> (SessionId, CookieJar) {
    if let Some(cookie) = jar.get(&state.config.session.wizard_cookie) {
        if let Some(id) = SessionId::parse(cookie.value()) {
            if state.wizard_sessions.load(&id).is_some() {
                return (id, jar);
            }
        }
    }
    let id = state.wizard_sessions.create();
    let jar = jar.add(session_cookie(&state.config.session.wizard_cookie, &id));
    (id, jar)
}

/// Rejects the request unless the anti-forgery header matches the session.
pub(crate) fn require_csrf(
    state: &AppState,
    id: &SessionId,
    headers: &HeaderMap,
) -> Result<(), ApiError> {
    let token = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if state.wizard_sessions.csrf_matches(id, token) {
        Ok(())
    } else {
        Err(ApiError::InvalidAntiForgery)
    }
}

/// The wire shape of the session data: the wizard state flattened together
/// with session metadata and the anti-forgery token.
fn session_payload(snapshot: &Snapshot<WizardState>) -> Value {
    let mut data = serde_json::to_value(&snapshot.state).unwrap_or_else(|_| json!({}));
    if let Some(object) = data.as_object_mut() {
        object.insert("created_at".into(), json!(snapshot.created_at.timestamp()));
        object.insert(
            "last_activity".into(),
            json!(snapshot.last_activity.timestamp()),
        );
        object.insert(
            "time_remaining".into(),
            json!(snapshot.time_remaining_secs),
        );
        object.insert("csrf_token".into(), json!(snapshot.csrf_token));
    }
    data
}

/// GET /api/v1/wizard/session
pub async fn get_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let (id, jar) = resolve_session(&state, jar);
    let snapshot = state
        .wizard_sessions
        .load(&id)
        .ok_or_else(|| ApiError::Internal("wizard session vanished".into()))?;

    Ok((
        jar,
        Json(json!({ "success": true, "data": session_payload(&snapshot) })),
    ))
}

/// POST /api/v1/wizard/session
pub async fn update_session(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(update): Json<WizardUpdate>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let (id, mut jar) = resolve_session(&state, jar);
    require_csrf(&state, &id, &headers)?;

    let mut outcome = Ok(false);
    state
        .wizard_sessions
        .update(&id, |session| {
            outcome = wizard::apply(session, update);
        })
        .ok_or_else(|| ApiError::Internal("wizard session vanished".into()))?;
    let step_updated = outcome.map_err(|err| ApiError::Validation(err.to_string()))?;

    // A step change rotates the session id against fixation.
    let id = if step_updated {
        match state.wizard_sessions.regenerate(&id) {
            Some(new_id) => {
                jar = jar.add(session_cookie(&state.config.session.wizard_cookie, &new_id));
                new_id
            }
            None => id,
        }
    } else {
        id
    };

    let snapshot = state
        .wizard_sessions
        .load(&id)
        .ok_or_else(|| ApiError::Internal("wizard session vanished".into()))?;

    Ok((
        jar,
        Json(json!({ "success": true, "data": session_payload(&snapshot) })),
    ))
}
