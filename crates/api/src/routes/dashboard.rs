//! Staff dashboard endpoints behind the cookie session.

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::DashboardAuth;
use crate::services::auth::{authenticate, login_to_session};
use domain::models::Booking;
use shared::session::SessionId;

fn dashboard_cookie(name: &str, id: &SessionId) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardLoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /api/v1/dashboard/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<DashboardLoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    if request.validate().is_err() {
        return Err(ApiError::InvalidCredentials);
    }

    let staff = authenticate(&state.staff(), &request.email, &request.password)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or(ApiError::InvalidCredentials)?;

    // Reuse the visitor's session entry when the cookie is live, otherwise
    // start fresh; login rotates the id either way.
    let session_id = jar
        .get(&state.config.session.dashboard_cookie)
        .and_then(|cookie| SessionId::parse(cookie.value()))
        .filter(|id| state.dashboard_sessions.load(id).is_some())
        .unwrap_or_else(|| state.dashboard_sessions.create());

    let new_id = login_to_session(&state.dashboard_sessions, &session_id, &staff)
        .ok_or_else(|| ApiError::Internal("dashboard session vanished".into()))?;
    let jar = jar.add(dashboard_cookie(
        &state.config.session.dashboard_cookie,
        &new_id,
    ));

    Ok((
        jar,
        Json(json!({
            "success": true,
            "staff": {
                "id": staff.id,
                "email": staff.email,
                "role": staff.role,
                "name": staff.display_name(),
            },
        })),
    ))
}

/// POST /api/v1/dashboard/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: DashboardAuth,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    state.dashboard_sessions.destroy(&auth.session_id);
    tracing::info!(staff_id = auth.staff_id, "Staff logged out");

    let mut expired = Cookie::new(state.config.session.dashboard_cookie.clone(), "");
    expired.set_path("/");
    let jar = jar.remove(expired);
    (jar, Json(json!({ "success": true })))
}

/// GET /api/v1/dashboard/me
pub async fn me(auth: DashboardAuth) -> Json<Value> {
    Json(json!({
        "success": true,
        "staff": {
            "id": auth.staff_id,
            "email": auth.email,
            "role": auth.role,
            "name": auth.display_name,
        },
    }))
}

/// GET /api/v1/dashboard/settings: the business settings blob. Admin only;
/// there is no settings form, this is the inspection surface.
pub async fn settings(
    State(state): State<AppState>,
    auth: DashboardAuth,
) -> Result<Json<Value>, ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("Admin role required".into()));
    }

    let settings: serde_json::Map<String, Value> = state
        .settings()
        .all()
        .await?
        .into_iter()
        .map(|row| (row.key, Value::String(row.value)))
        .collect();

    Ok(Json(json!({ "success": true, "settings": settings })))
}

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub date: Option<NaiveDate>,
}

/// GET /api/v1/dashboard/bookings?date= lists the day's bookings. Admins
/// see every staff member's; staff see their own.
pub async fn bookings(
    State(state): State<AppState>,
    auth: DashboardAuth,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Value>, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let staff_filter = if auth.is_admin() {
        None
    } else {
        Some(auth.staff_id)
    };

    let bookings: Vec<Booking> = state
        .bookings()
        .list_for_date(date, staff_filter)
        .await?
        .into_iter()
        .map(Booking::from)
        .collect();

    Ok(Json(json!({
        "success": true,
        "date": date,
        "bookings": bookings,
    })))
}
