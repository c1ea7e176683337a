//! Service listing and wizard service selection.

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::wizard::{require_csrf, resolve_session, session_cookie};
use domain::models::{CategoryServices, Service, ServiceSummary};
use persistence::entities::ServiceListingEntity;

/// Groups the flat listing rows into per-category buckets, preserving the
/// query's ordering. Uncategorized services land in a trailing `None` bucket.
fn group_by_category(rows: Vec<ServiceListingEntity>) -> Vec<CategoryServices> {
    let mut groups: Vec<CategoryServices> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group.category_id == row.category_id => {
                group.services.push(row.summary());
            }
            _ => groups.push(CategoryServices {
                category_id: row.category_id,
                category_name: row.category_name.clone(),
                services: vec![row.summary()],
            }),
        }
    }
    groups
}

/// GET /api/v1/services: active services with at least one active staff
/// member, grouped by category.
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = state.services().list_bookable().await?;
    Ok(Json(
        json!({ "success": true, "categories": group_by_category(rows) }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SelectServiceRequest {
    pub service_id: i64,
}

/// POST /api/v1/service/select: stores the chosen service in the wizard
/// session and advances to the staff step.
pub async fn select_service(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<SelectServiceRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let (id, mut jar) = resolve_session(&state, jar);
    require_csrf(&state, &id, &headers)?;

    if request.service_id <= 0 {
        return Err(ApiError::Validation("service_id must be positive".into()));
    }

    let service = state
        .services()
        .find_by_id(request.service_id)
        .await?
        .map(Service::from)
        .filter(|service| service.lifecycle.is_usable())
        .ok_or_else(|| ApiError::NotFound("Service not found or inactive".into()))?;
    let summary = ServiceSummary::from(&service);

    state
        .wizard_sessions
        .update(&id, |session| session.select_service(summary.clone()))
        .ok_or_else(|| ApiError::Internal("wizard session vanished".into()))?;

    // Selection moves the wizard forward, so rotate the session id too.
    if let Some(new_id) = state.wizard_sessions.regenerate(&id) {
        jar = jar.add(session_cookie(&state.config.session.wizard_cookie, &new_id));
    }

    Ok((
        jar,
        Json(json!({
            "success": true,
            "service": summary,
            "next_step": 2,
        })),
    ))
}
