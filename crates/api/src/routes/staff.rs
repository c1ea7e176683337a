//! Staff listing endpoints for the wizard and dashboard.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{Staff, StaffForService, WorkingHours};

#[derive(Debug, Deserialize)]
pub struct StaffQuery {
    pub service_id: Option<i64>,
}

/// GET /api/v1/staff?service_id= lists bookable staff for a service, each
/// with their effective price.
pub async fn list_for_service(
    State(state): State<AppState>,
    Query(query): Query<StaffQuery>,
) -> Result<Json<Value>, ApiError> {
    let service_id = query
        .service_id
        .ok_or_else(|| ApiError::Validation("service_id is required".into()))?;

    let staff: Vec<StaffForService> = state
        .staff()
        .list_for_service(service_id)
        .await?
        .into_iter()
        .map(StaffForService::from)
        .collect();

    Ok(Json(json!({ "success": true, "staff": staff })))
}

/// GET /api/v1/staff/:staff_id/working-hours returns the weekly schedule.
pub async fn working_hours(
    State(state): State<AppState>,
    Path(staff_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let known = state
        .staff()
        .find_by_id(staff_id)
        .await?
        .map(Staff::from)
        .map(|staff| staff.lifecycle.is_usable())
        .unwrap_or(false);
    if !known {
        return Err(ApiError::NotFound("Staff member not found".into()));
    }

    let hours: Vec<WorkingHours> = state
        .working_hours()
        .list_for_staff(staff_id)
        .await?
        .into_iter()
        .map(WorkingHours::from)
        .collect();

    Ok(Json(json!({ "success": true, "working_hours": hours })))
}
