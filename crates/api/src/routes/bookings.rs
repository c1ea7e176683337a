//! Booking checkout endpoint.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::booking::{create_booking as create, BookingDeps, BookingError};
use domain::models::{ContactDetails, NewBooking};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1, message = "service_id must be positive"))]
    pub service_id: i64,

    #[validate(range(min = 1, message = "staff_id must be positive"))]
    pub staff_id: i64,

    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,

    #[validate(nested)]
    pub customer: CustomerPayload,

    #[serde(default)]
    pub marketing_consent: bool,

    pub deposit: Option<f64>,
}

/// POST /api/v1/bookings: create a booking. 201 on success, 409 when the
/// slot is taken.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let services = state.services();
    let staff = state.staff();
    let customers = state.customers();
    let bookings = state.bookings();
    let payments = state.payments();
    let deps = BookingDeps {
        services: &services,
        staff: &staff,
        customers: &customers,
        bookings: &bookings,
        payments: &payments,
    };

    let new = NewBooking {
        service_id: request.service_id,
        staff_id: request.staff_id,
        booking_date: request.booking_date,
        start_time: request.start_time,
        end_time: request.end_time,
        customer: ContactDetails {
            name: Some(request.customer.name),
            email: Some(request.customer.email),
            phone: request.customer.phone,
            notes: request.customer.notes,
        },
        marketing_consent: request.marketing_consent,
        deposit: request.deposit,
    };

    let outcome = create(&deps, new).await.map_err(|err| match err {
        BookingError::ServiceNotFound => ApiError::NotFound(err.to_string()),
        BookingError::StaffNotFound => ApiError::NotFound(err.to_string()),
        BookingError::SlotTaken => ApiError::Conflict(err.to_string()),
        BookingError::InvalidTimes | BookingError::MissingContact => {
            ApiError::Validation(err.to_string())
        }
        BookingError::Database(db_err) => ApiError::from(db_err),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking": outcome.booking,
            "customer_id": outcome.customer.id,
            "deposit": outcome.deposit,
        })),
    ))
}
