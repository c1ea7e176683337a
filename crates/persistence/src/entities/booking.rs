//! Booking entities (database row mappings).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{Booking, BookingStatus, Lifecycle, PaymentState, TimeRange};

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub staff_id: i64,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: i32,
    pub status: String,
    pub total_price: f64,
    pub payment_state: String,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub external_calendar_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<BookingEntity> for Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            service_id: entity.service_id,
            staff_id: entity.staff_id,
            booking_date: entity.booking_date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            duration: entity.duration,
            status: BookingStatus::from_str(&entity.status).unwrap_or(BookingStatus::Pending),
            total_price: entity.total_price,
            payment_state: PaymentState::from_str(&entity.payment_state)
                .unwrap_or(PaymentState::Unpaid),
            cancellation_reason: entity.cancellation_reason,
            cancelled_at: entity.cancelled_at,
            external_calendar_id: entity.external_calendar_id,
            // bookings have no is_active flag; status carries that meaning
            lifecycle: Lifecycle::from_flags(true, entity.deleted_at),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// The slice of a booking the overlap check needs.
#[derive(Debug, Clone, FromRow)]
pub struct BookingSlotEntity {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl BookingSlotEntity {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}
