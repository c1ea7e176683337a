//! Booking repository for database operations.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::entities::{BookingEntity, BookingSlotEntity};
use crate::metrics::QueryTimer;

const BOOKING_COLUMNS: &str =
    "id, customer_id, service_id, staff_id, booking_date, start_time, end_time, duration, \
     status, total_price::FLOAT8 AS total_price, payment_state, cancellation_reason, \
     cancelled_at, external_calendar_id, created_at, updated_at, deleted_at";

/// Arguments for inserting a booking row.
#[derive(Debug, Clone)]
pub struct InsertBooking {
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
}

/// Repository for booking-related database operations.
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a booking.
    ///
    /// The `unique_booking_slot` index rejects a second booking for the same
    /// (staff, date, start time); callers translate that driver error into a
    /// slot-taken outcome rather than letting it surface raw.
    pub async fn insert(&self, row: InsertBooking) -> Result<BookingEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_booking");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            "INSERT INTO bookings \
                 (customer_id, service_id, staff_id, booking_date, start_time, end_time, \
                  duration, status, total_price, payment_state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(row.customer_id)
        .bind(row.service_id)
        .bind(row.staff_id)
        .bind(row.booking_date)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(row.duration)
        .bind(row.status)
        .bind(row.total_price)
        .bind(row.payment_state)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a booking by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_by_id");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Occupied time ranges for one staff member on one date. Cancelled and
    /// soft-deleted bookings do not occupy their slot.
    pub async fn slots_for_staff_date(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<BookingSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("slots_for_staff_date");
        let result = sqlx::query_as::<_, BookingSlotEntity>(
            r#"
            SELECT start_time, end_time
            FROM bookings
            WHERE staff_id = $1
              AND booking_date = $2
              AND status <> 'cancelled'
              AND deleted_at IS NULL
            ORDER BY start_time
            "#,
        )
        .bind(staff_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Dashboard listing: bookings on a date, optionally restricted to one
    /// staff member (admins pass `None` and see everyone's).
    pub async fn list_for_date(
        &self,
        date: NaiveDate,
        staff_id: Option<i64>,
    ) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_for_date");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE booking_date = $1 \
               AND deleted_at IS NULL \
               AND ($2::BIGINT IS NULL OR staff_id = $2) \
             ORDER BY start_time"
        ))
        .bind(date)
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
