//! Booking domain models and slot conflict logic.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::customer::ContactDetails;
use super::lifecycle::Lifecycle;

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
        }
    }

    /// Whether a booking in this status occupies its slot.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            "no_show" => Ok(BookingStatus::NoShow),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment progress of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    DepositPaid,
    Paid,
    Refunded,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Unpaid => "unpaid",
            PaymentState::DepositPaid => "deposit_paid",
            PaymentState::Paid => "paid",
            PaymentState::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentState::Unpaid),
            "deposit_paid" => Ok(PaymentState::DepositPaid),
            "paid" => Ok(PaymentState::Paid),
            "refunded" => Ok(PaymentState::Refunded),
            other => Err(format!("unknown payment state: {other}")),
        }
    }
}

/// A persisted booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub staff_id: i64,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Cached appointment length in minutes.
    pub duration: i32,
    pub status: BookingStatus,
    pub total_price: f64,
    pub payment_state: PaymentState,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub external_calendar_id: Option<String>,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input to booking creation, assembled from the checkout request.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service_id: i64,
    pub staff_id: i64,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    /// Computed from the service duration when not supplied.
    pub end_time: Option<NaiveTime>,
    pub customer: ContactDetails,
    pub marketing_consent: bool,
    /// When set, a pending deposit payment row is recorded alongside.
    pub deposit: Option<f64>,
}

/// A time-of-day interval in seconds from midnight, half-open `[start, end)`.
///
/// Half-open means a booking ending at 11:00 does not conflict with one
/// starting at 11:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start_secs: i32,
    end_secs: i32,
}

const DAY_SECS: i32 = 86_400;

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start_secs: start.num_seconds_from_midnight() as i32,
            end_secs: end.num_seconds_from_midnight() as i32,
        }
    }

    /// Widens the range by per-service buffers (minutes), clamped to the day.
    pub fn widened(self, buffer_before_mins: i32, buffer_after_mins: i32) -> Self {
        Self {
            start_secs: (self.start_secs - buffer_before_mins * 60).max(0),
            end_secs: (self.end_secs + buffer_after_mins * 60).min(DAY_SECS),
        }
    }

    pub fn overlaps(self, other: TimeRange) -> bool {
        self.start_secs < other.end_secs && other.start_secs < self.end_secs
    }
}

/// Whether the requested interval collides with any existing booking on the
/// same staff member and date. Callers pass only slot-blocking bookings
/// (cancelled ones do not occupy their slot).
pub fn slot_conflicts(requested: TimeRange, existing: &[TimeRange]) -> bool {
    existing.iter().any(|taken| requested.overlaps(*taken))
}
