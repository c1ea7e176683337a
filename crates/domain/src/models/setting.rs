//! Business settings key/value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One settings row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Default business settings seeded at first migration.
pub fn default_settings() -> Vec<(&'static str, &'static str)> {
    vec![
        ("timezone", "Europe/London"),
        ("currency", "GBP"),
        ("date_format", "d/m/Y"),
        ("time_format", "H:i"),
        ("booking_buffer_before", "0"),
        ("booking_buffer_after", "0"),
        // minimum lead time for a new booking, in minutes
        ("min_booking_notice", "60"),
        // furthest bookable day, in days from today
        ("max_booking_advance", "90"),
    ]
}
