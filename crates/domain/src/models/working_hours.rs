//! Weekly working hours for staff.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One weekday's working window for one staff member.
///
/// `day_of_week` runs 0 (Sunday) through 6 (Saturday). These rows describe
/// the published schedule; booking validation does not consult them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub id: i64,
    pub staff_id: i64,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl WorkingHours {
    pub fn is_valid_day(day: i16) -> bool {
        (0..=6).contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_days() {
        assert!(WorkingHours::is_valid_day(0));
        assert!(WorkingHours::is_valid_day(6));
        assert!(!WorkingHours::is_valid_day(7));
        assert!(!WorkingHours::is_valid_day(-1));
    }
}
