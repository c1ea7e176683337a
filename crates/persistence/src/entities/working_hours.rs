//! Working hours entity (database row mapping).

use chrono::NaiveTime;
use sqlx::FromRow;

use domain::models::WorkingHours;

/// Database row mapping for the working_hours table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkingHoursEntity {
    pub id: i64,
    pub staff_id: i64,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl From<WorkingHoursEntity> for WorkingHours {
    fn from(entity: WorkingHoursEntity) -> Self {
        Self {
            id: entity.id,
            staff_id: entity.staff_id,
            day_of_week: entity.day_of_week,
            start_time: entity.start_time,
            end_time: entity.end_time,
            is_active: entity.is_active,
        }
    }
}
