//! Working hours repository for database operations.

use chrono::NaiveTime;
use sqlx::PgPool;

use crate::entities::WorkingHoursEntity;
use crate::metrics::QueryTimer;

/// Repository for working-hours database operations.
#[derive(Clone)]
pub struct WorkingHoursRepository {
    pool: PgPool,
}

impl WorkingHoursRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A staff member's weekly schedule, Sunday first.
    pub async fn list_for_staff(
        &self,
        staff_id: i64,
    ) -> Result<Vec<WorkingHoursEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_working_hours");
        let result = sqlx::query_as::<_, WorkingHoursEntity>(
            r#"
            SELECT id, staff_id, day_of_week, start_time, end_time, is_active
            FROM working_hours
            WHERE staff_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set one weekday's window for a staff member, replacing any existing row.
    pub async fn upsert(
        &self,
        staff_id: i64,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        is_active: bool,
    ) -> Result<WorkingHoursEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_working_hours");
        let result = sqlx::query_as::<_, WorkingHoursEntity>(
            r#"
            INSERT INTO working_hours (staff_id, day_of_week, start_time, end_time, is_active)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (staff_id, day_of_week)
            DO UPDATE SET start_time = $3, end_time = $4, is_active = $5
            RETURNING id, staff_id, day_of_week, start_time, end_time, is_active
            "#,
        )
        .bind(staff_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
