//! Staff repository for database operations.

use sqlx::PgPool;

use crate::entities::{StaffEntity, StaffForServiceEntity};
use crate::metrics::QueryTimer;

const STAFF_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, phone, \
                             photo_url, bio, title, is_active, created_at, updated_at, deleted_at";

/// Repository for staff-related database operations.
#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a usable (active, not deleted) staff member by email.
    ///
    /// Authentication goes through this: inactive and soft-deleted staff
    /// fail credential checks exactly like unknown emails.
    pub async fn find_usable_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StaffEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_staff_by_email");
        let result = sqlx::query_as::<_, StaffEntity>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff \
             WHERE email = $1 AND is_active = TRUE AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a staff member by id, regardless of lifecycle state.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<StaffEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_staff_by_id");
        let result = sqlx::query_as::<_, StaffEntity>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The step-2 listing: usable staff offering the given service, with the
    /// junction price override coalesced against the service base price.
    pub async fn list_for_service(
        &self,
        service_id: i64,
    ) -> Result<Vec<StaffForServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_staff_for_service");
        let result = sqlx::query_as::<_, StaffForServiceEntity>(
            r#"
            SELECT st.id, st.first_name, st.last_name, st.title, st.photo_url,
                   COALESCE(ss.custom_price, s.price)::FLOAT8 AS effective_price
            FROM staff_services ss
            JOIN staff st ON st.id = ss.staff_id
            JOIN services s ON s.id = ss.service_id
            WHERE ss.service_id = $1
              AND st.is_active = TRUE
              AND st.deleted_at IS NULL
            ORDER BY st.last_name, st.first_name
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The price this staff member charges for the service: the junction
    /// row's override when set, the service base price otherwise. `None`
    /// when the staff member does not offer the service at all.
    pub async fn effective_price(
        &self,
        staff_id: i64,
        service_id: i64,
    ) -> Result<Option<f64>, sqlx::Error> {
        let timer = QueryTimer::new("staff_effective_price");
        let result = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(ss.custom_price, s.price)::FLOAT8
            FROM staff_services ss
            JOIN services s ON s.id = ss.service_id
            WHERE ss.staff_id = $1 AND ss.service_id = $2
            "#,
        )
        .bind(staff_id)
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether the staff member offers the service.
    pub async fn offers_service(
        &self,
        staff_id: i64,
        service_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("staff_offers_service");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM staff_services WHERE staff_id = $1 AND service_id = $2)",
        )
        .bind(staff_id)
        .bind(service_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
