//! Service repository for database operations.

use sqlx::PgPool;

use crate::entities::{ServiceEntity, ServiceListingEntity};
use crate::metrics::QueryTimer;

/// Repository for service-related database operations.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a service by id, regardless of lifecycle state.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_service_by_id");
        let result = sqlx::query_as::<_, ServiceEntity>(
            r#"
            SELECT id, name, description, duration, price::FLOAT8 AS price,
                   deposit_amount::FLOAT8 AS deposit_amount, buffer_before, buffer_after,
                   display_order, is_active, created_at, updated_at, deleted_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The step-1 listing: bookable services (active, not deleted, offered by
    /// at least one active staff member) with the active category each one
    /// appears under. Uncategorized services come back with NULL category
    /// columns. Ordered for stable grouping.
    pub async fn list_bookable(&self) -> Result<Vec<ServiceListingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookable_services");
        let result = sqlx::query_as::<_, ServiceListingEntity>(
            r#"
            SELECT c.id AS category_id, c.name AS category_name,
                   s.id, s.name, s.duration, s.price::FLOAT8 AS price
            FROM services s
            LEFT JOIN service_categories sc ON sc.service_id = s.id
            LEFT JOIN categories c
                   ON c.id = sc.category_id
                  AND c.is_active = TRUE
                  AND c.deleted_at IS NULL
            WHERE s.is_active = TRUE
              AND s.deleted_at IS NULL
              AND EXISTS (
                    SELECT 1
                    FROM staff_services ss
                    JOIN staff st ON st.id = ss.staff_id
                    WHERE ss.service_id = s.id
                      AND st.is_active = TRUE
                      AND st.deleted_at IS NULL
              )
            ORDER BY c.display_order NULLS LAST, c.name NULLS LAST,
                     s.display_order, s.name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Query behavior is covered by the integration environment; the
    // repository is a thin mapping layer over fixed SQL.
}
