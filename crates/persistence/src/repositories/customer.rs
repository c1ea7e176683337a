//! Customer repository for database operations.

use sqlx::PgPool;

use crate::entities::CustomerEntity;
use crate::metrics::QueryTimer;

const CUSTOMER_COLUMNS: &str = "id, email, first_name, last_name, phone, marketing_consent, \
                                consent_updated_at, notes, is_active, created_at, updated_at, \
                                deleted_at";

/// Repository for customer-related database operations.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a customer (not soft-deleted) by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<CustomerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_customer_by_email");
        let result = sqlx::query_as::<_, CustomerEntity>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a customer record.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
        marketing_consent: bool,
    ) -> Result<CustomerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_customer");
        let result = sqlx::query_as::<_, CustomerEntity>(&format!(
            "INSERT INTO customers \
                 (email, first_name, last_name, phone, notes, marketing_consent, \
                  consent_updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 THEN NOW() END) \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(notes)
        .bind(marketing_consent)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Refresh a returning customer's contact details from a new booking.
    /// Only non-null arguments overwrite the stored values.
    pub async fn update_contact(
        &self,
        id: i64,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_customer_contact");
        sqlx::query(
            r#"
            UPDATE customers
            SET phone = COALESCE($2, phone),
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(phone)
        .bind(notes)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }
}
