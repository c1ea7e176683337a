//! Payment repository for database operations.

use sqlx::PgPool;

use crate::entities::PaymentEntity;
use crate::metrics::QueryTimer;

const PAYMENT_COLUMNS: &str = "id, booking_id, customer_id, amount::FLOAT8 AS amount, \
                               payment_type, gateway, gateway_reference, status, \
                               created_at, updated_at";

/// Repository for payment-related database operations.
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment row. Written independently of the booking insert;
    /// there is no transaction spanning the two tables.
    pub async fn insert(
        &self,
        booking_id: i64,
        customer_id: i64,
        amount: f64,
        payment_type: &str,
        status: &str,
    ) -> Result<PaymentEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_payment");
        let result = sqlx::query_as::<_, PaymentEntity>(&format!(
            "INSERT INTO payments (booking_id, customer_id, amount, payment_type, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(customer_id)
        .bind(amount)
        .bind(payment_type)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Payments recorded against a booking, oldest first.
    pub async fn list_for_booking(
        &self,
        booking_id: i64,
    ) -> Result<Vec<PaymentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_payments_for_booking");
        let result = sqlx::query_as::<_, PaymentEntity>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE booking_id = $1 ORDER BY created_at"
        ))
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
