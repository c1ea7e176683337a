//! Payment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{Payment, PaymentStatus, PaymentType};

/// Database row mapping for the payments table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentEntity {
    pub id: i64,
    pub booking_id: i64,
    pub customer_id: i64,
    pub amount: f64,
    pub payment_type: String,
    pub gateway: Option<String>,
    pub gateway_reference: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentEntity> for Payment {
    fn from(entity: PaymentEntity) -> Self {
        Self {
            id: entity.id,
            booking_id: entity.booking_id,
            customer_id: entity.customer_id,
            amount: entity.amount,
            payment_type: PaymentType::from_str(&entity.payment_type)
                .unwrap_or(PaymentType::FullPayment),
            gateway: entity.gateway,
            gateway_reference: entity.gateway_reference,
            status: PaymentStatus::from_str(&entity.status).unwrap_or(PaymentStatus::Pending),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
