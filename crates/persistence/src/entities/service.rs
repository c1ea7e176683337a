//! Service and category entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Category, Lifecycle, Service, ServiceSummary};

/// Database row mapping for the services table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub price: f64,
    pub deposit_amount: Option<f64>,
    pub buffer_before: i32,
    pub buffer_after: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<ServiceEntity> for Service {
    fn from(entity: ServiceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            duration: entity.duration,
            price: entity.price,
            deposit_amount: entity.deposit_amount,
            buffer_before: entity.buffer_before,
            buffer_after: entity.buffer_after,
            display_order: entity.display_order,
            lifecycle: Lifecycle::from_flags(entity.is_active, entity.deleted_at),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<CategoryEntity> for Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            display_order: entity.display_order,
            lifecycle: Lifecycle::from_flags(entity.is_active, entity.deleted_at),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// One row of the step-1 listing query: a bookable service joined to the
/// category it appears under (NULL for uncategorized services).
#[derive(Debug, Clone, FromRow)]
pub struct ServiceListingEntity {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub id: i64,
    pub name: String,
    pub duration: i32,
    pub price: f64,
}

impl ServiceListingEntity {
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            id: self.id,
            name: self.name.clone(),
            duration: self.duration,
            price: self.price,
        }
    }
}
