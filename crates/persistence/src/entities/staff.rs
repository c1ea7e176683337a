//! Staff entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{Lifecycle, Staff, StaffForService, StaffRole};

/// Database row mapping for the staff table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffEntity {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<StaffEntity> for Staff {
    fn from(entity: StaffEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            first_name: entity.first_name,
            last_name: entity.last_name,
            // the CHECK constraint keeps this in range; fall back to the
            // least-privileged role if a row predates it
            role: StaffRole::from_str(&entity.role).unwrap_or(StaffRole::Staff),
            phone: entity.phone,
            photo_url: entity.photo_url,
            bio: entity.bio,
            title: entity.title,
            lifecycle: Lifecycle::from_flags(entity.is_active, entity.deleted_at),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// One row of the step-2 listing query: staff offering a service, with the
/// junction row's price override already coalesced against the base price.
#[derive(Debug, Clone, FromRow)]
pub struct StaffForServiceEntity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub photo_url: Option<String>,
    pub effective_price: f64,
}

impl From<StaffForServiceEntity> for StaffForService {
    fn from(entity: StaffForServiceEntity) -> Self {
        Self {
            id: entity.id,
            name: format!("{} {}", entity.first_name, entity.last_name)
                .trim()
                .to_string(),
            title: entity.title,
            photo_url: entity.photo_url,
            effective_price: entity.effective_price,
        }
    }
}
