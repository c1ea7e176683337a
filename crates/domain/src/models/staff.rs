//! Staff domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lifecycle::Lifecycle;

/// Role of a staff member within the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Staff,
    Admin,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Staff => "staff",
            StaffRole::Admin => "admin",
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(StaffRole::Staff),
            "admin" => Ok(StaffRole::Admin),
            other => Err(format!("unknown staff role: {other}")),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)] // never leaks into API responses
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One row of the step-2 staff listing: who offers the selected service and
/// at what price. `effective_price` is the per-staff override when one is
/// set on the junction row, otherwise the service base price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffForService {
    pub id: i64,
    pub name: String,
    pub title: Option<String>,
    pub photo_url: Option<String>,
    pub effective_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(StaffRole::from_str("staff").unwrap(), StaffRole::Staff);
        assert_eq!(StaffRole::from_str("admin").unwrap(), StaffRole::Admin);
        assert!(StaffRole::from_str("owner").is_err());
        assert_eq!(StaffRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_display_name_trims() {
        let staff = Staff {
            id: 1,
            email: "a@b.c".into(),
            password_hash: "hash".into(),
            first_name: "Amira".into(),
            last_name: String::new(),
            role: StaffRole::Staff,
            phone: None,
            photo_url: None,
            bio: None,
            title: None,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(staff.display_name(), "Amira");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let staff = Staff {
            id: 1,
            email: "a@b.c".into(),
            password_hash: "sensitive".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            role: StaffRole::Staff,
            phone: None,
            photo_url: None,
            bio: None,
            title: None,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&staff).unwrap();
        assert!(!json.contains("sensitive"));
        assert!(!json.contains("passwordHash"));
    }
}
