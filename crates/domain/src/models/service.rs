//! Service and category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::Lifecycle;

/// A bookable service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Appointment length in minutes.
    pub duration: i32,
    pub price: f64,
    pub deposit_amount: Option<f64>,
    /// Padding before the appointment, in minutes. Widens the conflict
    /// window when checking staff availability.
    pub buffer_before: i32,
    /// Padding after the appointment, in minutes.
    pub buffer_after: i32,
    pub display_order: i32,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A grouping for services. Many-to-many with [`Service`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a service the wizard keeps in session state and returns
/// from the selection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: i64,
    pub name: String,
    pub duration: i32,
    pub price: f64,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            duration: service.duration,
            price: service.price,
        }
    }
}

/// Services grouped under one category for the step-1 listing.
/// Uncategorized services appear under a `None` category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryServices {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub services: Vec<ServiceSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: i64) -> Service {
        Service {
            id,
            name: "Haircut".into(),
            description: None,
            duration: 45,
            price: 32.50,
            deposit_amount: Some(10.0),
            buffer_before: 0,
            buffer_after: 15,
            display_order: 1,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_from_service() {
        let summary = ServiceSummary::from(&service(3));
        assert_eq!(summary.id, 3);
        assert_eq!(summary.name, "Haircut");
        assert_eq!(summary.duration, 45);
        assert_eq!(summary.price, 32.50);
    }

    #[test]
    fn test_summary_wire_shape() {
        let json = serde_json::to_value(ServiceSummary::from(&service(3))).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["duration"], 45);
        assert_eq!(json["price"], 32.50);
    }
}
