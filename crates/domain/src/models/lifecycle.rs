//! Entity lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a soft-deletable entity.
///
/// The schema stores an `is_active` flag and a `deleted_at` timestamp side
/// by side; the domain collapses the pair into one tagged state. A set
/// `deleted_at` wins over the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Active,
    Inactive,
    Deleted,
}

impl Lifecycle {
    pub fn from_flags(is_active: bool, deleted_at: Option<DateTime<Utc>>) -> Self {
        if deleted_at.is_some() {
            Lifecycle::Deleted
        } else if is_active {
            Lifecycle::Active
        } else {
            Lifecycle::Inactive
        }
    }

    /// Whether the entity may participate in new bookings.
    pub fn is_usable(self) -> bool {
        matches!(self, Lifecycle::Active)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Active => write!(f, "active"),
            Lifecycle::Inactive => write!(f, "inactive"),
            Lifecycle::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Lifecycle::from_flags(true, None), Lifecycle::Active);
        assert_eq!(Lifecycle::from_flags(false, None), Lifecycle::Inactive);
        let ts = Some(Utc::now());
        // deleted_at wins regardless of the flag
        assert_eq!(Lifecycle::from_flags(true, ts), Lifecycle::Deleted);
        assert_eq!(Lifecycle::from_flags(false, ts), Lifecycle::Deleted);
    }

    #[test]
    fn test_only_active_is_usable() {
        assert!(Lifecycle::Active.is_usable());
        assert!(!Lifecycle::Inactive.is_usable());
        assert!(!Lifecycle::Deleted.is_usable());
    }

    #[test]
    fn test_display() {
        assert_eq!(Lifecycle::Active.to_string(), "active");
        assert_eq!(Lifecycle::Deleted.to_string(), "deleted");
    }
}
