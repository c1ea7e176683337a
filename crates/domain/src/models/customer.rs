//! Customer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::Lifecycle;

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub marketing_consent: bool,
    pub consent_updated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The contact sub-object accumulated by wizard step 4.
///
/// All fields are optional because the wizard fills them in piecemeal;
/// fields merge key-by-key, so setting the phone never clears the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactDetails {
    /// Merges another set of details into this one, field by field. Only
    /// fields present in `patch` are overwritten.
    pub fn merge(&mut self, patch: ContactDetails) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }

    /// Splits `name` into (first, last) on the first whitespace.
    pub fn split_name(&self) -> (String, String) {
        let full = self.name.as_deref().unwrap_or("").trim();
        match full.split_once(char::is_whitespace) {
            Some((first, last)) => (first.to_string(), last.trim().to_string()),
            None => (full.to_string(), String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unrelated_fields() {
        let mut details = ContactDetails {
            name: Some("Jo March".into()),
            email: Some("jo@example.com".into()),
            ..Default::default()
        };
        details.merge(ContactDetails {
            phone: Some("07700 900123".into()),
            ..Default::default()
        });
        assert_eq!(details.name.as_deref(), Some("Jo March"));
        assert_eq!(details.email.as_deref(), Some("jo@example.com"));
        assert_eq!(details.phone.as_deref(), Some("07700 900123"));
    }

    #[test]
    fn test_merge_overwrites_present_fields() {
        let mut details = ContactDetails {
            email: Some("old@example.com".into()),
            ..Default::default()
        };
        details.merge(ContactDetails {
            email: Some("new@example.com".into()),
            ..Default::default()
        });
        assert_eq!(details.email.as_deref(), Some("new@example.com"));
    }

    #[test]
    fn test_split_name() {
        let details = ContactDetails {
            name: Some("Jo March".into()),
            ..Default::default()
        };
        assert_eq!(details.split_name(), ("Jo".into(), "March".into()));

        let single = ContactDetails {
            name: Some("Cher".into()),
            ..Default::default()
        };
        assert_eq!(single.split_name(), ("Cher".into(), String::new()));

        let empty = ContactDetails::default();
        assert_eq!(empty.split_name(), (String::new(), String::new()));
    }
}
