//! Redaction of sensitive fields in log context.
//!
//! Anything that might hold a credential or card number is masked before the
//! context value reaches a log sink. Matching is by key name, recursively
//! through nested objects.

use serde_json::Value;

/// Placeholder written in place of a redacted value.
pub const REDACTED: &str = "[REDACTED]";

/// Key fragments that mark a field as sensitive.
const SENSITIVE_FRAGMENTS: &[&str] = &[
    "password",
    "secret",
    "token",
    "api_key",
    "card_number",
    "authorization",
];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_FRAGMENTS.iter().any(|frag| key.contains(frag))
}

/// Returns a copy of `context` with sensitive values masked.
pub fn redact(context: &Value) -> Value {
    match context {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    if is_sensitive(key) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_masks_sensitive_keys() {
        let input = json!({
            "email": "test@example.com",
            "password": "supersecret123",
            "api_key": "sk_live_abc123",
            "stripe_secret": "sk_test_xyz789",
            "card_number": "4242424242424242",
            "normal_field": "untouched",
        });
        let out = redact(&input);
        assert_eq!(out["password"], REDACTED);
        assert_eq!(out["api_key"], REDACTED);
        assert_eq!(out["stripe_secret"], REDACTED);
        assert_eq!(out["card_number"], REDACTED);
        assert_eq!(out["email"], "test@example.com");
        assert_eq!(out["normal_field"], "untouched");
    }

    #[test]
    fn test_masks_nested_objects() {
        let input = json!({"request": {"headers": {"authorization": "Bearer abc"}}});
        let out = redact(&input);
        assert_eq!(out["request"]["headers"]["authorization"], REDACTED);
    }

    #[test]
    fn test_masks_inside_arrays() {
        let input = json!([{"refresh_token": "abc"}, {"note": "keep"}]);
        let out = redact(&input);
        assert_eq!(out[0]["refresh_token"], REDACTED);
        assert_eq!(out[1]["note"], "keep");
    }

    #[test]
    fn test_case_insensitive_keys() {
        let input = json!({"Password": "x", "API_KEY": "y"});
        let out = redact(&input);
        assert_eq!(out["Password"], REDACTED);
        assert_eq!(out["API_KEY"], REDACTED);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(redact(&json!(42)), json!(42));
        assert_eq!(redact(&json!("plain")), json!("plain"));
        assert_eq!(redact(&json!(null)), json!(null));
    }
}
