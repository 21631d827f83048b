// Helper functions for safe logging and lenient deserialization

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Masks email addresses for safe logging
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

/// Masks a login id, keeping the first two characters.
pub fn safe_login_id_log(login_id: &str) -> String {
    let head: String = login_id.chars().take(2).collect();
    format!("{}***", head)
}

/// Accepts a JSON string or number and yields it as a string.
///
/// Ids arrive as numbers from some clients and as strings from others (the
/// web client reads them back out of session storage). `null` and a missing
/// field both become `None`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
