// Uniform response body returned by every operation

use serde::{Deserialize, Serialize};

/// Result envelope: `{ "isSuccess": bool, "data": T | null, "message": string }`.
///
/// A business-level miss such as "no matching row" is a successful request
/// with an unsuccessful result, so it travels as `Envelope::failure` with
/// HTTP 200. Only `ApiError` changes the status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            data: Some(data),
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            data: None,
            message: message.into(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Envelope<()> {
    /// Success with nothing to return.
    pub fn done() -> Self {
        Self {
            is_success: true,
            data: None,
            message: String::new(),
        }
    }
}
