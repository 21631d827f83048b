// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, error};

use super::envelope::Envelope;
use super::validation::ValidationError;
use crate::persistence::StoreError;
use crate::services::monitoring::ErrorReporter;

/// Request-level failures. A missing row is not one of these: it is an
/// unsuccessful `Envelope` sent with 200.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field missing, wrong length, or not matching its pattern.
    #[error("{0}")]
    InvalidInput(String),

    /// A foreign key rejected the write.
    #[error("{0}")]
    ReferentialViolation(String),

    /// Any other database failure. Reported upstream, never retried.
    #[error("database error: {0}")]
    PersistenceFailure(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::ReferentialViolation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::InvalidInput(msg) | ApiError::ReferentialViolation(msg) => msg.clone(),
            ApiError::PersistenceFailure(_) => "database error".to_string(),
        }
    }

    /// Names the missing entity when a foreign key rejected the write.
    pub fn naming_reference(self, entity: &str) -> Self {
        match self {
            ApiError::ReferentialViolation(_) => {
                ApiError::ReferentialViolation(format!("{} does not exist", entity))
            }
            other => other,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ForeignKeyViolation(_) => {
                ApiError::ReferentialViolation("referenced entity does not exist".to_string())
            }
            StoreError::Backend(_) | StoreError::Decode(_) => ApiError::PersistenceFailure(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = Envelope::<()>::failure(self.public_message());
        (status, Json(body)).into_response()
    }
}

/// Recovery boundary shared by every handler: turns the operation outcome
/// into a response and forwards unclassified persistence failures upstream.
pub fn settle<T>(
    reporter: &dyn ErrorReporter,
    outcome: Result<Envelope<T>, ApiError>,
) -> Result<Json<Envelope<T>>, ApiError> {
    match outcome {
        Ok(envelope) => Ok(Json(envelope)),
        Err(err) => {
            match &err {
                ApiError::InvalidInput(msg) => debug!(reason = %msg, "Rejected invalid input"),
                ApiError::ReferentialViolation(msg) => {
                    debug!(reason = %msg, "Write rejected by foreign key")
                }
                ApiError::PersistenceFailure(source) => {
                    error!(error = %source, "Database error occurred");
                    reporter.report(source);
                }
            }
            Err(err)
        }
    }
}
