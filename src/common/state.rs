// Application state shared across all modules

use axum::Json;
use std::sync::Arc;

use super::config::FieldLimits;
use super::envelope::Envelope;
use super::error::{settle, ApiError};
use crate::persistence::Database;
use crate::services::monitoring::ErrorReporter;
use crate::services::password::PasswordHasher;

/// Read-only collaborators every handler needs. Nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub limits: Arc<FieldLimits>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    /// Converts an operation outcome into the handler's response.
    pub fn respond<T>(
        &self,
        outcome: Result<Envelope<T>, ApiError>,
    ) -> Result<Json<Envelope<T>>, ApiError> {
        settle(self.reporter.as_ref(), outcome)
    }
}
