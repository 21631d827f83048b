// Common module - shared types and utilities across all modules

pub mod config;
pub mod envelope;
pub mod error;
pub mod helpers;
pub mod migrations;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{AppConfig, FieldLimits};
pub use envelope::Envelope;
pub use error::ApiError;
pub use helpers::{safe_email_log, safe_login_id_log, string_or_number};
pub use state::AppState;
pub use validation::{Field, ValidationError};
