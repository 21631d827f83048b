// src/services/mod.rs
//
// Shared services used across the domain modules

pub mod monitoring;
pub mod password;

pub use monitoring::{init_sentry, ErrorReporter, SentryReporter};
pub use password::{Argon2Hasher, PasswordHasher};
