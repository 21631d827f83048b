//! # Accounts Module
//!
//! Member accounts:
//! - Login and signup
//! - Login id recovery and password reset
//! - Profile read, update and delete

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::accounts_routes;
