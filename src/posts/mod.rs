//! # Posts Module
//!
//! Board posts: create, list the most recent, read one, and author-only
//! edit and delete.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::posts_routes;
