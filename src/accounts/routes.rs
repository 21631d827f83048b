use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

/// Creates the accounts router
pub fn accounts_routes() -> Router {
    Router::new()
        .route("/api/account/login", post(handlers::login))
        .route("/api/account/signup", post(handlers::signup))
        // Static segments win over `:userId`
        .route("/api/account/loginId", get(handlers::find_login_id))
        .route(
            "/api/account/pw",
            get(handlers::verify_for_reset).put(handlers::reset_password),
        )
        .route("/api/account/:userId", get(handlers::get_profile))
        .route(
            "/api/account",
            put(handlers::update_profile).delete(handlers::delete_account),
        )
}
