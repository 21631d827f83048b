use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the posts router
pub fn posts_routes() -> Router {
    Router::new()
        .route(
            "/api/post",
            post(handlers::create_post)
                .put(handlers::edit_post)
                .delete(handlers::delete_post),
        )
        // Static segment, matched before `:postId`
        .route("/api/post/all", get(handlers::list_posts))
        .route("/api/post/:postId", get(handlers::get_post))
}
