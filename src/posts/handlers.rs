use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::models::*;
use super::services::PostsService;
use crate::common::{ApiError, AppState};

fn body_or_default<T: Default>(body: Option<Json<T>>) -> T {
    body.map(|Json(inner)| inner).unwrap_or_default()
}

/// POST /api/post
pub async fn create_post(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<CreatePostRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(PostsService::new(&state).create(&request).await)
}

/// GET /api/post/all
pub async fn list_posts(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.respond(PostsService::new(&state).list_recent().await)
}

/// GET /api/post/:postId
pub async fn get_post(
    Extension(state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.respond(PostsService::new(&state).get(Some(&post_id)).await)
}

/// PUT /api/post
pub async fn edit_post(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<EditPostRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(PostsService::new(&state).edit(&request).await)
}

/// DELETE /api/post
pub async fn delete_post(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<DeletePostRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(PostsService::new(&state).delete(&request).await)
}
