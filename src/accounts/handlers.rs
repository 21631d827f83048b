use axum::{
    extract::{Extension, Path, Query},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::models::*;
use super::services::AccountsService;
use crate::common::{ApiError, AppState};

// A body that is missing or not JSON is treated as an empty object, so the
// validator names the first missing field instead of axum rejecting it.
fn body_or_default<T: Default>(body: Option<Json<T>>) -> T {
    body.map(|Json(inner)| inner).unwrap_or_default()
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/account/login
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(AccountsService::new(&state).login(&request).await)
}

/// POST /api/account/signup
pub async fn signup(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<SignupRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(AccountsService::new(&state).signup(&request).await)
}

// ============================================================================
// Recovery
// ============================================================================

/// GET /api/account/loginId?name=&phoneNumber=&email=
pub async fn find_login_id(
    Extension(state): Extension<Arc<AppState>>,
    query: Option<Query<FindLoginIdQuery>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    state.respond(AccountsService::new(&state).find_login_id(&query).await)
}

/// GET /api/account/pw?loginId=&name=&phoneNumber=&email=
pub async fn verify_for_reset(
    Extension(state): Extension<Arc<AppState>>,
    query: Option<Query<VerifyUserQuery>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    state.respond(AccountsService::new(&state).verify_for_reset(&query).await)
}

/// PUT /api/account/pw
pub async fn reset_password(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<ResetPasswordRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(AccountsService::new(&state).reset_password(&request).await)
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/account/:userId
pub async fn get_profile(
    Extension(state): Extension<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.respond(AccountsService::new(&state).profile(Some(&user_id)).await)
}

/// PUT /api/account
pub async fn update_profile(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<UpdateProfileRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(AccountsService::new(&state).update_profile(&request).await)
}

/// DELETE /api/account
pub async fn delete_account(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<DeleteAccountRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body_or_default(body);
    state.respond(AccountsService::new(&state).delete_account(&request).await)
}
