//! Account request and row models

use serde::{Deserialize, Serialize};

use crate::common::string_or_number;

// ============================================================================
// Request Models
// ============================================================================
//
// Every field is optional at the serde level so that a missing field reaches
// the validator and comes back as a 400 envelope naming the field.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    pub login_id: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Query for `GET /api/account/loginId`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindLoginIdQuery {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Query for `GET /api/account/pw`, the identity check before a reset.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyUserQuery {
    pub login_id: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    pub new_pw: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
}

// ============================================================================
// Row Models
// ============================================================================

/// Public profile fields. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login_id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub created_date: String,
    pub updated_date: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRow {
    pub id: i64,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdRow {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginIdRow {
    pub login_id: String,
}
