//! Post request and row models

use serde::{Deserialize, Serialize};

use crate::common::string_or_number;

// ============================================================================
// Request Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditPostRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub post_id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeletePostRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub post_id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
}

// ============================================================================
// Row Models
// ============================================================================

/// One entry of the recent-posts listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_date: String,
    pub author_name: String,
}

/// A single post with its author's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_date: String,
    pub author_name: String,
}
