// src/posts/validators.rs

use super::models::*;
use crate::common::validation::validate_id;
use crate::common::{Field, FieldLimits, ValidationError};

#[derive(Debug, PartialEq)]
pub struct NewPost<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct PostEdit<'a> {
    pub post_id: i64,
    pub user_id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

/// Identifies a post together with the user claiming to own it.
#[derive(Debug, PartialEq)]
pub struct OwnedPost {
    pub post_id: i64,
    pub user_id: i64,
}

fn title<'a>(value: Option<&'a str>, limits: &FieldLimits) -> Result<&'a str, ValidationError> {
    Field::new("title", value)
        .required()
        .length(1, limits.post_title)
        .finish()
}

fn content<'a>(value: Option<&'a str>, limits: &FieldLimits) -> Result<&'a str, ValidationError> {
    Field::new("content", value)
        .required()
        .length(1, limits.post_content)
        .finish()
}

pub fn validate_create<'a>(
    request: &'a CreatePostRequest,
    limits: &FieldLimits,
) -> Result<NewPost<'a>, ValidationError> {
    Ok(NewPost {
        user_id: validate_id("userId", request.user_id.as_deref(), limits.user_id)?,
        title: title(request.title.as_deref(), limits)?,
        content: content(request.content.as_deref(), limits)?,
    })
}

pub fn validate_post_id(value: Option<&str>, limits: &FieldLimits) -> Result<i64, ValidationError> {
    validate_id("postId", value, limits.post_id)
}

/// Checks userId before postId.
pub fn validate_edit<'a>(
    request: &'a EditPostRequest,
    limits: &FieldLimits,
) -> Result<PostEdit<'a>, ValidationError> {
    let user_id = validate_id("userId", request.user_id.as_deref(), limits.user_id)?;
    let post_id = validate_post_id(request.post_id.as_deref(), limits)?;
    Ok(PostEdit {
        post_id,
        user_id,
        title: title(request.title.as_deref(), limits)?,
        content: content(request.content.as_deref(), limits)?,
    })
}

/// Checks postId before userId.
pub fn validate_delete(
    request: &DeletePostRequest,
    limits: &FieldLimits,
) -> Result<OwnedPost, ValidationError> {
    let post_id = validate_post_id(request.post_id.as_deref(), limits)?;
    let user_id = validate_id("userId", request.user_id.as_deref(), limits.user_id)?;
    Ok(OwnedPost { post_id, user_id })
}
