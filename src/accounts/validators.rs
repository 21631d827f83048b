// src/accounts/validators.rs

use super::models::*;
use crate::common::validation::validate_id;
use crate::common::{Field, FieldLimits, ValidationError};

// ============================================================================
// Validated Inputs
// ============================================================================

#[derive(Debug, PartialEq)]
pub struct Credentials<'a> {
    pub login_id: &'a str,
    pub password: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct NewUser<'a> {
    pub login_id: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct Contact<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct RecoveryIdentity<'a> {
    pub login_id: &'a str,
    pub contact: Contact<'a>,
}

#[derive(Debug, PartialEq)]
pub struct PasswordReset<'a> {
    pub user_id: i64,
    pub new_pw: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct ProfileUpdate<'a> {
    pub user_id: i64,
    pub contact: Contact<'a>,
}

// ============================================================================
// Validators
// ============================================================================

/// Login only bounds the lengths; the shape rules apply at signup.
pub fn validate_login<'a>(
    request: &'a LoginRequest,
    limits: &FieldLimits,
) -> Result<Credentials<'a>, ValidationError> {
    Ok(Credentials {
        login_id: Field::new("loginId", request.login_id.as_deref())
            .required()
            .length(1, limits.login_id)
            .finish()?,
        password: Field::new("password", request.password.as_deref())
            .required()
            .length(1, limits.password)
            .finish()?,
    })
}

pub fn validate_signup(request: &SignupRequest) -> Result<NewUser<'_>, ValidationError> {
    Ok(NewUser {
        login_id: Field::new("loginId", request.login_id.as_deref())
            .required()
            .login_id()
            .finish()?,
        password: Field::new("password", request.password.as_deref())
            .required()
            .password()
            .finish()?,
        name: Field::new("name", request.name.as_deref())
            .required()
            .name()
            .finish()?,
        phone_number: Field::new("phoneNumber", request.phone_number.as_deref())
            .required()
            .phone_number()
            .finish()?,
        email: Field::new("email", request.email.as_deref())
            .required()
            .email()
            .finish()?,
    })
}

/// Recovery lookups bound lengths only; a malformed value simply matches
/// no row.
fn validate_contact_lengths<'a>(
    name: Option<&'a str>,
    phone_number: Option<&'a str>,
    email: Option<&'a str>,
    limits: &FieldLimits,
) -> Result<Contact<'a>, ValidationError> {
    Ok(Contact {
        name: Field::new("name", name)
            .required()
            .length(1, limits.name)
            .finish()?,
        phone_number: Field::new("phoneNumber", phone_number)
            .required()
            .length(limits.phone_number, limits.phone_number)
            .finish()?,
        email: Field::new("email", email)
            .required()
            .length(1, limits.email)
            .finish()?,
    })
}

pub fn validate_find_login_id<'a>(
    query: &'a FindLoginIdQuery,
    limits: &FieldLimits,
) -> Result<Contact<'a>, ValidationError> {
    validate_contact_lengths(
        query.name.as_deref(),
        query.phone_number.as_deref(),
        query.email.as_deref(),
        limits,
    )
}

pub fn validate_recovery_identity<'a>(
    query: &'a VerifyUserQuery,
    limits: &FieldLimits,
) -> Result<RecoveryIdentity<'a>, ValidationError> {
    let login_id = Field::new("loginId", query.login_id.as_deref())
        .required()
        .length(1, limits.login_id)
        .finish()?;
    let contact = validate_contact_lengths(
        query.name.as_deref(),
        query.phone_number.as_deref(),
        query.email.as_deref(),
        limits,
    )?;
    Ok(RecoveryIdentity { login_id, contact })
}

pub fn validate_password_reset<'a>(
    request: &'a ResetPasswordRequest,
    limits: &FieldLimits,
) -> Result<PasswordReset<'a>, ValidationError> {
    Ok(PasswordReset {
        user_id: validate_id("userId", request.user_id.as_deref(), limits.user_id)?,
        new_pw: Field::new("newPw", request.new_pw.as_deref())
            .required()
            .password()
            .finish()?,
    })
}

pub fn validate_profile_update<'a>(
    request: &'a UpdateProfileRequest,
    limits: &FieldLimits,
) -> Result<ProfileUpdate<'a>, ValidationError> {
    Ok(ProfileUpdate {
        user_id: validate_id("userId", request.user_id.as_deref(), limits.user_id)?,
        contact: Contact {
            name: Field::new("name", request.name.as_deref())
                .required()
                .name()
                .finish()?,
            phone_number: Field::new("phoneNumber", request.phone_number.as_deref())
                .required()
                .phone_number()
                .finish()?,
            email: Field::new("email", request.email.as_deref())
                .required()
                .email()
                .finish()?,
        },
    })
}
