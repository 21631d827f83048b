use chrono::{SecondsFormat, Utc};
use std::fmt::Display;
use std::sync::Arc;
use tokio::task;
use tracing::info;

use super::models::*;
use super::validators;
use crate::common::validation::validate_id;
use crate::common::{safe_email_log, safe_login_id_log, ApiError, AppState, Envelope};
use crate::persistence::{run_statement, Database, Statement, StoreError};

const NO_SUCH_USER: &str = "user does not exist";

/// Account operations. Each one validates, runs a single statement, and
/// reports "no matching row" as an unsuccessful envelope.
pub struct AccountsService<'a> {
    state: &'a AppState,
}

impl<'a> AccountsService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn db(&self) -> &dyn Database {
        self.state.db.as_ref()
    }

    /// Hashes on the blocking pool. A hash that cannot be produced fails the
    /// write it was meant for.
    async fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let hasher = Arc::clone(&self.state.hasher);
        let password = password.to_string();
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(hasher_failure)?
            .map_err(hasher_failure)
    }

    /// Checks `password` against the stored hash, or against the decoy when
    /// the login id matched nothing, so both misses take equally long.
    async fn verify_password(
        &self,
        password: &str,
        stored_hash: Option<String>,
    ) -> Result<bool, ApiError> {
        let hasher = Arc::clone(&self.state.hasher);
        let password = password.to_string();
        task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => hasher.verify_decoy(&password),
        })
        .await
        .map_err(hasher_failure)
    }

    /// Returns the user id when the login id exists and the password
    /// verifies against its stored hash.
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope<i64>, ApiError> {
        let input = validators::validate_login(request, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new("SELECT id, password FROM user_tb WHERE login_id = ?")
                .bind(input.login_id),
        )
        .await?;

        let row = result.first::<CredentialRow>()?;
        let user_id = row.as_ref().map(|r| r.id);
        let verified = self
            .verify_password(input.password, row.map(|r| r.password))
            .await?;

        match user_id {
            Some(user_id) if verified => {
                info!(user_id, "User logged in");
                Ok(Envelope::success(user_id))
            }
            _ => {
                info!(login_id = %safe_login_id_log(input.login_id), "Login rejected");
                Ok(Envelope::failure("login id or password is incorrect"))
            }
        }
    }

    /// A duplicate login id is rejected by the unique constraint and
    /// surfaces as a database error.
    pub async fn signup(&self, request: &SignupRequest) -> Result<Envelope<()>, ApiError> {
        let input = validators::validate_signup(request)?;
        let password_hash = self.hash_password(input.password).await?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "INSERT INTO user_tb (login_id, password, name, phone_number, email) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(input.login_id)
            .bind(password_hash)
            .bind(input.name)
            .bind(input.phone_number)
            .bind(input.email),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure("signup failed"));
        }

        info!(
            login_id = %safe_login_id_log(input.login_id),
            email = %safe_email_log(input.email),
            "User signed up"
        );
        Ok(Envelope::done().with_message("signup succeeded"))
    }

    pub async fn find_login_id(
        &self,
        query: &FindLoginIdQuery,
    ) -> Result<Envelope<String>, ApiError> {
        let contact = validators::validate_find_login_id(query, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "SELECT login_id FROM user_tb WHERE name = ? AND phone_number = ? AND email = ?",
            )
            .bind(contact.name)
            .bind(contact.phone_number)
            .bind(contact.email),
        )
        .await?;

        Ok(match result.first::<LoginIdRow>()? {
            Some(row) => Envelope::success(row.login_id),
            None => Envelope::failure("no login id matches those details"),
        })
    }

    /// First step of a password reset: confirms the identity and returns the
    /// user id the reset applies to.
    pub async fn verify_for_reset(
        &self,
        query: &VerifyUserQuery,
    ) -> Result<Envelope<i64>, ApiError> {
        let identity = validators::validate_recovery_identity(query, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "SELECT id FROM user_tb \
                 WHERE login_id = ? AND name = ? AND phone_number = ? AND email = ?",
            )
            .bind(identity.login_id)
            .bind(identity.contact.name)
            .bind(identity.contact.phone_number)
            .bind(identity.contact.email),
        )
        .await?;

        Ok(match result.first::<UserIdRow>()? {
            Some(row) => Envelope::success(row.id),
            None => Envelope::failure(NO_SUCH_USER),
        })
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Envelope<()>, ApiError> {
        let input = validators::validate_password_reset(request, &self.state.limits)?;
        let password_hash = self.hash_password(input.new_pw).await?;

        let result = run_statement(
            self.db(),
            Statement::new("UPDATE user_tb SET password = ?, updated_date = ? WHERE id = ?")
                .bind(password_hash)
                .bind(timestamp())
                .bind(input.user_id),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure(NO_SUCH_USER));
        }
        info!(user_id = input.user_id, "Password reset");
        Ok(Envelope::done())
    }

    pub async fn profile(&self, user_id: Option<&str>) -> Result<Envelope<Profile>, ApiError> {
        let user_id = validate_id("userId", user_id, self.state.limits.user_id)?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "SELECT login_id, name, phone_number, email, created_date, updated_date \
                 FROM user_tb WHERE id = ?",
            )
            .bind(user_id),
        )
        .await?;

        Ok(match result.first::<Profile>()? {
            Some(profile) => Envelope::success(profile),
            None => Envelope::failure(NO_SUCH_USER),
        })
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<Envelope<()>, ApiError> {
        let input = validators::validate_profile_update(request, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "UPDATE user_tb SET name = ?, phone_number = ?, email = ?, updated_date = ? \
                 WHERE id = ?",
            )
            .bind(input.contact.name)
            .bind(input.contact.phone_number)
            .bind(input.contact.email)
            .bind(timestamp())
            .bind(input.user_id),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure(NO_SUCH_USER));
        }
        info!(user_id = input.user_id, "Profile updated");
        Ok(Envelope::done())
    }

    /// Deletes the account. The user's posts go with it (cascade).
    pub async fn delete_account(
        &self,
        request: &DeleteAccountRequest,
    ) -> Result<Envelope<()>, ApiError> {
        let user_id = validate_id("userId", request.user_id.as_deref(), self.state.limits.user_id)?;

        let result = run_statement(
            self.db(),
            Statement::new("DELETE FROM user_tb WHERE id = ?").bind(user_id),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure(NO_SUCH_USER));
        }
        info!(user_id, "Account deleted");
        Ok(Envelope::done())
    }
}

/// Reported like a persistence failure, labelled as the hasher's.
fn hasher_failure(error: impl Display) -> ApiError {
    ApiError::PersistenceFailure(StoreError::Backend(format!("password hasher: {}", error)))
}

/// Same format SQLite uses for the column defaults.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
