//! Process configuration, read once from the environment at startup

use std::env;
use std::str::FromStr;
use tracing::warn;

/// Maximum lengths per input field. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLimits {
    pub user_id: usize,
    pub login_id: usize,
    pub password: usize,
    pub name: usize,
    pub phone_number: usize,
    pub email: usize,
    pub post_id: usize,
    pub post_title: usize,
    pub post_content: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            user_id: 10,
            login_id: 15,
            password: 17,
            name: 8,
            phone_number: 11,
            email: 320,
            post_id: 10,
            post_title: 30,
            post_content: 1000,
        }
    }
}

impl FieldLimits {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_id: env_or("MAX_USER_ID_LENGTH", defaults.user_id),
            login_id: env_or("MAX_LOGIN_ID_LENGTH", defaults.login_id),
            password: env_or("MAX_PW_LENGTH", defaults.password),
            name: env_or("MAX_NAME_LENGTH", defaults.name),
            phone_number: env_or("MAX_PHONE_NUMBER_LENGTH", defaults.phone_number),
            email: env_or("MAX_EMAIL_LENGTH", defaults.email),
            post_id: env_or("MAX_POST_ID_LENGTH", defaults.post_id),
            post_title: env_or("MAX_POST_TITLE_LENGTH", defaults.post_title),
            post_content: env_or("MAX_POST_CONTENT_LENGTH", defaults.post_content),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub sentry_dsn: Option<String>,
    pub environment: String,
}

#[derive(Debug, Clone)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
    pub monitoring: MonitoringConfig,
    pub password_hash: PasswordHashConfig,
    pub limits: FieldLimits,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://board.db".to_string()),
            port: env_or("PORT", 8080),
            cors_origins: split_list(&cors_origins),
            reset_db: env_flag("RESET_DB"),
            monitoring: MonitoringConfig {
                sentry_dsn: env::var("SENTRY_DSN").ok(),
                environment: env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string()),
            },
            password_hash: PasswordHashConfig {
                memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", 19 * 1024),
                iterations: env_or("PASSWORD_HASH_ITERATIONS", 2),
            },
            limits: FieldLimits::from_env(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key = %key, value = %raw, "Ignoring unparsable setting, using default");
            default
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
