// Monitoring with Sentry integration
use tracing::info;

use crate::common::config::MonitoringConfig;
use crate::persistence::StoreError;

/// Upstream sink for failures nobody downstream can act on.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &StoreError);
}

/// Forwards errors to Sentry. A no-op until `init_sentry` installs a client.
#[derive(Debug, Default, Clone)]
pub struct SentryReporter;

impl ErrorReporter for SentryReporter {
    fn report(&self, error: &StoreError) {
        sentry::capture_error(error);
    }
}

/// Initialize the Sentry client when a DSN is configured.
/// The returned guard flushes pending events when dropped.
pub fn init_sentry(config: &MonitoringConfig) -> Option<sentry::ClientInitGuard> {
    let Some(dsn) = config.sentry_dsn.as_deref().filter(|dsn| !dsn.is_empty()) else {
        info!("Sentry DSN not configured");
        return None;
    };

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: 0.0,
            ..Default::default()
        },
    ));

    info!("Sentry initialized successfully");
    Some(guard)
}
