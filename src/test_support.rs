//! Shared fixtures for in-crate tests.

use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::common::migrations::run_migrations;
use crate::common::{AppState, FieldLimits};
use crate::persistence::{Database, SqliteDatabase, StoreError};
use crate::services::monitoring::ErrorReporter;
use crate::services::password::Argon2Hasher;

/// Counts reported errors instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reported: AtomicUsize,
}

impl RecordingReporter {
    pub fn count(&self) -> usize {
        self.reported.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, _error: &StoreError) {
        self.reported.fetch_add(1, Ordering::SeqCst);
    }
}

/// Migrated in-memory database. One connection, so every session sees the
/// same data.
pub async fn memory_database() -> SqliteDatabase {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool, false).await.expect("migrations");
    SqliteDatabase::new(pool)
}

/// State over `db` with a cheap hasher. Returns the reporter so tests can
/// count escalations.
pub fn state_with(db: Arc<dyn Database>) -> (AppState, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let state = AppState {
        db,
        limits: Arc::new(FieldLimits::default()),
        hasher: Arc::new(Argon2Hasher::new(64, 1).expect("hasher params")),
        reporter: reporter.clone(),
    };
    (state, reporter)
}

pub async fn test_state() -> (AppState, Arc<RecordingReporter>) {
    state_with(Arc::new(memory_database().await))
}
