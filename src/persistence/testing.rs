// Test doubles for the persistence boundary

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Database, QueryResult, Session, SqliteDatabase, Statement, StoreError};

/// Wraps a database and counts how many sessions were opened and released.
/// In failing mode every query errors out after the session is opened.
pub struct CountingDatabase {
    inner: Option<SqliteDatabase>,
    connects: AtomicUsize,
    releases: Arc<AtomicUsize>,
}

impl CountingDatabase {
    /// Counts sessions over a fresh in-memory SQLite database.
    pub async fn healthy() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        Self::wrap(SqliteDatabase::new(pool))
    }

    pub fn wrap(inner: SqliteDatabase) -> Self {
        Self {
            inner: Some(inner),
            connects: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every query fails with a backend error.
    pub fn failing() -> Self {
        Self {
            inner: None,
            connects: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for CountingDatabase {
    async fn connect(&self) -> Result<Box<dyn Session>, StoreError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let inner = match &self.inner {
            Some(db) => Some(db.connect().await?),
            None => None,
        };
        Ok(Box::new(CountingSession {
            inner,
            releases: self.releases.clone(),
        }))
    }
}

struct CountingSession {
    inner: Option<Box<dyn Session>>,
    releases: Arc<AtomicUsize>,
}

#[async_trait]
impl Session for CountingSession {
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult, StoreError> {
        match self.inner.as_mut() {
            Some(session) => session.query(statement).await,
            None => Err(StoreError::Backend("simulated connection loss".to_string())),
        }
    }

    async fn release(&mut self) {
        if let Some(session) = self.inner.as_mut() {
            session.release().await;
        }
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
