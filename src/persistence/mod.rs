//! # Persistence Module
//!
//! The boundary every handler talks to the database through:
//! - `Database` hands out one `Session` per request
//! - `Session` runs parameterized statements and must be released
//! - `run_statement` runs exactly one statement with guaranteed release

pub mod sqlite;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use sqlite::SqliteDatabase;

/// One result row, keyed by column name.
pub type Row = Map<String, Value>;

/// Classified failures raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("foreign key constraint failed: {0}")]
    ForeignKeyViolation(String),

    #[error("database backend error: {0}")]
    Backend(String),

    #[error("row decode error: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(db_error.message().to_string());
            }
        }
        StoreError::Backend(error.to_string())
    }
}

/// Bind parameter for a `Statement`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// A parameterized SQL statement with positional `?` placeholders.
#[derive(Debug, Clone)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// What a statement produced: returned rows and affected row count.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub rows_affected: u64,
}

impl QueryResult {
    /// Decodes the first row, if any, into `T`.
    pub fn first<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        self.rows.first().map(decode_row::<T>).transpose()
    }

    /// Decodes every row into `T`.
    pub fn all<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        self.rows.iter().map(decode_row::<T>).collect()
    }
}

fn decode_row<T: DeserializeOwned>(row: &Row) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(row.clone()))
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Connection factory.
#[async_trait]
pub trait Database: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Session>, StoreError>;
}

/// A connection acquired for the lifetime of one operation.
#[async_trait]
pub trait Session: Send {
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult, StoreError>;

    /// Gives the connection back. Further queries on this session fail.
    async fn release(&mut self);
}

/// Acquires a session, runs `statement`, and releases the session whether
/// the statement succeeded or not.
pub async fn run_statement(
    db: &dyn Database,
    statement: Statement,
) -> Result<QueryResult, StoreError> {
    let mut session = db.connect().await?;
    let outcome = session.query(&statement).await;
    session.release().await;
    outcome
}
