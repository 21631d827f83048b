// SQLite-backed persistence collaborator

use async_trait::async_trait;
use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, Sqlite, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use super::{Database, QueryResult, Row, Session, SqlValue, Statement, StoreError};

/// Hands out pooled SQLite connections, one per operation.
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn connect(&self) -> Result<Box<dyn Session>, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(SqliteSession { conn: Some(conn) }))
    }
}

struct SqliteSession {
    conn: Option<PoolConnection<Sqlite>>,
}

#[async_trait]
impl Session for SqliteSession {
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult, StoreError> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| StoreError::Backend("session already released".to_string()))?;

        let mut query = sqlx::query(statement.sql);
        for param in &statement.params {
            query = match param {
                SqlValue::Integer(value) => query.bind(*value),
                SqlValue::Text(value) => query.bind(value.as_str()),
                SqlValue::Null => query.bind(None::<String>),
            };
        }

        let mut outcome = QueryResult::default();
        if returns_rows(statement.sql) {
            for row in query.fetch_all(&mut **conn).await? {
                outcome.rows.push(row_to_map(&row)?);
            }
        } else {
            outcome.rows_affected = query.execute(&mut **conn).await?.rows_affected();
        }

        debug!(
            rows = outcome.rows.len(),
            rows_affected = outcome.rows_affected,
            "Statement executed"
        );
        Ok(outcome)
    }

    async fn release(&mut self) {
        // Dropping a pooled connection returns it to the pool.
        self.conn.take();
    }
}

fn returns_rows(sql: &str) -> bool {
    let keyword = sql.split_whitespace().next().unwrap_or("");
    keyword.eq_ignore_ascii_case("select") || keyword.eq_ignore_ascii_case("with")
}

/// Converts a row into a column-name map using each value's storage class.
fn row_to_map(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut map = Row::new();
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_string();
            match storage.as_str() {
                "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get_unchecked::<f64, _>(index)?),
                _ => Value::from(row.try_get_unchecked::<String, _>(index)?),
            }
        };
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::run_statement;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqliteDatabase {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE parent (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT NOT NULL UNIQUE)",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE child (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parent_id INTEGER NOT NULL REFERENCES parent(id),
                score REAL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        SqliteDatabase::new(pool)
    }

    #[tokio::test]
    async fn test_insert_reports_rows_affected() {
        let db = setup_test_db().await;
        let result = run_statement(
            &db,
            Statement::new("INSERT INTO parent (label) VALUES (?)").bind("first"),
        )
        .await
        .unwrap();

        assert_eq!(result.rows_affected, 1);
        assert!(result.rows.is_empty());
    }

    #[tokio::test]
    async fn test_select_maps_storage_classes() {
        let db = setup_test_db().await;
        run_statement(&db, Statement::new("INSERT INTO parent (label) VALUES ('p')"))
            .await
            .unwrap();
        run_statement(
            &db,
            Statement::new("INSERT INTO child (parent_id, score) VALUES (?, ?)")
                .bind(1_i64)
                .bind(None::<String>),
        )
        .await
        .unwrap();

        let result = run_statement(
            &db,
            Statement::new(
                "SELECT child.id, child.score, parent.label AS parent_label, 2.5 AS ratio \
                 FROM child JOIN parent ON child.parent_id = parent.id",
            ),
        )
        .await
        .unwrap();

        let row = &result.rows[0];
        assert_eq!(row["id"], Value::from(1));
        assert_eq!(row["score"], Value::Null);
        assert_eq!(row["parent_label"], Value::from("p"));
        assert_eq!(row["ratio"], Value::from(2.5));
    }

    #[tokio::test]
    async fn test_foreign_key_violation_is_classified() {
        let db = setup_test_db().await;
        let err = run_statement(
            &db,
            Statement::new("INSERT INTO child (parent_id) VALUES (?)").bind(99_i64),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_unique_violation_is_backend_error() {
        let db = setup_test_db().await;
        let insert = Statement::new("INSERT INTO parent (label) VALUES (?)").bind("dup");
        run_statement(&db, insert.clone()).await.unwrap();
        let err = run_statement(&db, insert).await.unwrap_err();

        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_returns_rows_detection() {
        assert!(returns_rows("SELECT id FROM parent"));
        assert!(returns_rows("\n    select 1"));
        assert!(!returns_rows("INSERT INTO parent (label) VALUES (?)"));
        assert!(!returns_rows("DELETE FROM parent"));
    }

    #[tokio::test]
    async fn test_released_session_rejects_queries() {
        let db = setup_test_db().await;
        let mut session = db.connect().await.unwrap();
        session.release().await;

        let err = session.query(&Statement::new("SELECT 1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn test_release_returns_connection_to_pool() {
        let db = setup_test_db().await;
        // The pool holds one connection; a second acquire only succeeds if
        // the first session gave it back.
        for _ in 0..3 {
            run_statement(&db, Statement::new("SELECT 1")).await.unwrap();
        }
        assert_eq!(db.pool().size(), 1);
    }
}
