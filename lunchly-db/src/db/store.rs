//! Store trait and implementations
//!
//! Provides the query-execution seam the repositories depend on:
//! - `PgStore`: real implementation over a sqlx `PgPool`
//! - `MockStore`: canned responses plus a call log, for tests
//!
//! Every repository operation is exactly one `query` call.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};

use crate::error::{DbError, DbResult};
use crate::models::{Record, Value};

/// Executes one SQL statement with positional parameters (`$1`, `$2`, ...)
/// and returns its rows keyed by output column name.
#[async_trait]
pub trait Store: Send + Sync {
    async fn query(&self, sql: &str, params: Vec<Value>) -> DbResult<Vec<Record>>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn query(&self, sql: &str, params: Vec<Value>) -> DbResult<Vec<Record>> {
        let query = params
            .into_iter()
            .fold(sqlx::query(sql), bind_value);

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }
}

/// `Null` binds as a NULL text value; only use it for text columns.
fn bind_value(
    query: Query<'_, Postgres, PgArguments>,
    value: Value,
) -> Query<'_, Postgres, PgArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Int(v) => query.bind(v),
        Value::Text(v) => query.bind(v),
        Value::Timestamp(v) => query.bind(v),
    }
}

fn record_from_row(row: &PgRow) -> DbResult<Record> {
    let mut record = Record::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let value = match column.type_info().name() {
            "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(|v| Value::Int(v.into())),
            "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(|v| Value::Int(v.into())),
            "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::Int),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                row.try_get::<Option<String>, _>(idx)?.map(Value::Text)
            }
            "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(idx)?
                .map(Value::Timestamp),
            "TIMESTAMPTZ" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)?
                .map(|v| Value::Timestamp(v.naive_utc())),
            other => {
                return Err(DbError::UnsupportedColumn {
                    column: column.name().to_owned(),
                    type_name: other.to_owned(),
                })
            }
        };

        record.insert(column.name(), value.unwrap_or(Value::Null));
    }

    Ok(record)
}

/// A statement received by [`MockStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Mock store for testing
///
/// Responses are returned in the order they were queued; once the queue is
/// empty every query yields no rows.
#[derive(Default)]
pub struct MockStore {
    responses: Mutex<VecDeque<DbResult<Vec<Record>>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue rows to return on the next query
    pub fn add_rows(&self, rows: Vec<Record>) {
        self.push(Ok(rows));
    }

    /// Queue an error to return on the next query
    pub fn add_error(&self, err: DbError) {
        self.push(Err(err));
    }

    /// Every statement executed so far, oldest first
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent statement, if any
    pub fn last_call(&self) -> Option<Call> {
        self.calls().pop()
    }

    fn push(&self, response: DbResult<Vec<Record>>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}

#[async_trait]
impl Store for MockStore {
    async fn query(&self, sql: &str, params: Vec<Value>) -> DbResult<Vec<Record>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                sql: sql.to_owned(),
                params,
            });

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
