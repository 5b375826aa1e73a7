//! Generic row record returned by a [`Store`](crate::db::Store)
//!
//! Fields are keyed by the statement's output alias, so entity hydration
//! never needs to know how a column was named in the table.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{DbError, DbResult};

/// A single column value, also used for bind parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// One result row: field name -> value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for canned rows in tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Required integer field
    pub fn int(&self, field: &str) -> DbResult<i64> {
        match self.get(field) {
            Some(Value::Int(v)) => Ok(*v),
            _ => Err(DbError::decode(field, "integer")),
        }
    }

    /// Nullable integer field; an absent field reads as `None`
    pub fn opt_int(&self, field: &str) -> DbResult<Option<i64>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Int(v)) => Ok(Some(*v)),
            Some(_) => Err(DbError::decode(field, "integer or null")),
        }
    }

    /// Required text field
    pub fn text(&self, field: &str) -> DbResult<String> {
        match self.get(field) {
            Some(Value::Text(v)) => Ok(v.clone()),
            _ => Err(DbError::decode(field, "text")),
        }
    }

    /// Nullable text field; an absent field reads as `None`
    pub fn opt_text(&self, field: &str) -> DbResult<Option<String>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Text(v)) => Ok(Some(v.clone())),
            Some(_) => Err(DbError::decode(field, "text or null")),
        }
    }

    /// Required timestamp field
    pub fn timestamp(&self, field: &str) -> DbResult<NaiveDateTime> {
        match self.get(field) {
            Some(Value::Timestamp(v)) => Ok(*v),
            _ => Err(DbError::decode(field, "timestamp")),
        }
    }
}
