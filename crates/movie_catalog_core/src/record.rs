//! Store-agnostic shape of catalog items.
//!
//! Items carry no fixed schema, so every attribute is kept as a
//! [`RecordValue`]. Numbers keep the store's exact decimal text until
//! normalization decides how to render them.

use std::collections::BTreeMap;

pub type MovieRecord = BTreeMap<String, RecordValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Binary(Vec<u8>),
    List(Vec<RecordValue>),
    Map(BTreeMap<String, RecordValue>),
    StringSet(Vec<String>),
    NumberSet(Vec<String>),
    BinarySet(Vec<Vec<u8>>),
}

impl RecordValue {
    pub fn number(value: impl ToString) -> Self {
        Self::Number(value.to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::StringSet(_) => "string_set",
            Self::NumberSet(_) => "number_set",
            Self::BinarySet(_) => "binary_set",
        }
    }
}

/// Opaque resume position handed back by the store.
///
/// Holds the last evaluated key attributes; callers pass it back untouched
/// to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(MovieRecord);

impl ContinuationToken {
    pub fn new(key: MovieRecord) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &MovieRecord {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub records: Vec<MovieRecord>,
    pub continuation: Option<ContinuationToken>,
}

impl ResultPage {
    pub fn last(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            continuation: None,
        }
    }

    pub fn continued(records: Vec<MovieRecord>, continuation: ContinuationToken) -> Self {
        Self {
            records,
            continuation: Some(continuation),
        }
    }

    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}
