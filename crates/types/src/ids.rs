//! Newtype wrapper for column identifiers
//!
//! Columns are addressed either by the data key used in keyed rows
//! (`"email"`) or, for array rows, by their position (`"5"`). Both end up as
//! the same string key so style maps can be written either way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The identity of a table column, used as the key of `columnStyles`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(Arc<str>);

impl ColumnKey {
    /// Creates a new ColumnKey from a data key
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Key for a column addressed by position.
    pub fn from_index(index: usize) -> Self {
        Self(index.to_string().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the positional index if this key is numeric.
    pub fn as_index(&self) -> Option<usize> {
        self.0.parse().ok()
    }
}

impl From<String> for ColumnKey {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<usize> for ColumnKey {
    fn from(index: usize) -> Self {
        Self::from_index(index)
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
