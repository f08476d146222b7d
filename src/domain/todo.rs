use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTodoIdError {
    #[error("id must not be blank")]
    Blank,
    #[error("cannot parse id {0:?}")]
    Invalid(String),
}

/// Parses the textual id both front ends receive (path segment or positional
/// argument). Only non-negative integers that fit an `i64` are accepted.
impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() { return Err(ParseTodoIdError::Blank); }
        s.parse::<u64>()
            .ok()
            .and_then(|raw| i64::try_from(raw).ok())
            .map(TodoId)
            .ok_or_else(|| ParseTodoIdError::Invalid(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Partial edit of a stored todo. `None` keeps the stored value, `Some` replaces
/// it, so `Some(String::new())` clears a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool { self.title.is_none() && self.description.is_none() }

    pub fn apply(self, todo: &mut Todo) {
        if let Some(t) = self.title { todo.title = t; }
        if let Some(d) = self.description { todo.description = d; }
    }
}
