//! History row memos
//!
//! Memos are keyed by the row's position in the history view as rendered,
//! not by entry id, so a memo stays with its index when the list changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from history view index to memo text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoMap {
    memos: BTreeMap<usize, String>,
}

impl MemoMap {
    /// Creates an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores prompt input for `index`
    ///
    /// `None` (cancelled) and empty input are ignored. Existing memos at the
    /// same index are overwritten. Returns whether a memo was stored.
    pub fn annotate(&mut self, index: usize, input: Option<String>) -> bool {
        match input {
            Some(text) if !text.is_empty() => {
                self.memos.insert(index, text);
                true
            }
            _ => false,
        }
    }

    /// Memo at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.memos.get(&index).map(String::as_str)
    }

    /// Number of memos
    #[must_use]
    pub fn len(&self) -> usize {
        self.memos.len()
    }

    /// Returns true if there are no memos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    /// Iterates `(index, memo)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.memos.iter().map(|(i, m)| (*i, m.as_str()))
    }

    /// Serializes to a JSON object with stringified index keys
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from a JSON object with stringified index keys
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
