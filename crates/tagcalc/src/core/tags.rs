//! Tag list management

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free tag list
///
/// Starts with the all-history pseudo-tag followed by the default tag.
/// Adding a tag keeps the pseudo-tag first and appends the new tag last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Creates the default two-entry list
    #[must_use]
    pub fn with_defaults(all_history: &str, unclassified: &str) -> Self {
        Self {
            tags: vec![all_history.to_string(), unclassified.to_string()],
        }
    }

    /// Wraps a list loaded from storage as-is
    #[must_use]
    pub fn from_vec(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// Returns true if `tag` is present
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adds `tag`, keeping `all_history` first
    ///
    /// Empty and already-present tags are rejected and leave the list
    /// unchanged. Returns whether the tag was added.
    pub fn add(&mut self, tag: &str, all_history: &str) -> bool {
        if tag.is_empty() || self.contains(tag) {
            return false;
        }

        let mut tags = Vec::with_capacity(self.tags.len() + 2);
        tags.push(all_history.to_string());
        tags.extend(self.tags.iter().filter(|t| *t != all_history).cloned());
        tags.push(tag.to_string());
        self.tags = tags;
        true
    }

    /// Iterates tags in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Tags as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if there are no tags
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
