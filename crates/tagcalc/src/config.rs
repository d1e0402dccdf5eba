//! Widget configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed tag labels used by the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagLabels {
    /// Pseudo-tag meaning "do not filter"; always first in the tag list
    pub all_history: String,
    /// Default classification tag
    pub unclassified: String,
    /// Tag recorded on entries made while no tag is current
    pub unselected: String,
}

impl Default for TagLabels {
    fn default() -> Self {
        Self {
            all_history: "all-history".to_string(),
            unclassified: "unclassified".to_string(),
            unselected: "unselected".to_string(),
        }
    }
}

/// Storage keys for the three persisted blobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// History list key
    pub history: String,
    /// Tag list key
    pub tags: String,
    /// Memo map key
    pub memos: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            history: "calculatorHistory".to_string(),
            tags: "calculatorTags".to_string(),
            memos: "calculatorHistoryMemos".to_string(),
        }
    }
}

/// Calculator widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Tag labels
    pub labels: TagLabels,
    /// Message shown when asking for a memo
    pub memo_prompt: String,
    /// Storage keys
    pub storage_keys: StorageKeys,
    /// Two clear presses closer than this are a double-clear
    pub double_clear_window_ms: u64,
    /// Results are rounded up to a multiple of this step
    pub rounding_step: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            labels: TagLabels::default(),
            memo_prompt: "Enter a memo:".to_string(),
            storage_keys: StorageKeys::default(),
            double_clear_window_ms: Self::DEFAULT_DOUBLE_CLEAR_WINDOW_MS,
            rounding_step: Self::DEFAULT_ROUNDING_STEP,
        }
    }
}

impl WidgetConfig {
    /// Default double-clear window in milliseconds
    pub const DEFAULT_DOUBLE_CLEAR_WINDOW_MS: u64 = 300;

    /// Default rounding step
    pub const DEFAULT_ROUNDING_STEP: f64 = 1000.0;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set tag labels
    #[must_use]
    pub fn with_labels(mut self, labels: TagLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set storage keys
    #[must_use]
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Set the memo prompt message
    #[must_use]
    pub fn with_memo_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.memo_prompt = prompt.into();
        self
    }

    /// Set the double-clear window
    #[must_use]
    pub const fn with_double_clear_window_ms(mut self, window_ms: u64) -> Self {
        self.double_clear_window_ms = window_ms;
        self
    }

    /// Set the rounding step
    #[must_use]
    pub const fn with_rounding_step(mut self, step: f64) -> Self {
        self.rounding_step = step;
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rounding_step.is_finite() && self.rounding_step > 0.0) {
            return Err(ConfigError::invalid(format!(
                "rounding_step must be a positive finite number, got {}",
                self.rounding_step
            )));
        }

        let labels = &self.labels;
        if labels.all_history.is_empty()
            || labels.unclassified.is_empty()
            || labels.unselected.is_empty()
        {
            return Err(ConfigError::invalid("tag labels must not be empty"));
        }
        if labels.all_history == labels.unclassified {
            return Err(ConfigError::invalid(
                "all_history and unclassified labels must differ",
            ));
        }

        let keys = &self.storage_keys;
        if keys.history.is_empty() || keys.tags.is_empty() || keys.memos.is_empty() {
            return Err(ConfigError::invalid("storage keys must not be empty"));
        }
        if keys.history == keys.tags || keys.history == keys.memos || keys.tags == keys.memos {
            return Err(ConfigError::invalid("storage keys must be distinct"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.double_clear_window_ms, 300);
        assert_eq!(config.rounding_step, 1000.0);
        assert_eq!(config.labels.all_history, "all-history");
        assert_eq!(config.storage_keys.history, "calculatorHistory");
        assert_eq!(config.storage_keys.memos, "calculatorHistoryMemos");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WidgetConfig::from_json_str(
            r#"{"labels": {"unselected": "none"}, "double_clear_window_ms": 250}"#,
        )
        .unwrap();
        assert_eq!(config.labels.unselected, "none");
        assert_eq!(config.labels.all_history, "all-history");
        assert_eq!(config.double_clear_window_ms, 250);
        assert_eq!(config.rounding_step, 1000.0);
    }

    #[test]
    fn test_invalid_json() {
        let err = WidgetConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_rounding_step() {
        let err = WidgetConfig::from_json_str(r#"{"rounding_step": 0}"#).unwrap_err();
        assert!(err.to_string().contains("rounding_step"));
    }

    #[test]
    fn test_rejects_duplicate_storage_keys() {
        let config = WidgetConfig::new().with_storage_keys(StorageKeys {
            history: "same".into(),
            tags: "same".into(),
            memos: "memos".into(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_colliding_labels() {
        let config = WidgetConfig::new().with_labels(TagLabels {
            all_history: "x".into(),
            unclassified: "x".into(),
            unselected: "y".into(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_setters() {
        let config = WidgetConfig::new()
            .with_double_clear_window_ms(500)
            .with_rounding_step(100.0)
            .with_memo_prompt("Note?");
        assert_eq!(config.double_clear_window_ms, 500);
        assert_eq!(config.rounding_step, 100.0);
        assert_eq!(config.memo_prompt, "Note?");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagcalc.json");
        std::fs::write(&path, r#"{"memo_prompt": "Memo please"}"#).unwrap();
        let config = WidgetConfig::from_json_file(&path).unwrap();
        assert_eq!(config.memo_prompt, "Memo please");
    }

    #[test]
    fn test_from_missing_file() {
        let err = WidgetConfig::from_json_file(Path::new("/nonexistent/tagcalc.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
