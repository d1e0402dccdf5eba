//! Tagged calculation history
//!
//! Entries are kept most-recent-first and never edited after creation; the
//! only removal is clearing the whole list.

use serde::{Deserialize, Deserializer, Serialize};

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation timestamp (Unix epoch millis)
    pub id: u64,
    /// Formatted calculation, e.g. `"7 + 3 = 1,000"`
    pub calculation: String,
    /// Tag the entry was recorded under
    pub tag: String,
    /// Rounded result; non-finite values are stored as JSON `null`
    #[serde(deserialize_with = "result_or_zero")]
    pub result: f64,
}

/// A stored `null` result counts as zero once loaded
fn result_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl HistoryEntry {
    /// Creates a new history entry
    #[must_use]
    pub fn new(id: u64, calculation: impl Into<String>, tag: impl Into<String>, result: f64) -> Self {
        Self {
            id,
            calculation: calculation.into(),
            tag: tag.into(),
            result,
        }
    }

    /// Returns the row text shown in the history panel
    #[must_use]
    pub fn display(&self) -> String {
        format!("[{}] {}", self.tag, self.calculation)
    }
}

/// Calculation history, newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries as a slice, newest first
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Returns the entry at `index` (0 = newest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries whose tag equals `tag`, or all entries when `tag` is `None`
    #[must_use]
    pub fn filtered(&self, tag: Option<&str>) -> Vec<&HistoryEntry> {
        match tag {
            Some(tag) => self.entries.iter().filter(|e| e.tag == tag).collect(),
            None => self.entries.iter().collect(),
        }
    }

    /// Serializes the history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes history from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: u64, tag: &str, result: f64) -> HistoryEntry {
        HistoryEntry::new(id, format!("calc {id}"), tag, result)
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_display() {
        let e = HistoryEntry::new(1, "7 + 3 = 1,000", "shop", 1000.0);
        assert_eq!(e.display(), "[shop] 7 + 3 = 1,000");
    }

    #[test]
    fn test_history_entry_serialize_field_names() {
        let e = HistoryEntry::new(1700000000000, "7 + 3 = 1,000", "unselected", 1000.0);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"calculation":"7 + 3 = 1,000","tag":"unselected","result":1000.0}"#
        );
    }

    #[test]
    fn test_history_entry_deserialize_integer_result() {
        let json = r#"{"id":5,"calculation":"1 + 1 = 1,000","tag":"a","result":1000}"#;
        let e: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.result, 1000.0);
        assert_eq!(e.id, 5);
    }

    #[test]
    fn test_history_entry_null_result_loads_as_zero() {
        let e = HistoryEntry::new(2, "1 / 0 = Infinity", "a", f64::INFINITY);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains(r#""result":null"#));
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.result, 0.0);
        assert_eq!(back.calculation, "1 / 0 = Infinity");
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_history_record_prepends() {
        let mut history = History::new();
        history.record(entry(1, "a", 1000.0));
        history.record(entry(2, "b", 2000.0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().id, 2);
        assert_eq!(history.get(1).unwrap().id, 1);
    }

    #[test]
    fn test_history_iter_newest_first() {
        let mut history = History::new();
        for id in 1..=3 {
            history.record(entry(id, "a", 0.0));
        }
        let ids: Vec<u64> = history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_history_filtered() {
        let mut history = History::new();
        history.record(entry(1, "a", 0.0));
        history.record(entry(2, "b", 0.0));
        history.record(entry(3, "a", 0.0));

        let only_a: Vec<u64> = history.filtered(Some("a")).iter().map(|e| e.id).collect();
        assert_eq!(only_a, vec![3, 1]);
        assert_eq!(history.filtered(None).len(), 3);
        assert!(history.filtered(Some("missing")).is_empty());
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record(entry(1, "a", 0.0));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_json_keeps_order() {
        let mut history = History::new();
        history.record(entry(1, "a", 1000.0));
        history.record(entry(2, "b", 2000.0));

        let json = history.to_json().unwrap();
        let restored = History::from_json(&json).unwrap();
        assert_eq!(restored, history);
        assert_eq!(restored.latest().unwrap().id, 2);
    }

    #[test]
    fn test_history_from_json_invalid() {
        assert!(History::from_json("not json").is_err());
        assert!(History::from_json(r#"{"id": 1}"#).is_err());
    }
}
