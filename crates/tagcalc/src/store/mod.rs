//! Persistence for history, tags and memos
//!
//! A [`KeyValueStore`] backend holds string blobs by key. [`StateStore`]
//! layers typed load/save for the three widget slots on top and notifies
//! subscribers after every successful write or removal.

mod file;
#[cfg(feature = "wasm")]
mod local;
mod memory;

pub use file::FileStore;
#[cfg(feature = "wasm")]
pub use local::LocalStorageStore;
pub use memory::MemoryStore;

use crate::config::StorageKeys;
use crate::core::{History, MemoMap, TagSet};
use crate::error::StoreResult;
use std::fmt;

/// String-keyed blob storage
pub trait KeyValueStore {
    /// Reads the blob under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the blob under `key`; removing a missing key succeeds
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// One of the three persisted pieces of widget state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Calculation history
    History,
    /// Tag list
    Tags,
    /// History memos
    Memos,
}

/// What happened to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new value was written
    Written,
    /// The stored value was removed
    Removed,
}

/// Notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    /// Slot that changed
    pub slot: Slot,
    /// Kind of change
    pub kind: ChangeKind,
}

/// Handle returned by [`StateStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange)>;

/// Typed store for the widget's persisted state
pub struct StateStore<B> {
    backend: B,
    keys: StorageKeys,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<B: fmt::Debug> fmt::Debug for StateStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("backend", &self.backend)
            .field("keys", &self.keys)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<B: KeyValueStore> StateStore<B> {
    /// Wraps `backend` using `keys` for the three slots
    #[must_use]
    pub fn new(backend: B, keys: StorageKeys) -> Self {
        Self {
            backend,
            keys,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Storage key for `slot`
    #[must_use]
    pub fn key(&self, slot: Slot) -> &str {
        match slot {
            Slot::History => &self.keys.history,
            Slot::Tags => &self.keys.tags,
            Slot::Memos => &self.keys.memos,
        }
    }

    /// Underlying backend
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the store, returning the backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Loads the stored history, `None` if nothing is stored
    pub fn load_history(&self) -> StoreResult<Option<History>> {
        self.read_slot(Slot::History)?
            .map(|json| History::from_json(&json).map_err(Into::into))
            .transpose()
    }

    /// Loads the stored tag list, `None` if nothing is stored
    pub fn load_tags(&self) -> StoreResult<Option<TagSet>> {
        self.read_slot(Slot::Tags)?
            .map(|json| serde_json::from_str(&json).map_err(Into::into))
            .transpose()
    }

    /// Loads the stored memos, `None` if nothing is stored
    pub fn load_memos(&self) -> StoreResult<Option<MemoMap>> {
        self.read_slot(Slot::Memos)?
            .map(|json| MemoMap::from_json(&json).map_err(Into::into))
            .transpose()
    }

    /// Writes the history
    pub fn save_history(&mut self, history: &History) -> StoreResult<()> {
        let json = history.to_json()?;
        self.write_slot(Slot::History, &json)
    }

    /// Writes the tag list
    pub fn save_tags(&mut self, tags: &TagSet) -> StoreResult<()> {
        let json = serde_json::to_string(tags)?;
        self.write_slot(Slot::Tags, &json)
    }

    /// Writes the memos
    pub fn save_memos(&mut self, memos: &MemoMap) -> StoreResult<()> {
        let json = memos.to_json()?;
        self.write_slot(Slot::Memos, &json)
    }

    /// Removes the stored value for `slot`
    pub fn remove(&mut self, slot: Slot) -> StoreResult<()> {
        let key = self.key(slot).to_string();
        self.backend.remove(&key)?;
        self.notify(StoreChange {
            slot,
            kind: ChangeKind::Removed,
        });
        Ok(())
    }

    /// Registers a listener for every successful write or removal
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener; returns false if `id` was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// An empty stored value reads as absent
    fn read_slot(&self, slot: Slot) -> StoreResult<Option<String>> {
        Ok(self
            .backend
            .get(self.key(slot))?
            .filter(|json| !json.is_empty()))
    }

    fn write_slot(&mut self, slot: Slot, json: &str) -> StoreResult<()> {
        let key = self.key(slot).to_string();
        self.backend.set(&key, json)?;
        self.notify(StoreChange {
            slot,
            kind: ChangeKind::Written,
        });
        Ok(())
    }

    fn notify(&mut self, change: StoreChange) {
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::HistoryEntry;
    use crate::error::StoreError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> StateStore<MemoryStore> {
        StateStore::new(MemoryStore::new(), StorageKeys::default())
    }

    /// Backend whose writes always fail
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::backend("read-only"))
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Err(StoreError::backend("read-only"))
        }
    }

    #[test]
    fn test_empty_store_loads_none() {
        let store = store();
        assert!(store.load_history().unwrap().is_none());
        assert!(store.load_tags().unwrap().is_none());
        assert!(store.load_memos().unwrap().is_none());
    }

    #[test]
    fn test_save_uses_configured_keys() {
        let mut store = store();
        let mut history = History::new();
        history.record(HistoryEntry::new(1, "7 + 3 = 1,000", "a", 1000.0));
        store.save_history(&history).unwrap();
        store
            .save_tags(&TagSet::with_defaults("all-history", "unclassified"))
            .unwrap();

        let backend = store.backend();
        assert!(backend.get("calculatorHistory").unwrap().is_some());
        assert_eq!(
            backend.get("calculatorTags").unwrap().as_deref(),
            Some(r#"["all-history","unclassified"]"#)
        );
        assert_eq!(store.load_history().unwrap(), Some(history));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut backend = MemoryStore::new();
        backend.set("calculatorTags", "{not a list").unwrap();
        let store = StateStore::new(backend, StorageKeys::default());
        assert!(matches!(store.load_tags(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_empty_value_loads_none() {
        let mut backend = MemoryStore::new();
        backend.set("calculatorHistory", "").unwrap();
        backend.set("calculatorTags", "").unwrap();
        backend.set("calculatorHistoryMemos", "").unwrap();
        let store = StateStore::new(backend, StorageKeys::default());
        assert!(store.load_history().unwrap().is_none());
        assert!(store.load_tags().unwrap().is_none());
        assert!(store.load_memos().unwrap().is_none());
    }

    #[test]
    fn test_subscribe_sees_writes_and_removals() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |change| sink.borrow_mut().push(*change));

        store.save_memos(&MemoMap::new()).unwrap();
        store.remove(Slot::History).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                StoreChange {
                    slot: Slot::Memos,
                    kind: ChangeKind::Written
                },
                StoreChange {
                    slot: Slot::History,
                    kind: ChangeKind::Removed
                },
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.save_memos(&MemoMap::new()).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.save_memos(&MemoMap::new()).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_failed_write_does_not_notify() {
        let mut store = StateStore::new(ReadOnlyStore, StorageKeys::default());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(store.save_memos(&MemoMap::new()).is_err());
        assert!(store.remove(Slot::Tags).is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_debug_hides_listeners() {
        let mut store = store();
        store.subscribe(|_| {});
        let debug = format!("{store:?}");
        assert!(debug.contains("listeners: 1"));
    }
}
