//! Key/value persistence for observable state.
//!
//! Values are stored as [`serde_json::Value`]. Any `Serialize` type can be
//! written through [`KeyValueStore::set`] and read back with
//! [`KeyValueStore::get`]; a stored value that does not decode as the
//! requested type reads as `None`.
//!
//! Stores are passed explicitly to whoever needs them. There is no global
//! default instance.
//!
//! ```
//! use ely_core::{KeyValueStore, MemoryStore, NamespacedStore};
//!
//! let store = NamespacedStore::new("editor", MemoryStore::new());
//! store.set("zoom", &1.5_f64).unwrap();
//!
//! assert_eq!(store.get::<f64>("zoom"), Some(1.5));
//! assert!(store.inner().contains("editor-zoom"));
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::logging::targets;

/// A string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    /// The raw value stored under `key`.
    fn get_raw(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Remove `key`. Returns whether it was present.
    fn remove_raw(&self, key: &str) -> bool;

    /// Whether `key` is present.
    fn contains(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// Decode the value under `key` as `T`.
    ///
    /// Returns `None` if the key is missing or the value does not decode.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.get_raw(key)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(target: targets::STORE, key, error = %err, "stored value did not decode");
                None
            }
        }
    }

    /// Decode the value under `key`, or return `fallback`.
    fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T
    where
        Self: Sized,
    {
        self.get(key).unwrap_or(fallback)
    }

    /// Encode `value` and store it under `key`.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_value(value).map_err(|source| StoreError::Serialize {
            key: key.to_owned(),
            source,
        })?;
        self.set_raw(key, raw)
    }
}

/// An in-process [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: Value) -> StoreResult<()> {
        crate::ely_trace!(key, "store write");
        self.data.write().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> bool {
        self.data.write().remove(key).is_some()
    }

    fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }
}

/// A view of another store that prefixes every key with `"{name}-"`.
///
/// Several components can share one backing store without their keys
/// colliding.
#[derive(Debug)]
pub struct NamespacedStore<S> {
    name: String,
    inner: S,
}

impl<S: KeyValueStore> NamespacedStore<S> {
    /// Wrap `inner` under the namespace `name`.
    pub fn new(name: impl Into<String>, inner: S) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// The namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap into the backing store.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}-{}", self.name, key)
    }
}

impl<S: KeyValueStore> KeyValueStore for NamespacedStore<S> {
    fn get_raw(&self, key: &str) -> Option<Value> {
        self.inner.get_raw(&self.full_key(key))
    }

    fn set_raw(&self, key: &str, value: Value) -> StoreResult<()> {
        self.inner.set_raw(&self.full_key(key), value)
    }

    fn remove_raw(&self, key: &str) -> bool {
        self.inner.remove_raw(&self.full_key(key))
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(&self.full_key(key))
    }
}

impl<S: KeyValueStore> KeyValueStore for std::sync::Arc<S> {
    fn get_raw(&self, key: &str) -> Option<Value> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: Value) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove_raw(&self, key: &str) -> bool {
        (**self).remove_raw(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

static_assertions::assert_impl_all!(MemoryStore: Send, Sync);
