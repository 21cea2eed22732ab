//! Observable string-keyed dictionaries.
//!
//! [`ObservableDictionary<T>`] keeps its entries in insertion order (backed by
//! [`IndexMap`]) so that index-based access and iteration are stable.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::logging::{PerfSpan, targets};
use crate::observer::{Event, EventKind, Observable, ObserverId};
use crate::property::{ChangeEvent, ObservableProperty};

/// The map type held by an [`ObservableDictionary`].
pub type Entries<T> = IndexMap<String, T>;

/// Events emitted by an [`ObservableDictionary`].
#[derive(Clone, Debug, PartialEq)]
pub enum DictionaryEvent<T> {
    /// The dictionary was mutated or replaced.
    Change {
        /// Entries before the mutation.
        old: Option<Entries<T>>,
        /// Entries after the mutation.
        new: Option<Entries<T>>,
    },
    /// An entry was inserted or updated.
    NewItem {
        /// The entry key.
        key: String,
        /// The stored value.
        value: T,
    },
    /// An entry was removed.
    RemoveItem {
        /// The entry key.
        key: String,
        /// The value that was removed.
        value: T,
    },
}

impl<T: Send + 'static> Event for DictionaryEvent<T> {
    fn kind(&self) -> EventKind {
        match self {
            Self::Change { .. } => EventKind::Change,
            Self::NewItem { .. } => EventKind::NewItem,
            Self::RemoveItem { .. } => EventKind::RemoveItem,
        }
    }
}

impl<T: Send + 'static> ChangeEvent<Entries<T>> for DictionaryEvent<T> {
    fn change(old: Option<Entries<T>>, new: Option<Entries<T>>) -> Self {
        Self::Change { old, new }
    }

    fn as_change(&self) -> Option<(Option<&Entries<T>>, Option<&Entries<T>>)> {
        match self {
            Self::Change { old, new } => Some((old.as_ref(), new.as_ref())),
            _ => None,
        }
    }
}

/// An observable, insertion-ordered map from `String` keys to `T`.
///
/// # Example
///
/// ```
/// use ely_core::ObservableDictionary;
///
/// let scores = ObservableDictionary::new();
/// scores.on_new_item(|key, value: &u32| println!("{key} = {value}"));
///
/// scores.add("alice", 3).add("bob", 5);
/// assert_eq!(scores.item("bob"), Some(5));
/// assert_eq!(scores.key_of(&3).as_deref(), Some("alice"));
///
/// assert!(scores.remove("alice"));
/// assert!(!scores.remove("alice"));
/// assert_eq!(scores.count(), 1);
/// ```
pub struct ObservableDictionary<T> {
    inner: ObservableProperty<Entries<T>, DictionaryEvent<T>>,
}

impl<T: Clone + Send + 'static> ObservableDictionary<T> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::from_entries(IndexMap::new())
    }

    /// Create a dictionary holding `entries`.
    pub fn from_entries(entries: Entries<T>) -> Self {
        Self {
            inner: ObservableProperty::with_events(Some(entries)),
        }
    }

    /// Insert or update `key`.
    ///
    /// An existing key keeps its position. Emits `Change` then `NewItem`.
    pub fn add(&self, key: impl Into<String>, value: T) -> &Self {
        let key = key.into();
        let (old, new, _) = self.inner.modify(|entries| {
            entries.insert(key.clone(), value.clone());
        });
        tracing::trace!(target: targets::DICTIONARY, key = %key, "entry added");
        self.inner.notify(DictionaryEvent::change(Some(old), Some(new)));
        self.inner.notify(DictionaryEvent::NewItem { key, value });
        self
    }

    /// Remove `key`.
    ///
    /// Returns `true` and emits `Change` then `RemoveItem` if the key was
    /// present. A missing key emits nothing and returns `false`.
    pub fn remove(&self, key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        let (old, new, removed) = self.inner.modify(|entries| entries.shift_remove(key));
        let Some(value) = removed else {
            return false;
        };
        tracing::trace!(target: targets::DICTIONARY, key, "entry removed");
        self.inner.notify(DictionaryEvent::change(Some(old), Some(new)));
        self.inner.notify(DictionaryEvent::RemoveItem {
            key: key.to_owned(),
            value,
        });
        true
    }

    /// Remove all entries.
    ///
    /// This replaces the whole map through [`set`](Self::set), so it emits
    /// only `Change` and is blocked by overwrite protection.
    pub fn clear(&self) -> bool {
        self.set(IndexMap::new())
    }

    /// Replace all entries. Subject to overwrite protection.
    pub fn set(&self, entries: Entries<T>) -> bool {
        self.inner.set(entries)
    }

    /// The value stored under `key`.
    pub fn item(&self, key: &str) -> Option<T> {
        self.inner
            .with(|entries| entries.and_then(|entries| entries.get(key).cloned()))
    }

    /// The entry at insertion position `index`.
    pub fn item_by_index(&self, index: usize) -> Option<(String, T)> {
        self.inner.with(|entries| {
            entries
                .and_then(|entries| entries.get_index(index))
                .map(|(key, value)| (key.clone(), value.clone()))
        })
    }

    /// The first key whose value equals `value`.
    pub fn key_of(&self, value: &T) -> Option<String>
    where
        T: PartialEq,
    {
        self.inner.with(|entries| {
            for (key, candidate) in entries? {
                if candidate == value {
                    return Some(key.clone());
                }
            }
            None
        })
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .with(|entries| entries.is_some_and(|entries| entries.contains_key(key)))
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.inner.with(|entries| entries.map_or(0, IndexMap::len))
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.with(|entries| {
            entries
                .map(|entries| entries.keys().cloned().collect())
                .unwrap_or_default()
        })
    }

    /// A snapshot of the entries.
    pub fn entries(&self) -> Entries<T> {
        self.inner.get().unwrap_or_default()
    }

    /// Call `f` with each value and key in insertion order.
    ///
    /// `f` runs on a snapshot, so it may mutate the dictionary.
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&T, &str),
    {
        for (key, value) in &self.entries() {
            f(value, key);
        }
        self
    }

    /// A new dictionary with the same entries ordered by key.
    pub fn sorted(&self) -> Self {
        self.sorted_by(|a, b| a.cmp(b))
    }

    /// A new dictionary with the same entries ordered by `compare` on keys.
    ///
    /// The receiver is left untouched and no events are emitted. Listeners
    /// are not carried over.
    pub fn sorted_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let _span = PerfSpan::new("dictionary_sort");
        let mut entries = self.entries();
        entries.sort_by(|a, _, b, _| compare(a, b));
        Self::from_entries(entries)
    }

    /// Turn overwrite protection on or off.
    pub fn overwrite(&self, protected: bool) -> &Self {
        self.inner.overwrite(protected);
        self
    }

    /// Register a handler for `NewItem` events, called with `(key, value)`.
    pub fn on_new_item<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(&str, &T) + Send + Sync + 'static,
    {
        self.inner
            .add_observer(EventKind::NewItem, move |event: &DictionaryEvent<T>| {
                if let DictionaryEvent::NewItem { key, value } = event {
                    handler(key, value);
                }
            })
    }

    /// Register a handler for `RemoveItem` events, called with `(key, value)`.
    pub fn on_remove_item<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(&str, &T) + Send + Sync + 'static,
    {
        self.inner
            .add_observer(EventKind::RemoveItem, move |event: &DictionaryEvent<T>| {
                if let DictionaryEvent::RemoveItem { key, value } = event {
                    handler(key, value);
                }
            })
    }

    /// Register a `(new, old)` handler for `Change` events.
    pub fn on_change<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(Option<&Entries<T>>, Option<&Entries<T>>) + Send + Sync + 'static,
    {
        self.inner.on_change(handler)
    }

    /// Register a raw listener for `kind`.
    pub fn add_observer<F>(&self, kind: EventKind, listener: F) -> ObserverId
    where
        F: Fn(&DictionaryEvent<T>) + Send + Sync + 'static,
    {
        self.inner.add_observer(kind, listener)
    }

    /// Remove a listener previously registered for `kind`.
    pub fn remove_observer(&self, kind: EventKind, id: ObserverId) -> bool {
        self.inner.remove_observer(kind, id)
    }

    /// Remove every listener of `kind`, or all listeners when `None`.
    pub fn remove_all_observers(&self, kind: Option<EventKind>) {
        self.inner.remove_all_observers(kind);
    }

    /// The underlying dispatcher.
    pub fn observable(&self) -> &Arc<Observable<DictionaryEvent<T>>> {
        self.inner.observable()
    }
}

impl<T: Clone + Send + 'static> Default for ObservableDictionary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, T: Clone + Send + 'static> FromIterator<(K, T)> for ObservableDictionary<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableDictionary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservableDictionary").field(&self.inner).finish()
    }
}

static_assertions::assert_impl_all!(ObservableDictionary<String>: Send, Sync);
