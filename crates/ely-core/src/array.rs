//! Observable arrays.
//!
//! [`ObservableArray<T>`] is an [`ObservableProperty`] holding a `Vec<T>`.
//! Every structural mutation emits the generic `change` event followed by a
//! specific event describing the mutation:
//!
//! | Operation | Events |
//! |-----------|--------|
//! | [`push`](ObservableArray::push) | `Change`, `Add { index, items }` |
//! | [`insert`](ObservableArray::insert) | `Change`, `Add { index, items }` |
//! | [`remove`](ObservableArray::remove) | `Change`, `Remove { index, item }` |
//! | [`pop`](ObservableArray::pop) | `Change`, `Remove { index, item }` |
//! | [`clear`](ObservableArray::clear) | `Change`, `Clear` |
//! | [`set_item`](ObservableArray::set_item) | `Change` |
//! | [`set`](ObservableArray::set) | `Change` |
//!
//! Only [`set`](ObservableArray::set) honours overwrite protection; the
//! item-level operations above always apply.

use std::fmt;
use std::sync::Arc;

use crate::logging::targets;
use crate::observer::{Event, EventKind, Observable, ObserverId};
use crate::property::{ChangeEvent, ObservableProperty};

/// Events emitted by an [`ObservableArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayEvent<T> {
    /// The array was mutated or replaced. `new` is the whole current array.
    Change {
        /// The array before the mutation.
        old: Option<Vec<T>>,
        /// The array after the mutation.
        new: Option<Vec<T>>,
    },
    /// Items were inserted starting at `index`.
    Add {
        /// Position of the first inserted item.
        index: usize,
        /// The inserted items, in order.
        items: Vec<T>,
    },
    /// The item at `index` was removed. `item` is `None` when the index was
    /// out of range and nothing was removed.
    Remove {
        /// The requested index.
        index: usize,
        /// The removed item.
        item: Option<T>,
    },
    /// The array was emptied.
    Clear,
}

impl<T: Send + 'static> Event for ArrayEvent<T> {
    fn kind(&self) -> EventKind {
        match self {
            Self::Change { .. } => EventKind::Change,
            Self::Add { .. } => EventKind::Add,
            Self::Remove { .. } => EventKind::Remove,
            Self::Clear => EventKind::Clear,
        }
    }
}

impl<T: Send + 'static> ChangeEvent<Vec<T>> for ArrayEvent<T> {
    fn change(old: Option<Vec<T>>, new: Option<Vec<T>>) -> Self {
        Self::Change { old, new }
    }

    fn as_change(&self) -> Option<(Option<&Vec<T>>, Option<&Vec<T>>)> {
        match self {
            Self::Change { old, new } => Some((old.as_ref(), new.as_ref())),
            _ => None,
        }
    }
}

/// An observable, ordered sequence.
///
/// # Example
///
/// ```
/// use ely_core::ObservableArray;
///
/// let list: ObservableArray<&str> = ObservableArray::new();
/// list.on_add(|index, items| println!("added {items:?} at {index}"));
///
/// list.push("a");
/// list.insert(0, ["b", "c"]);
/// assert_eq!(list.items(), vec!["b", "c", "a"]);
///
/// assert_eq!(list.remove(1), Some("c"));
/// assert_eq!(list.len(), 2);
/// ```
pub struct ObservableArray<T> {
    inner: ObservableProperty<Vec<T>, ArrayEvent<T>>,
}

impl<T: Clone + Send + 'static> ObservableArray<T> {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create an array holding `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: ObservableProperty::with_events(Some(items)),
        }
    }

    /// Apply `f` to the items and emit `Change` followed by `event(output)`.
    fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let (old, new, output) = self.inner.modify(f);
        self.inner.notify(ArrayEvent::change(Some(old), Some(new)));
        output
    }

    /// Append `item` to the end of the array.
    pub fn push(&self, item: T) -> &Self {
        let index = self.mutate(|items| {
            items.push(item.clone());
            items.len() - 1
        });
        tracing::trace!(target: targets::ARRAY, index, "item pushed");
        self.inner.notify(ArrayEvent::Add {
            index,
            items: vec![item],
        });
        self
    }

    /// Insert `items` before position `index`.
    ///
    /// An index past the end appends.
    pub fn insert<I>(&self, index: usize, items: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let index = self.mutate(|current| {
            let index = index.min(current.len());
            current.splice(index..index, items.iter().cloned());
            index
        });
        tracing::trace!(target: targets::ARRAY, index, count = items.len(), "items inserted");
        self.inner.notify(ArrayEvent::Add { index, items });
        self
    }

    /// Remove the item at `index` and return it.
    ///
    /// An out-of-range index removes nothing and returns `None`, but the
    /// `Change` and `Remove` events are still emitted (with `item: None`).
    pub fn remove(&self, index: usize) -> Option<T> {
        let item = self.mutate(|items| (index < items.len()).then(|| items.remove(index)));
        if item.is_none() {
            tracing::trace!(target: targets::ARRAY, index, len = self.len(), "remove past end");
        }
        self.inner.notify(ArrayEvent::Remove {
            index,
            item: item.clone(),
        });
        item
    }

    /// Remove the first occurrence of `item` and return it.
    ///
    /// If `item` is not in the array nothing is removed and no event is
    /// emitted.
    pub fn remove_item(&self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.index_of(item)?;
        self.remove(index)
    }

    /// Remove and return the last item, if any.
    pub fn pop(&self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.remove(len - 1)
    }

    /// Remove all items.
    ///
    /// Not subject to overwrite protection.
    pub fn clear(&self) -> &Self {
        self.mutate(Vec::clear);
        self.inner.notify(ArrayEvent::Clear);
        self
    }

    /// Replace the item at `index`.
    ///
    /// Emits only `Change`. Returns `false`, emitting nothing, if `index` is
    /// out of range.
    pub fn set_item(&self, index: usize, item: T) -> bool {
        if !self.has_index(index) {
            return false;
        }
        self.mutate(|items| {
            if let Some(slot) = items.get_mut(index) {
                *slot = item;
            }
        });
        true
    }

    /// Replace the whole array.
    ///
    /// Subject to overwrite protection; emits only `Change`.
    pub fn set(&self, items: Vec<T>) -> bool {
        self.inner.set(items)
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Option<T> {
        self.inner.with(|items| items.and_then(|items| items.get(index).cloned()))
    }

    /// The last item.
    pub fn last(&self) -> Option<T> {
        self.inner.with(|items| items.and_then(|items| items.last().cloned()))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.inner.with(|items| items.map_or(0, Vec::len))
    }

    /// Whether the array has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` is in range.
    pub fn has_index(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Position of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.inner
            .with(|items| items.and_then(|items| items.iter().position(|x| x == item)))
    }

    /// Whether the array contains `item`.
    pub fn has_item(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// A snapshot of the items.
    pub fn items(&self) -> Vec<T> {
        self.inner.get().unwrap_or_default()
    }

    /// Call `f` with each item and its index.
    ///
    /// `f` runs on a snapshot, so it may mutate the array.
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&T, usize),
    {
        for (index, item) in self.items().iter().enumerate() {
            f(item, index);
        }
        self
    }

    /// Turn overwrite protection on or off. See [`set`](Self::set).
    pub fn overwrite(&self, protected: bool) -> &Self {
        self.inner.overwrite(protected);
        self
    }

    /// Register a handler for `Add` events, called with `(index, items)`.
    pub fn on_add<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(usize, &[T]) + Send + Sync + 'static,
    {
        self.inner
            .add_observer(EventKind::Add, move |event: &ArrayEvent<T>| {
                if let ArrayEvent::Add { index, items } = event {
                    handler(*index, items);
                }
            })
    }

    /// Register a handler for `Remove` events, called with `(index, item)`.
    pub fn on_remove<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(usize, Option<&T>) + Send + Sync + 'static,
    {
        self.inner
            .add_observer(EventKind::Remove, move |event: &ArrayEvent<T>| {
                if let ArrayEvent::Remove { index, item } = event {
                    handler(*index, item.as_ref());
                }
            })
    }

    /// Register a handler for `Clear` events.
    pub fn on_clear<F>(&self, handler: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.add_observer(EventKind::Clear, move |_| handler())
    }

    /// Register a handler called with the whole current array after every
    /// change.
    pub fn on_change<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.inner
            .on_change(move |new, _| handler(new.map(Vec::as_slice).unwrap_or_default()))
    }

    /// Register a raw listener for `kind`.
    pub fn add_observer<F>(&self, kind: EventKind, listener: F) -> ObserverId
    where
        F: Fn(&ArrayEvent<T>) + Send + Sync + 'static,
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
    pub fn observable(&self) -> &Arc<Observable<ArrayEvent<T>>> {
        self.inner.observable()
    }

    /// The underlying property.
    pub fn property(&self) -> &ObservableProperty<Vec<T>, ArrayEvent<T>> {
        &self.inner
    }
}

impl<T: Clone + Send + 'static> Default for ObservableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> From<Vec<T>> for ObservableArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + Send + 'static> FromIterator<T> for ObservableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservableArray").field(&self.inner).finish()
    }
}

static_assertions::assert_impl_all!(ObservableArray<i32>: Send, Sync);
