//! Observable properties for ely.
//!
//! An [`ObservableProperty`] is a single mutable slot that broadcasts a
//! `change` event on every accepted write. It is the base of the container
//! types in this crate ([`ObservableArray`](crate::ObservableArray),
//! [`ObservableDictionary`](crate::ObservableDictionary),
//! [`ObservableBoolean`](crate::ObservableBoolean)).
//!
//! # Write Semantics
//!
//! - Every accepted [`set`](ObservableProperty::set) emits
//!   [`PropertyEvent::Change`], including when the new value equals the old
//!   one. There is no deduplication.
//! - While overwrite protection is on ([`overwrite(true)`](ObservableProperty::overwrite)),
//!   `set` is a silent no-op: nothing is stored and nothing is emitted.
//! - Listeners run synchronously after the value has been stored, so a
//!   listener reading the property sees the new value. A listener may call
//!   `set` on the property it observes; the nested write is dispatched
//!   before the outer `set` returns.
//!
//! # Example
//!
//! ```
//! use ely_core::ObservableProperty;
//!
//! let name = ObservableProperty::with_value("Tom".to_string());
//! name.on_change(|new, old| {
//!     println!("{:?} -> {:?}", old, new);
//! });
//!
//! name.set("John".to_string());
//! assert_eq!(name.get().as_deref(), Some("John"));
//!
//! // Lock the value
//! name.overwrite(true);
//! assert!(!name.set("Anna".to_string()));
//! assert_eq!(name.get_or(String::new()), "John");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::logging::targets;
use crate::observer::{Event, EventKind, Observable, ObserverId};

/// An event type that can report a whole-value change.
///
/// Every observable built on [`ObservableProperty`] emits a change event when
/// its value is replaced. Container types use richer event enums and
/// implement this trait for their `Change` variant.
pub trait ChangeEvent<T>: Event {
    /// Build the change event for a write from `old` to `new`.
    fn change(old: Option<T>, new: Option<T>) -> Self;

    /// The `(old, new)` pair if this is a change event.
    fn as_change(&self) -> Option<(Option<&T>, Option<&T>)>;
}

/// The event emitted by a plain [`ObservableProperty`].
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyEvent<T> {
    /// The value was written.
    Change {
        /// The value before the write.
        old: Option<T>,
        /// The value after the write.
        new: Option<T>,
    },
}

impl<T: Send + 'static> Event for PropertyEvent<T> {
    fn kind(&self) -> EventKind {
        EventKind::Change
    }
}

impl<T: Send + 'static> ChangeEvent<T> for PropertyEvent<T> {
    fn change(old: Option<T>, new: Option<T>) -> Self {
        Self::Change { old, new }
    }

    fn as_change(&self) -> Option<(Option<&T>, Option<&T>)> {
        let Self::Change { old, new } = self;
        Some((old.as_ref(), new.as_ref()))
    }
}

/// A value slot that notifies listeners on every write.
///
/// `ObservableProperty<T, E>` stores an `Option<T>` (`None` is the empty
/// value) and dispatches events of type `E` through an [`Observable`]. Plain
/// properties use the default [`PropertyEvent<T>`].
///
/// # Thread Safety
///
/// The value is held in a `parking_lot::RwLock`; the property is
/// `Send + Sync` when `T` is. Locks are never held while listeners run.
pub struct ObservableProperty<T, E = PropertyEvent<T>> {
    value: RwLock<Option<T>>,
    overwrite_protected: AtomicBool,
    observable: Arc<Observable<E>>,
}

impl<T: Clone + Send + 'static> ObservableProperty<T> {
    /// Create a property with an optional default value.
    pub fn new(default: Option<T>) -> Self {
        Self::with_events(default)
    }

    /// Create a property holding `value`.
    pub fn with_value(value: T) -> Self {
        Self::with_events(Some(value))
    }
}

impl<T: Clone + Send + 'static, E: ChangeEvent<T>> ObservableProperty<T, E> {
    /// Create a property that dispatches a custom event type.
    ///
    /// This is how container types reuse the property machinery with their
    /// own event enum.
    pub fn with_events(default: Option<T>) -> Self {
        Self {
            value: RwLock::new(default),
            overwrite_protected: AtomicBool::new(false),
            observable: Arc::new(Observable::new()),
        }
    }

    /// Get the current value, or `None` if empty.
    pub fn get(&self) -> Option<T> {
        self.value.read().clone()
    }

    /// Get the current value, or `fallback` if empty.
    ///
    /// This never returns an empty value.
    pub fn get_or(&self, fallback: T) -> T {
        self.value.read().clone().unwrap_or(fallback)
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        f(self.value.read().as_ref())
    }

    /// Whether the property is empty.
    pub fn is_null(&self) -> bool {
        self.value.read().is_none()
    }

    /// Turn overwrite protection on or off.
    ///
    /// While protected, [`set`](Self::set) and [`unset`](Self::unset) are
    /// silent no-ops.
    pub fn overwrite(&self, protected: bool) -> &Self {
        self.overwrite_protected.store(protected, Ordering::SeqCst);
        self
    }

    /// Whether overwrite protection is on.
    pub fn is_overwrite_protected(&self) -> bool {
        self.overwrite_protected.load(Ordering::SeqCst)
    }

    /// Store `value` and emit a change event.
    ///
    /// Returns `false` without storing or emitting anything when the
    /// property is overwrite protected. The change event is emitted even if
    /// `value` equals the current value.
    pub fn set(&self, value: T) -> bool {
        self.store(Some(value))
    }

    /// Empty the property and emit a change event.
    ///
    /// Subject to overwrite protection like [`set`](Self::set).
    pub fn unset(&self) -> bool {
        self.store(None)
    }

    fn store(&self, value: Option<T>) -> bool {
        if self.is_overwrite_protected() {
            tracing::trace!(target: targets::PROPERTY, "write blocked by overwrite protection");
            return false;
        }

        let old = std::mem::replace(&mut *self.value.write(), value.clone());
        tracing::trace!(
            target: targets::PROPERTY,
            was_null = old.is_none(),
            is_null = value.is_none(),
            "property written"
        );
        self.observable.notify(E::change(old, value));
        true
    }

    /// Mutate the stored value in place, bypassing overwrite protection.
    ///
    /// An empty value is replaced by `T::default()` first. Returns the value
    /// before and after the mutation together with the closure's output. No
    /// event is emitted; the caller is responsible for notifying.
    pub(crate) fn modify<F, R>(&self, f: F) -> (T, T, R)
    where
        T: Default,
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.value.write();
        let current = guard.get_or_insert_with(T::default);
        let old = current.clone();
        let output = f(current);
        let new = current.clone();
        (old, new, output)
    }

    /// Register a handler called with `(new, old)` after every write.
    ///
    /// Note the argument order is the reverse of the
    /// [`PropertyEvent::Change`] field order.
    pub fn on_change<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(Option<&T>, Option<&T>) + Send + Sync + 'static,
    {
        self.observable.add_observer(EventKind::Change, move |event: &E| {
            if let Some((old, new)) = event.as_change() {
                handler(new, old);
            }
        })
    }

    /// Register a raw listener for `kind`.
    pub fn add_observer<F>(&self, kind: EventKind, listener: F) -> ObserverId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.observable.add_observer(kind, listener)
    }

    /// Remove a listener previously registered for `kind`.
    pub fn remove_observer(&self, kind: EventKind, id: ObserverId) -> bool {
        self.observable.remove_observer(kind, id)
    }

    /// Remove every listener of `kind`, or all listeners when `None`.
    pub fn remove_all_observers(&self, kind: Option<EventKind>) {
        self.observable.remove_all_observers(kind);
    }

    /// Dispatch `event` to the property's listeners.
    pub fn notify(&self, event: E) {
        self.observable.notify(event);
    }

    /// The underlying dispatcher.
    pub fn observable(&self) -> &Arc<Observable<E>> {
        &self.observable
    }
}

impl<T: Clone + Send + 'static, E: ChangeEvent<T>> Clone for ObservableProperty<T, E> {
    /// Copies the value and protection flag. Listeners are not copied.
    fn clone(&self) -> Self {
        let clone = Self::with_events(self.get());
        clone.overwrite(self.is_overwrite_protected());
        clone
    }
}

impl<T: Clone + Send + 'static, E: ChangeEvent<T>> Default for ObservableProperty<T, E> {
    fn default() -> Self {
        Self::with_events(None)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for ObservableProperty<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("value", &*self.value.read())
            .field(
                "overwrite_protected",
                &self.overwrite_protected.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl<T: fmt::Display, E> fmt::Display for ObservableProperty<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.value.read() {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}

/// A read-only view of a property.
///
/// This provides read access and listener registration without the ability
/// to write. Useful for exposing a property publicly while keeping the
/// setter private.
pub struct ReadOnlyProperty<'a, T, E = PropertyEvent<T>> {
    inner: &'a ObservableProperty<T, E>,
}

impl<'a, T: Clone + Send + 'static, E: ChangeEvent<T>> ReadOnlyProperty<'a, T, E> {
    /// Create a read-only view of a property.
    pub fn new(property: &'a ObservableProperty<T, E>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> Option<T> {
        self.inner.get()
    }

    /// Get the current value, or `fallback` if empty.
    pub fn get_or(&self, fallback: T) -> T {
        self.inner.get_or(fallback)
    }

    /// Access the value through a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        self.inner.with(f)
    }

    /// Register a `(new, old)` change handler.
    pub fn on_change<F>(&self, handler: F) -> ObserverId
    where
        F: Fn(Option<&T>, Option<&T>) + Send + Sync + 'static,
    {
        self.inner.on_change(handler)
    }
}

/// A helper trait for wrapping plain values in an observable property.
pub trait IntoObservable<T> {
    /// Convert this value into an [`ObservableProperty`].
    fn into_observable(self) -> ObservableProperty<T>;
}

impl<T: Clone + Send + 'static> IntoObservable<T> for T {
    fn into_observable(self) -> ObservableProperty<T> {
        ObservableProperty::with_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn record_changes<T: Clone + Send + Sync + 'static>(
        prop: &ObservableProperty<T>,
    ) -> Arc<Mutex<Vec<(Option<T>, Option<T>)>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        prop.add_observer(EventKind::Change, move |event: &PropertyEvent<T>| {
            let PropertyEvent::Change { old, new } = event;
            log_clone.lock().push((old.clone(), new.clone()));
        });
        log
    }

    #[test]
    fn test_property_basic() {
        let prop = ObservableProperty::with_value(42);
        assert_eq!(prop.get(), Some(42));
        assert!(!prop.is_null());
    }

    #[test]
    fn test_property_default_is_null() {
        let prop: ObservableProperty<String> = ObservableProperty::default();
        assert!(prop.is_null());
        assert_eq!(prop.get(), None);
        assert_eq!(prop.get_or("fallback".to_string()), "fallback");
    }

    #[test]
    fn test_set_emits_old_and_new() {
        let prop = ObservableProperty::new(Some(1));
        let log = record_changes(&prop);

        assert!(prop.set(2));
        assert_eq!(*log.lock(), vec![(Some(1), Some(2))]);
        assert_eq!(prop.get(), Some(2));
    }

    #[test]
    fn test_set_same_value_emits_every_time() {
        let prop = ObservableProperty::with_value("a".to_string());
        let log = record_changes(&prop);

        prop.set("b".to_string());
        prop.set("b".to_string());

        let log = log.lock();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1], (Some("b".to_string()), Some("b".to_string())));

        let prop = ObservableProperty::with_value(7);
        let log = record_changes(&prop);
        prop.set(7);
        prop.set(7);
        assert_eq!(*log.lock(), vec![(Some(7), Some(7)), (Some(7), Some(7))]);
    }

    #[test]
    fn test_overwrite_protection_blocks_set() {
        let prop = ObservableProperty::with_value("Tom".to_string());
        let log = record_changes(&prop);

        prop.overwrite(true);
        assert!(prop.is_overwrite_protected());
        assert!(!prop.set("x".to_string()));
        assert!(!prop.unset());

        assert_eq!(prop.get().as_deref(), Some("Tom"));
        assert!(log.lock().is_empty());

        prop.overwrite(false);
        assert!(prop.set("John".to_string()));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_unset_emits_change_to_null() {
        let prop = ObservableProperty::with_value(5);
        let log = record_changes(&prop);

        assert!(prop.unset());
        assert!(prop.is_null());
        assert_eq!(*log.lock(), vec![(Some(5), None)]);
    }

    #[test]
    fn test_on_change_receives_new_then_old() {
        let prop = ObservableProperty::with_value(1);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        prop.on_change(move |new, old| {
            seen_clone.lock().push((new.copied(), old.copied()));
        });

        prop.set(2);
        prop.set(3);
        assert_eq!(*seen.lock(), vec![(Some(2), Some(1)), (Some(3), Some(2))]);
    }

    #[test]
    fn test_listener_sees_stored_value() {
        let prop = Arc::new(ObservableProperty::with_value(0));
        let observed = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&prop);
        let observed_clone = observed.clone();
        prop.on_change(move |_, _| {
            if let Some(prop) = weak.upgrade() {
                *observed_clone.lock() = prop.get();
            }
        });

        prop.set(9);
        assert_eq!(*observed.lock(), Some(9));
    }

    #[test]
    fn test_reentrant_set_from_listener() {
        let prop = Arc::new(ObservableProperty::with_value(0));
        let calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&prop);
        let calls_clone = calls.clone();
        prop.on_change(move |new, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let (Some(&value), Some(prop)) = (new, weak.upgrade()) {
                if value < 5 {
                    prop.set(value + 1);
                }
            }
        });

        prop.set(1);
        assert_eq!(prop.get(), Some(5));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_remove_observer() {
        let prop = ObservableProperty::with_value(0);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        let id = prop.on_change(move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        prop.set(1);
        assert!(prop.remove_observer(EventKind::Change, id));
        prop.set(2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_closure() {
        let prop = ObservableProperty::with_value(vec![1, 2, 3]);
        let sum: i32 = prop.with(|v| v.map_or(0, |v| v.iter().sum()));
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_display() {
        let prop = ObservableProperty::with_value(12);
        assert_eq!(prop.to_string(), "12");
        prop.unset();
        assert_eq!(prop.to_string(), "null");
    }

    #[test]
    fn test_clone_copies_value_not_listeners() {
        let prop = ObservableProperty::with_value(3);
        prop.on_change(|_, _| {});
        prop.overwrite(true);

        let clone = prop.clone();
        assert_eq!(clone.get(), Some(3));
        assert!(clone.is_overwrite_protected());
        assert_eq!(clone.observable().total_observer_count(), 0);
    }

    #[test]
    fn test_read_only_property() {
        let prop = ObservableProperty::with_value(42);
        let ro = ReadOnlyProperty::new(&prop);
        assert_eq!(ro.get(), Some(42));

        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        ro.on_change(move |new, _| {
            seen_clone.store(*new.unwrap_or(&0), Ordering::SeqCst);
        });

        prop.set(100);
        assert_eq!(ro.get_or(0), 100);
        assert_eq!(seen.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_into_observable() {
        let prop = 42.into_observable();
        assert_eq!(prop.get(), Some(42));

        let prop = "hello".to_string().into_observable();
        assert_eq!(prop.get_or(String::new()), "hello");
    }

    #[test]
    fn test_property_thread_safe() {
        let prop = Arc::new(ObservableProperty::with_value(0));
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        prop.on_change(move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let prop = prop.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        prop.set(i);
                        let _ = prop.get();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1000);
    }
}
