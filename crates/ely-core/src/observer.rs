//! Observer dispatch for ely.
//!
//! This module provides the named-event registry that every observable value
//! in the crate is built on. Listeners are registered against an
//! [`EventKind`] and receive a typed event payload when an event of that kind
//! is dispatched.
//!
//! # Key Types
//!
//! - [`Observable<E>`] - The registry: add, remove and notify listeners
//! - [`Event`] - Implemented by the tagged-union event enums of each observable
//! - [`EventKind`] - The named channel an event is delivered on
//! - [`ObserverId`] - Identifies a registered listener for removal
//! - [`ObserverGuard`] - RAII handle that removes its listener when dropped
//!
//! # Dispatch Semantics
//!
//! - Listeners for a kind are invoked in registration order.
//! - Dispatch is synchronous: every listener has returned before
//!   [`Observable::notify`] returns.
//! - The listener list is snapshotted before invocation, so a listener may
//!   re-enter the observable (notify again, add or remove listeners) without
//!   deadlocking. Listeners added during a dispatch are first called on the
//!   next dispatch.
//! - Notifying a kind with no listeners is a no-op.
//!
//! # Example
//!
//! ```
//! use ely_core::observer::{Event, EventKind, Observable};
//!
//! #[derive(Clone, Debug)]
//! enum CounterEvent {
//!     Change(i32),
//! }
//!
//! impl Event for CounterEvent {
//!     fn kind(&self) -> EventKind {
//!         EventKind::Change
//!     }
//! }
//!
//! let observable = Observable::<CounterEvent>::new();
//! let id = observable.add_observer(EventKind::Change, |event| {
//!     let CounterEvent::Change(value) = event;
//!     println!("counter is now {value}");
//! });
//!
//! observable.notify(CounterEvent::Change(42));
//! assert!(observable.remove_observer(EventKind::Change, id));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a registered listener.
    ///
    /// Use this ID to remove a specific listener via
    /// [`Observable::remove_observer`]. Two registrations of the same closure
    /// receive distinct IDs.
    pub struct ObserverId;
}

/// The named channel an event is delivered on.
///
/// Each observable type documents which kinds it emits. A listener registered
/// for one kind never sees events of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The stored value changed (every observable emits this).
    Change,
    /// Items were added to an array.
    Add,
    /// An item was removed from an array.
    Remove,
    /// An array was cleared.
    Clear,
    /// A key was inserted or updated in a dictionary.
    NewItem,
    /// A key was removed from a dictionary.
    RemoveItem,
}

impl EventKind {
    /// The conventional event name, as used in log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Clear => "clear",
            Self::NewItem => "newItem",
            Self::RemoveItem => "removeItem",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event payload that can be dispatched through an [`Observable`].
///
/// Implementors are usually enums with one variant per [`EventKind`] they
/// emit, so each event name carries a statically known payload.
pub trait Event: Send + 'static {
    /// The channel this event is delivered on.
    fn kind(&self) -> EventKind;
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Internal listener table.
struct Registry<E> {
    /// Listener storage, keyed by ID.
    listeners: SlotMap<ObserverId, Listener<E>>,
    /// Registration order per event kind.
    channels: HashMap<EventKind, Vec<ObserverId>>,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            channels: HashMap::new(),
        }
    }
}

/// A registry of listeners keyed by event kind.
///
/// `Observable<E>` is the dispatch table underlying
/// [`ObservableProperty`](crate::ObservableProperty) and the container types.
/// It can also be used on its own with a custom [`Event`] type.
///
/// # Thread Safety
///
/// The table is guarded by a `parking_lot::Mutex` and `Observable<E>` is
/// `Send + Sync`. Dispatch still happens on the calling thread; there is no
/// queuing or deferred delivery.
pub struct Observable<E> {
    registry: Mutex<Registry<E>>,
}

impl<E: Event> Default for Observable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Observable<E> {
    /// Create an observable with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
        }
    }

    /// Register a listener for `kind`.
    ///
    /// The listener is appended after any listeners already registered for
    /// the same kind. Returns an [`ObserverId`] for later removal.
    pub fn add_observer<F>(&self, kind: EventKind, listener: F) -> ObserverId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.listeners.insert(Arc::new(listener));
        registry.channels.entry(kind).or_default().push(id);
        tracing::trace!(target: targets::OBSERVER, %kind, ?id, "observer added");
        id
    }

    /// Register a listener that is removed when the returned guard is dropped.
    ///
    /// The guard only holds a weak reference, so it never keeps the
    /// observable alive.
    pub fn add_scoped_observer<F>(self: &Arc<Self>, kind: EventKind, listener: F) -> ObserverGuard<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.add_observer(kind, listener);
        ObserverGuard {
            observable: Arc::downgrade(self),
            kind,
            id,
        }
    }

    /// Remove the listener `id` from the `kind` channel.
    ///
    /// Returns `true` if the listener was registered for that kind and has
    /// been removed. An unknown kind or ID is a no-op returning `false`.
    pub fn remove_observer(&self, kind: EventKind, id: ObserverId) -> bool {
        let mut guard = self.registry.lock();
        let Registry {
            listeners,
            channels,
        } = &mut *guard;

        let Some(channel) = channels.get_mut(&kind) else {
            return false;
        };
        let Some(position) = channel.iter().position(|registered| *registered == id) else {
            return false;
        };

        channel.remove(position);
        listeners.remove(id);
        tracing::trace!(target: targets::OBSERVER, %kind, ?id, "observer removed");
        true
    }

    /// Remove every listener of `kind`, or of every kind when `None`.
    pub fn remove_all_observers(&self, kind: Option<EventKind>) {
        let mut guard = self.registry.lock();
        let Registry {
            listeners,
            channels,
        } = &mut *guard;

        match kind {
            Some(kind) => {
                if let Some(channel) = channels.get_mut(&kind) {
                    for id in channel.drain(..) {
                        listeners.remove(id);
                    }
                }
            }
            None => {
                listeners.clear();
                channels.clear();
            }
        }
    }

    /// Number of listeners registered for `kind`.
    pub fn observer_count(&self, kind: EventKind) -> usize {
        self.registry
            .lock()
            .channels
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Number of listeners across all kinds.
    pub fn total_observer_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }

    /// Whether at least one listener is registered for `kind`.
    pub fn has_observers(&self, kind: EventKind) -> bool {
        self.observer_count(kind) > 0
    }

    /// Dispatch `event` to every listener registered for its kind.
    ///
    /// Listeners run synchronously, in registration order, each receiving a
    /// reference to the same payload.
    #[tracing::instrument(skip_all, target = "ely_core::observer", level = "trace")]
    pub fn notify(&self, event: E) {
        let kind = event.kind();
        let snapshot: Vec<Listener<E>> = {
            let registry = self.registry.lock();
            match registry.channels.get(&kind) {
                Some(channel) => channel
                    .iter()
                    .filter_map(|id| registry.listeners.get(*id).cloned())
                    .collect(),
                None => Vec::new(),
            }
        };

        if snapshot.is_empty() {
            return;
        }

        tracing::trace!(target: targets::OBSERVER, %kind, observer_count = snapshot.len(), "dispatching event");
        for listener in &snapshot {
            listener(&event);
        }
    }
}

impl<E> fmt::Debug for Observable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        let mut channels: Vec<(&'static str, usize)> = registry
            .channels
            .iter()
            .map(|(kind, ids)| (kind.as_str(), ids.len()))
            .collect();
        channels.sort_unstable();
        f.debug_struct("Observable")
            .field("channels", &channels)
            .finish()
    }
}

/// A listener registration that is removed when dropped.
///
/// Created by [`Observable::add_scoped_observer`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use ely_core::{EventKind, ObservableProperty};
///
/// let prop = ObservableProperty::with_value(1);
/// let calls = Arc::new(AtomicUsize::new(0));
/// {
///     let calls = calls.clone();
///     let _guard = prop.observable().add_scoped_observer(EventKind::Change, move |_| {
///         calls.fetch_add(1, Ordering::SeqCst);
///     });
///     prop.set(2);
/// }
/// prop.set(3);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct ObserverGuard<E: Event> {
    observable: Weak<Observable<E>>,
    kind: EventKind,
    id: ObserverId,
}

impl<E: Event> ObserverGuard<E> {
    /// The ID of the guarded listener.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// The kind the guarded listener is registered for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl<E: Event> Drop for ObserverGuard<E> {
    fn drop(&mut self) {
        if let Some(observable) = self.observable.upgrade() {
            observable.remove_observer(self.kind, self.id);
        }
    }
}

impl<E: Event> fmt::Debug for ObserverGuard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverGuard")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    enum TestEvent {
        Change(i32),
        Add(String, usize),
    }

    impl Event for TestEvent {
        fn kind(&self) -> EventKind {
            match self {
                Self::Change(_) => EventKind::Change,
                Self::Add(..) => EventKind::Add,
            }
        }
    }

    #[test]
    fn test_add_and_notify() {
        let observable = Observable::<TestEvent>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        observable.add_observer(EventKind::Change, move |event| {
            received_clone.lock().push(event.clone());
        });

        observable.notify(TestEvent::Change(42));
        observable.notify(TestEvent::Change(100));

        assert_eq!(
            *received.lock(),
            vec![TestEvent::Change(42), TestEvent::Change(100)]
        );
    }

    #[test]
    fn test_listener_only_sees_its_kind() {
        let observable = Observable::<TestEvent>::new();
        let changes = Arc::new(AtomicUsize::new(0));

        let changes_clone = changes.clone();
        observable.add_observer(EventKind::Change, move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        observable.notify(TestEvent::Add("a".into(), 0));
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        observable.notify(TestEvent::Change(1));
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_without_listeners_is_noop() {
        let observable = Observable::<TestEvent>::new();
        observable.notify(TestEvent::Change(1));
        observable.notify(TestEvent::Add("x".into(), 3));
        assert_eq!(observable.total_observer_count(), 0);
    }

    #[test]
    fn test_registration_order_preserved() {
        let observable = Observable::<TestEvent>::new();
        let log = Arc::new(Mutex::new(Vec::<String>::new()));

        for name in ["first", "second", "third"] {
            let log = log.clone();
            observable.add_observer(EventKind::Change, move |_| {
                log.lock().push(name.to_string());
            });
        }

        observable.notify(TestEvent::Change(0));
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_order_preserved_after_removal_and_reuse() {
        let observable = Observable::<TestEvent>::new();
        let log = Arc::new(Mutex::new(Vec::<String>::new()));

        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let log = log.clone();
            ids.push(observable.add_observer(EventKind::Change, move |_| {
                log.lock().push(name.to_string());
            }));
        }

        // Removing "a" frees a slot that the next insertion reuses; the new
        // listener must still run last.
        assert!(observable.remove_observer(EventKind::Change, ids[0]));
        let log_d = log.clone();
        observable.add_observer(EventKind::Change, move |_| {
            log_d.lock().push("d".to_string());
        });

        observable.notify(TestEvent::Change(0));
        assert_eq!(*log.lock(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_remove_observer() {
        let observable = Observable::<TestEvent>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = observable.add_observer(EventKind::Change, move |event| {
            if let TestEvent::Change(value) = event {
                received_clone.lock().push(*value);
            }
        });

        observable.notify(TestEvent::Change(1));
        assert!(observable.remove_observer(EventKind::Change, id));
        observable.notify(TestEvent::Change(2));

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_remove_observer_absent_is_noop() {
        let observable = Observable::<TestEvent>::new();
        let id = observable.add_observer(EventKind::Change, |_| {});

        // Wrong kind
        assert!(!observable.remove_observer(EventKind::Add, id));
        assert_eq!(observable.observer_count(EventKind::Change), 1);

        // Already removed
        assert!(observable.remove_observer(EventKind::Change, id));
        assert!(!observable.remove_observer(EventKind::Change, id));
        assert_eq!(observable.observer_count(EventKind::Change), 0);
    }

    #[test]
    fn test_remove_all_for_kind() {
        let observable = Observable::<TestEvent>::new();
        for _ in 0..3 {
            observable.add_observer(EventKind::Change, |_| {});
        }
        observable.add_observer(EventKind::Add, |_| {});

        observable.remove_all_observers(Some(EventKind::Change));
        assert_eq!(observable.observer_count(EventKind::Change), 0);
        assert_eq!(observable.observer_count(EventKind::Add), 1);
        assert_eq!(observable.total_observer_count(), 1);
    }

    #[test]
    fn test_remove_all() {
        let observable = Observable::<TestEvent>::new();
        for _ in 0..5 {
            observable.add_observer(EventKind::Change, |_| {});
        }
        observable.add_observer(EventKind::Add, |_| {});

        observable.remove_all_observers(None);
        assert_eq!(observable.total_observer_count(), 0);
        assert!(!observable.has_observers(EventKind::Add));
    }

    #[test]
    fn test_payload_passed_through_unmodified() {
        let observable = Observable::<TestEvent>::new();
        let received = Arc::new(Mutex::new(None));

        let received_clone = received.clone();
        observable.add_observer(EventKind::Add, move |event| {
            *received_clone.lock() = Some(event.clone());
        });

        observable.notify(TestEvent::Add("hello".to_string(), 7));
        assert_eq!(
            received.lock().clone(),
            Some(TestEvent::Add("hello".to_string(), 7))
        );
    }

    #[test]
    fn test_reentrant_notify_does_not_deadlock() {
        let observable = Arc::new(Observable::<TestEvent>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&observable);
        let received_clone = received.clone();
        observable.add_observer(EventKind::Change, move |event| {
            let TestEvent::Change(value) = event else {
                return;
            };
            received_clone.lock().push(*value);
            if *value < 3 {
                if let Some(observable) = weak.upgrade() {
                    observable.notify(TestEvent::Change(value + 1));
                }
            }
        });

        observable.notify(TestEvent::Change(0));
        assert_eq!(*received.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_listener_added_during_dispatch_runs_next_time() {
        let observable = Arc::new(Observable::<TestEvent>::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&observable);
        let late_calls_clone = late_calls.clone();
        observable.add_observer(EventKind::Change, move |_| {
            if let Some(observable) = weak.upgrade() {
                let late_calls = late_calls_clone.clone();
                observable.add_observer(EventKind::Add, move |_| {
                    late_calls.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        observable.notify(TestEvent::Change(0));
        assert_eq!(observable.observer_count(EventKind::Add), 1);
        observable.notify(TestEvent::Add("x".into(), 0));
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_observer_removed_on_drop() {
        let observable = Arc::new(Observable::<TestEvent>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        {
            let calls_clone = calls.clone();
            let guard = observable.add_scoped_observer(EventKind::Change, move |_| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(guard.kind(), EventKind::Change);
            observable.notify(TestEvent::Change(1));
        }

        observable.notify(TestEvent::Change(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(observable.total_observer_count(), 0);
    }

    #[test]
    fn test_scoped_observer_outliving_observable() {
        let observable = Arc::new(Observable::<TestEvent>::new());
        let guard = observable.add_scoped_observer(EventKind::Change, |_| {});
        drop(observable);
        // Must not panic
        drop(guard);
    }

    #[test]
    fn test_notify_from_multiple_threads() {
        let observable = Arc::new(Observable::<TestEvent>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        observable.add_observer(EventKind::Change, move |event| {
            if let TestEvent::Change(value) = event {
                received_clone.lock().push(*value);
            }
        });

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let observable = observable.clone();
                std::thread::spawn(move || observable.notify(TestEvent::Change(i)))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let values = received.lock();
        assert_eq!(values.len(), 10);
        for i in 0..10 {
            assert!(values.contains(&i), "Missing value {}", i);
        }
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Change.as_str(), "change");
        assert_eq!(EventKind::NewItem.to_string(), "newItem");
        assert_eq!(EventKind::RemoveItem.to_string(), "removeItem");
    }
}
