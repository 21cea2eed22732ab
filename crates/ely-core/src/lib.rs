//! Core systems for ely.
//!
//! This crate provides the reactive state layer of the ely toolkit:
//!
//! - **Observer Dispatch**: Named-event registry with ordered, synchronous delivery
//! - **Observable Property**: A value slot that broadcasts every write
//! - **Containers**: Observable arrays, dictionaries and booleans with
//!   structural events
//! - **Store**: Key/value persistence for plain observable values
//!
//! # Property Example
//!
//! ```
//! use ely_core::ObservableProperty;
//!
//! let title = ObservableProperty::with_value("Untitled".to_string());
//!
//! let id = title.on_change(|new, old| {
//!     println!("title changed from {:?} to {:?}", old, new);
//! });
//!
//! title.set("Report".to_string());
//! assert_eq!(title.to_string(), "Report");
//!
//! // Stop listening
//! title.remove_observer(ely_core::EventKind::Change, id);
//! ```
//!
//! # Container Example
//!
//! ```
//! use ely_core::{ArrayEvent, EventKind, ObservableArray};
//!
//! let tasks: ObservableArray<&str> = ObservableArray::new();
//!
//! tasks.add_observer(EventKind::Add, |event| {
//!     if let ArrayEvent::Add { index, items } = event {
//!         println!("{} task(s) added at {}", items.len(), index);
//!     }
//! });
//!
//! tasks.push("write report").push("review");
//! assert_eq!(tasks.len(), 2);
//! ```

mod array;
mod boolean;
mod dictionary;
mod error;
pub mod logging;
pub mod observer;
pub mod property;
pub mod store;

pub use array::{ArrayEvent, ObservableArray};
pub use boolean::ObservableBoolean;
pub use dictionary::{DictionaryEvent, Entries, ObservableDictionary};
pub use error::{StoreError, StoreResult};
pub use logging::PerfSpan;
pub use observer::{Event, EventKind, Observable, ObserverGuard, ObserverId};
pub use property::{
    ChangeEvent, IntoObservable, ObservableProperty, PropertyEvent, ReadOnlyProperty,
};
pub use store::{KeyValueStore, MemoryStore, NamespacedStore};

static_assertions::assert_impl_all!(ObservableProperty<String>: Send, Sync);
static_assertions::assert_impl_all!(Observable<PropertyEvent<i32>>: Send, Sync);
