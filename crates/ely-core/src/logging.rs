//! Logging facilities for ely.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Target constants for filtering output per subsystem
//! - A performance span guard for timing operations
//!
//! # Tracing Integration
//!
//! ely uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_max_level(tracing::Level::TRACE)
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Observer registration, dispatch and property writes are logged at
//! `trace` level so they stay silent in normal builds.

/// Span names used throughout ely for tracing.
pub mod span_names {
    /// Target of every [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "ely::perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "ely_core";
    /// Observer dispatch target.
    pub const OBSERVER: &str = "ely_core::observer";
    /// Observable property target.
    pub const PROPERTY: &str = "ely_core::property";
    /// Observable array target.
    pub const ARRAY: &str = "ely_core::array";
    /// Observable dictionary target.
    pub const DICTIONARY: &str = "ely_core::dictionary";
    /// Key/value store target.
    pub const STORE: &str = "ely_core::store";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[doc(hidden)]
pub use tracing as __tracing;

/// Thin wrapper around `tracing::trace!` with the `ely_core` target,
/// usable from crates that do not depend on `tracing` directly.
#[macro_export]
macro_rules! ely_trace {
    ($($arg:tt)*) => {
        $crate::logging::__tracing::trace!(target: "ely_core", $($arg)*)
    };
}
