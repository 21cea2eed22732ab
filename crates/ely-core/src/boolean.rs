//! Observable boolean flag.

use std::fmt;
use std::ops::Deref;

use crate::property::ObservableProperty;

/// An [`ObservableProperty<bool>`] that defaults to `false` and can be
/// toggled.
///
/// Derefs to the underlying property, so `set`, `overwrite` and the listener
/// methods are available directly.
///
/// ```
/// use ely_core::ObservableBoolean;
///
/// let visible = ObservableBoolean::new();
/// assert!(!visible.is_true());
///
/// visible.toggle();
/// assert!(visible.is_true());
/// ```
#[derive(Clone)]
pub struct ObservableBoolean {
    inner: ObservableProperty<bool>,
}

impl ObservableBoolean {
    /// Create a flag set to `false`.
    pub fn new() -> Self {
        Self::with_value(false)
    }

    /// Create a flag set to `value`.
    pub fn with_value(value: bool) -> Self {
        Self {
            inner: ObservableProperty::with_value(value),
        }
    }

    /// Flip the flag. An empty value counts as `false`.
    ///
    /// Goes through [`set`](ObservableProperty::set), so it emits `Change`
    /// and is blocked by overwrite protection. Returns whether the write was
    /// accepted.
    pub fn toggle(&self) -> bool {
        self.inner.set(!self.is_true())
    }

    /// Whether the flag is `true`. An empty value counts as `false`.
    pub fn is_true(&self) -> bool {
        self.inner.get_or(false)
    }
}

impl Default for ObservableBoolean {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ObservableBoolean {
    type Target = ObservableProperty<bool>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<bool> for ObservableBoolean {
    fn from(value: bool) -> Self {
        Self::with_value(value)
    }
}

impl fmt::Debug for ObservableBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservableBoolean").field(&self.inner).finish()
    }
}

impl fmt::Display for ObservableBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

static_assertions::assert_impl_all!(ObservableBoolean: Send, Sync);
