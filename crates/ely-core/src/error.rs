//! Error types for ely-core.
//!
//! Observable operations never fail: out-of-range access yields `None` or
//! `false` and protected writes are dropped. The only fallible surface in
//! this crate is the key/value store.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The value could not be encoded as JSON.
    #[error("failed to serialize value for key `{key}`: {source}")]
    Serialize {
        /// The key being written.
        key: String,
        /// The underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = StoreError::Serialize {
            key: "session".into(),
            source,
        };
        assert!(err.to_string().starts_with("failed to serialize value for key `session`: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
