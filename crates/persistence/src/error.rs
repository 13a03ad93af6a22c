//! Error types for the persistence layer.
//!
//! Every lookup that yields zero hits collapses into [`StorageError::NotFound`],
//! whether the id is absent, the translation is missing, or a search matched
//! nothing. Engine failures are carried as [`BackendError`] and are never
//! retried.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all phrase storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The engine returned zero hits for a lookup or search.
    #[error("phrase not found: {lookup}")]
    NotFound { lookup: String },

    /// The requested sort directive could not be understood.
    #[error("invalid sort '{value}': {message}")]
    InvalidSort { value: String, message: String },

    /// Search engine errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Seed loading errors
    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl StorageError {
    /// Creates a not-found error describing the lookup that came back empty.
    pub fn not_found(lookup: impl Into<String>) -> Self {
        StorageError::NotFound {
            lookup: lookup.into(),
        }
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Errors raised while talking to a search engine.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The engine is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the engine failed or the client could not be built.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal engine error (non-success status, unexpected payload).
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The query body uses a construct the engine cannot evaluate.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Errors raised while loading the seed file.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of phrase records.
    #[error("failed to parse seed data: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A seed record violates an invariant of the data model.
    #[error("invalid seed record at position {position}: {message}")]
    InvalidRecord { position: usize, message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::not_found("id=42");
        assert_eq!(err.to_string(), "phrase not found: id=42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_backend_error_conversion() {
        let err: StorageError = BackendError::ConnectionFailed {
            backend_name: "elasticsearch".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_seed_error_display() {
        let err = SeedError::InvalidRecord {
            position: 3,
            message: "duplicate id 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid seed record at position 3: duplicate id 1"
        );

        let storage_err: StorageError = err.into();
        assert!(matches!(storage_err, StorageError::Seed(_)));
    }

    #[test]
    fn test_invalid_sort_display() {
        let err = StorageError::InvalidSort {
            value: "phrase:asc".to_string(),
            message: "field is not sortable".to_string(),
        };
        assert!(err.to_string().contains("phrase:asc"));
    }
}
