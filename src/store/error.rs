use thiserror::Error;

/// Error types for the flat-file store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record in {path} line {line}: {reason}")]
    InvalidRecord {
        path: String,
        line: usize,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn invalid_record(
        path: &std::path::Path,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        StoreError::InvalidRecord {
            path: path.display().to_string(),
            line,
            reason: reason.into(),
        }
    }
}
