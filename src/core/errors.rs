//! Shared error types for the application

use thiserror::Error;

/// Main error type for courselens operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed rows, unparseable values: fatal, aborts the run
    #[error("Ingestion error at line {line}: {message}")]
    Ingest { line: u64, message: String },

    /// Data-quality rule violations that must not be silently imputed
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV reader errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an ingestion error with line context
    pub fn ingest(line: u64, message: impl Into<String>) -> Self {
        Self::Ingest {
            line,
            message: message.into(),
        }
    }

    /// Create a data-integrity error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_error_carries_line() {
        let err = Error::ingest(42, "bad timestamp");
        assert_eq!(err.to_string(), "Ingestion error at line 42: bad timestamp");
    }

    #[test]
    fn integrity_error_display() {
        let err = Error::integrity("null cost on paid course 7");
        assert!(err.to_string().contains("null cost on paid course 7"));
    }
}
