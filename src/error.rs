//! Error types for the scoring engine
//!
//! Structured error definitions with thiserror; the CLI layer wraps these
//! in anyhow for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the weight store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user has no bootstrapped table set on disk. Fatal for the
    /// current train call; bootstrapping is an external setup step
    /// (`mailrank init <user>`).
    #[error("no weight tables found for user '{0}' (run `mailrank init {0}`)")]
    NotFound(String),

    /// Reading or writing a table file failed
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table file exists but does not parse as its expected schema
    #[error("malformed table {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised by the tokenizer/vectorizer collaborator.
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// All tokens were stopwords or the text was empty. Recovered locally:
    /// the affected term-projection step is skipped.
    #[error("empty vocabulary: no usable terms after stopword filtering")]
    EmptyVocabulary,
}
