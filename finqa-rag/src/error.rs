//! Error types for the `finqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in the RAG pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// Configuration validation failed. All problems are collected before
    /// reporting, so one run surfaces every missing credential or file.
    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| format!("- {e}")).collect::<Vec<_>>().join("\n"))]
    Config(Vec<String>),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStore {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The retrieval stage failed (index unavailable or query embedding failed).
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The language-model call failed (auth, rate limit, network).
    #[error("Generation error: {0}")]
    Generation(String),

    /// An error in pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
