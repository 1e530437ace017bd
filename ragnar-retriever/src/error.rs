//! Error types for semantic retrieval

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrieverError>;

/// Error type for retriever construction and queries.
#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    /// The embedding model rejected or failed on an input.
    ///
    /// Propagated from the provider; the retriever never substitutes a
    /// zero vector for a failed embedding.
    #[error("Embedding failed: {source}")]
    Embed {
        #[from]
        source: ragnar_embed::EmbedError,
    },

    /// Document ingestion failed while loading a knowledge base
    #[error("Ingestion failed: {source}")]
    Ingest {
        #[from]
        source: ragnar_ingest::IngestError,
    },

    /// A vector's dimensionality does not match the index.
    ///
    /// Defect-class: cannot occur while one model instance is used
    /// consistently for corpus and queries. Surfaced loudly instead of
    /// returning garbage nearest neighbors.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Async task join errors
    #[error("Async task failed: {source}")]
    AsyncTask {
        #[from]
        source: tokio::task::JoinError,
    },
}
