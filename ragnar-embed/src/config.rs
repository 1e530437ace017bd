//! Configuration for embedding models

use crate::error::{EmbedError, Result};
use fastembed::EmbeddingModel;

/// Default sentence-embedding model.
///
/// The retrieval core was designed around this model; corpus and query
/// vectors are only comparable when they come from the same model, so the
/// default should rarely be overridden per-query.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Configuration for embedding models.
///
/// Serializable so providers can derive a deterministic cache key from it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EmbedConfig {
    /// Name of the embedding model to use
    pub model_name: String,
    /// Maximum batch size for embedding generation
    pub batch_size: usize,
    /// Whether to L2-normalize embeddings after generation.
    ///
    /// Off by default: the flat index ranks by raw Euclidean distance, and
    /// normalizing changes that geometry.
    pub normalize: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl EmbedConfig {
    /// Create a configuration for the named model with default options.
    pub fn new<S: Into<String>>(model_name: S) -> Self {
        Self {
            model_name: model_name.into(),
            batch_size: 16,
            normalize: false,
        }
    }

    /// Set the maximum batch size for embedding generation.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enable or disable L2 normalization of generated embeddings.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Get the configured model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Resolve the configured model name to a fastembed built-in model.
    pub fn embedding_model(&self) -> Result<EmbeddingModel> {
        match self.model_name.as_str() {
            "all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
            "all-MiniLM-L12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
            "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
            "bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
            other => Err(EmbedError::invalid_config(format!(
                "Unknown embedding model: {other}"
            ))),
        }
    }

    /// Validate the configuration without loading any model.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(EmbedError::invalid_config("batch_size must be positive"));
        }
        self.embedding_model().map(|_| ())
    }
}
