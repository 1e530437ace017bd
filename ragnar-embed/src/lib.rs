//! # ragnar-embed
//!
//! Sentence embeddings for semantic document retrieval, backed by local ONNX
//! models via FastEmbed. Async-first, with a small provider abstraction so the
//! retriever never depends on a concrete model runtime.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ragnar_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = FastEmbedProvider::create(EmbedConfig::default()).await?;
//!
//! let texts = vec!["The cat sat on the mat.".to_string()];
//! let result = provider.embed_texts(&texts).await?;
//! println!("{} embeddings of dimension {}", result.len(), result.dimension);
//! # Ok(())
//! # }
//! ```
//!
//! ## Model pinning
//!
//! A provider is constructed around exactly one model configuration and never
//! switches models afterwards. Corpus and query vectors produced by the same
//! provider are guaranteed to live in the same embedding space, which is what
//! makes L2 distances between them comparable. The default model is
//! `all-MiniLM-L6-v2`, a compact general-purpose sentence embedder.
//!
//! ## Architecture
//!
//! - [`config`]: model selection and embedding options
//! - [`provider`]: the [`EmbeddingProvider`] trait and FastEmbed implementation
//! - [`error`]: typed failures ([`EmbedError`])
//!
//! Embeddings are stored as half-precision (f16) vectors to halve memory use;
//! loaded models are cached process-wide so several providers with identical
//! configuration share one model instance.

pub mod config;
pub mod error;
pub mod provider;

pub use config::EmbedConfig;
pub use error::{EmbedError, Result};
pub use provider::{EmbeddingProvider, EmbeddingResult, FastEmbedProvider};
