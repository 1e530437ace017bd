//! ragnar-retriever: semantic document retrieval over a folder of documents
//!
//! Builds an exact L2 nearest-neighbor index over sentence embeddings of a
//! document collection and answers top-k queries used to ground generated
//! answers.
//!
//! ## Key Modules
//!
//! - **[`index`]**: brute-force flat L2 index (exact top-k, stable ties)
//! - **[`retriever`]**: [`DocumentRetriever`] — embeddings + index + queries
//! - **[`knowledge_base`]**: folder ingestion wired to retriever construction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragnar_embed::{EmbedConfig, FastEmbedProvider};
//! use ragnar_retriever::{DEFAULT_TOP_K, KnowledgeBase};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Arc::new(FastEmbedProvider::create(EmbedConfig::default()).await?);
//! let kb = KnowledgeBase::load("./documents", provider).await?;
//! let context = kb.retrieve("Tell me about cats", DEFAULT_TOP_K).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Folder → Ingestion → Texts → Embeddings → FlatIndex
//!                                               ↓
//!                     retrieve(query, k) ← DocumentRetriever
//! ```
//!
//! Construction is the publish barrier: once `build`/`load` resolves, the
//! retriever is immutable and safe to query from any number of tasks.

pub mod error;
pub mod index;
pub mod knowledge_base;
pub mod retriever;

pub use error::{Result, RetrieverError};
pub use index::{FlatIndex, SearchHit};
pub use knowledge_base::KnowledgeBase;
pub use retriever::{DEFAULT_TOP_K, DocumentRetriever, RetrievedDocument};
