//! Knowledge-base construction
//!
//! Ties ingestion and retrieval together: selecting a folder produces a fresh
//! [`KnowledgeBase`] that ingests every supported document and builds a
//! retriever over the results. Selection replaces the previous knowledge base
//! wholesale; there is no incremental update.

use crate::error::Result;
use crate::retriever::{DocumentRetriever, RetrievedDocument};
use ragnar_embed::EmbeddingProvider;
use ragnar_ingest::IngestedDocument;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A folder of documents, ingested and indexed for semantic retrieval.
#[derive(Debug)]
pub struct KnowledgeBase {
    folder: PathBuf,
    sources: Vec<PathBuf>,
    retriever: DocumentRetriever,
}

impl KnowledgeBase {
    /// Ingest `folder` and build a retriever over its documents.
    ///
    /// Extraction and parsing are blocking work and run on the blocking
    /// thread pool; the returned future completes only once the index is
    /// fully built, so the knowledge base is queryable the moment the caller
    /// holds it.
    pub async fn load(
        folder: impl Into<PathBuf>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let folder = folder.into();

        let ingest_folder = folder.clone();
        let ingested = tokio::task::spawn_blocking(move || {
            ragnar_ingest::ingest_directory(&ingest_folder)
        })
        .await??;

        let (sources, texts): (Vec<_>, Vec<_>) = ingested
            .into_iter()
            .map(|IngestedDocument { source, text }| (source, text))
            .unzip();

        let retriever = DocumentRetriever::build(texts, provider).await?;
        tracing::info!(
            "Knowledge base ready: {} documents from {}",
            retriever.len(),
            folder.display()
        );

        Ok(Self {
            folder,
            sources,
            retriever,
        })
    }

    /// The folder this knowledge base was built from.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Source paths of the ingested documents, in corpus order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Number of documents in the knowledge base.
    pub fn document_count(&self) -> usize {
        self.retriever.len()
    }

    /// The retriever built over this knowledge base.
    pub fn retriever(&self) -> &DocumentRetriever {
        &self.retriever
    }

    /// Retrieve the `k` most relevant document texts for `query`.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        self.retriever.retrieve(query, k).await
    }

    /// Retrieve matches with corpus positions and distances.
    pub async fn retrieve_hits(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        self.retriever.retrieve_hits(query, k).await
    }
}
