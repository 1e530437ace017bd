//! Semantic document retriever
//!
//! Owns an ordered document collection and a [`FlatIndex`] over their
//! embeddings, answering top-k nearest-neighbor queries against a single
//! pinned embedding provider.

use crate::error::Result;
use crate::index::{FlatIndex, SearchHit};
use ragnar_embed::EmbeddingProvider;
use std::sync::Arc;

/// Default number of documents returned by a query.
pub const DEFAULT_TOP_K: usize = 3;

/// A retrieved document with its provenance.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RetrievedDocument {
    /// Position of the document in the ingestion-time ordering
    pub index: usize,
    /// Euclidean distance between the query and the document embedding
    pub distance: f32,
    /// The document text
    pub text: String,
}

/// Semantic retriever over a fixed document collection.
///
/// Built once per knowledge base and immutable afterwards: selecting a new
/// folder constructs a fresh retriever rather than mutating this one. The
/// embedding provider is pinned at construction so corpus and query vectors
/// always share one embedding space.
///
/// [`Self::build`] completes only after every embedding is computed and
/// indexed, so a retriever handed to other tasks is always fully published;
/// queries take `&self` and may run concurrently without synchronization.
pub struct DocumentRetriever {
    documents: Vec<String>,
    index: FlatIndex,
    provider: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for DocumentRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRetriever")
            .field("documents", &self.documents.len())
            .field("dimension", &self.index.dimension())
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl DocumentRetriever {
    /// Embed every document and build the index over the results.
    ///
    /// An empty collection is valid and produces a degenerate retriever whose
    /// queries return no results. Embedding failures propagate; a partially
    /// built retriever is never returned.
    pub async fn build(
        documents: Vec<String>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let mut index = FlatIndex::new(provider.embedding_dimension());

        if !documents.is_empty() {
            tracing::info!(
                "Building retriever over {} documents (model: {})",
                documents.len(),
                provider.provider_name()
            );
            let result = provider.embed_texts(&documents).await?;
            index.add(result.embeddings)?;
        }

        debug_assert_eq!(index.len(), documents.len());
        Ok(Self {
            documents,
            index,
            provider,
        })
    }

    /// Number of documents in the knowledge base.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the retriever holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The ordered document collection the index was built over.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Return the `k` documents most relevant to `query`, closest first.
    ///
    /// `k` clamps to the corpus size; an empty retriever returns an empty
    /// sequence. Read-only: concurrent callers need no synchronization.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_hits(query, k)
            .await?
            .into_iter()
            .map(|doc| doc.text)
            .collect())
    }

    /// Like [`Self::retrieve`], but keeps each match's corpus position and
    /// distance alongside the text.
    pub async fn retrieve_hits(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        if self.documents.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.provider.embed_text(query).await?;
        let hits = self.index.search(&query_embedding, k)?;

        tracing::debug!(
            "Query matched {} of {} documents",
            hits.len(),
            self.documents.len()
        );
        Ok(hits
            .into_iter()
            .map(|SearchHit { index, distance }| RetrievedDocument {
                index,
                distance,
                text: self.documents[index].clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use half::f16;
    use ragnar_embed::{EmbedError, EmbeddingResult};
    use std::collections::HashMap;
    use std::result::Result;

    /// Deterministic provider for tests: known texts map to fixed vectors,
    /// anything else gets a stable vector derived from its bytes.
    struct StubProvider {
        dimension: usize,
        fixed: HashMap<String, Vec<f32>>,
    }

    impl StubProvider {
        fn new(dimension: usize) -> Self {
            Self {
                dimension,
                fixed: HashMap::new(),
            }
        }

        fn with(mut self, text: &str, vector: &[f32]) -> Self {
            self.fixed.insert(text.to_string(), vector.to_vec());
            self
        }

        fn vector_for(&self, text: &str) -> Result<Vec<f16>, EmbedError> {
            if text == "poison" {
                return Err(EmbedError::embedding_gen(std::io::Error::other(
                    "model rejected input",
                )));
            }
            let values = match self.fixed.get(text) {
                Some(v) => v.clone(),
                None => (0..self.dimension)
                    .map(|i| {
                        let byte = text.as_bytes().get(i % text.len().max(1)).copied();
                        f32::from(byte.unwrap_or(0)) / 255.0
                    })
                    .collect(),
            };
            Ok(values.into_iter().map(f16::from_f32).collect())
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed_text(&self, text: &str) -> Result<Vec<f16>, EmbedError> {
            self.vector_for(text)
        }

        async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingResult, EmbedError> {
            let embeddings = texts
                .iter()
                .map(|t| self.vector_for(t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(EmbeddingResult::new(embeddings))
        }

        fn embedding_dimension(&self) -> usize {
            self.dimension
        }

        fn provider_name(&self) -> &str {
            "stub"
        }
    }

    fn corpus() -> Vec<String> {
        vec![
            "The cat sat on the mat.".to_string(),
            "Stock markets fell today.".to_string(),
            "Cats are popular pets.".to_string(),
        ]
    }

    fn cat_stub() -> Arc<StubProvider> {
        // Cat documents sit near the "cats" query; the market one far away
        Arc::new(
            StubProvider::new(2)
                .with("The cat sat on the mat.", &[1.0, 0.1])
                .with("Stock markets fell today.", &[-1.0, 5.0])
                .with("Cats are popular pets.", &[1.0, 0.3])
                .with("Tell me about cats", &[1.0, 0.2]),
        )
    }

    #[tokio::test]
    async fn test_retrieve_ranks_by_distance() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();

        let hits = retriever
            .retrieve_hits("Tell me about cats", 2)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        // Both cat documents beat the stock-market one
        let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert!(indices.contains(&0) && indices.contains(&2));
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[tokio::test]
    async fn test_results_drawn_from_corpus() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        let results = retriever.retrieve("Tell me about cats", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        for text in &results {
            assert!(retriever.documents().contains(text));
        }
    }

    #[tokio::test]
    async fn test_k_clamps_without_duplicates() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        let hits = retriever
            .retrieve_hits("Tell me about cats", 50)
            .await
            .unwrap();
        assert_eq!(hits.len(), 3);
        let mut indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_corpus_answers_empty() {
        let provider = Arc::new(StubProvider::new(4));
        let retriever = DocumentRetriever::build(Vec::new(), provider).await.unwrap();
        assert!(retriever.is_empty());
        let results = retriever.retrieve("x", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_is_deterministic() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        let first = retriever.retrieve("Tell me about cats", 2).await.unwrap();
        let second = retriever.retrieve("Tell me about cats", 2).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_build_is_idempotent() {
        let a = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        let b = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        assert_eq!(
            a.retrieve("Tell me about cats", 3).await.unwrap(),
            b.retrieve("Tell me about cats", 3).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_tie_breaks_on_corpus_order() {
        let provider = Arc::new(
            StubProvider::new(2)
                .with("far", &[9.0, 9.0])
                .with("twin-a", &[1.0, 1.0])
                .with("twin-b", &[1.0, 1.0])
                .with("q", &[0.0, 0.0]),
        );
        let docs = vec!["far".to_string(), "twin-a".to_string(), "twin-b".to_string()];
        let retriever = DocumentRetriever::build(docs, provider).await.unwrap();

        let hits = retriever.retrieve_hits("q", 3).await.unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        let err = retriever.retrieve("poison", 3).await.unwrap_err();
        assert!(matches!(err, crate::RetrieverError::Embed { .. }));
    }

    #[tokio::test]
    async fn test_query_dimension_mismatch_fails_loudly() {
        let retriever = DocumentRetriever::build(corpus(), cat_stub()).await.unwrap();
        // A provider bug handing back a differently-sized query vector must
        // surface as a defect, not as garbage neighbors
        let bad_query = vec![f16::from_f32(0.0); 5];
        let err = retriever.index.search(&bad_query, 3).unwrap_err();
        assert!(matches!(
            err,
            crate::RetrieverError::DimensionMismatch {
                expected: 2,
                actual: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_concurrent_queries_share_the_retriever() {
        let retriever =
            Arc::new(DocumentRetriever::build(corpus(), cat_stub()).await.unwrap());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let retriever = Arc::clone(&retriever);
                tokio::spawn(async move {
                    retriever.retrieve("Tell me about cats", 2).await.unwrap()
                })
            })
            .collect();

        let mut outputs = Vec::new();
        for task in tasks {
            outputs.push(task.await.unwrap());
        }
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    #[ignore] // Integration test: downloads the real model - run with: cargo test -- --ignored
    async fn test_cat_scenario_with_real_model() -> anyhow::Result<()> {
        use ragnar_embed::{EmbedConfig, FastEmbedProvider};

        let provider = Arc::new(FastEmbedProvider::create(EmbedConfig::default()).await?);
        let retriever = DocumentRetriever::build(corpus(), provider).await?;

        let hits = retriever.retrieve_hits("Tell me about cats", 2).await?;
        let mut indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2]);
        Ok(())
    }
}
