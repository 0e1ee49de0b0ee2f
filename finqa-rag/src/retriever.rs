//! Query-time retrieval: embed the question, search the index.

use std::sync::Arc;

use tracing::debug;

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Wraps the vector store behind a natural-language interface.
///
/// Pure delegation: the question is embedded with the same provider used at
/// ingestion and handed to the store's similarity search. No caching and no
/// deduplication happen here; source-label dedup is the orchestrator's job.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever over the given collection.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
        top_k: usize,
    ) -> Self {
        Self { embedder, store, collection: collection.into(), top_k }
    }

    /// Return the top-K chunks most similar to the question, ordered by
    /// non-increasing similarity.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| RagError::Retrieval(format!("query embedding failed: {e}")))?;

        let results = self
            .store
            .similarity_search(&self.collection, &query_embedding, self.top_k)
            .await
            .map_err(|e| {
                RagError::Retrieval(format!("search failed in '{}': {e}", self.collection))
            })?;

        debug!(result_count = results.len(), top_k = self.top_k, "retrieved chunks");
        Ok(results)
    }
}
