//! Vector store trait for persisting chunks and searching by similarity.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// The index is rebuilt wholesale on re-ingestion via [`replace`]
/// (VectorStore::replace); there is no incremental update path.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection. No-op if it already exists.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete a named collection and all its data.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Insert chunks into a collection. Chunks must have embeddings set.
    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` chunks most similar to the given embedding.
    ///
    /// Returns at most `top_k` results ordered by descending similarity.
    async fn similarity_search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;

    /// Replace the entire collection with the given chunks.
    ///
    /// This is delete-then-rebuild, not an atomic swap: a crash between the
    /// delete and the rebuild leaves no valid index. Known gap, kept as-is.
    async fn replace(&self, collection: &str, dimensions: usize, chunks: &[Chunk]) -> Result<()> {
        self.delete_collection(collection).await?;
        self.create_collection(collection, dimensions).await?;
        self.upsert(collection, chunks).await
    }
}

/// Cosine similarity between two vectors. Returns 0.0 if either has zero
/// magnitude.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
