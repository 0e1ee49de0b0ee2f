//! Ingestion: chunk → embed → full index replace.

use std::sync::Arc;

use tracing::{info, warn};

use crate::chunking::Chunker;
use crate::document::{Chunk, Document};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Name of the collection holding the report index.
pub const COLLECTION_NAME: &str = "petrobras_docs";

/// Runs the one-time ingestion workflow over the source reports.
///
/// Ingestion is an exclusive, blocking, full-replace operation: the old
/// index is removed before the new one is written. Re-running with the same
/// documents and configuration reproduces the same chunk boundaries.
pub struct IngestionPipeline {
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
}

impl IngestionPipeline {
    /// Create an ingestion pipeline writing to [`COLLECTION_NAME`].
    pub fn new(
        chunker: Arc<dyn Chunker>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { chunker, embedder, store, collection: COLLECTION_NAME.to_string() }
    }

    /// Override the target collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Ingest the given documents, replacing the whole index.
    ///
    /// Chunks all documents, renumbers sequence indices globally across the
    /// run, batch-embeds the texts, and rebuilds the collection. Returns the
    /// stored chunks. Empty documents contribute zero chunks.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if embedding or storage fails.
    pub async fn run(&self, documents: &[Document]) -> Result<Vec<Chunk>> {
        let mut chunks: Vec<Chunk> = Vec::new();
        for document in documents {
            let doc_chunks = self.chunker.chunk(document);
            if doc_chunks.is_empty() {
                warn!(source = document.source.label(), "document produced no chunks");
            } else {
                info!(
                    source = document.source.label(),
                    chunk_count = doc_chunks.len(),
                    "chunked document"
                );
            }
            chunks.extend(doc_chunks);
        }

        // Sequence indices are unique across the whole run, not per document.
        for (seq, chunk) in chunks.iter_mut().enumerate() {
            chunk.seq = seq;
            chunk.id = format!("{}_{seq}", chunk.source.id_stem());
        }

        if !chunks.is_empty() {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
                RagError::Pipeline(format!("embedding failed during ingestion: {e}"))
            })?;
            for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
                chunk.embedding = embedding;
            }
        }

        self.store
            .replace(&self.collection, self.embedder.dimensions(), &chunks)
            .await
            .map_err(|e| RagError::Pipeline(format!("index replace failed: {e}")))?;

        info!(collection = %self.collection, chunk_count = chunks.len(), "index rebuilt");
        Ok(chunks)
    }
}
