//! JSON-file-backed vector store.
//!
//! Each collection lives in one `{name}.json` file under a configured
//! directory, holding the chunk list (text, metadata, and embedding).
//! Collections are loaded lazily: a missing file only surfaces as an error
//! on first access, which is how a never-ingested index announces itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, cosine_similarity};

const BACKEND: &str = "JsonFile";

/// A persisted vector store keeping one JSON file per collection.
///
/// [`replace`](VectorStore::replace) deletes the collection file before
/// rewriting it, mirroring the full-rebuild ingestion contract. A reader
/// observing mid-rebuild sees either the old index or none at all.
pub struct JsonFileVectorStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, HashMap<String, Chunk>>>,
}

impl JsonFileVectorStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cache: RwLock::new(HashMap::new()) }
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn io_error(message: String) -> RagError {
        RagError::VectorStore { backend: BACKEND.to_string(), message }
    }

    async fn read_collection(path: &Path) -> Result<HashMap<String, Chunk>> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            Self::io_error(format!("failed to read index at '{}': {e}", path.display()))
        })?;
        let chunks: Vec<Chunk> = serde_json::from_slice(&bytes).map_err(|e| {
            Self::io_error(format!("corrupt index at '{}': {e}", path.display()))
        })?;
        Ok(chunks.into_iter().map(|c| (c.id.clone(), c)).collect())
    }

    async fn write_collection(
        &self,
        collection: &str,
        chunks: &HashMap<String, Chunk>,
    ) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Self::io_error(format!("failed to create '{}': {e}", self.dir.display()))
        })?;
        let path = self.path_for(collection);
        let mut ordered: Vec<&Chunk> = chunks.values().collect();
        ordered.sort_by_key(|c| c.seq);
        let bytes = serde_json::to_vec(&ordered)
            .map_err(|e| Self::io_error(format!("failed to serialize index: {e}")))?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            Self::io_error(format!("failed to write index at '{}': {e}", path.display()))
        })?;
        debug!(collection, path = %path.display(), "persisted collection");
        Ok(())
    }

    /// Ensure the collection is present in the cache, loading it from disk
    /// if needed. Errors if the file does not exist.
    async fn load_if_absent(&self, collection: &str) -> Result<()> {
        {
            let cache = self.cache.read().await;
            if cache.contains_key(collection) {
                return Ok(());
            }
        }
        let path = self.path_for(collection);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(Self::io_error(format!(
                "collection '{collection}' not found at '{}' (run ingestion first)",
                path.display()
            )));
        }
        let loaded = Self::read_collection(&path).await?;
        info!(collection, chunk_count = loaded.len(), "loaded collection from disk");
        self.cache.write().await.insert(collection.to_string(), loaded);
        Ok(())
    }
}

#[async_trait]
impl VectorStore for JsonFileVectorStore {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut cache = self.cache.write().await;
        let on_disk = tokio::fs::try_exists(self.path_for(name)).await.unwrap_or(false);
        if !cache.contains_key(name) && !on_disk {
            cache.insert(name.to_string(), HashMap::new());
            self.write_collection(name, &HashMap::new()).await?;
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        cache.remove(name);
        let path = self.path_for(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::remove_file(&path).await.map_err(|e| {
                Self::io_error(format!("failed to delete index at '{}': {e}", path.display()))
            })?;
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        self.load_if_absent(collection).await?;
        let mut cache = self.cache.write().await;
        let store = cache.get_mut(collection).ok_or_else(|| {
            Self::io_error(format!("collection '{collection}' does not exist"))
        })?;
        for chunk in chunks {
            store.insert(chunk.id.clone(), chunk.clone());
        }
        // The write guard stays held across the file write so concurrent
        // upserts cannot interleave and persist a stale snapshot.
        self.write_collection(collection, store).await
    }

    async fn similarity_search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        self.load_if_absent(collection).await?;
        let cache = self.cache.read().await;
        let store = cache.get(collection).ok_or_else(|| {
            Self::io_error(format!("collection '{collection}' does not exist"))
        })?;

        let mut scored: Vec<SearchResult> = store
            .values()
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, embedding),
                chunk: chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}
