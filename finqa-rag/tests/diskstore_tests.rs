//! Persistence behavior of the JSON-file vector store.

use finqa_rag::diskstore::JsonFileVectorStore;
use finqa_rag::document::{Chunk, ReportSource};
use finqa_rag::error::RagError;
use finqa_rag::vectorstore::VectorStore;

fn chunk(id: &str, seq: usize, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("trecho {seq}"),
        embedding,
        source: ReportSource::Financial,
        heading_trail: Vec::new(),
        seq,
    }
}

#[tokio::test]
async fn never_ingested_index_errors_at_first_access() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileVectorStore::new(dir.path());

    let err = store.similarity_search("petrobras_docs", &[1.0, 0.0], 5).await.unwrap_err();
    match err {
        RagError::VectorStore { backend, message } => {
            assert_eq!(backend, "JsonFile");
            assert!(message.contains("petrobras_docs"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn index_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonFileVectorStore::new(dir.path());
        let chunks =
            vec![chunk("a_0", 0, vec![1.0, 0.0]), chunk("a_1", 1, vec![0.0, 1.0])];
        store.replace("docs", 2, &chunks).await.unwrap();
    }

    // A fresh instance over the same directory reads the persisted index.
    let reopened = JsonFileVectorStore::new(dir.path());
    let results = reopened.similarity_search("docs", &[1.0, 0.0], 5).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.id, "a_0");
}

#[tokio::test]
async fn replace_is_a_full_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileVectorStore::new(dir.path());

    store.replace("docs", 2, &[chunk("old_0", 0, vec![1.0, 0.0])]).await.unwrap();
    store.replace("docs", 2, &[chunk("new_0", 0, vec![0.0, 1.0])]).await.unwrap();

    let results = store.similarity_search("docs", &[1.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "new_0");
}

#[tokio::test]
async fn delete_collection_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileVectorStore::new(dir.path());

    store.replace("docs", 2, &[chunk("a_0", 0, vec![1.0, 0.0])]).await.unwrap();
    assert!(dir.path().join("docs.json").exists());

    store.delete_collection("docs").await.unwrap();
    assert!(!dir.path().join("docs.json").exists());

    // Gone from the cache too, not just the filesystem.
    assert!(store.similarity_search("docs", &[1.0, 0.0], 5).await.is_err());
}

#[tokio::test]
async fn results_are_ordered_by_descending_similarity() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileVectorStore::new(dir.path());

    let chunks = vec![
        chunk("far", 0, vec![0.0, 1.0]),
        chunk("near", 1, vec![1.0, 0.0]),
        chunk("mid", 2, vec![0.7, 0.7]),
    ];
    store.replace("docs", 2, &chunks).await.unwrap();

    let results = store.similarity_search("docs", &[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.id, "near");
    assert_eq!(results[1].chunk.id, "mid");
}
