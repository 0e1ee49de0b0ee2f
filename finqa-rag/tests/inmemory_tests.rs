//! Property tests for similarity search ordering and truncation.

use std::collections::HashMap;

use finqa_rag::document::{Chunk, ReportSource};
use finqa_rag::inmemory::InMemoryVectorStore;
use finqa_rag::vectorstore::VectorStore;
use proptest::prelude::*;

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding.
fn arb_embedding() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, DIM).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

/// Generate an embedded chunk with a random ID and text.
fn arb_chunk() -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_embedding(), 0usize..1000).prop_map(
        |(id, text, embedding, seq)| Chunk {
            id,
            text,
            embedding,
            source: ReportSource::Financial,
            heading_trail: Vec::new(),
            seq,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored chunk set and query embedding, similarity search
    /// returns at most `top_k` results in non-increasing score order.
    #[test]
    fn search_is_ordered_and_bounded_by_top_k(
        chunks in proptest::collection::vec(arb_chunk(), 1..20),
        query in arb_embedding(),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, unique_count) = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            store.create_collection("docs", DIM).await.unwrap();

            // Duplicate IDs overwrite on upsert; count the distinct ones.
            let mut deduped: HashMap<String, Chunk> = HashMap::new();
            for chunk in &chunks {
                deduped.entry(chunk.id.clone()).or_insert_with(|| chunk.clone());
            }
            let unique: Vec<Chunk> = deduped.into_values().collect();
            let count = unique.len();

            store.upsert("docs", &unique).await.unwrap();
            let results = store.similarity_search("docs", &query, top_k).await.unwrap();
            (results, count)
        });

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= unique_count);

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}

#[tokio::test]
async fn searching_a_missing_collection_is_an_error() {
    let store = InMemoryVectorStore::new();
    let err = store.similarity_search("nowhere", &[1.0; DIM], 5).await.unwrap_err();
    assert!(err.to_string().contains("nowhere"));
}

#[tokio::test]
async fn replace_discards_previous_contents() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();

    let old = Chunk {
        id: "old_0".into(),
        text: "antigo".into(),
        embedding: vec![1.0, 0.0],
        source: ReportSource::Financial,
        heading_trail: Vec::new(),
        seq: 0,
    };
    store.upsert("docs", &[old]).await.unwrap();

    let new = Chunk {
        id: "new_0".into(),
        text: "novo".into(),
        embedding: vec![0.0, 1.0],
        source: ReportSource::Administrative,
        heading_trail: Vec::new(),
        seq: 0,
    };
    store.replace("docs", 2, std::slice::from_ref(&new)).await.unwrap();

    let results = store.similarity_search("docs", &[1.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "new_0");
}
