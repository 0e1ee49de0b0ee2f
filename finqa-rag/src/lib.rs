//! Retrieval-augmented Q&A over two fixed Petrobras reports.
//!
//! The crate covers the full answer pipeline:
//!
//! - [`chunking`] — heading-aware recursive document splitting
//! - [`embedding`] / [`openai`] — embedding provider trait and OpenAI client
//! - [`vectorstore`] / [`inmemory`] / [`diskstore`] — similarity index
//! - [`ingest`] — one-time chunk → embed → full-replace ingestion
//! - [`retriever`] — query-time top-K retrieval
//! - [`prompt`] — fixed Portuguese instruction template and context block
//! - [`chat`] — chat-completion client (OpenAI or the OpenRouter gateway)
//! - [`agent`] — the orchestrator producing structured [`QueryResult`]s
//! - [`config`] — environment configuration with aggregated validation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finqa_rag::{
//!     AppConfig, IngestionPipeline, JsonFileVectorStore, OpenAIEmbeddingProvider,
//!     OpenAiChatModel, ReportAgent, ReportChunker, Retriever, ingest::COLLECTION_NAME,
//! };
//!
//! let config = AppConfig::from_env();
//! config.validate()?;
//!
//! let embedder = Arc::new(OpenAIEmbeddingProvider::from_env()?);
//! let store = Arc::new(JsonFileVectorStore::new(&config.index_dir));
//! let chunker = Arc::new(ReportChunker::new(config.chunk_size, config.chunk_overlap));
//!
//! IngestionPipeline::new(chunker, embedder.clone(), store.clone())
//!     .run(&documents)
//!     .await?;
//!
//! let retriever = Retriever::new(embedder, store, COLLECTION_NAME, config.top_k);
//! let chat = Arc::new(OpenAiChatModel::new(config.provider()?));
//! let agent = ReportAgent::new(retriever, chat);
//! let result = agent.query("Qual foi o EBITDA Ajustado no 1T25?").await;
//! ```

pub mod agent;
pub mod chat;
pub mod chunking;
pub mod config;
pub mod diskstore;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod inmemory;
pub mod openai;
pub mod prompt;
pub mod retriever;
pub mod vectorstore;

pub use agent::{AnswerProvider, ReportAgent};
pub use chat::{ChatModel, LlmProvider, OpenAiChatModel};
pub use chunking::{Chunker, ReportChunker};
pub use config::{AppConfig, MetricThresholds};
pub use diskstore::JsonFileVectorStore;
pub use document::{Chunk, Document, QueryResult, ReportSource, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use ingest::IngestionPipeline;
pub use inmemory::InMemoryVectorStore;
pub use openai::OpenAIEmbeddingProvider;
pub use retriever::Retriever;
pub use vectorstore::VectorStore;
