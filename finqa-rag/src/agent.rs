//! The RAG orchestrator: retrieve, compose, generate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::chat::ChatModel;
use crate::document::QueryResult;
use crate::error::Result;
use crate::prompt;
use crate::retriever::Retriever;

/// Anything that can answer a question with a structured [`QueryResult`].
///
/// The evaluation harness drives this trait, so it can run against the real
/// agent or a canned stand-in.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Answer one question. Implementations never fail: errors are folded
    /// into the returned [`QueryResult`].
    async fn query(&self, question: &str) -> QueryResult;
}

/// The report Q&A agent.
///
/// A fixed two-stage pipeline: Retrieve, then Generate. A retrieval failure
/// short-circuits generation. Construct one explicitly and pass it where it
/// is needed; there is no ambient global instance.
pub struct ReportAgent {
    retriever: Retriever,
    chat: Arc<dyn ChatModel>,
}

impl ReportAgent {
    /// Create an agent from its two collaborators.
    pub fn new(retriever: Retriever, chat: Arc<dyn ChatModel>) -> Self {
        Self { retriever, chat }
    }

    /// The fallible pipeline behind [`query`](AnswerProvider::query).
    async fn answer(&self, question: &str) -> Result<QueryResult> {
        // Stage 1: retrieve.
        let results = self.retriever.retrieve(question).await?;

        // Deduplicated source labels in first-occurrence order, distinct
        // from the prompt context where repeated sources repeat.
        let mut sources: Vec<String> = Vec::new();
        for result in &results {
            let label = result.chunk.source.label();
            if !sources.iter().any(|s| s == label) {
                sources.push(label.to_string());
            }
        }

        // Stage 2: generate.
        let context = prompt::format_context(&results);
        let system_prompt = prompt::compose(&context, question);
        let answer = self.chat.generate(&system_prompt, question).await?;

        info!(retrieved_docs = results.len(), source_count = sources.len(), "answered question");

        Ok(QueryResult {
            question: question.to_string(),
            answer,
            sources,
            retrieved_docs: results.len(),
            error: None,
        })
    }
}

#[async_trait]
impl AnswerProvider for ReportAgent {
    async fn query(&self, question: &str) -> QueryResult {
        match self.answer(question).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "query failed");
                QueryResult {
                    question: question.to_string(),
                    answer: format!("Erro ao processar pergunta: {e}"),
                    sources: Vec::new(),
                    retrieved_docs: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
