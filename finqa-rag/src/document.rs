//! Data types for source reports, chunks, search results, and query results.

use serde::{Deserialize, Serialize};

/// Identifies which report a piece of text came from.
///
/// The two fixed reports the pipeline knows about get proper display labels;
/// anything else passes its raw identifier through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportSource {
    /// Relatório de Desempenho 1T25 (financial performance report).
    Financial,
    /// Relatório da Administração 2024 (administration report).
    Administrative,
    /// An unrecognized source, kept as its raw identifier.
    Other(String),
}

impl ReportSource {
    /// Human-readable report label used in prompts and source lists.
    pub fn label(&self) -> &str {
        match self {
            ReportSource::Financial => "Relatório de Desempenho 1T25",
            ReportSource::Administrative => "Relatório da Administração 2024",
            ReportSource::Other(raw) => raw,
        }
    }

    /// Short identifier used when generating chunk IDs.
    pub fn id_stem(&self) -> &str {
        match self {
            ReportSource::Financial => "relatorio-financeiro",
            ReportSource::Administrative => "relatorio-da-administracao",
            ReportSource::Other(raw) => raw,
        }
    }
}

/// A source report loaded into memory. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Which report this is.
    pub source: ReportSource,
    /// The full UTF-8 text content of the report.
    pub text: String,
}

impl Document {
    /// Create a document from a source tag and its text content.
    pub fn new(source: ReportSource, text: impl Into<String>) -> Self {
        Self { source, text: text.into() }
    }
}

/// A contiguous segment of a [`Document`] with its vector embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, `{source_stem}_{seq}`.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The embedding vector for this chunk's text. Empty until embedded.
    pub embedding: Vec<f32>,
    /// Which report the chunk came from.
    pub source: ReportSource,
    /// Markdown heading trail of the enclosing section, ordered outer-to-inner.
    pub heading_trail: Vec<String>,
    /// Sequence index, strictly increasing and unique within an ingestion run.
    pub seq: usize,
}

/// A retrieved [`Chunk`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// The structured outcome of one orchestrated question.
///
/// Always produced, even on failure: the orchestrator converts every error
/// into a Portuguese user-facing message and records the raw error text in
/// [`error`](QueryResult::error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The verbatim user question.
    pub question: String,
    /// The answer text, or a user-facing error message.
    pub answer: String,
    /// Deduplicated report labels in first-occurrence retrieval order.
    pub sources: Vec<String>,
    /// Number of chunks retrieved for this question.
    pub retrieved_docs: usize,
    /// The underlying error text, if the pipeline failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
