//! The labeled golden question set.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EvalError, Result};

/// Which evaluation split an example belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Split {
    /// Development split, used for iterating on the pipeline.
    #[serde(rename = "dev")]
    Dev,
    /// Held-out test split.
    #[serde(rename = "test")]
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Dev => write!(f, "dev"),
            Split::Test => write!(f, "test"),
        }
    }
}

/// Question category, driving the rejection-handling evaluator's branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// An ordinary in-scope question.
    #[serde(rename = "comum")]
    Comum,
    /// An ambiguous question that should trigger a clarification request.
    #[serde(rename = "edge_case")]
    EdgeCase,
    /// An adversarial/out-of-scope question that should be refused.
    #[serde(rename = "ataque")]
    Ataque,
}

/// One labeled example from the golden set. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenExample {
    /// Example identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Which split the example belongs to.
    #[serde(rename = "Split")]
    pub split: Split,
    /// Question category.
    #[serde(rename = "Categoria")]
    pub category: Category,
    /// The question text.
    #[serde(rename = "Pergunta")]
    pub question: String,
    /// The expected answer text.
    #[serde(rename = "Resposta_Esperada")]
    pub expected_answer: String,
    /// Which reports a correct answer must cite.
    #[serde(rename = "Fontes_Obrigatorias")]
    pub required_sources: String,
}

/// Load the golden set from a CSV file.
///
/// # Errors
///
/// Returns [`EvalError::Dataset`] if the file cannot be read or a row fails
/// to parse.
pub fn load_golden_set(path: &Path) -> Result<Vec<GoldenExample>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| EvalError::Dataset(format!("failed to open '{}': {e}", path.display())))?;

    let examples = reader.deserialize().collect::<std::result::Result<Vec<GoldenExample>, _>>()?;
    info!(path = %path.display(), example_count = examples.len(), "loaded golden set");
    Ok(examples)
}

/// Keep only the examples of the given split.
pub fn filter_split(examples: &[GoldenExample], split: Split) -> Vec<GoldenExample> {
    examples.iter().filter(|e| e.split == split).cloned().collect()
}
