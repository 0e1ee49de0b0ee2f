//! Environment-driven configuration and validation.

use std::path::PathBuf;

use crate::chat::LlmProvider;
use crate::error::{RagError, Result};

/// Default chat model when `OPENAI_MODEL` is unset.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Pass thresholds for the LLM-graded metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    /// Minimum faithfulness score.
    pub faithfulness: f64,
    /// Maximum tolerated hallucination score.
    pub hallucination: f64,
    /// Minimum answer-relevancy score.
    pub relevancy: f64,
    /// Maximum tolerated toxicity score.
    pub toxicity: f64,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self { faithfulness: 0.7, hallucination: 0.5, relevancy: 0.7, toxicity: 0.5 }
    }
}

/// Resolved application configuration.
///
/// Load with [`AppConfig::from_env`], then call [`validate`]
/// (AppConfig::validate) before doing any pipeline work: validation collects
/// every problem into a single [`RagError::Config`] instead of failing on
/// the first one.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Direct OpenAI credential, preferred when present.
    pub openai_api_key: Option<String>,
    /// OpenRouter gateway credential, used when OpenAI's is absent.
    pub openrouter_api_key: Option<String>,
    /// Credential for the experiment-tracking collaborator.
    pub langchain_api_key: Option<String>,
    /// Chat model identifier.
    pub model: String,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Path to the golden question set CSV.
    pub golden_set_path: PathBuf,
    /// Path to the financial performance report.
    pub financial_report_path: PathBuf,
    /// Path to the administration report.
    pub admin_report_path: PathBuf,
    /// Directory holding the persisted vector index.
    pub index_dir: PathBuf,
    /// LLM-graded metric thresholds.
    pub thresholds: MetricThresholds,
}

impl AppConfig {
    /// Load configuration from the environment (reading `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let datasets_dir =
            PathBuf::from(std::env::var("FINQA_DATASETS_DIR").unwrap_or_else(|_| "datasets".into()));

        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openrouter_api_key: non_empty_var("OPENROUTER_API_KEY"),
            langchain_api_key: non_empty_var("LANGCHAIN_API_KEY"),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            golden_set_path: datasets_dir.join("golden-set.csv"),
            financial_report_path: datasets_dir.join("relatorio-financeiro.txt"),
            admin_report_path: datasets_dir.join("Relatorio-da-administracao.txt"),
            index_dir: PathBuf::from(
                std::env::var("FINQA_INDEX_DIR").unwrap_or_else(|_| "index".into()),
            ),
            thresholds: MetricThresholds::default(),
        }
    }

    /// Check credentials and required files, aggregating every failure.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] listing all problems found.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.openai_api_key.is_none() && self.openrouter_api_key.is_none() {
            errors.push("Either OPENAI_API_KEY or OPENROUTER_API_KEY must be set".to_string());
        }
        if self.langchain_api_key.is_none() {
            errors.push("LANGCHAIN_API_KEY must be set for tracing and evaluation".to_string());
        }
        if !self.golden_set_path.exists() {
            errors.push(format!(
                "Golden set CSV not found at {}",
                self.golden_set_path.display()
            ));
        }
        if !self.financial_report_path.exists() {
            errors.push(format!(
                "Financial report not found at {}",
                self.financial_report_path.display()
            ));
        }
        if !self.admin_report_path.exists() {
            errors.push(format!(
                "Administration report not found at {}",
                self.admin_report_path.display()
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(RagError::Config(errors)) }
    }

    /// Resolve the provider variant from the available credentials, direct
    /// OpenAI preferred.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if neither credential is present.
    pub fn provider(&self) -> Result<LlmProvider> {
        if let Some(api_key) = &self.openai_api_key {
            Ok(LlmProvider::OpenAi { api_key: api_key.clone(), model: self.model.clone() })
        } else if let Some(api_key) = &self.openrouter_api_key {
            Ok(LlmProvider::OpenRouter { api_key: api_key.clone(), model: self.model.clone() })
        } else {
            Err(RagError::Config(vec!["No valid API key found".to_string()]))
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
