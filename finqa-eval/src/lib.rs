//! Evaluation harness for the Petrobras report Q&A agent.
//!
//! - [`golden`] — the labeled question set (CSV) with split/category labels
//! - [`heuristics`] — rule-based evaluators: citation format, factual
//!   overlap, rejection handling
//! - [`metrics`] — the invocation contract for external LLM-graded metrics
//! - [`harness`] — drives an [`AnswerProvider`](finqa_rag::AnswerProvider)
//!   over a split and aggregates pass rates
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finqa_eval::{EvalHarness, Split, filter_split, load_golden_set};
//!
//! let examples = load_golden_set(&config.golden_set_path)?;
//! let dev = filter_split(&examples, Split::Dev);
//!
//! let harness = EvalHarness::new(Arc::new(agent));
//! let summary = harness.run(&dev).await;
//! for (key, stats) in &summary.per_evaluator {
//!     println!("{key}: {}/{} ({:.1}%)", stats.passed, stats.total, stats.pass_rate());
//! }
//! ```

pub mod error;
pub mod golden;
pub mod harness;
pub mod heuristics;
pub mod metrics;

pub use error::{EvalError, Result};
pub use golden::{Category, GoldenExample, Split, filter_split, load_golden_set};
pub use harness::{
    DatasetRegistry, EvalHarness, EvalSummary, InMemoryRegistry, KeyStats, dataset_name,
};
pub use heuristics::{
    CitationEvaluator, Evaluator, FactualOverlapEvaluator, RejectionEvaluator, Verdict,
};
pub use metrics::{GradedMetric, GradedOutcome, MetricInput};
