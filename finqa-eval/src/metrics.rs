//! LLM-graded metric contract.
//!
//! Faithfulness, answer relevancy, hallucination, and toxicity are scored by
//! external model-graded collaborators. This module fixes only the
//! invocation contract and the threshold-comparison convention; the grading
//! internals belong to the collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// Everything a graded metric may look at for one test case.
#[derive(Debug, Clone)]
pub struct MetricInput<'a> {
    /// The question asked.
    pub question: &'a str,
    /// The answer the agent produced.
    pub actual: &'a str,
    /// The expected answer from the golden set.
    pub expected: &'a str,
    /// Retrieval context the agent saw, one entry per contributing source.
    pub retrieval_context: &'a [String],
}

/// An externally graded metric scored against a configured threshold.
#[async_trait]
pub trait GradedMetric: Send + Sync {
    /// Metric name used in reports.
    fn name(&self) -> &str;

    /// Pass threshold for this metric.
    fn threshold(&self) -> f64;

    /// Score one test case. Failures surface as [`crate::EvalError::Metric`].
    async fn measure(&self, input: &MetricInput<'_>) -> Result<f64>;

    /// The fixed pass convention: a score at or above the threshold passes.
    fn passes(&self, score: f64) -> bool {
        score >= self.threshold()
    }
}

/// Outcome of one graded metric over one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedOutcome {
    /// Metric name.
    pub metric: String,
    /// Example identifier.
    pub example_id: String,
    /// The score the collaborator returned.
    pub score: f64,
    /// Whether the score met the threshold.
    pub passed: bool,
}
