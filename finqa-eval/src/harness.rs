//! The evaluation harness: drive the agent over the golden set and
//! aggregate evaluator pass rates.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use finqa_rag::agent::AnswerProvider;

use crate::error::Result;
use crate::golden::{GoldenExample, Split};
use crate::heuristics::{
    CitationEvaluator, Evaluator, FactualOverlapEvaluator, RejectionEvaluator, Verdict,
};
use crate::metrics::{GradedMetric, GradedOutcome, MetricInput};

/// Parallelism cap when delegating to external graded metrics.
const MAX_METRIC_CONCURRENCY: usize = 2;

/// Conventional dataset name for a split.
pub fn dataset_name(split: Split) -> String {
    format!("petrobras-golden-set-{split}")
}

/// Pass counts for one evaluator key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyStats {
    /// Sum of scores (fractional scores count fractionally).
    pub passed: f64,
    /// Number of verdicts recorded.
    pub total: usize,
}

impl KeyStats {
    /// Pass rate as a percentage; 0 when no verdicts were recorded.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.passed / self.total as f64 * 100.0 }
    }
}

/// Aggregated outcome of one harness run.
#[derive(Debug, Clone, Default)]
pub struct EvalSummary {
    /// Per-evaluator pass counts, keyed by evaluator key.
    pub per_evaluator: BTreeMap<String, KeyStats>,
    /// Number of examples evaluated.
    pub total_examples: usize,
    /// Every individual verdict, paired with its example ID.
    pub verdicts: Vec<(String, Verdict)>,
}

/// The experiment-tracking collaborator's dataset interface.
///
/// Registration is idempotent: re-registering an existing dataset reuses it
/// rather than failing.
#[async_trait]
pub trait DatasetRegistry: Send + Sync {
    /// Register a dataset, returning its identifier. Reuses an existing
    /// dataset of the same name.
    async fn register(&self, name: &str, examples: &[GoldenExample]) -> Result<String>;
}

/// A local registry keeping datasets in memory. Stands in for the external
/// tracking service in tests and offline runs.
#[derive(Default)]
pub struct InMemoryRegistry {
    datasets: Mutex<HashMap<String, Vec<GoldenExample>>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatasetRegistry for InMemoryRegistry {
    async fn register(&self, name: &str, examples: &[GoldenExample]) -> Result<String> {
        let mut datasets = self.datasets.lock().await;
        if datasets.contains_key(name) {
            info!(dataset = name, "dataset already exists, reusing");
        } else {
            datasets.insert(name.to_string(), examples.to_vec());
            info!(dataset = name, example_count = examples.len(), "created dataset");
        }
        Ok(name.to_string())
    }
}

/// Drives an [`AnswerProvider`] over golden examples and applies the
/// evaluator set.
pub struct EvalHarness {
    provider: Arc<dyn AnswerProvider>,
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl EvalHarness {
    /// Create a harness with the standard evaluator set: citation format,
    /// factual overlap, and rejection handling.
    pub fn new(provider: Arc<dyn AnswerProvider>) -> Self {
        Self {
            provider,
            evaluators: vec![
                Box::new(CitationEvaluator::new()),
                Box::new(FactualOverlapEvaluator::new()),
                Box::new(RejectionEvaluator::new()),
            ],
        }
    }

    /// Replace the evaluator set.
    pub fn with_evaluators(mut self, evaluators: Vec<Box<dyn Evaluator>>) -> Self {
        self.evaluators = evaluators;
        self
    }

    /// Run every evaluator over every example, one question at a time.
    ///
    /// A failing evaluator is logged and skipped for that test case; the run
    /// always completes.
    pub async fn run(&self, examples: &[GoldenExample]) -> EvalSummary {
        let mut summary = EvalSummary { total_examples: examples.len(), ..Default::default() };

        for example in examples {
            let result = self.provider.query(&example.question).await;

            for evaluator in &self.evaluators {
                match evaluator.evaluate(example, &result) {
                    Ok(verdict) => {
                        let stats = summary.per_evaluator.entry(verdict.key.clone()).or_default();
                        stats.passed += verdict.score;
                        stats.total += 1;
                        summary.verdicts.push((example.id.clone(), verdict));
                    }
                    Err(e) => {
                        warn!(
                            example_id = %example.id,
                            evaluator = evaluator.key(),
                            error = %e,
                            "evaluator failed, skipping test case"
                        );
                    }
                }
            }
        }

        for (key, stats) in &summary.per_evaluator {
            info!(
                evaluator = key.as_str(),
                passed = stats.passed,
                total = stats.total,
                pass_rate = stats.pass_rate(),
                "evaluator summary"
            );
        }

        summary
    }

    /// Apply external graded metrics to each example's produced answer.
    ///
    /// Answers are produced sequentially (the query path has no fan-out);
    /// metric calls are bounded to a small fixed concurrency. A failing
    /// metric call is logged and skipped.
    pub async fn run_graded(
        &self,
        examples: &[GoldenExample],
        metrics: &[Arc<dyn GradedMetric>],
    ) -> Vec<GradedOutcome> {
        let mut outcomes = Vec::new();

        for example in examples {
            let result = self.provider.query(&example.question).await;
            let retrieval_context: Vec<String> =
                result.sources.iter().map(|s| format!("Document from {s}")).collect();

            let input = MetricInput {
                question: &example.question,
                actual: &result.answer,
                expected: &example.expected_answer,
                retrieval_context: &retrieval_context,
            };

            let mut graded = futures::stream::iter(metrics.iter().map(|metric| {
                let input = input.clone();
                async move {
                    let outcome = metric.measure(&input).await.map(|score| GradedOutcome {
                        metric: metric.name().to_string(),
                        example_id: example.id.clone(),
                        score,
                        passed: metric.passes(score),
                    });
                    (metric.name().to_string(), outcome)
                }
            }))
            .buffer_unordered(MAX_METRIC_CONCURRENCY);

            while let Some((name, outcome)) = graded.next().await {
                match outcome {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => warn!(
                        example_id = %example.id,
                        metric = name.as_str(),
                        error = %e,
                        "graded metric failed, skipping"
                    ),
                }
            }
        }

        outcomes
    }
}
