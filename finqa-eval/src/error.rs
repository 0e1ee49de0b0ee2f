//! Error types for the `finqa-eval` crate.

use thiserror::Error;

/// Errors that can occur while loading datasets or running evaluations.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The golden dataset could not be read or parsed.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// A single evaluator failed on one test case. The harness logs and
    /// skips these; they never abort a run.
    #[error("Evaluator '{key}' failed: {message}")]
    Evaluator {
        /// The evaluator key that failed.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// An LLM-graded metric call failed.
    #[error("Metric '{name}' failed: {message}")]
    Metric {
        /// The metric name.
        name: String,
        /// A description of the failure.
        message: String,
    },

    /// The experiment-tracking collaborator rejected a dataset operation.
    #[error("Registry error: {0}")]
    Registry(String),
}

impl From<csv::Error> for EvalError {
    fn from(e: csv::Error) -> Self {
        EvalError::Dataset(e.to_string())
    }
}

/// A convenience result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;
