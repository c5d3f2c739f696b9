use serde::{Serialize, Deserialize};

use crate::error::SvmError;
use crate::math::matrix::Matrix;
use crate::svm::config::EvalConfig;
use crate::svm::evaluation::Evaluation;
use crate::svm::naive::evaluate_naive_with;
use crate::svm::vectorized::evaluate_vectorized_with;

/// Selects which evaluator computes the loss and gradient.
///
/// - `Naive`      — explicit loops; mirrors the definition term by term.
/// - `Vectorized` — matrix products; batches finite differences per feature row.
///
/// Both produce the same loss and, up to rounding, the same gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Naive,
    Vectorized,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Naive, Strategy::Vectorized];

    pub fn evaluate(
        self,
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        reg: f64,
        config: &EvalConfig,
    ) -> Result<Evaluation, SvmError> {
        match self {
            Strategy::Naive      => evaluate_naive_with(w, x, y, reg, config),
            Strategy::Vectorized => evaluate_vectorized_with(w, x, y, reg, config),
        }
    }
}
