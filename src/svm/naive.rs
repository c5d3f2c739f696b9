use crate::error::SvmError;
use crate::loss::hinge::HingeLoss;
use crate::math::matrix::Matrix;
use crate::svm::config::{EvalConfig, GradientMethod};
use crate::svm::evaluation::Evaluation;
use crate::svm::validate::{validate_inputs, Dims};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Hinge loss and gradient with explicit loops over samples, classes and
/// weight entries, using the default config (finite differences, h = 1e-5).
pub fn evaluate_naive(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<Evaluation, SvmError> {
    evaluate_naive_with(w, x, y, reg, &EvalConfig::default())
}

/// Loop-based evaluation with an explicit config.
///
/// # Arguments
/// - `w`   — weights, D × C; never modified
/// - `x`   — minibatch, N × D
/// - `y`   — labels, length N, each in `[0, C)`
/// - `reg` — L2 regularization strength, `>= 0`
///
/// The finite-difference path perturbs a private copy of `w`, one entry at
/// a time, and restores each entry before moving to the next.
pub fn evaluate_naive_with(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    config: &EvalConfig,
) -> Result<Evaluation, SvmError> {
    config.validate()?;
    let dims = validate_inputs(w, x, y, reg)?;
    log::debug!(
        "naive hinge evaluation: N={} D={} C={} reg={} gradient={:?}",
        dims.samples, dims.features, dims.classes, reg, config.gradient
    );

    let loss = objective(w, x, y, reg, config.delta, dims);

    let grad = match config.gradient {
        GradientMethod::FiniteDifference { step } => {
            finite_difference_gradient(w, x, y, reg, config.delta, step, loss, dims)
        }
        GradientMethod::Analytic => analytic_gradient(w, x, y, reg, config.delta, dims),
    };

    Ok(Evaluation { loss, grad })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Scores of sample `i`: `X[i] · W`, one dot product per class.
fn sample_scores(w: &Matrix, x: &Matrix, i: usize, dims: Dims) -> Vec<f64> {
    let mut scores = vec![0.0; dims.classes];
    for (j, score) in scores.iter_mut().enumerate() {
        for k in 0..dims.features {
            *score += x.data[i][k] * w.data[k][j];
        }
    }
    scores
}

/// Full objective: mean hinge loss plus `0.5 · reg · sum(W²)`.
fn objective(w: &Matrix, x: &Matrix, y: &[usize], reg: f64, delta: f64, dims: Dims) -> f64 {
    let mut data_loss = 0.0;
    for i in 0..dims.samples {
        let scores = sample_scores(w, x, i, dims);
        data_loss += HingeLoss::loss(&scores, y[i], delta);
    }

    let mut squares = 0.0;
    for f in 0..dims.features {
        for c in 0..dims.classes {
            squares += w.data[f][c] * w.data[f][c];
        }
    }

    data_loss / dims.samples as f64 + 0.5 * reg * squares
}

/// Forward differences over every (f, c) entry of W.
#[allow(clippy::too_many_arguments)]
fn finite_difference_gradient(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    delta: f64,
    step: f64,
    base_loss: f64,
    dims: Dims,
) -> Matrix {
    let mut probe = w.clone();
    let mut grad = Matrix::zeros(dims.features, dims.classes);

    for f in 0..dims.features {
        for c in 0..dims.classes {
            let perturbed = perturbed_objective(&mut probe, f, c, step, |probe| {
                objective(probe, x, y, reg, delta, dims)
            });
            grad.data[f][c] = (perturbed - base_loss) / step;
        }
        log::trace!("naive finite differences: feature row {} done", f);
    }

    grad
}

/// Evaluates `measure` with `probe[f][c]` nudged by `step`, then puts the
/// original value back.
fn perturbed_objective<F>(probe: &mut Matrix, f: usize, c: usize, step: f64, measure: F) -> f64
where
    F: Fn(&Matrix) -> f64,
{
    let old = probe.data[f][c];
    probe.data[f][c] = old + step;
    let value = measure(&*probe);
    probe.data[f][c] = old;
    value
}

/// Closed-form subgradient, accumulated sample by sample.
fn analytic_gradient(w: &Matrix, x: &Matrix, y: &[usize], reg: f64, delta: f64, dims: Dims) -> Matrix {
    let mut grad = Matrix::zeros(dims.features, dims.classes);

    for i in 0..dims.samples {
        let scores = sample_scores(w, x, i, dims);
        let correct = scores[y[i]];
        for j in 0..dims.classes {
            if j == y[i] || scores[j] - correct + delta <= 0.0 {
                continue;
            }
            for k in 0..dims.features {
                grad.data[k][j] += x.data[i][k];
                grad.data[k][y[i]] -= x.data[i][k];
            }
        }
    }

    let inv_n = 1.0 / dims.samples as f64;
    for f in 0..dims.features {
        for c in 0..dims.classes {
            grad.data[f][c] = grad.data[f][c] * inv_n + reg * w.data[f][c];
        }
    }

    grad
}
