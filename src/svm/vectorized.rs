use crate::error::SvmError;
use crate::loss::hinge::HingeLoss;
use crate::math::matrix::Matrix;
use crate::math::tensor::Tensor3;
use crate::svm::config::{EvalConfig, GradientMethod};
use crate::svm::evaluation::Evaluation;
use crate::svm::validate::{validate_inputs, Dims};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Hinge loss and gradient from whole-matrix operations, using the default
/// config (finite differences, h = 1e-5).
///
/// Same contract as [`evaluate_naive`](crate::svm::naive::evaluate_naive).
pub fn evaluate_vectorized(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<Evaluation, SvmError> {
    evaluate_vectorized_with(w, x, y, reg, &EvalConfig::default())
}

/// Matrix-operation evaluation with an explicit config.
///
/// With finite differences, the `C` perturbations of one feature row are
/// batched into a single product against a tiled weight matrix, so the
/// gradient costs `D` products of `X` with a `D × C²` matrix instead of
/// `D · C` products with `W`.
pub fn evaluate_vectorized_with(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    config: &EvalConfig,
) -> Result<Evaluation, SvmError> {
    config.validate()?;
    let dims = validate_inputs(w, x, y, reg)?;
    log::debug!(
        "vectorized hinge evaluation: N={} D={} C={} reg={} gradient={:?}",
        dims.samples, dims.features, dims.classes, reg, config.gradient
    );

    let scores = x.matmul(w)?;
    let loss = mean_hinge(&scores, y, config.delta, dims) + 0.5 * reg * w.sum_of_squares();

    let grad = match config.gradient {
        GradientMethod::FiniteDifference { step } => {
            batched_finite_difference(w, x, y, reg, config.delta, step, loss, dims)?
        }
        GradientMethod::Analytic => analytic_gradient(w, x, &scores, y, reg, config.delta, dims)?,
    };

    Ok(Evaluation { loss, grad })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Mean hinge loss of an N × C score matrix.
fn mean_hinge(scores: &Matrix, y: &[usize], delta: f64, dims: Dims) -> f64 {
    let total: f64 = scores.data
        .iter()
        .zip(y.iter())
        .map(|(row, &label)| HingeLoss::rectified_sum(row, label, delta))
        .sum();
    total / dims.samples as f64
}

/// Positions in the tiled weight row that hold entry `(f, k)` of copy `k`.
fn diagonal_columns(classes: usize) -> Vec<usize> {
    (0..classes).map(|k| k * classes + k).collect()
}

/// Forward differences, one batched product per feature row.
///
/// Copy `k` of the tiled weights (columns `k·C .. (k+1)·C`) carries the
/// perturbation of entry `(f, k)`, so after reshaping the product to
/// `(C, N, C)` slice `k` holds the scores under that perturbation.
#[allow(clippy::too_many_arguments)]
fn batched_finite_difference(
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
    delta: f64,
    step: f64,
    base_loss: f64,
    dims: Dims,
) -> Result<Matrix, SvmError> {
    let (n, d, c) = (dims.samples, dims.features, dims.classes);
    let cidx = diagonal_columns(c);
    let mut tiled = w.tile_cols(c);
    let mut grad = Matrix::zeros(d, c);

    for f in 0..d {
        let old: Vec<f64> = cidx.iter().map(|&col| tiled.data[f][col]).collect();
        for &col in &cidx {
            tiled.data[f][col] += step;
        }

        let measured = perturbed_terms(&tiled, x, y, delta, n, d, c);

        for (&col, &value) in cidx.iter().zip(old.iter()) {
            tiled.data[f][col] = value;
        }
        let (hinge_terms, reg_terms) = measured?;

        for k in 0..c {
            let perturbed = hinge_terms[k] + 0.5 * reg * reg_terms[k];
            grad.data[f][k] = (perturbed - base_loss) / step;
        }
        log::trace!("vectorized finite differences: feature row {} done", f);
    }

    Ok(grad)
}

/// Mean hinge loss and `sum(W²)` for each of the `C` perturbed copies.
fn perturbed_terms(
    tiled: &Matrix,
    x: &Matrix,
    y: &[usize],
    delta: f64,
    n: usize,
    d: usize,
    c: usize,
) -> Result<(Vec<f64>, Vec<f64>), SvmError> {
    // (N, C·C) -> (N, C, C) -> (C, N, C): perturbed copy, sample, class
    let replicated_scores = x.matmul(tiled)?;
    let scores = Tensor3::reshape_matrix(&replicated_scores, [n, c, c])?.permute([1, 0, 2])?;
    scores.expect_dims([c, n, c])?;

    let hinge_terms: Vec<f64> = (0..c)
        .map(|k| {
            let total: f64 = (0..n)
                .map(|i| HingeLoss::rectified_sum(scores.lane(k, i), y[i], delta))
                .sum();
            total / n as f64
        })
        .collect();

    // (D, C·C) -> (D, C, C) -> (C, D, C): perturbed copy, feature, class
    let weights = Tensor3::reshape_matrix(tiled, [d, c, c])?.permute([1, 0, 2])?;
    weights.expect_dims([c, d, c])?;
    let reg_terms: Vec<f64> = (0..c).map(|k| weights.slab_sum_of_squares(k)).collect();

    Ok((hinge_terms, reg_terms))
}

/// Closed-form subgradient: `Xᵀ · M / N + reg · W`, where row `i` of the
/// N × C coefficient matrix `M` is the hinge subgradient of sample `i`.
fn analytic_gradient(
    w: &Matrix,
    x: &Matrix,
    scores: &Matrix,
    y: &[usize],
    reg: f64,
    delta: f64,
    dims: Dims,
) -> Result<Matrix, SvmError> {
    let coefficients = Matrix::from_rows(
        scores.data
            .iter()
            .zip(y.iter())
            .map(|(row, &label)| HingeLoss::derivative(row, label, delta))
            .collect(),
        dims.classes,
    )?;
    let data_grad = x.transpose().matmul(&coefficients)?;
    Ok(data_grad.scale(1.0 / dims.samples as f64) + w.scale(reg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn diagonal_columns_pick_one_entry_per_copy() {
        assert_eq!(diagonal_columns(3), vec![0, 4, 8]);
        assert_eq!(diagonal_columns(1), vec![0]);
    }

    #[test]
    fn two_samples_one_feature() {
        let w = Matrix::from_data(vec![vec![5.0, 0.0]]);
        let x = Matrix::from_data(vec![vec![1.0], vec![1.0]]);
        let eval = evaluate_vectorized(&w, &x, &[0, 1], 0.0).unwrap();
        assert_eq!(eval.loss, 3.0);
        // only sample 1 violates: +x to class 0, -x to class 1, halved
        assert_abs_diff_eq!(eval.grad.data[0][0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(eval.grad.data[0][1], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn perturbed_terms_match_unperturbed_loss_without_step() {
        let w = Matrix::randn_seeded(3, 4, 0.5, 3);
        let x = Matrix::random_seeded(5, 3, 4);
        let y = [3, 0, 1, 2, 2];
        let scores = x.matmul(&w).unwrap();
        let dims = Dims { samples: 5, features: 3, classes: 4 };
        let base = mean_hinge(&scores, &y, 1.0, dims);

        let (hinge, reg) = perturbed_terms(&w.tile_cols(4), &x, &y, 1.0, 5, 3, 4).unwrap();
        for k in 0..4 {
            assert_abs_diff_eq!(hinge[k], base, epsilon = 1e-12);
            assert_abs_diff_eq!(reg[k], w.sum_of_squares(), epsilon = 1e-12);
        }
    }

    #[test]
    fn analytic_matches_finite_difference_away_from_kinks() {
        let w = Matrix::randn_seeded(5, 4, 0.1, 21);
        let x = Matrix::random_seeded(7, 5, 22);
        let y = [3, 0, 1, 2, 2, 1, 0];
        let numeric = evaluate_vectorized(&w, &x, &y, 0.1).unwrap();
        let analytic = evaluate_vectorized_with(&w, &x, &y, 0.1, &EvalConfig::analytic()).unwrap();
        assert_eq!(numeric.loss, analytic.loss);
        assert!(numeric.max_grad_diff(&analytic) < 1e-3);
    }
}
