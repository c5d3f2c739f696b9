use serde::{Serialize, Deserialize};

use crate::error::SvmError;
use crate::math::matrix::Matrix;

/// Floor for the relative-error denominator so that two zero entries agree.
const REL_FLOOR: f64 = 1e-12;

/// Outcome of comparing two gradients entry by entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradCheckReport {
    pub max_abs_error: f64,
    /// `|a - b| / max(|a| + |b|, 1e-12)`, maximised over entries.
    pub max_rel_error: f64,
    /// Entry with the largest relative error; `None` for empty gradients.
    pub worst_entry: Option<(usize, usize)>,
    /// True when every entry is within `tolerance`, either absolutely or
    /// relatively.
    pub passed: bool,
}

/// Compares a numeric gradient against an analytic one.
///
/// Small gradients are judged absolutely and large ones relatively, which
/// keeps entries near zero from failing on finite-difference noise.
pub fn grad_check(numeric: &Matrix, analytic: &Matrix, tolerance: f64) -> Result<GradCheckReport, SvmError> {
    if numeric.shape() != analytic.shape() {
        return Err(SvmError::InvalidShape(format!(
            "cannot compare {}x{} gradient with {}x{}",
            numeric.rows, numeric.cols, analytic.rows, analytic.cols
        )));
    }

    let mut report = GradCheckReport {
        max_abs_error: 0.0,
        max_rel_error: 0.0,
        worst_entry: None,
        passed: true,
    };

    for (f, (row_n, row_a)) in numeric.data.iter().zip(analytic.data.iter()).enumerate() {
        for (c, (&a, &b)) in row_n.iter().zip(row_a.iter()).enumerate() {
            let abs_error = (a - b).abs();
            let rel_error = abs_error / (a.abs() + b.abs()).max(REL_FLOOR);

            report.max_abs_error = report.max_abs_error.max(abs_error);
            if report.worst_entry.is_none() || rel_error > report.max_rel_error {
                report.max_rel_error = rel_error;
                report.worst_entry = Some((f, c));
            }
            if abs_error > tolerance && rel_error > tolerance {
                report.passed = false;
            }
        }
    }

    if !report.passed {
        log::warn!(
            "gradient check failed: max abs error {:.3e}, max rel error {:.3e} at {:?}",
            report.max_abs_error, report.max_rel_error, report.worst_entry
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_gradients_pass() {
        let g = Matrix::from_data(vec![vec![0.0, 1.5], vec![-2.0, 0.25]]);
        let report = grad_check(&g, &g, 1e-7).unwrap();
        assert!(report.passed);
        assert_eq!(report.max_abs_error, 0.0);
        assert_eq!(report.max_rel_error, 0.0);
        assert_eq!(report.worst_entry, Some((0, 0)));
    }

    #[test]
    fn reports_worst_entry() {
        let a = Matrix::from_data(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let b = Matrix::from_data(vec![vec![1.0, 1.0], vec![1.0, 3.0]]);
        let report = grad_check(&a, &b, 1e-3).unwrap();
        assert!(!report.passed);
        assert_eq!(report.worst_entry, Some((1, 1)));
        assert_eq!(report.max_abs_error, 2.0);
        assert_eq!(report.max_rel_error, 0.5);
    }

    #[test]
    fn tiny_absolute_noise_passes() {
        let a = Matrix::from_data(vec![vec![0.0, 2.0]]);
        let b = Matrix::from_data(vec![vec![1e-9, 2.0]]);
        assert!(grad_check(&a, &b, 1e-6).unwrap().passed);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let err = grad_check(&Matrix::zeros(2, 2), &Matrix::zeros(2, 3), 1e-3).unwrap_err();
        assert!(matches!(err, SvmError::InvalidShape(_)));
    }
}
