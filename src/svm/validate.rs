use crate::error::SvmError;
use crate::math::matrix::Matrix;

/// Problem dimensions after validation: N samples, D features, C classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub samples: usize,
    pub features: usize,
    pub classes: usize,
}

/// Checks every precondition of an evaluation before any work is done.
///
/// Shapes come first (`InvalidShape`), then emptiness and finiteness
/// (`InvalidInput`), then labels (`InvalidLabel`).
pub fn validate_inputs(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<Dims, SvmError> {
    check_rectangular("W", w)?;
    check_rectangular("X", x)?;

    if x.cols != w.rows {
        return Err(SvmError::InvalidShape(format!(
            "X has {} features per sample but W has {} rows",
            x.cols, w.rows
        )));
    }
    if x.rows != y.len() {
        return Err(SvmError::InvalidShape(format!(
            "X has {} samples but y has {} labels",
            x.rows,
            y.len()
        )));
    }

    let dims = Dims { samples: x.rows, features: w.rows, classes: w.cols };

    if dims.samples == 0 {
        return Err(SvmError::InvalidInput("minibatch is empty (N = 0)".to_string()));
    }
    if dims.classes == 0 {
        return Err(SvmError::InvalidInput("W has no classes (C = 0)".to_string()));
    }
    if !reg.is_finite() || reg < 0.0 {
        return Err(SvmError::InvalidInput(format!(
            "regularization strength must be finite and non-negative, got {}",
            reg
        )));
    }
    if !w.is_finite() {
        return Err(SvmError::InvalidInput("W contains non-finite values".to_string()));
    }
    if !x.is_finite() {
        return Err(SvmError::InvalidInput("X contains non-finite values".to_string()));
    }

    if let Some((sample, &label)) = y.iter().enumerate().find(|&(_, &label)| label >= dims.classes) {
        return Err(SvmError::InvalidLabel { sample, label, classes: dims.classes });
    }

    Ok(dims)
}

/// `Matrix` fields are public, so the declared shape is not trusted.
fn check_rectangular(name: &str, m: &Matrix) -> Result<(), SvmError> {
    if m.data.len() != m.rows || m.data.iter().any(|row| row.len() != m.cols) {
        return Err(SvmError::InvalidShape(format!(
            "{} declares {}x{} but its rows do not match",
            name, m.rows, m.cols
        )));
    }
    Ok(())
}
