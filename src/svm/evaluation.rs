use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Result of one loss/gradient evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Mean hinge loss over the minibatch plus `0.5 · reg · sum(W²)`.
    pub loss: f64,
    /// Gradient of `loss` w.r.t. W, shape D × C.
    pub grad: Matrix,
}

impl Evaluation {
    pub fn into_parts(self) -> (f64, Matrix) {
        (self.loss, self.grad)
    }

    /// Largest absolute difference between two gradients of the same shape.
    ///
    /// # Panics
    /// Panics if the gradient shapes differ.
    pub fn max_grad_diff(&self, other: &Evaluation) -> f64 {
        (self.grad.clone() - other.grad.clone()).max_abs()
    }
}
