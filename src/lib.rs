pub mod error;
pub mod math;
pub mod loss;
pub mod svm;

// Convenience re-exports
pub use error::SvmError;
pub use math::matrix::Matrix;
pub use loss::hinge::HingeLoss;
pub use svm::{
    evaluate_naive, evaluate_naive_with, evaluate_vectorized, evaluate_vectorized_with,
    grad_check, EvalConfig, Evaluation, GradCheckReport, GradientMethod, Strategy,
};
