pub mod check;
pub mod config;
pub mod evaluation;
pub mod naive;
pub mod strategy;
pub mod validate;
pub mod vectorized;

pub use check::{grad_check, GradCheckReport};
pub use config::{EvalConfig, GradientMethod};
pub use evaluation::Evaluation;
pub use naive::{evaluate_naive, evaluate_naive_with};
pub use strategy::Strategy;
pub use vectorized::{evaluate_vectorized, evaluate_vectorized_with};
