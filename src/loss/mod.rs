pub mod hinge;

pub use hinge::{HingeLoss, DEFAULT_DELTA};
