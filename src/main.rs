// Demo: evaluates one seeded random problem with every strategy and gradient
// method, then checks the finite-difference gradients against the closed form.
// Set RUST_LOG=debug to see the evaluators' own logging.
use std::time::Instant;

use hinge_svm::{grad_check, EvalConfig, Matrix, Strategy, SvmError};

const SAMPLES: usize = 64;
const FEATURES: usize = 24;
const CLASSES: usize = 5;
const REG: f64 = 0.05;

fn main() -> Result<(), SvmError> {
    env_logger::init();

    let w = Matrix::randn_seeded(FEATURES, CLASSES, 1e-2, 1);
    let x = Matrix::random_seeded(SAMPLES, FEATURES, 2);
    let y: Vec<usize> = (0..SAMPLES).map(|i| (i * 7 + 3) % CLASSES).collect();

    println!("hinge-svm: N={SAMPLES} D={FEATURES} C={CLASSES} reg={REG}");

    let exact = Strategy::Vectorized.evaluate(&w, &x, &y, REG, &EvalConfig::analytic())?;

    for strategy in Strategy::ALL {
        for config in [EvalConfig::default(), EvalConfig::analytic()] {
            let t_start = Instant::now();
            let eval = strategy.evaluate(&w, &x, &y, REG, &config)?;
            let elapsed = t_start.elapsed();
            let report = grad_check(&eval.grad, &exact.grad, 1e-4)?;

            println!(
                "{:<10} {:<45} loss = {:.6}  max |dW - exact| = {:.2e}  ({} ms)",
                format!("{strategy:?}"),
                format!("{:?}", config.gradient),
                eval.loss,
                report.max_abs_error,
                elapsed.as_millis()
            );
        }
    }

    Ok(())
}
