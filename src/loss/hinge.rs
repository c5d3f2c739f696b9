/// Multiclass hinge loss (structured SVM loss) for a single sample.
pub struct HingeLoss;

/// Default margin between the ground-truth score and every other score.
pub const DEFAULT_DELTA: f64 = 1.0;

impl HingeLoss {
    /// Scalar hinge loss for one sample:
    ///   L = sum over j != label of max(0, scores[j] - scores[label] + delta)
    ///
    /// `label` must be a valid index into `scores`.
    pub fn loss(scores: &[f64], label: usize, delta: f64) -> f64 {
        let correct = scores[label];
        scores.iter()
            .enumerate()
            .filter(|(j, _)| *j != label)
            .map(|(_, s)| (s - correct + delta).max(0.0))
            .sum()
    }

    /// Same value as `loss`, computed the way a whole-row operation would:
    /// rectify every margin (the ground-truth column included) and subtract
    /// the ground-truth column's term, which is always exactly `delta`.
    pub fn rectified_sum(scores: &[f64], label: usize, delta: f64) -> f64 {
        let correct = scores[label];
        let total: f64 = scores.iter()
            .map(|s| (s - correct + delta).max(0.0))
            .sum();
        total - delta
    }

    /// Subgradient of `loss` w.r.t. `scores`.
    ///
    /// Every violating class j (margin > 0) gets +1; the ground-truth class
    /// gets -1 per violation.
    pub fn derivative(scores: &[f64], label: usize, delta: f64) -> Vec<f64> {
        let correct = scores[label];
        let mut grad: Vec<f64> = scores.iter()
            .enumerate()
            .map(|(j, s)| {
                if j != label && s - correct + delta > 0.0 { 1.0 } else { 0.0 }
            })
            .collect();
        let violations: f64 = grad.iter().sum();
        grad[label] = -violations;
        grad
    }
}
