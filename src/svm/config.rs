use serde::{Serialize, Deserialize};

use crate::error::SvmError;
use crate::loss::hinge::DEFAULT_DELTA;

/// Default forward-difference step.
pub const DEFAULT_STEP: f64 = 1e-5;

/// How the gradient w.r.t. the weights is obtained.
///
/// - `FiniteDifference` — forward differences: every weight entry is nudged by
///   `step` and the change in the full objective is divided by `step`.
///   Approximate, and `O(D·C)` objective evaluations.
/// - `Analytic`         — the closed-form subgradient of the hinge loss plus
///   `reg · W`. Exact away from margin kinks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMethod {
    FiniteDifference { step: f64 },
    Analytic,
}

impl Default for GradientMethod {
    fn default() -> Self {
        GradientMethod::FiniteDifference { step: DEFAULT_STEP }
    }
}

/// Settings shared by every evaluator.
///
/// # Fields
/// - `gradient` — gradient method, finite differences with step 1e-5 by default
/// - `delta`    — hinge margin, 1.0 by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub gradient: GradientMethod,
    #[serde(default = "default_delta")]
    pub delta: f64,
}

fn default_delta() -> f64 {
    DEFAULT_DELTA
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            gradient: GradientMethod::default(),
            delta: DEFAULT_DELTA,
        }
    }
}

impl EvalConfig {
    /// Closed-form gradient with the default margin.
    pub fn analytic() -> Self {
        EvalConfig { gradient: GradientMethod::Analytic, ..EvalConfig::default() }
    }

    /// Finite-difference gradient with a custom step.
    pub fn finite_difference(step: f64) -> Self {
        EvalConfig {
            gradient: GradientMethod::FiniteDifference { step },
            ..EvalConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), SvmError> {
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(SvmError::InvalidInput(format!(
                "margin delta must be finite and non-negative, got {}",
                self.delta
            )));
        }
        if let GradientMethod::FiniteDifference { step } = self.gradient {
            if !step.is_finite() || step <= 0.0 {
                return Err(SvmError::InvalidInput(format!(
                    "finite-difference step must be finite and positive, got {}",
                    step
                )));
            }
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), SvmError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<EvalConfig, SvmError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: EvalConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_finite_difference_with_unit_margin() {
        let cfg = EvalConfig::default();
        assert_eq!(cfg.gradient, GradientMethod::FiniteDifference { step: 1e-5 });
        assert_eq!(cfg.delta, 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_step_and_delta() {
        assert!(EvalConfig::finite_difference(0.0).validate().is_err());
        assert!(EvalConfig::finite_difference(f64::NAN).validate().is_err());
        let cfg = EvalConfig { delta: -1.0, ..EvalConfig::analytic() };
        assert!(matches!(cfg.validate(), Err(SvmError::InvalidInput(_))));
    }

    #[test]
    fn json_uses_snake_case_and_defaults() {
        let json = serde_json::to_string(&EvalConfig::analytic()).unwrap();
        assert_eq!(json, r#"{"gradient":"analytic","delta":1.0}"#);

        let cfg: EvalConfig =
            serde_json::from_str(r#"{"gradient":{"finite_difference":{"step":0.001}}}"#).unwrap();
        assert_eq!(cfg, EvalConfig::finite_difference(1e-3));

        let cfg: EvalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EvalConfig::default());
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.json");
        let path = path.to_str().unwrap();

        let cfg = EvalConfig { delta: 0.5, ..EvalConfig::finite_difference(1e-4) };
        cfg.save_json(path).unwrap();
        assert_eq!(EvalConfig::load_json(path).unwrap(), cfg);
    }

    #[test]
    fn load_json_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"gradient":"analytic","delta":-2.0}"#).unwrap();
        let err = EvalConfig::load_json(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SvmError::InvalidInput(_)));
    }
}
