use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvmError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid label {label} for sample {sample}: expected a class in [0, {classes})")]
    InvalidLabel {
        sample: usize,
        label: usize,
        classes: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_label_display() {
        let err = SvmError::InvalidLabel { sample: 3, label: 5, classes: 4 };
        assert_eq!(
            err.to_string(),
            "Invalid label 5 for sample 3: expected a class in [0, 4)"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: SvmError = parse.unwrap_err().into();
        assert!(matches!(err, SvmError::Json(_)));
    }
}
