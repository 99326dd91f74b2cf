//! Error types shared across the engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Reject negative or non-finite values
pub(crate) fn require_non_negative(field: &str, value: f64) -> AnalyzerResult<()> {
    if !value.is_finite() {
        return Err(AnalyzerError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(AnalyzerError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}

/// Reject zero, negative or non-finite values
pub(crate) fn require_positive(field: &str, value: f64) -> AnalyzerResult<()> {
    if !value.is_finite() {
        return Err(AnalyzerError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(AnalyzerError::invalid(field, format!("must be positive (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = AnalyzerError::invalid("principal", "must be positive");
        assert_eq!(err.to_string(), "Invalid input: principal - must be positive");
    }

    #[test]
    fn test_range_checks() {
        assert!(require_non_negative("rate", 0.0).is_ok());
        assert!(require_non_negative("rate", -0.01).is_err());
        assert!(require_non_negative("rate", f64::NAN).is_err());
        assert!(require_positive("price", 0.0).is_err());
        assert!(require_positive("price", f64::INFINITY).is_err());
        assert!(require_positive("price", 1.0).is_ok());
    }
}
