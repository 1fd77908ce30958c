//! Error types for flight computations
//!
//! Every pure entry point validates its inputs eagerly and fails fast with a
//! structured [`FlightError`]; NaN and infinity are never allowed to leak into
//! a returned result.

use thiserror::Error;

/// Errors surfaced by the flight core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    /// Non-physical or malformed input (non-positive mass, non-finite field,
    /// unknown construction label, ...)
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// The value as supplied
        value: String,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// An integration that never reached its landing condition
    #[error("integration did not converge after {steps} steps ({elapsed:.2} s simulated): {reason}")]
    NonConvergent {
        /// Steps taken before giving up
        steps: usize,
        /// Simulated time at abort (s)
        elapsed: f64,
        /// Why the integration was abandoned
        reason: &'static str,
    },

    /// A computed metric outside the validation tolerance
    #[error(
        "validation mismatch on {metric}: expected {expected}, actual {actual} \
         (relative difference {difference:.4} > tolerance {tolerance})"
    )]
    ValidationMismatch {
        /// Metric name
        metric: &'static str,
        /// Reference value from the case
        expected: f64,
        /// Value computed by the engine
        actual: f64,
        /// Relative difference between the two
        difference: f64,
        /// Tolerance that was exceeded
        tolerance: f64,
    },
}

impl FlightError {
    /// Create an `InvalidInput` error for a field and its offending value.
    ///
    /// # Arguments
    /// * `field` - Name of the invalid field (e.g. `"mass"`, `"humidity"`)
    /// * `value` - The offending value
    /// * `reason` - The constraint that was violated (e.g. `"must be positive"`)
    pub fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// True for a validation mismatch, which is reported but never aborts a harness run
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::ValidationMismatch { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FlightError>;

/// Check that a scalar is finite
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FlightError::invalid(field, value, "must be finite"))
    }
}

/// Check that a scalar is finite and strictly positive
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FlightError::invalid(field, value, "must be positive"))
    }
}

/// Check that a scalar is finite and not negative
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(FlightError::invalid(field, value, "must not be negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = FlightError::invalid("mass", -1.0, "must be positive");
        assert_eq!(err.to_string(), "invalid input: mass = -1 (must be positive)");
        assert!(!err.is_mismatch());
    }

    #[test]
    fn test_mismatch_message_carries_literal_values() {
        let err = FlightError::ValidationMismatch {
            metric: "carry_distance",
            expected: 224.0,
            actual: 180.5,
            difference: 0.194,
            tolerance: 0.05,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 224"), "{msg}");
        assert!(msg.contains("actual 180.5"), "{msg}");
        assert!(err.is_mismatch());
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", -0.1).is_err());
    }
}
