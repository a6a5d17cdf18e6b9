//! Internal helpers for payload validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every record kind enforces the same invariants.

use crate::{EngineError, ResultEngine};

/// Reject blank required text.
pub(crate) fn require_text(value: &str, label: &str) -> ResultEngine<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(())
}

/// Trim optional text, mapping blank values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reject negative, NaN and infinite measurements.
pub(crate) fn require_measure(value: f64, label: &str) -> ResultEngine<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be a finite value >= 0"
        )));
    }
    Ok(())
}

/// Reject zero or negative piece counts.
pub(crate) fn require_pieces(value: i32, label: &str) -> ResultEngine<()> {
    if value <= 0 {
        return Err(EngineError::InvalidInput(format!("{label} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("  ", "mawb_no").is_err());
        assert!(require_text("176-12345675", "mawb_no").is_ok());
    }

    #[test]
    fn optional_text_is_trimmed() {
        assert_eq!(normalize_optional_text(Some("  HKG ")), Some("HKG".to_string()));
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn measures_must_be_finite_and_non_negative() {
        assert!(require_measure(0.0, "weight").is_ok());
        assert!(require_measure(-0.5, "weight").is_err());
        assert!(require_measure(f64::NAN, "weight").is_err());
        assert!(require_measure(f64::INFINITY, "weight").is_err());
    }
}
