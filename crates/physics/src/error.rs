//! Configuration errors.
//!
//! Locomotion has no recoverable runtime errors: denied actions and
//! re-triggered transitions are policy, not failures. What can fail is
//! construction, when a tunable is out of range or a collaborator is missing.

use thiserror::Error;

/// Errors raised while validating configuration or wiring collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("crouching height {crouching} must not exceed standing height {standing}")]
    CrouchAboveStanding { crouching: f32, standing: f32 },

    #[error("landing height reduction {reduction} must be smaller than crouching height {crouching}")]
    ReductionTooLarge { reduction: f32, crouching: f32 },

    #[error("gravity must point down (negative), got {0}")]
    GravityNotDownward(f32),

    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

/// Shorthand for validation results.
pub type ConfigResult<T = ()> = Result<T, ConfigError>;

pub fn finite(field: &'static str, value: f32) -> ConfigResult {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub fn positive(field: &'static str, value: f32) -> ConfigResult {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub fn non_negative(field: &'static str, value: f32) -> ConfigResult {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> ConfigResult {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
