use thiserror::Error;

/// Failures talking to the host environment (window, document, frame scheduler).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host unavailable: {0}")]
    Unavailable(&'static str),
    #[error("listener for `{event}` rejected: {reason}")]
    ListenerRejected { event: &'static str, reason: String },
    #[error("animation frame request rejected: {0}")]
    FrameRejected(String),
}

/// Failures applying a widget configuration override.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config must be a json object, got {0}")]
    NotAnObject(&'static str),
    #[error("malformed color literal `{0}`")]
    Color(String),
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be at least {min}, got {value}")]
    BelowMinimum { field: &'static str, min: f32, value: f32 },
    #[error("`{field}` must be at most {max}, got {value}")]
    AboveMaximum { field: &'static str, max: f32, value: f32 },
    #[error("range `{field}` is inverted: {min} > {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },
    #[error("label catalog is empty")]
    EmptyCatalog,
}

impl ConfigError {
    /// Reject a non-positive (or NaN) value.
    pub fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { field, value })
        }
    }

    pub fn check_at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
        if value >= min {
            Ok(())
        } else {
            Err(ConfigError::BelowMinimum { field, min, value })
        }
    }

    pub fn check_at_most(field: &'static str, value: f32, max: f32) -> Result<(), ConfigError> {
        if value <= max {
            Ok(())
        } else {
            Err(ConfigError::AboveMaximum { field, max, value })
        }
    }

    /// Reject `min > max`.
    pub fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
        if min <= max {
            Ok(())
        } else {
            Err(ConfigError::InvertedRange { field, min, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check() {
        assert!(ConfigError::check_positive("spacing", 24.0).is_ok());
        assert!(ConfigError::check_positive("spacing", 0.0).is_err());
        assert!(ConfigError::check_positive("spacing", f32::NAN).is_err());
    }

    #[test]
    fn bound_checks() {
        assert!(ConfigError::check_at_least("spacing", 1.0, 1.0).is_ok());
        assert!(matches!(
            ConfigError::check_at_least("spacing", 0.5, 1.0),
            Err(ConfigError::BelowMinimum { field: "spacing", .. })
        ));
        assert!(ConfigError::check_at_most("layers", 32.0, 32.0).is_ok());
        let err = ConfigError::check_at_most("layers", 33.0, 32.0).unwrap_err();
        assert_eq!(err.to_string(), "`layers` must be at most 32, got 33");
    }

    #[test]
    fn range_check_message() {
        let err = ConfigError::check_range("pitch", 60.0, -60.0).unwrap_err();
        assert_eq!(err.to_string(), "range `pitch` is inverted: 60 > -60");
    }
}
