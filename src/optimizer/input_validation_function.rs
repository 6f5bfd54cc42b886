use crate::error::{Result, RnnError};

/// Validates that the learning rate is positive and finite.
///
/// # Parameters
///
/// * `learning_rate` - The learning rate value to validate
///
/// # Returns
///
/// - `Ok(())` if the learning rate is positive and finite
/// - `Err(RnnError::ConfigurationError)` if the learning rate is not positive or not finite
pub(super) fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(RnnError::configuration(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Validates that a decay rate is in the range [0, 1) and finite.
///
/// # Parameters
///
/// - `value` - The decay rate value to validate
/// - `param_name` - The name of the parameter (for error messages)
pub(super) fn validate_decay_rate(value: f64, param_name: &str) -> Result<()> {
    if !((0.0..1.0).contains(&value) && value.is_finite()) {
        return Err(RnnError::configuration(format!(
            "{} must be in range [0, 1) and finite, got {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates the step multiplier bounds: both positive and finite, `min <= max`.
///
/// # Parameters
///
/// - `min_multiplier` - Lower clamp of the per-element step multiplier
/// - `max_multiplier` - Upper clamp of the per-element step multiplier
///
/// # Returns
///
/// - `Ok(())` if `0 < min_multiplier <= max_multiplier < inf`
/// - `Err(RnnError::ConfigurationError)` otherwise
pub(super) fn validate_multiplier_bounds(min_multiplier: f64, max_multiplier: f64) -> Result<()> {
    validate_positive_finite(min_multiplier, "min_multiplier")?;
    validate_positive_finite(max_multiplier, "max_multiplier")?;
    if min_multiplier > max_multiplier {
        return Err(RnnError::configuration(format!(
            "min_multiplier ({}) must not exceed max_multiplier ({})",
            min_multiplier, max_multiplier
        )));
    }
    Ok(())
}

/// Validates that a value is positive and finite.
pub(super) fn validate_positive_finite(value: f64, param_name: &str) -> Result<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(RnnError::configuration(format!(
            "{} must be positive and finite, got {}",
            param_name, value
        )));
    }
    Ok(())
}
