//! Numeric-domain checks shared by scalar and tensor operations.

use crate::config;
use crate::error::MesogradError;
use num_traits::Float;

/// Validates that `input` lies inside the domain of `operation`.
///
/// `valid` is the domain predicate. When it fails and the engine is not configured to let
/// non-finite values through, a `NumericDomain` error naming the offending input is returned.
pub(crate) fn check_domain<T, F>(operation: &str, input: T, valid: F) -> Result<(), MesogradError>
where
    T: Float,
    F: Fn(T) -> bool,
{
    if valid(input) {
        return Ok(());
    }
    if config::current().allow_non_finite {
        log::warn!(
            "{}: input {:?} outside the domain, continuing because allow_non_finite is set",
            operation,
            input.to_f64()
        );
        return Ok(());
    }
    Err(MesogradError::NumericDomain {
        operation: operation.to_string(),
        value: input.to_f64().unwrap_or(f64::NAN),
    })
}

/// Validates that a forward result is finite.
///
/// `input` is reported in the error so that the caller can find the element that overflowed.
pub(crate) fn check_finite<T: Float>(operation: &str, input: T, output: T) -> Result<T, MesogradError> {
    if output.is_finite() {
        return Ok(output);
    }
    if config::current().allow_non_finite {
        log::warn!(
            "{}: non-finite result {:?} allowed by configuration",
            operation,
            output.to_f64()
        );
        return Ok(output);
    }
    Err(MesogradError::NumericDomain {
        operation: operation.to_string(),
        value: input.to_f64().unwrap_or(f64::NAN),
    })
}

/// Domain of `base ** exponent` over the reals.
pub(crate) fn pow_domain<T: Float>(base: T, exponent: T) -> bool {
    if base < T::zero() && exponent.fract() != T::zero() {
        return false;
    }
    !(base == T::zero() && exponent < T::zero())
}
