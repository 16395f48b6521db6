//! Floating-point exception checks run after every handler call.

use super::{Arguments, ExecutionErrorKind, ResultSlot, RuntimeError};
use crate::api::FloatTraps;

/// Fail when a handler produced a non-finite Float that its arguments do not
/// explain.
///
/// A NaN result is only accepted if some Float argument was NaN, and an
/// infinite result only if some Float argument was NaN or infinite.
/// Forwarded results are the argument itself and are never checked.
pub(crate) fn check(
    traps: FloatTraps,
    args: &Arguments<'_>,
    slot: &ResultSlot,
) -> Result<(), ExecutionErrorKind> {
    let Some(result) = slot.value().and_then(|value| value.as_float()) else {
        return Ok(());
    };
    if result.is_finite() || !(traps.invalid || traps.infinite) {
        return Ok(());
    }

    let mut nan_input = false;
    let mut infinite_input = false;
    for arg in args.iter() {
        if let Some(x) = arg?.as_float() {
            nan_input |= x.is_nan();
            infinite_input |= x.is_infinite();
        }
    }

    if result.is_nan() {
        if traps.invalid && !nan_input {
            return Err(RuntimeError::ArithmeticDomain("invalid floating-point operation").into());
        }
    } else if traps.infinite && !nan_input && !infinite_input {
        return Err(RuntimeError::ArithmeticDomain("floating-point result is infinite").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Expression;
    use crate::values::Value;

    const ALL: FloatTraps = FloatTraps {
        invalid: true,
        infinite: true,
    };

    fn check_with(traps: FloatTraps, inputs: &[f64], result: f64) -> Result<(), ExecutionErrorKind> {
        let args: Vec<Expression> = inputs.iter().map(|&x| Value::float(x).into()).collect();
        let mut slot = ResultSlot::default();
        slot.write_float(result);
        check(traps, &Arguments::new(&args, &[]), &slot)
    }

    #[test]
    fn test_finite_results_pass() {
        assert!(check_with(ALL, &[1.0, 2.0], 3.0).is_ok());
    }

    #[test]
    fn test_nan_from_finite_inputs_is_trapped() {
        let err = check_with(ALL, &[-3.0], f64::NAN).unwrap_err();
        assert_eq!(
            err,
            ExecutionErrorKind::Runtime(RuntimeError::ArithmeticDomain(
                "invalid floating-point operation"
            ))
        );
    }

    #[test]
    fn test_nan_input_propagates() {
        assert!(check_with(ALL, &[f64::NAN, 1.0], f64::NAN).is_ok());
        assert!(check_with(ALL, &[f64::NAN], f64::INFINITY).is_ok());
    }

    #[test]
    fn test_infinity_from_finite_inputs_is_trapped() {
        assert!(check_with(ALL, &[1.0, 0.0], f64::INFINITY).is_err());
        assert!(check_with(ALL, &[f64::INFINITY, 1.0], f64::INFINITY).is_ok());
    }

    #[test]
    fn test_traps_can_be_disabled() {
        let lenient = FloatTraps {
            invalid: false,
            infinite: false,
        };
        assert!(check_with(lenient, &[-3.0], f64::NAN).is_ok());
        assert!(check_with(lenient, &[1.0], f64::NEG_INFINITY).is_ok());

        let invalid_only = FloatTraps {
            invalid: true,
            infinite: false,
        };
        assert!(check_with(invalid_only, &[1.0], f64::INFINITY).is_ok());
        assert!(check_with(invalid_only, &[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_non_float_results_are_ignored() {
        let args = [Expression::literal(Value::float(f64::NAN))];
        let mut slot = ResultSlot::default();
        slot.write_bool(false);
        assert!(check(ALL, &Arguments::new(&args, &[]), &slot).is_ok());
    }
}
