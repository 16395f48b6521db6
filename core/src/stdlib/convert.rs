//! Conversions between kinds
//!
//! Converting a value to its own kind forwards the argument unchanged.
//! `to_float` of an Integer needs no handler of its own: resolution promotes
//! the argument and the Float pass-through forwards its shadow.
//!
//! Parsing is strict: surrounding whitespace is ignored, anything else that
//! does not parse fails with `InvalidConversion`.

use core::fmt::Write as _;

use super::{boolean, float, int};
use crate::evaluator::{Arguments, ExecutionErrorKind, ResultSlot, RuntimeError};
use crate::registry::{FunctionId, HandlerResult, KindPattern, Registry};
use crate::values::ValueKind;

pub const TO_STRING: FunctionId = FunctionId::new("to_string");
pub const TO_FLOAT: FunctionId = FunctionId::new("to_float");
pub const TO_INT: FunctionId = FunctionId::new("to_int");
pub const TO_BOOL: FunctionId = FunctionId::new("to_bool");

pub fn register_convert_functions(registry: &mut Registry) {
    use ValueKind::{Boolean, Float, Integer};

    registry
        .register(TO_STRING, identity, [ValueKind::String], false)
        .register(TO_STRING, format_value, [KindPattern::Any], false)
        .alias("to_string", TO_STRING);
    registry
        .register(TO_FLOAT, identity, [Float], false)
        .register(TO_FLOAT, parse_float, [ValueKind::String], false)
        .register(TO_FLOAT, float_from_bool, [Boolean], false)
        .alias("to_float", TO_FLOAT);
    registry
        .register(TO_INT, identity, [Integer], false)
        .register(TO_INT, truncate_float, [Float], false)
        .register(TO_INT, parse_int, [ValueKind::String], false)
        .register(TO_INT, int_from_bool, [Boolean], false)
        .alias("to_int", TO_INT);
    registry
        .register(TO_BOOL, identity, [Boolean], false)
        .register(TO_BOOL, bool_from_int, [Integer], false)
        .register(TO_BOOL, bool_from_float, [Float], false)
        .register(TO_BOOL, parse_bool, [ValueKind::String], false)
        .alias("to_bool", TO_BOOL);
}

fn invalid(text: impl Into<String>, target: ValueKind) -> ExecutionErrorKind {
    RuntimeError::InvalidConversion {
        text: text.into(),
        target,
    }
    .into()
}

fn identity(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.forward(args, 0)?;
    Ok(())
}

fn format_value(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let value = args.get(0)?;
    out.write_string_with(|buffer| write!(buffer, "{}", *value))
        .map_err(|_| invalid(value.to_string(), ValueKind::String))
}

fn parse_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let text = args.get(0)?;
    let text = text.expect_str()?;
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            out.write_float(value);
            Ok(())
        }
        _ => Err(invalid(text, ValueKind::Float)),
    }
}

fn float_from_bool(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(if boolean(args, 0)? { 1.0 } else { 0.0 });
    Ok(())
}

/// Truncates toward zero.
fn truncate_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let value = float(args, 0)?;
    // 2^63 is exactly representable; every finite float below it truncates
    // into range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !(value.is_finite() && value.trunc() >= -LIMIT && value.trunc() < LIMIT) {
        return Err(invalid(value.to_string(), ValueKind::Integer));
    }
    out.write_int(value.trunc() as i64);
    Ok(())
}

fn parse_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let text = args.get(0)?;
    let text = text.expect_str()?;
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(text, ValueKind::Integer))?;
    out.write_int(value);
    Ok(())
}

fn int_from_bool(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_int(i64::from(boolean(args, 0)?));
    Ok(())
}

fn bool_from_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(int(args, 0)? != 0);
    Ok(())
}

fn bool_from_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(float(args, 0)? != 0.0);
    Ok(())
}

/// Accepts `true` and `false` in any letter case.
fn parse_bool(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let text = args.get(0)?;
    let text = text.expect_str()?;
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        out.write_bool(true);
    } else if trimmed.eq_ignore_ascii_case("false") {
        out.write_bool(false);
    } else {
        return Err(invalid(text, ValueKind::Boolean));
    }
    Ok(())
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod convert_test;
