//! Math functions
//!
//! Float functions: ln, log10, sqrt, exp, sin, cos, tan, atan2, floor, ceil,
//! round, lerp
//! Integer and Float: abs, min, max, clamp
//!
//! Integer arguments to Float-only functions are promoted, so `sqrt(4)` is
//! `2.0`. Results outside the domain (`ln(-3)`, `sqrt(-1)`) surface through
//! the floating-point traps as arithmetic domain errors.

use super::{float, int};
use crate::evaluator::{Arguments, ExecutionErrorKind, ResultSlot, RuntimeError};
use crate::registry::{FunctionId, HandlerResult, NativeHandler, Registry};
use crate::values::ValueKind::{Float, Integer};

pub const LN: FunctionId = FunctionId::new("ln");
pub const LOG10: FunctionId = FunctionId::new("log10");
pub const SQRT: FunctionId = FunctionId::new("sqrt");
pub const EXP: FunctionId = FunctionId::new("exp");
pub const SIN: FunctionId = FunctionId::new("sin");
pub const COS: FunctionId = FunctionId::new("cos");
pub const TAN: FunctionId = FunctionId::new("tan");
pub const ATAN2: FunctionId = FunctionId::new("atan2");
pub const FLOOR: FunctionId = FunctionId::new("floor");
pub const CEIL: FunctionId = FunctionId::new("ceil");
pub const ROUND: FunctionId = FunctionId::new("round");
pub const ABS: FunctionId = FunctionId::new("abs");
pub const MIN: FunctionId = FunctionId::new("min");
pub const MAX: FunctionId = FunctionId::new("max");
pub const CLAMP: FunctionId = FunctionId::new("clamp");
pub const LERP: FunctionId = FunctionId::new("lerp");

/// Defines one `Float -> Float` handler per entry.
macro_rules! unary_float {
    ($($handler:ident => $op:path),* $(,)?) => {
        $(
            fn $handler(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
                out.write_float($op(float(args, 0)?));
                Ok(())
            }
        )*
    };
}

unary_float! {
    ln => f64::ln,
    log10 => f64::log10,
    sqrt => f64::sqrt,
    exp => f64::exp,
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    floor => f64::floor,
    ceil => f64::ceil,
    round => f64::round,
    abs_float => f64::abs,
}

pub fn register_math_functions(registry: &mut Registry) {
    let unary: [(FunctionId, NativeHandler); 10] = [
        (LN, ln),
        (LOG10, log10),
        (SQRT, sqrt),
        (EXP, exp),
        (SIN, sin),
        (COS, cos),
        (TAN, tan),
        (FLOOR, floor),
        (CEIL, ceil),
        (ROUND, round),
    ];
    for (function, handler) in unary {
        registry
            .register(function, handler, [Float], false)
            .alias(function.name(), function);
    }

    registry
        .register(ATAN2, atan2, [Float, Float], false)
        .alias("atan2", ATAN2);
    registry
        .register(ABS, abs_int, [Integer], false)
        .register(ABS, abs_float, [Float], false)
        .alias("abs", ABS);
    registry
        .register(MIN, min_int, [Integer], true)
        .register(MIN, min_float, [Float], true)
        .alias("min", MIN);
    registry
        .register(MAX, max_int, [Integer], true)
        .register(MAX, max_float, [Float], true)
        .alias("max", MAX);
    registry
        .register(CLAMP, clamp_int, [Integer, Integer, Integer], false)
        .register(CLAMP, clamp_float, [Float, Float, Float], false)
        .alias("clamp", CLAMP);
    registry
        .register(LERP, lerp, [Float, Float, Float], false)
        .alias("lerp", LERP);
}

/// `atan2(y, x)`: angle of the point `(x, y)`.
fn atan2(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(float(args, 0)?.atan2(float(args, 1)?));
    Ok(())
}

fn abs_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let value = int(args, 0)?;
    out.write_int(value.checked_abs().ok_or(RuntimeError::IntegerOverflow)?);
    Ok(())
}

fn min_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut min = int(args, 0)?;
    for index in 1..args.len() {
        min = min.min(int(args, index)?);
    }
    out.write_int(min);
    Ok(())
}

/// NaN arguments are ignored unless every argument is NaN.
fn min_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut min = float(args, 0)?;
    for index in 1..args.len() {
        min = min.min(float(args, index)?);
    }
    out.write_float(min);
    Ok(())
}

fn max_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut max = int(args, 0)?;
    for index in 1..args.len() {
        max = max.max(int(args, index)?);
    }
    out.write_int(max);
    Ok(())
}

fn max_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut max = float(args, 0)?;
    for index in 1..args.len() {
        max = max.max(float(args, index)?);
    }
    out.write_float(max);
    Ok(())
}

fn inverted_bounds() -> ExecutionErrorKind {
    RuntimeError::ArithmeticDomain("clamp bounds are inverted").into()
}

/// `clamp(value, lo, hi)`.
fn clamp_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let (value, lo, hi) = (int(args, 0)?, int(args, 1)?, int(args, 2)?);
    if lo > hi {
        return Err(inverted_bounds());
    }
    out.write_int(value.clamp(lo, hi));
    Ok(())
}

fn clamp_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let (value, lo, hi) = (float(args, 0)?, float(args, 1)?, float(args, 2)?);
    // Also rejects NaN bounds.
    if !(lo <= hi) {
        return Err(inverted_bounds());
    }
    out.write_float(value.clamp(lo, hi));
    Ok(())
}

/// `lerp(a, b, t)`: `a` at `t = 0`, `b` at `t = 1`, unclamped.
fn lerp(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let (a, b, t) = (float(args, 0)?, float(args, 1)?, float(args, 2)?);
    out.write_float(a + (b - a) * t);
    Ok(())
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
