//! Arithmetic operators
//!
//! Integer arithmetic is checked: overflow fails with `IntegerOverflow`
//! instead of wrapping. Float arithmetic follows IEEE 754, with non-finite
//! results subject to the engine's floating-point traps.
//!
//! Functions:
//! - `add(a, b, ...)` (`+`), `mul(a, b, ...)` (`*`): variadic
//! - `sub(a, b)` (`-`), `neg(a)`
//! - `div(a, b)` (`/`), `rem(a, b)` (`%`): Euclidean on integers
//! - `pow(a, b)` (`^`)

use super::{float, int};
use crate::evaluator::{Arguments, ExecutionErrorKind, ResultSlot, RuntimeError};
use crate::registry::{FunctionId, HandlerResult, Registry};
use crate::values::ValueKind::{Float, Integer};

pub const ADD: FunctionId = FunctionId::new("add");
pub const SUB: FunctionId = FunctionId::new("sub");
pub const MUL: FunctionId = FunctionId::new("mul");
pub const DIV: FunctionId = FunctionId::new("div");
pub const REM: FunctionId = FunctionId::new("rem");
pub const NEG: FunctionId = FunctionId::new("neg");
pub const POW: FunctionId = FunctionId::new("pow");

pub fn register_arith_functions(registry: &mut Registry) {
    registry
        .register(ADD, add_int, [Integer], true)
        .register(ADD, add_float, [Float], true)
        .alias("+", ADD);
    registry
        .register(SUB, sub_int, [Integer, Integer], false)
        .register(SUB, sub_float, [Float, Float], false)
        .alias("-", SUB);
    registry
        .register(MUL, mul_int, [Integer], true)
        .register(MUL, mul_float, [Float], true)
        .alias("*", MUL);
    registry
        .register(DIV, div_int, [Integer, Integer], false)
        .register(DIV, div_float, [Float, Float], false)
        .alias("/", DIV);
    registry
        .register(REM, rem_int, [Integer, Integer], false)
        .register(REM, rem_float, [Float, Float], false)
        .alias("%", REM);
    registry
        .register(NEG, neg_int, [Integer], false)
        .register(NEG, neg_float, [Float], false)
        .alias("neg", NEG);
    registry
        .register(POW, pow_int, [Integer, Integer], false)
        .register(POW, pow_float, [Float, Float], false)
        .alias("^", POW);
}

// ============================================================================
// Error Handling
// ============================================================================

#[inline]
fn check_division_by_zero(b: i64) -> Result<(), RuntimeError> {
    if b == 0 {
        Err(RuntimeError::DivisionByZero)
    } else {
        Ok(())
    }
}

/// `i64::MIN / -1` is the one quotient that does not fit.
#[inline]
fn check_overflow(a: i64, b: i64) -> Result<(), RuntimeError> {
    if a == i64::MIN && b == -1 {
        Err(RuntimeError::IntegerOverflow)
    } else {
        Ok(())
    }
}

fn fold_ints(
    args: &Arguments<'_>,
    op: fn(i64, i64) -> Option<i64>,
) -> Result<i64, ExecutionErrorKind> {
    let mut acc = int(args, 0)?;
    for index in 1..args.len() {
        acc = op(acc, int(args, index)?).ok_or(RuntimeError::IntegerOverflow)?;
    }
    Ok(acc)
}

fn fold_floats(args: &Arguments<'_>, op: fn(f64, f64) -> f64) -> Result<f64, ExecutionErrorKind> {
    let mut acc = float(args, 0)?;
    for index in 1..args.len() {
        acc = op(acc, float(args, index)?);
    }
    Ok(acc)
}

// ============================================================================
// Handlers
// ============================================================================

fn add_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_int(fold_ints(args, i64::checked_add)?);
    Ok(())
}

fn add_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(fold_floats(args, |a, b| a + b)?);
    Ok(())
}

fn sub_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_int(fold_ints(args, i64::checked_sub)?);
    Ok(())
}

fn sub_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(fold_floats(args, |a, b| a - b)?);
    Ok(())
}

fn mul_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_int(fold_ints(args, i64::checked_mul)?);
    Ok(())
}

fn mul_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(fold_floats(args, |a, b| a * b)?);
    Ok(())
}

/// Euclidean division: `-7 / 2 == -4`, so that `-7 % 2 == 1`.
fn div_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let (a, b) = (int(args, 0)?, int(args, 1)?);
    check_division_by_zero(b)?;
    check_overflow(a, b)?;
    out.write_int(a.div_euclid(b));
    Ok(())
}

fn div_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(float(args, 0)? / float(args, 1)?);
    Ok(())
}

/// Euclidean remainder, never negative.
fn rem_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let (a, b) = (int(args, 0)?, int(args, 1)?);
    check_division_by_zero(b)?;
    check_overflow(a, b)?;
    out.write_int(a.rem_euclid(b));
    Ok(())
}

fn rem_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(float(args, 0)?.rem_euclid(float(args, 1)?));
    Ok(())
}

fn neg_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let a = int(args, 0)?;
    out.write_int(a.checked_neg().ok_or(RuntimeError::IntegerOverflow)?);
    Ok(())
}

fn neg_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(-float(args, 0)?);
    Ok(())
}

fn pow_int(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_int(checked_pow(int(args, 0)?, int(args, 1)?)?);
    Ok(())
}

fn pow_float(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_float(float(args, 0)?.powf(float(args, 1)?));
    Ok(())
}

/// Integer power. Exponents beyond `u32` only fit for bases 0, 1 and -1.
fn checked_pow(base: i64, exp: i64) -> Result<i64, RuntimeError> {
    if exp < 0 {
        return Err(RuntimeError::ArithmeticDomain("negative integer exponent"));
    }
    match (base, u32::try_from(exp)) {
        (_, Ok(exp)) => base.checked_pow(exp).ok_or(RuntimeError::IntegerOverflow),
        (0 | 1, Err(_)) => Ok(base),
        (-1, Err(_)) => Ok(if exp % 2 == 0 { 1 } else { -1 }),
        (_, Err(_)) => Err(RuntimeError::IntegerOverflow),
    }
}

#[cfg(test)]
#[path = "arith_test.rs"]
mod arith_test;
