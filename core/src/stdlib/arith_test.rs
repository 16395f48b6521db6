//! Tests for the arithmetic operators

use super::*;
use crate::evaluator::ExecutionError;
use crate::stdlib::test_support::eval;
use crate::values::{Value, ValueKind};
use pretty_assertions::assert_eq;

fn runtime_error(result: Result<Value, ExecutionError>) -> RuntimeError {
    result
        .expect_err("evaluation should fail")
        .runtime()
        .cloned()
        .expect("failure should be a runtime error")
}

// ============================================================================
// Addition and multiplication
// ============================================================================

#[test]
fn test_add_integers_stays_integer() {
    let result = eval("+", vec![Value::int(40), Value::int(2)]).unwrap();
    assert_eq!(result.kind(), ValueKind::Integer);
    assert_eq!(result.as_int(), Some(42));
}

#[test]
fn test_add_is_variadic() {
    let result = eval("+", vec![Value::int(1), Value::int(2), Value::int(3), Value::int(4)]).unwrap();
    assert_eq!(result.as_int(), Some(10));
}

#[test]
fn test_add_mixed_promotes_to_float() {
    let result = eval("+", vec![Value::int(1), Value::float(0.5), Value::int(2)]).unwrap();
    assert_eq!(result.kind(), ValueKind::Float);
    assert_eq!(result.as_float(), Some(3.5));
}

#[test]
fn test_add_overflow() {
    let err = runtime_error(eval("+", vec![Value::int(i64::MAX), Value::int(1)]));
    assert_eq!(err, RuntimeError::IntegerOverflow);
}

#[test]
fn test_mul() {
    assert_eq!(
        eval("*", vec![Value::int(6), Value::int(7)]).unwrap().as_int(),
        Some(42)
    );
    assert_eq!(
        eval("*", vec![Value::float(1.5), Value::int(4)]).unwrap().as_float(),
        Some(6.0)
    );
}

#[test]
fn test_add_rejects_strings() {
    let err = runtime_error(eval("+", vec![Value::string("a"), Value::int(1)]));
    assert_eq!(
        err,
        RuntimeError::NoMatchingOverload {
            function: ADD,
            kinds: vec![ValueKind::String, ValueKind::Integer],
        }
    );
}

// ============================================================================
// Subtraction and negation
// ============================================================================

#[test]
fn test_sub() {
    assert_eq!(
        eval("-", vec![Value::int(2), Value::int(5)]).unwrap().as_int(),
        Some(-3)
    );
    assert_eq!(
        eval("-", vec![Value::float(2.5), Value::int(1)]).unwrap().as_float(),
        Some(1.5)
    );
}

#[test]
fn test_sub_is_binary() {
    let err = runtime_error(eval("-", vec![Value::int(1), Value::int(2), Value::int(3)]));
    assert!(matches!(err, RuntimeError::NoMatchingOverload { .. }));
}

#[test]
fn test_neg() {
    assert_eq!(eval("neg", vec![Value::int(5)]).unwrap().as_int(), Some(-5));
    assert_eq!(eval("neg", vec![Value::float(-0.5)]).unwrap().as_float(), Some(0.5));
    assert_eq!(
        runtime_error(eval("neg", vec![Value::int(i64::MIN)])),
        RuntimeError::IntegerOverflow
    );
}

// ============================================================================
// Division (Euclidean on integers)
// ============================================================================

#[test]
fn test_div_int_euclidean() {
    // -7 = 2 * -4 + 1
    assert_eq!(
        eval("/", vec![Value::int(-7), Value::int(2)]).unwrap().as_int(),
        Some(-4)
    );
    assert_eq!(
        eval("/", vec![Value::int(7), Value::int(-3)]).unwrap().as_int(),
        Some(-2)
    );
}

#[test]
fn test_div_int_by_zero() {
    assert_eq!(
        runtime_error(eval("/", vec![Value::int(1), Value::int(0)])),
        RuntimeError::DivisionByZero
    );
    assert_eq!(
        runtime_error(eval("%", vec![Value::int(1), Value::int(0)])),
        RuntimeError::DivisionByZero
    );
}

#[test]
fn test_div_int_overflow() {
    assert_eq!(
        runtime_error(eval("/", vec![Value::int(i64::MIN), Value::int(-1)])),
        RuntimeError::IntegerOverflow
    );
}

#[test]
fn test_div_float() {
    assert_eq!(
        eval("/", vec![Value::float(1.0), Value::int(4)]).unwrap().as_float(),
        Some(0.25)
    );
}

#[test]
fn test_div_float_by_zero_is_trapped() {
    let err = eval("/", vec![Value::float(1.0), Value::float(0.0)]).unwrap_err();
    assert!(err.is_domain_error());
    assert_eq!(err.function, Some(DIV));
}

#[test]
fn test_rem_euclidean() {
    assert_eq!(
        eval("%", vec![Value::int(-7), Value::int(3)]).unwrap().as_int(),
        Some(2)
    );
    assert_eq!(
        eval("%", vec![Value::int(-7), Value::int(-3)]).unwrap().as_int(),
        Some(2)
    );
    assert_eq!(
        eval("%", vec![Value::float(-1.5), Value::float(1.0)]).unwrap().as_float(),
        Some(0.5)
    );
}

// ============================================================================
// Power
// ============================================================================

#[test]
fn test_pow_int() {
    assert_eq!(
        eval("^", vec![Value::int(2), Value::int(10)]).unwrap().as_int(),
        Some(1024)
    );
    assert_eq!(
        eval("^", vec![Value::int(-1), Value::int(i64::MAX)]).unwrap().as_int(),
        Some(-1)
    );
    assert_eq!(
        eval("^", vec![Value::int(1), Value::int(1 << 40)]).unwrap().as_int(),
        Some(1)
    );
}

#[test]
fn test_pow_int_negative_exponent() {
    assert_eq!(
        runtime_error(eval("^", vec![Value::int(2), Value::int(-1)])),
        RuntimeError::ArithmeticDomain("negative integer exponent")
    );
}

#[test]
fn test_pow_int_overflow() {
    assert_eq!(
        runtime_error(eval("^", vec![Value::int(10), Value::int(19)])),
        RuntimeError::IntegerOverflow
    );
    assert_eq!(
        runtime_error(eval("^", vec![Value::int(2), Value::int(1 << 40)])),
        RuntimeError::IntegerOverflow
    );
}

#[test]
fn test_pow_float() {
    assert_eq!(
        eval("^", vec![Value::float(4.0), Value::float(0.5)]).unwrap().as_float(),
        Some(2.0)
    );
    assert_eq!(
        eval("^", vec![Value::int(2), Value::float(-1.0)]).unwrap().as_float(),
        Some(0.5)
    );
}

#[test]
fn test_pow_float_invalid() {
    let err = eval("^", vec![Value::float(-8.0), Value::float(1.0 / 3.0)]).unwrap_err();
    assert!(err.is_domain_error());
}
