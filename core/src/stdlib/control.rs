//! Control operators
//!
//! - `sequence(a, b, ..., z)` (`;`): yields its last argument.
//! - `assign(x, value)` (`=`): writes `value` into the variable `x` and
//!   yields `x`.
//!
//! Both forward an argument instead of copying it, so `x = 1.5` evaluates to
//! the variable itself.

use crate::evaluator::{Arguments, ConstructionError, Expression, InternalError, ResultSlot};
use crate::registry::{FunctionId, HandlerResult, KindPattern, Registry};
use crate::values::Value;

pub const SEQUENCE: FunctionId = FunctionId::new("sequence");
pub const ASSIGN: FunctionId = FunctionId::new("assign");

pub fn register_control_functions(registry: &mut Registry) {
    registry
        .register(SEQUENCE, sequence, [KindPattern::Any], true)
        .set_shape_check(SEQUENCE, check_sequence)
        .alias(";", SEQUENCE);

    registry
        .register(ASSIGN, assign, [KindPattern::Any, KindPattern::Any], false)
        .set_shape_check(ASSIGN, check_assignment)
        .alias("=", ASSIGN);
}

// ============================================================================
// Shape checks
// ============================================================================

fn check_sequence(function: FunctionId, args: &[Expression]) -> Result<(), ConstructionError> {
    if args.is_empty() {
        return Err(ConstructionError::ArgumentCount {
            function,
            expected: "at least 1",
            actual: 0,
        });
    }
    Ok(())
}

fn check_assignment(function: FunctionId, args: &[Expression]) -> Result<(), ConstructionError> {
    if args.len() != 2 {
        return Err(ConstructionError::ArgumentCount {
            function,
            expected: "2",
            actual: args.len(),
        });
    }
    match &args[0] {
        Expression::Variable(target) if !target.name().is_empty() => Ok(()),
        _ => Err(ConstructionError::InvalidAssignmentTarget(function)),
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn sequence(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let last = args.len().saturating_sub(1);
    out.forward(args, last)?;
    Ok(())
}

/// `x = x` leaves the payload alone and only marks `x` assigned.
///
/// The right-hand side may itself be a view of the target (a call that
/// forwards `x`, or the Float shadow of `x`); it is copied out before the
/// target is borrowed for writing.
fn assign(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let target = args
        .variable(0)
        .ok_or(InternalError::ArgumentOutOfRange {
            index: 0,
            len: args.len(),
        })?;
    let source = args.get(1)?;

    if target.holds(&source) {
        drop(source);
        target.try_get_mut()?.mark_assigned();
    } else if source.is_shared() {
        let copy = Value::clone(&source);
        drop(source);
        target.try_get_mut()?.assign(&copy)?;
    } else {
        target.try_get_mut()?.assign(&source)?;
    }

    out.forward(args, 0)?;
    Ok(())
}
