//! String functions
//!
//! - `concat(a, b, ...)` (`++`): joins strings, reusing the result buffer
//!   between evaluations.
//! - `length(s)`: number of Unicode scalar values.

use crate::evaluator::{Arguments, ExecutionErrorKind, ResultSlot, RuntimeError};
use crate::registry::{FunctionId, HandlerResult, Registry};
use crate::values::ValueKind;

pub const CONCAT: FunctionId = FunctionId::new("concat");
pub const LENGTH: FunctionId = FunctionId::new("length");

pub fn register_string_functions(registry: &mut Registry) {
    registry
        .register(CONCAT, concat, [ValueKind::String], true)
        .alias("++", CONCAT)
        .alias("concat", CONCAT)
        .register(LENGTH, length, [ValueKind::String], false)
        .alias("length", LENGTH);
}

fn concat(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_string_with(|buffer| -> Result<(), ExecutionErrorKind> {
        for arg in args.iter() {
            buffer.push_str(arg?.expect_str()?);
        }
        Ok(())
    })
}

fn length(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let count = args.get(0)?.expect_str()?.chars().count();
    let count = i64::try_from(count).map_err(|_| RuntimeError::IntegerOverflow)?;
    out.write_int(count);
    Ok(())
}
