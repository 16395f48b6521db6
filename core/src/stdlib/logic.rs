//! Boolean operators
//!
//! All arguments are evaluated before the handler runs, so `and` and `or`
//! do not short-circuit.

use super::boolean;
use crate::evaluator::{Arguments, ResultSlot};
use crate::registry::{FunctionId, HandlerResult, Registry};
use crate::values::ValueKind::Boolean;

pub const AND: FunctionId = FunctionId::new("and");
pub const OR: FunctionId = FunctionId::new("or");
pub const NOT: FunctionId = FunctionId::new("not");

pub fn register_logic_functions(registry: &mut Registry) {
    registry
        .register(AND, and, [Boolean], true)
        .alias("&&", AND)
        .register(OR, or, [Boolean], true)
        .alias("||", OR)
        .register(NOT, not, [Boolean], false)
        .alias("!", NOT);
}

fn and(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut all = true;
    for index in 0..args.len() {
        all &= boolean(args, index)?;
    }
    out.write_bool(all);
    Ok(())
}

fn or(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    let mut any = false;
    for index in 0..args.len() {
        any |= boolean(args, index)?;
    }
    out.write_bool(any);
    Ok(())
}

fn not(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(!boolean(args, 0)?);
    Ok(())
}
