//! Comparison operators
//!
//! `lt`, `le`, `gt`, `ge` order integers, floats and strings (strings by
//! byte value). `eq` and `ne` also accept booleans. Comparisons involving a
//! NaN are false, except `ne`.

use core::cmp::Ordering;

use crate::evaluator::{Arguments, ExecutionErrorKind, ResultSlot};
use crate::registry::{FunctionId, HandlerResult, NativeHandler, Registry};
use crate::values::{Payload, TypeError, ValueKind};

pub const LT: FunctionId = FunctionId::new("lt");
pub const LE: FunctionId = FunctionId::new("le");
pub const GT: FunctionId = FunctionId::new("gt");
pub const GE: FunctionId = FunctionId::new("ge");
pub const EQ: FunctionId = FunctionId::new("eq");
pub const NE: FunctionId = FunctionId::new("ne");

const ORDERED: [ValueKind; 3] = [ValueKind::Integer, ValueKind::Float, ValueKind::String];

pub fn register_compare_functions(registry: &mut Registry) {
    let ordered: [(FunctionId, NativeHandler, &str); 4] =
        [(LT, lt, "<"), (LE, le, "<="), (GT, gt, ">"), (GE, ge, ">=")];
    for (function, handler, short_name) in ordered {
        for kind in ORDERED {
            registry.register(function, handler, [kind, kind], false);
        }
        registry.alias(short_name, function);
    }

    let equality: [(FunctionId, NativeHandler, &str); 2] = [(EQ, eq, "=="), (NE, ne, "!=")];
    for (function, handler, short_name) in equality {
        for kind in ValueKind::ALL {
            registry.register(function, handler, [kind, kind], false);
        }
        registry.alias(short_name, function);
    }
}

/// Order of the two arguments, `None` when unordered (NaN).
fn ordering(args: &Arguments<'_>) -> Result<Option<Ordering>, ExecutionErrorKind> {
    let a = args.get(0)?;
    let b = args.get(1)?;
    let ordering = match (a.payload(), b.payload()) {
        (Payload::Integer(x), Payload::Integer(y)) => Some(x.cmp(y)),
        (Payload::Float(x), Payload::Float(y)) => x.partial_cmp(y),
        (Payload::Boolean(x), Payload::Boolean(y)) => Some(x.cmp(y)),
        (Payload::String(x), Payload::String(y)) => Some(x.cmp(y)),
        _ => {
            return Err(TypeError {
                expected: a.kind(),
                found: b.kind(),
            }
            .into());
        }
    };
    Ok(ordering)
}

fn lt(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(ordering(args)? == Some(Ordering::Less));
    Ok(())
}

fn le(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(matches!(ordering(args)?, Some(Ordering::Less | Ordering::Equal)));
    Ok(())
}

fn gt(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(ordering(args)? == Some(Ordering::Greater));
    Ok(())
}

fn ge(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(matches!(ordering(args)?, Some(Ordering::Greater | Ordering::Equal)));
    Ok(())
}

fn eq(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(ordering(args)? == Some(Ordering::Equal));
    Ok(())
}

fn ne(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    out.write_bool(ordering(args)? != Some(Ordering::Equal));
    Ok(())
}
