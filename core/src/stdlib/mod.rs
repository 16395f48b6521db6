//! Built-in function catalogue
//!
//! Every built-in is ordinary client code of the registration contract:
//! - Control: `sequence` (`;`), `assign` (`=`)
//! - Arithmetic: `add`, `sub`, `mul`, `div`, `rem`, `neg`, `pow`
//! - Comparison: `lt`, `le`, `gt`, `ge`, `eq`, `ne`
//! - Logic: `and`, `or`, `not`
//! - Math: `ln`, `log10`, `sqrt`, `exp`, trigonometry, rounding, `abs`,
//!   `min`, `max`, `clamp`, `lerp`
//! - String: `concat`, `length`
//! - Conversion: `to_string`, `to_float`, `to_int`, `to_bool`
//!
//! Mixed Integer/Float calls need no dedicated overloads: resolution falls
//! back to the Float handler with the integers promoted.

use crate::evaluator::{Arguments, ExecutionErrorKind};
use crate::registry::Registry;

pub mod arith;
pub mod compare;
pub mod control;
pub mod convert;
pub mod logic;
pub mod math;
pub mod string;

pub use arith::register_arith_functions;
pub use compare::register_compare_functions;
pub use control::register_control_functions;
pub use convert::register_convert_functions;
pub use logic::register_logic_functions;
pub use math::register_math_functions;
pub use string::register_string_functions;

/// Register the whole catalogue.
///
/// This is the bootstrap routine behind
/// [`Engine::with_stdlib`](crate::api::Engine::with_stdlib). Registration is
/// deterministic, so two registries bootstrapped this way resolve every call
/// identically.
///
/// # Example
///
/// ```
/// use animo_core::api::{Engine, EngineOptions};
/// use animo_core::stdlib::{register_math_functions, register_stdlib};
///
/// let full = Engine::new(EngineOptions::default(), register_stdlib);
/// let math_only = Engine::new(EngineOptions::default(), register_math_functions);
/// assert!(full.registry().lookup_by_short_name("+").is_some());
/// assert!(math_only.registry().lookup_by_short_name("+").is_none());
/// ```
pub fn register_stdlib(registry: &mut Registry) {
    register_control_functions(registry);
    register_arith_functions(registry);
    register_compare_functions(registry);
    register_logic_functions(registry);
    register_math_functions(registry);
    register_string_functions(registry);
    register_convert_functions(registry);
}

// ============================================================================
// Argument access shared by the handlers
// ============================================================================

#[inline]
fn int(args: &Arguments<'_>, index: usize) -> Result<i64, ExecutionErrorKind> {
    Ok(args.get(index)?.expect_int()?)
}

#[inline]
fn float(args: &Arguments<'_>, index: usize) -> Result<f64, ExecutionErrorKind> {
    Ok(args.get(index)?.expect_float()?)
}

#[inline]
fn boolean(args: &Arguments<'_>, index: usize) -> Result<bool, ExecutionErrorKind> {
    Ok(args.get(index)?.expect_bool()?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{Engine, EngineOptions};
    use crate::evaluator::{ExecutionError, Expression};
    use crate::values::Value;

    /// Evaluate `short_name(args)` once with the full catalogue.
    pub(crate) fn eval(short_name: &str, args: Vec<Value>) -> Result<Value, ExecutionError> {
        let engine = Engine::with_stdlib(EngineOptions::default());
        let args = args.into_iter().map(Expression::literal).collect();
        let mut expr = engine
            .call_by_name(short_name, args)
            .expect("call should be well-formed");
        let result = expr.evaluate().map(|value| Value::clone(&value));
        result
    }
}
