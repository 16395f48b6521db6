//! Animo - an embeddable evaluator for animation scripts
//!
//! # Overview
//!
//! Animo evaluates trees of typed values and function calls built by a host,
//! typically once per frame. Common use cases include:
//!
//! - Driving properties from a timeline
//! - Event handlers such as `OnTick(t)` or `OnClick(x, y)`
//! - Small arithmetic and string rules configured by designers
//!
//! Trees are built once and re-evaluated as often as needed. Each call site
//! keeps its result value between evaluations, so steady-state evaluation
//! does not allocate.
//!
//! # Quick Start
//!
//! ```
//! use animo::{Engine, EngineOptions, Expression, Value, ValueKind, Variable};
//!
//! let engine = Engine::with_stdlib(EngineOptions::default());
//!
//! // width = t * 2 + 1
//! let t = Variable::new("t", ValueKind::Float);
//! let width = Variable::new("width", ValueKind::Float);
//! let scaled = engine
//!     .call_by_name("*", vec![Expression::variable(&t), Value::int(2).into()])
//!     .unwrap();
//! let plus_one = engine
//!     .call_by_name("+", vec![scaled, Value::int(1).into()])
//!     .unwrap();
//! let mut expr = engine
//!     .call_by_name("=", vec![Expression::variable(&width), plus_one])
//!     .unwrap();
//!
//! for frame in 0..3 {
//!     t.set(&Value::float(frame as f64 * 0.5)).unwrap();
//!     expr.evaluate().unwrap();
//! }
//! assert_eq!(width.get().as_float(), Some(3.0));
//! ```
//!
//! # Native Functions
//!
//! Hosts add functions by registering handlers with a kind signature:
//!
//! ```
//! use animo::{Arguments, Engine, EngineOptions, FunctionId, HandlerResult, ResultSlot};
//! use animo::{Value, ValueKind};
//!
//! const TWICE: FunctionId = FunctionId::new("twice");
//!
//! fn twice(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
//!     let value = args.get(0)?.expect_int()?;
//!     out.write_int(value * 2);
//!     Ok(())
//! }
//!
//! let engine = Engine::new(EngineOptions::default(), |registry| {
//!     registry
//!         .register(TWICE, twice, [ValueKind::Integer], false)
//!         .alias("twice", TWICE);
//! });
//!
//! let mut expr = engine.call_by_name("twice", vec![Value::int(21).into()]).unwrap();
//! assert_eq!(expr.evaluate().unwrap().as_int(), Some(42));
//! ```

// Re-export public API from animo_core
pub use animo_core::api::{Engine, EngineOptions, FloatTraps};

pub use animo_core::evaluator::{
    Arguments, ConstructionError, ExecutionError, ExecutionErrorKind, Expression, FunctionNode,
    InternalError, ResultSlot, RuntimeError,
};
pub use animo_core::program::{FunctionDefinition, InvokeError, Program};
pub use animo_core::registry::{FunctionId, HandlerResult, KindPattern, Registry, Signature};
pub use animo_core::values::{self, TypeError, Value, ValueKind, ValueRef, Variable, VariableMut};
pub use animo_core::stdlib;
