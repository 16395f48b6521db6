//! Public entry points: the engine handle and its options.
//!
//! # Example
//!
//! ```
//! use animo_core::api::{Engine, EngineOptions, FloatTraps};
//! use animo_core::evaluator::Expression;
//! use animo_core::values::{Value, ValueKind, Variable};
//!
//! let options = EngineOptions {
//!     float_traps: FloatTraps::NONE,
//!     ..Default::default()
//! };
//! let engine = Engine::with_stdlib(options);
//!
//! let x = Variable::new("x", ValueKind::Float);
//! let mut expr = engine
//!     .call_by_name("/", vec![Value::float(1.0).into(), Expression::variable(&x)])
//!     .unwrap();
//!
//! // With traps disabled, IEEE infinities pass through.
//! assert_eq!(expr.evaluate().unwrap().as_float(), Some(f64::INFINITY));
//! ```

pub mod engine;
pub mod options;

pub use engine::Engine;
pub use options::{EngineOptions, FloatTraps};
