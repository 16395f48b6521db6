//! Expression evaluation engine for an embeddable procedural language.
//!
//! Trees of typed values and function calls are built once and re-evaluated
//! many times, e.g. once per animation frame. Each call site resolves its
//! handler from the kinds of its arguments and writes its result into a
//! value it keeps between evaluations.

pub mod api;
pub mod evaluator;
pub mod program;
pub mod registry;
pub mod stdlib;
pub mod values;
