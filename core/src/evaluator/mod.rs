//! Evaluation of expression trees.
//!
//! A [`FunctionNode`] evaluates its arguments, asks the registry for the
//! handler matching their kinds, and lets the handler write into the node's
//! [`ResultSlot`]. The slot is kept between evaluations so a tree evaluated
//! once per frame does not allocate once the kinds of its results settle.

mod error;
mod expression;
mod float_traps;
mod slot;

pub use error::{ConstructionError, ExecutionError, ExecutionErrorKind, InternalError, RuntimeError};
pub use expression::{Expression, FunctionNode};
pub use slot::{Arguments, ResultSlot};
