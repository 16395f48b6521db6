//! The value model: kinds, typed values and shared variables.

pub mod kind;
pub mod value;
pub mod variable;

#[cfg(test)]
pub(crate) mod census;

pub use kind::ValueKind;
pub use value::{Payload, TypeError, Value};
pub use variable::{ValueRef, Variable, VariableMut};
