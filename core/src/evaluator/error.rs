//! Error taxonomy of expression construction and evaluation.

use core::fmt;

use thiserror::Error;

use crate::registry::FunctionId;
use crate::values::{TypeError, ValueKind};

/// Failures caused by the values an expression computes with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("no overload of `{function}` accepts ({})", KindList(.kinds))]
    NoMatchingOverload {
        function: FunctionId,
        kinds: Vec<ValueKind>,
    },

    /// Numerically undefined operation, raised by a handler or by the
    /// floating-point trap check after it.
    #[error("arithmetic domain error: {0}")]
    ArithmeticDomain(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("cannot convert {text:?} to {target}")]
    InvalidConversion { text: String, target: ValueKind },
}

/// Consistency failures that a fully bootstrapped engine never produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("no handler registered for `{0}`")]
    NoHandlerForFunction(FunctionId),

    #[error("variable `{0}` is borrowed by another evaluation")]
    VariableInUse(String),

    #[error("argument has not been evaluated")]
    ResultUnavailable,

    #[error("argument {index} out of range for {len} arguments")]
    ArgumentOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionErrorKind {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl From<TypeError> for ExecutionErrorKind {
    fn from(err: TypeError) -> Self {
        ExecutionErrorKind::Runtime(RuntimeError::Type(err))
    }
}

/// An evaluation failure, tagged with the innermost call it surfaced from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub function: Option<FunctionId>,
}

impl ExecutionError {
    pub fn new(kind: impl Into<ExecutionErrorKind>, function: Option<FunctionId>) -> Self {
        Self {
            kind: kind.into(),
            function,
        }
    }

    /// The runtime error, if this is not an internal failure.
    pub fn runtime(&self) -> Option<&RuntimeError> {
        match &self.kind {
            ExecutionErrorKind::Runtime(err) => Some(err),
            ExecutionErrorKind::Internal(_) => None,
        }
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(
            self.kind,
            ExecutionErrorKind::Runtime(RuntimeError::ArithmeticDomain(_))
        )
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(function) => write!(f, "{} (in `{}`)", self.kind, function),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl core::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Failures detected while building expression trees and programs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("left operand of `{0}` must be a named variable")]
    InvalidAssignmentTarget(FunctionId),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{function}` expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: FunctionId,
        expected: &'static str,
        actual: usize,
    },

    #[error("parameter `{0}` must be a named Float variable")]
    InvalidParameter(String),

    #[error("function `{0}` is already defined")]
    DuplicateFunction(String),
}

/// Displays kinds as a comma separated list.
struct KindList<'a>(&'a [ValueKind]);

impl fmt::Display for KindList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}
