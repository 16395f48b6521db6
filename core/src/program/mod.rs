//! User-defined functions and the programs that group them.
//!
//! A [`FunctionDefinition`] binds Float parameters to an expression body. A
//! [`Program`] is what a host runs once per tick:
//!
//! ```
//! use animo_core::api::{Engine, EngineOptions};
//! use animo_core::evaluator::Expression;
//! use animo_core::program::{FunctionDefinition, Program};
//! use animo_core::values::{Value, ValueKind, Variable};
//!
//! let engine = Engine::with_stdlib(EngineOptions::default());
//! let progress = Variable::new("progress", ValueKind::Float);
//! let t = Variable::new("t", ValueKind::Float);
//!
//! // OnTick(t): progress = t / 2
//! let half = engine
//!     .call_by_name("/", vec![Expression::variable(&t), Value::float(2.0).into()])
//!     .unwrap();
//! let body = engine
//!     .call_by_name("=", vec![Expression::variable(&progress), half])
//!     .unwrap();
//!
//! let mut program = Program::new();
//! program
//!     .define(FunctionDefinition::new("OnTick", vec![t], body).unwrap())
//!     .unwrap();
//!
//! program.invoke("ontick", &[0.5], false).unwrap();
//! assert_eq!(progress.get().as_float(), Some(0.25));
//! assert!(progress.assigned());
//! ```

use thiserror::Error;

use crate::evaluator::{ConstructionError, ExecutionError, Expression};
use crate::values::{ValueKind, Variable};

/// Failure of [`Program::invoke`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvokeError {
    #[error("function `{0}` is not defined")]
    MissingFunction(String),

    #[error("expected {expected} argument(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// A named function with Float parameters and an expression body.
pub struct FunctionDefinition {
    name: String,
    params: Vec<Variable>,
    body: Expression,
}

impl FunctionDefinition {
    /// Parameters must be named Float variables, normally created for this
    /// definition and referenced from `body`.
    pub fn new(
        name: impl Into<String>,
        params: Vec<Variable>,
        body: Expression,
    ) -> Result<Self, ConstructionError> {
        for param in &params {
            if param.kind() != ValueKind::Float || param.name().is_empty() {
                return Err(ConstructionError::InvalidParameter(param.name().to_string()));
            }
        }
        Ok(Self {
            name: name.into(),
            params,
            body,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn body(&self) -> &Expression {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Expression {
        &mut self.body
    }

    /// Bind `args` to the parameters and evaluate the body once.
    pub fn invoke(&mut self, args: &[f64]) -> Result<(), InvokeError> {
        if args.len() != self.params.len() {
            return Err(InvokeError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        for (param, &arg) in self.params.iter().zip(args) {
            let mut value = param
                .try_get_mut()
                .map_err(|err| ExecutionError::new(err, None))?;
            value
                .set_float(arg)
                .map_err(|err| ExecutionError::new(err, None))?;
        }

        self.body.evaluate()?;
        Ok(())
    }
}

impl core::fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let params: Vec<&str> = self.params.iter().map(Variable::name).collect();
        f.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("params", &params)
            .field("body", &self.body)
            .finish()
    }
}

/// A collection of function definitions with case-insensitive names.
///
/// Names are compared with ASCII case folding.
#[derive(Debug, Default)]
pub struct Program {
    functions: Vec<FunctionDefinition>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Fails if a function of the same name exists.
    pub fn define(&mut self, definition: FunctionDefinition) -> Result<(), ConstructionError> {
        if self.contains(definition.name()) {
            return Err(ConstructionError::DuplicateFunction(definition.name.clone()));
        }
        self.functions.push(definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions
            .iter()
            .find(|function| function.name.eq_ignore_ascii_case(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FunctionDefinition> {
        self.functions
            .iter_mut()
            .find(|function| function.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Function names as defined, in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(FunctionDefinition::name)
    }

    /// Run function `name` once with `args` bound to its parameters.
    ///
    /// A missing function is an error unless `ignore_missing` is set, in
    /// which case the call does nothing. Hosts use the latter for optional
    /// event handlers.
    pub fn invoke(
        &mut self,
        name: &str,
        args: &[f64],
        ignore_missing: bool,
    ) -> Result<(), InvokeError> {
        match self.get_mut(name) {
            Some(function) => function.invoke(args),
            None if ignore_missing => {
                tracing::debug!(name, "Skipping undefined function");
                Ok(())
            }
            None => Err(InvokeError::MissingFunction(name.to_string())),
        }
    }
}
