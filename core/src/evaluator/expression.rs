//! Expression trees and the evaluation protocol of function nodes.

use core::fmt;
use std::cell::Ref;

use smallvec::SmallVec;

use super::float_traps;
use super::{
    Arguments, ConstructionError, ExecutionError, ExecutionErrorKind, InternalError, ResultSlot,
};
use crate::api::Engine;
use crate::registry::{FunctionId, Resolution};
use crate::values::{Value, ValueKind, ValueRef, Variable};

/// A node of an expression tree.
///
/// Literals are owned by the tree. Variables are shared with the host and
/// with other trees. Calls own their arguments and cache their last result.
pub enum Expression {
    Literal(Value),
    Variable(Variable),
    Call(FunctionNode),
}

static_assertions::assert_not_impl_any!(Expression: Send, Sync);

impl Expression {
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Reference a shared variable. The tree holds a new handle to it.
    pub fn variable(variable: &Variable) -> Self {
        Expression::Variable(variable.clone())
    }

    /// Evaluate the expression.
    ///
    /// The returned view is valid until the next evaluation of the same
    /// expression.
    pub fn evaluate(&mut self) -> Result<ValueRef<'_>, ExecutionError> {
        match self {
            Expression::Literal(value) => Ok(ValueRef::Direct(value)),
            Expression::Variable(variable) => variable
                .try_get()
                .map(ValueRef::Shared)
                .map_err(|err| ExecutionError::new(err, None)),
            Expression::Call(node) => node.evaluate(),
        }
    }

    /// Evaluate, turning any failure into `None`.
    pub fn try_evaluate(&mut self) -> Option<ValueRef<'_>> {
        match self {
            Expression::Call(node) => node.try_evaluate(),
            other => other.current().ok(),
        }
    }

    /// The value of the last evaluation, without evaluating again.
    pub fn current(&self) -> Result<ValueRef<'_>, InternalError> {
        match self {
            Expression::Literal(value) => Ok(ValueRef::Direct(value)),
            Expression::Variable(variable) => variable.try_get().map(ValueRef::Shared),
            Expression::Call(node) => node.current(),
        }
    }

    /// Kind of the current value. Variables report their kind without
    /// borrowing the value.
    pub fn kind(&self) -> Result<ValueKind, InternalError> {
        match self {
            Expression::Variable(variable) => Ok(variable.kind()),
            other => Ok(other.current()?.kind()),
        }
    }

    pub fn as_call(&self) -> Option<&FunctionNode> {
        match self {
            Expression::Call(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_call_mut(&mut self) -> Option<&mut FunctionNode> {
        match self {
            Expression::Call(node) => Some(node),
            _ => None,
        }
    }

    /// The current value as a promoted argument sees it.
    pub(crate) fn current_promoted(&self) -> Result<ValueRef<'_>, InternalError> {
        match self {
            Expression::Literal(value) => Ok(ValueRef::Direct(value.promoted())),
            Expression::Variable(variable) => {
                let value = variable.try_get()?;
                Ok(ValueRef::Shared(Ref::map(value, |value| value.promoted())))
            }
            Expression::Call(node) => node.current_promoted(),
        }
    }

    /// Update the Float shadow of the current value ahead of a promoted call.
    pub(crate) fn refresh_shadow(&mut self) -> Result<(), InternalError> {
        match self {
            Expression::Literal(value) => {
                value.refresh_shadow();
                Ok(())
            }
            Expression::Variable(variable) => {
                variable.try_get_mut()?.refresh_shadow();
                Ok(())
            }
            Expression::Call(node) => node.refresh_shadow(),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Variable(variable)
    }
}

impl From<FunctionNode> for Expression {
    fn from(node: FunctionNode) -> Self {
        Expression::Call(node)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "Literal({})", value),
            Expression::Variable(variable) => write!(f, "Variable({})", variable.name()),
            Expression::Call(node) => fmt::Debug::fmt(node, f),
        }
    }
}

struct CachedResolution {
    kinds: SmallVec<[ValueKind; 4]>,
    resolution: Resolution,
}

/// A call of a registered function.
///
/// The node is built once and evaluated many times. Its result slot and
/// scratch buffers survive between evaluations, so re-evaluating with
/// arguments of unchanged kinds writes into the same result value.
pub struct FunctionNode {
    engine: Engine,
    function: FunctionId,
    args: Vec<Expression>,
    slot: ResultSlot,
    /// The last evaluation failed; the slot keeps its value for reuse but
    /// does not expose it.
    stale: bool,
    /// Argument kinds of the current evaluation.
    kinds: SmallVec<[ValueKind; 4]>,
    /// Which arguments the current resolution promoted.
    promoted: SmallVec<[bool; 4]>,
    cached: Option<CachedResolution>,
}

impl FunctionNode {
    /// Build a call of `function`, running its shape check if it has one.
    pub fn new(
        engine: &Engine,
        function: FunctionId,
        args: Vec<Expression>,
    ) -> Result<Self, ConstructionError> {
        engine.registry().check_shape(function, &args)?;
        Ok(Self {
            engine: engine.clone(),
            function,
            args,
            slot: ResultSlot::Empty,
            stale: false,
            kinds: SmallVec::new(),
            promoted: SmallVec::new(),
            cached: None,
        })
    }

    #[inline]
    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// Mutable access to the arguments, e.g. to change a literal between
    /// evaluations.
    pub fn args_mut(&mut self) -> &mut [Expression] {
        &mut self.args
    }

    pub fn result_slot(&self) -> &ResultSlot {
        &self.slot
    }

    /// Whether the cached result is owned by this node rather than forwarded
    /// from an argument.
    pub fn owns_result(&self) -> bool {
        self.slot.owns_result()
    }

    /// Evaluate the call and return its result.
    ///
    /// The result stays valid until the next evaluation of this node.
    pub fn evaluate(&mut self) -> Result<ValueRef<'_>, ExecutionError> {
        self.run()?;
        let function = self.function;
        self.current()
            .map_err(|err| ExecutionError::new(err, Some(function)))
    }

    /// Evaluate the call, turning any failure into `None`.
    pub fn try_evaluate(&mut self) -> Option<ValueRef<'_>> {
        if let Err(err) = self.run() {
            tracing::debug!(error = %err, "Evaluation failed");
            return None;
        }
        self.current().ok()
    }

    /// The result of the last evaluation. Unavailable after a failed one.
    pub fn current(&self) -> Result<ValueRef<'_>, InternalError> {
        if self.stale {
            return Err(InternalError::ResultUnavailable);
        }
        match &self.slot {
            ResultSlot::Empty => Err(InternalError::ResultUnavailable),
            ResultSlot::Owned(value) => Ok(ValueRef::Direct(value)),
            ResultSlot::Forward { index, promoted } => {
                let arg = self.arg(*index)?;
                if *promoted {
                    arg.current_promoted()
                } else {
                    arg.current()
                }
            }
        }
    }

    fn current_promoted(&self) -> Result<ValueRef<'_>, InternalError> {
        if self.stale {
            return Err(InternalError::ResultUnavailable);
        }
        match &self.slot {
            ResultSlot::Empty => Err(InternalError::ResultUnavailable),
            ResultSlot::Owned(value) => Ok(ValueRef::Direct(value.promoted())),
            ResultSlot::Forward { index, .. } => self.arg(*index)?.current_promoted(),
        }
    }

    fn refresh_shadow(&mut self) -> Result<(), InternalError> {
        let index = match &mut self.slot {
            ResultSlot::Empty => return Err(InternalError::ResultUnavailable),
            ResultSlot::Owned(value) => {
                value.refresh_shadow();
                return Ok(());
            }
            ResultSlot::Forward { index, .. } => *index,
        };
        let len = self.args.len();
        self.args
            .get_mut(index)
            .ok_or(InternalError::ArgumentOutOfRange { index, len })?
            .refresh_shadow()
    }

    fn arg(&self, index: usize) -> Result<&Expression, InternalError> {
        self.args.get(index).ok_or(InternalError::ArgumentOutOfRange {
            index,
            len: self.args.len(),
        })
    }

    fn run(&mut self) -> Result<(), ExecutionError> {
        let outcome = self.run_handler();
        self.stale = outcome.is_err();
        outcome
    }

    fn run_handler(&mut self) -> Result<(), ExecutionError> {
        let function = self.function;
        let in_call = |err: ExecutionErrorKind| ExecutionError::new(err, Some(function));

        self.kinds.clear();
        for arg in self.args.iter_mut() {
            let kind = arg.evaluate()?.kind();
            self.kinds.push(kind);
        }

        let resolution = self.resolve().map_err(in_call)?;

        self.promoted.clear();
        for (arg, kind) in self.args.iter_mut().zip(&self.kinds) {
            let promote = resolution.promoted && *kind == ValueKind::Integer;
            if promote {
                arg.refresh_shadow()
                    .map_err(|err| ExecutionError::new(err, Some(function)))?;
            }
            self.promoted.push(promote);
        }

        let args = Arguments::new(&self.args, &self.promoted);
        (resolution.compute)(&args, &mut self.slot).map_err(in_call)?;
        float_traps::check(self.engine.options().float_traps, &args, &self.slot).map_err(in_call)
    }

    fn resolve(&mut self) -> Result<Resolution, ExecutionErrorKind> {
        if let Some(cached) = &self.cached {
            if cached.kinds == self.kinds {
                return Ok(cached.resolution);
            }
        }

        tracing::trace!(function = %self.function, kinds = ?self.kinds, "Resolving handler");
        let resolution = self.engine.registry().resolve(self.function, &self.kinds)?;
        if self.engine.options().resolution_cache {
            self.cached = Some(CachedResolution {
                kinds: self.kinds.clone(),
                resolution,
            });
        }
        Ok(resolution)
    }
}

impl fmt::Debug for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut call = f.debug_tuple(self.function.name());
        for arg in &self.args {
            call.field(arg);
        }
        call.finish()
    }
}

#[cfg(test)]
#[path = "expression_test.rs"]
mod expression_test;
