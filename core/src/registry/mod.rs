//! Type-directed dispatch of function calls.
//!
//! The registry maps a function identity and the kinds of its evaluated
//! arguments to the one handler that computes the call. Any module can add
//! handlers for new functions, or new overloads of existing ones, without
//! touching the resolution algorithm:
//!
//! ```
//! use animo_core::evaluator::{Arguments, ResultSlot};
//! use animo_core::registry::{FunctionId, HandlerResult, Registry};
//! use animo_core::values::ValueKind;
//!
//! const SMOOTHSTEP: FunctionId = FunctionId::new("smoothstep");
//!
//! fn smoothstep(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
//!     let t = args.get(0)?.expect_float()?.clamp(0.0, 1.0);
//!     out.write_float(t * t * (3.0 - 2.0 * t));
//!     Ok(())
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(SMOOTHSTEP, smoothstep, [ValueKind::Float], false)
//!     .alias("smoothstep", SMOOTHSTEP);
//!
//! // Integer arguments fall back to the Float overload.
//! let resolution = registry.resolve(SMOOTHSTEP, &[ValueKind::Integer]).unwrap();
//! assert!(resolution.promoted);
//! ```

use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::evaluator::{
    Arguments, ConstructionError, ExecutionErrorKind, Expression, InternalError, ResultSlot,
    RuntimeError,
};
use crate::values::ValueKind;

/// Identity of a callable function, shared by all of its overloads.
///
/// Identities are static names, so any crate can declare new ones as
/// constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(&'static str);

impl FunctionId {
    pub const fn new(name: &'static str) -> Self {
        FunctionId(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionId({})", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What a handler returns: the result lives in the [`ResultSlot`].
pub type HandlerResult = Result<(), ExecutionErrorKind>;

/// Signature of native handlers.
///
/// A handler reads its evaluated arguments and writes its result into the
/// call site's slot, either in place (see
/// [`ResultSlot::ensure_value_of_kind`]) or by forwarding one of the
/// arguments.
pub type NativeHandler = fn(&Arguments<'_>, &mut ResultSlot) -> HandlerResult;

/// Construction-time validation of a call's argument shape.
pub type ShapeCheck = fn(FunctionId, &[Expression]) -> Result<(), ConstructionError>;

/// One position of a handler's parameter list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindPattern {
    Exact(ValueKind),
    /// Accepts every kind. Used by operators that only rearrange values.
    Any,
}

impl KindPattern {
    #[inline]
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            KindPattern::Exact(expected) => expected == kind,
            KindPattern::Any => true,
        }
    }
}

impl From<ValueKind> for KindPattern {
    fn from(kind: ValueKind) -> Self {
        KindPattern::Exact(kind)
    }
}

impl fmt::Display for KindPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindPattern::Exact(kind) => write!(f, "{}", kind),
            KindPattern::Any => f.write_str("Any"),
        }
    }
}

/// Expected argument kinds of a handler.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    params: SmallVec<[KindPattern; 4]>,
    /// The last parameter may repeat one or more times.
    variadic: bool,
}

impl Signature {
    pub fn new<I, K>(params: I, variadic: bool) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KindPattern>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            variadic,
        }
    }

    pub fn params(&self) -> &[KindPattern] {
        &self.params
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Positional match of actual argument kinds.
    ///
    /// Positions past the declared parameters only match when the signature
    /// is variadic, and then against the last parameter.
    pub fn accepts<I>(&self, kinds: I) -> bool
    where
        I: IntoIterator<Item = ValueKind>,
        I::IntoIter: ExactSizeIterator,
    {
        let kinds = kinds.into_iter();
        let declared = self.params.len();
        let actual = kinds.len();
        if actual < declared {
            return false;
        }
        if actual > declared && !(self.variadic && declared > 0) {
            return false;
        }

        kinds.enumerate().all(|(i, kind)| {
            let pattern = if i < declared {
                self.params[i]
            } else {
                self.params[declared - 1]
            };
            pattern.accepts(kind)
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        if self.variadic {
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}

/// One registered overload of a function.
#[derive(Clone)]
pub struct Handler {
    function: FunctionId,
    signature: Signature,
    compute: NativeHandler,
}

impl Handler {
    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn compute(&self) -> NativeHandler {
        self.compute
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({}{})", self.function, self.signature)
    }
}

/// Outcome of overload resolution.
#[derive(Clone, Copy)]
pub struct Resolution {
    pub compute: NativeHandler,
    /// The handler was found by the Integer to Float retry; integer
    /// arguments must be replaced by their Float shadow before the call.
    pub promoted: bool,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("promoted", &self.promoted)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct HandlerGroup {
    handlers: Vec<Handler>,
}

impl HandlerGroup {
    fn find<I>(&self, kinds: I) -> Option<&Handler>
    where
        I: IntoIterator<Item = ValueKind> + Clone,
        I::IntoIter: ExactSizeIterator,
    {
        self.handlers
            .iter()
            .find(|handler| handler.signature.accepts(kinds.clone()))
    }
}

/// The handler table.
///
/// Populated once by a bootstrap routine (see
/// [`register_stdlib`](crate::stdlib::register_stdlib)) and read-only
/// afterwards, so it can be shared between threads without locking.
#[derive(Default)]
pub struct Registry {
    groups: HashMap<FunctionId, HandlerGroup>,
    shape_checks: HashMap<FunctionId, ShapeCheck>,
    short_names: HashMap<String, FunctionId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `compute` as the overload of `function` for `expected` kinds.
    ///
    /// Registering the same signature twice replaces the earlier handler in
    /// place, keeping its position in resolution order.
    pub fn register<I, K>(
        &mut self,
        function: FunctionId,
        compute: NativeHandler,
        expected: I,
        variadic: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KindPattern>,
    {
        let signature = Signature::new(expected, variadic);
        let group = self.groups.entry(function).or_default();

        match group
            .handlers
            .iter_mut()
            .find(|handler| handler.signature == signature)
        {
            Some(existing) => {
                tracing::debug!(%function, %signature, "Replacing registered handler");
                existing.compute = compute;
            }
            None => group.handlers.push(Handler {
                function,
                signature,
                compute,
            }),
        }
        self
    }

    /// Make `function` reachable from a parser under `short_name`.
    pub fn alias(&mut self, short_name: &str, function: FunctionId) -> &mut Self {
        self.short_names.insert(short_name.to_string(), function);
        self
    }

    /// Validate call sites of `function` when they are constructed.
    ///
    /// A shape check alone does not make `function` callable.
    pub fn set_shape_check(&mut self, function: FunctionId, check: ShapeCheck) -> &mut Self {
        self.shape_checks.insert(function, check);
        self
    }

    pub fn lookup_by_short_name(&self, short_name: &str) -> Option<FunctionId> {
        self.short_names.get(short_name).copied()
    }

    pub fn contains(&self, function: FunctionId) -> bool {
        self.groups.contains_key(&function)
    }

    /// Registered overloads of `function`, in resolution order.
    pub fn handlers(&self, function: FunctionId) -> &[Handler] {
        self.groups
            .get(&function)
            .map(|group| group.handlers.as_slice())
            .unwrap_or_default()
    }

    /// All function identities with at least one registration, sorted.
    pub fn functions(&self) -> Vec<FunctionId> {
        let mut functions: Vec<FunctionId> = self.groups.keys().copied().collect();
        functions.sort();
        functions
    }

    /// Select the handler for a call of `function` with arguments of `kinds`.
    ///
    /// An exact positional match is tried first. Failing that, and only if
    /// some argument is an Integer, the match is retried with every Integer
    /// read as a Float.
    pub fn resolve(
        &self,
        function: FunctionId,
        kinds: &[ValueKind],
    ) -> Result<Resolution, ExecutionErrorKind> {
        let group = self
            .groups
            .get(&function)
            .ok_or(InternalError::NoHandlerForFunction(function))?;

        if let Some(handler) = group.find(kinds.iter().copied()) {
            return Ok(Resolution {
                compute: handler.compute,
                promoted: false,
            });
        }

        if kinds.contains(&ValueKind::Integer) {
            if let Some(handler) = group.find(kinds.iter().map(|kind| kind.promoted())) {
                tracing::debug!(%function, signature = %handler.signature, "Resolved with integer promotion");
                return Ok(Resolution {
                    compute: handler.compute,
                    promoted: true,
                });
            }
        }

        Err(RuntimeError::NoMatchingOverload {
            function,
            kinds: kinds.to_vec(),
        }
        .into())
    }

    pub(crate) fn check_shape(
        &self,
        function: FunctionId,
        args: &[Expression],
    ) -> Result<(), ConstructionError> {
        match self.shape_checks.get(&function) {
            Some(check) => check(function, args),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("functions", &self.functions())
            .field("short_names", &self.short_names.len())
            .finish()
    }
}
