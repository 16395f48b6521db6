//! The shared entry point for building expression trees.

use std::sync::Arc;

use super::EngineOptions;
use crate::evaluator::{ConstructionError, Expression, FunctionNode};
use crate::registry::{FunctionId, Registry};
use crate::stdlib::register_stdlib;

/// A populated registry together with the options of the trees built from it.
///
/// Cloning an engine is cheap and every clone refers to the same registry.
/// The engine is `Send + Sync`; expression trees are not, so each thread
/// builds its own trees from a shared engine.
///
/// # Example
///
/// ```
/// use animo_core::api::{Engine, EngineOptions};
/// use animo_core::evaluator::Expression;
/// use animo_core::values::Value;
///
/// let engine = Engine::with_stdlib(EngineOptions::default());
///
/// let mut sum = engine
///     .call_by_name("+", vec![Value::int(40).into(), Value::float(2.5).into()])
///     .unwrap();
/// assert_eq!(sum.evaluate().unwrap().as_float(), Some(42.5));
/// ```
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

static_assertions::assert_impl_all!(Engine: Send, Sync);

struct EngineInner {
    registry: Registry,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine whose registry is populated by `init`.
    ///
    /// # Example
    ///
    /// ```
    /// use animo_core::api::{Engine, EngineOptions};
    /// use animo_core::evaluator::{Arguments, ResultSlot};
    /// use animo_core::registry::{FunctionId, HandlerResult};
    /// use animo_core::values::{Value, ValueKind};
    ///
    /// const TWICE: FunctionId = FunctionId::new("twice");
    ///
    /// fn twice(args: &Arguments<'_>, out: &mut ResultSlot) -> HandlerResult {
    ///     out.write_float(args.get(0)?.expect_float()? * 2.0);
    ///     Ok(())
    /// }
    ///
    /// let engine = Engine::new(EngineOptions::default(), |registry| {
    ///     registry.register(TWICE, twice, [ValueKind::Float], false);
    /// });
    ///
    /// let mut expr = engine.call(TWICE, vec![Value::int(4).into()]).unwrap();
    /// assert_eq!(expr.evaluate().unwrap().as_float(), Some(8.0));
    /// ```
    pub fn new(options: EngineOptions, init: impl FnOnce(&mut Registry)) -> Self {
        let mut registry = Registry::new();
        init(&mut registry);
        tracing::debug!(functions = registry.functions().len(), "Engine created");

        Self {
            inner: Arc::new(EngineInner { registry, options }),
        }
    }

    /// Create an engine with the built-in catalogue.
    pub fn with_stdlib(options: EngineOptions) -> Self {
        Self::new(options, register_stdlib)
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.inner.options
    }

    /// Build a call of `function`.
    pub fn call(
        &self,
        function: FunctionId,
        args: Vec<Expression>,
    ) -> Result<Expression, ConstructionError> {
        FunctionNode::new(self, function, args).map(Expression::Call)
    }

    /// Build a call of the function registered under `short_name`.
    pub fn call_by_name(
        &self,
        short_name: &str,
        args: Vec<Expression>,
    ) -> Result<Expression, ConstructionError> {
        let function = self
            .registry()
            .lookup_by_short_name(short_name)
            .ok_or_else(|| ConstructionError::UnknownFunction(short_name.to_string()))?;
        self.call(function, args)
    }

    /// Whether both handles refer to the same engine.
    pub fn ptr_eq(&self, other: &Engine) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_stdlib(EngineOptions::default())
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.inner.registry)
            .field("options", &self.inner.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Value;

    #[test]
    fn test_clones_share_registry() {
        let engine = Engine::with_stdlib(EngineOptions::default());
        let clone = engine.clone();
        assert!(engine.ptr_eq(&clone));
        assert!(!engine.ptr_eq(&Engine::default()));
    }

    #[test]
    fn test_unknown_short_name() {
        let engine = Engine::new(EngineOptions::default(), |_| {});
        let err = engine
            .call_by_name("frobnicate", vec![Value::int(1).into()])
            .unwrap_err();
        assert_eq!(err, ConstructionError::UnknownFunction("frobnicate".to_string()));
    }

    #[test]
    fn test_call_without_handlers_fails_at_evaluation() {
        let engine = Engine::new(EngineOptions::default(), |_| {});
        let mut expr = engine.call(FunctionId::new("nothing"), vec![]).unwrap();
        let err = expr.evaluate().unwrap_err();
        assert!(err.runtime().is_none());
        assert_eq!(err.function, Some(FunctionId::new("nothing")));
    }
}
