//! Shared handles to named values and borrowed views of evaluation results.

use core::fmt;
use core::ops::Deref;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::{TypeError, Value, ValueKind};
use crate::evaluator::InternalError;

/// A named value shared between the host and any number of expression trees.
///
/// Cloning a `Variable` clones the handle, not the value. Trees keep the value
/// alive for as long as they reference it, and dropping a tree never drops a
/// value that another handle still reaches.
///
/// # Example
///
/// ```
/// use animo_core::values::{Value, ValueKind, Variable};
///
/// let opacity = Variable::new("opacity", ValueKind::Float);
/// let in_tree = opacity.clone();
///
/// in_tree.set(&Value::float(0.25)).unwrap();
/// assert_eq!(opacity.get().as_float(), Some(0.25));
/// assert!(opacity.assigned());
/// ```
#[derive(Clone)]
pub struct Variable {
    name: Rc<str>,
    kind: ValueKind,
    cell: Rc<RefCell<Value>>,
}

impl Variable {
    /// Create a variable holding the zero payload of `kind`.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::from_value(Value::new(kind).with_name(name))
    }

    /// Share an existing value. The variable takes the value's name.
    pub fn from_value(value: Value) -> Self {
        Self {
            name: Rc::from(value.name().unwrap_or_default()),
            kind: value.kind(),
            cell: Rc::new(RefCell::new(value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Borrow the current value.
    ///
    /// # Panics
    ///
    /// Panics if the value is being written, which only happens inside an
    /// assignment handler. Use [`Variable::try_get`] from handler code.
    pub fn get(&self) -> Ref<'_, Value> {
        self.cell.borrow()
    }

    /// Borrow the value for writing in place, e.g. with
    /// [`VariableMut::set_float`], without building a temporary value.
    ///
    /// The guard only offers writes that keep the value's kind and name.
    ///
    /// # Panics
    ///
    /// Panics if the value is borrowed, including by a live evaluation
    /// result.
    pub fn get_mut(&self) -> VariableMut<'_> {
        VariableMut(self.cell.borrow_mut())
    }

    pub fn try_get(&self) -> Result<Ref<'_, Value>, InternalError> {
        self.cell
            .try_borrow()
            .map_err(|_| InternalError::VariableInUse(self.name.to_string()))
    }

    pub(crate) fn try_get_mut(&self) -> Result<RefMut<'_, Value>, InternalError> {
        self.cell
            .try_borrow_mut()
            .map_err(|_| InternalError::VariableInUse(self.name.to_string()))
    }

    pub fn assigned(&self) -> bool {
        self.get().assigned()
    }

    pub fn reset_assigned(&self) {
        self.cell.borrow_mut().reset_assigned();
    }

    /// Host-side write; same rules as [`Value::assign`].
    pub fn set(&self, value: &Value) -> Result<(), TypeError> {
        self.cell.borrow_mut().assign(value)
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Variable) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Whether `value` is this variable's value (not a copy of it).
    pub fn holds(&self, value: &Value) -> bool {
        core::ptr::eq(self.cell.as_ptr().cast_const(), value)
    }

    /// Number of live handles to the shared value.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.cell)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Variable");
        s.field("name", &self.name);
        match self.cell.try_borrow() {
            Ok(value) => s.field("payload", value.payload()),
            Err(_) => s.field("payload", &"<in use>"),
        };
        s.finish()
    }
}

/// Write access to a variable's value.
///
/// Dereferences to the value for reading; writes go through the typed
/// setters, which reject a change of kind.
pub struct VariableMut<'a>(RefMut<'a, Value>);

impl VariableMut<'_> {
    pub fn set_int(&mut self, value: i64) -> Result<(), TypeError> {
        self.0.set_int(value)
    }

    pub fn set_float(&mut self, value: f64) -> Result<(), TypeError> {
        self.0.set_float(value)
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), TypeError> {
        self.0.set_bool(value)
    }

    pub fn set_str(&mut self, value: &str) -> Result<(), TypeError> {
        self.0.set_str(value)
    }

    /// Same rules as [`Value::assign`].
    pub fn assign(&mut self, other: &Value) -> Result<(), TypeError> {
        self.0.assign(other)
    }

    pub fn reset_assigned(&mut self) {
        self.0.reset_assigned();
    }
}

impl Deref for VariableMut<'_> {
    type Target = Value;

    #[inline]
    fn deref(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for VariableMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// A borrowed view of a value produced by evaluation.
///
/// Results owned by an expression node are plain references; results that
/// *are* a shared variable hold a borrow of the variable's cell.
pub enum ValueRef<'a> {
    Direct(&'a Value),
    Shared(Ref<'a, Value>),
}

impl ValueRef<'_> {
    /// Whether this view borrows a shared variable.
    pub fn is_shared(&self) -> bool {
        matches!(self, ValueRef::Shared(_))
    }
}

impl Deref for ValueRef<'_> {
    type Target = Value;

    #[inline]
    fn deref(&self) -> &Value {
        match self {
            ValueRef::Direct(value) => value,
            ValueRef::Shared(value) => value,
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let a = Variable::new("x", ValueKind::Integer);
        let b = a.clone();
        b.set(&Value::int(12)).unwrap();
        assert_eq!(a.get().as_int(), Some(12));
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);
        drop(b);
        assert_eq!(a.handle_count(), 1);
    }

    #[test]
    fn test_name_and_kind_from_value() {
        let var = Variable::from_value(Value::string("idle").with_name("state"));
        assert_eq!(var.name(), "state");
        assert_eq!(var.kind(), ValueKind::String);
        assert_eq!(var.get().as_str(), Some("idle"));
    }

    #[test]
    fn test_try_get_reports_conflicting_borrow() {
        let var = Variable::new("busy", ValueKind::Boolean);
        let _writer = var.try_get_mut().unwrap();
        assert_eq!(
            var.try_get().unwrap_err(),
            InternalError::VariableInUse("busy".to_string())
        );
    }

    #[test]
    fn test_set_rejects_narrowing() {
        let var = Variable::new("count", ValueKind::Integer);
        assert!(var.set(&Value::float(1.5)).is_err());
        assert!(!var.assigned());
    }

    #[test]
    fn test_writes_keep_kind_and_name() {
        let var = Variable::new("opacity", ValueKind::Float);
        {
            let mut value = var.get_mut();
            value.set_float(0.5).unwrap();
            value.assign(&Value::int(1)).unwrap();
            assert!(value.set_str("oops").is_err());
            assert!(value.assign(&Value::string("oops")).is_err());
            value.reset_assigned();
        }

        assert_eq!(var.kind(), ValueKind::Float);
        assert_eq!(var.get().kind(), ValueKind::Float);
        assert_eq!(var.get().name(), Some("opacity"));
        assert_eq!(var.get().as_float(), Some(1.0));
        assert!(!var.assigned());
    }

    #[test]
    fn test_value_ref_derefs_both_ways() {
        let owned = Value::float(2.0);
        let var = Variable::from_value(Value::float(3.0).with_name("y"));
        let direct = ValueRef::Direct(&owned);
        let shared = ValueRef::Shared(var.get());
        assert!(!direct.is_shared());
        assert!(shared.is_shared());
        assert_eq!(direct.as_float(), Some(2.0));
        assert_eq!(shared.to_string(), "3");
    }
}
