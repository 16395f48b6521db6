//! The two halves of the handler calling convention: read-only access to the
//! evaluated arguments and the call site's reusable result slot.

use crate::evaluator::{Expression, InternalError};
use crate::values::{Payload, Value, ValueKind, ValueRef, Variable};

/// The cached result of a function node.
///
/// `Owned` results belong to the node and are overwritten in place when the
/// next evaluation produces the same kind. `Forward` results are one of the
/// node's arguments, passed through without copying.
#[derive(Debug, Default)]
pub enum ResultSlot {
    #[default]
    Empty,
    Owned(Value),
    Forward {
        index: usize,
        /// The argument was promoted; the result is its Float shadow.
        promoted: bool,
    },
}

impl ResultSlot {
    /// The owned value of `kind` that a handler writes its result into.
    ///
    /// An owned value of the right kind is reused as is. Anything else is
    /// replaced by a fresh zero value; a previous owned value is dropped, a
    /// forwarded argument is left alone.
    pub fn ensure_value_of_kind(&mut self, kind: ValueKind) -> &mut Value {
        let reusable = matches!(self, ResultSlot::Owned(value) if value.kind() == kind);
        if !reusable {
            tracing::trace!(%kind, "Allocating result value");
            *self = ResultSlot::Owned(Value::new(kind));
        }
        match self {
            ResultSlot::Owned(value) => value,
            _ => unreachable!("result slot was just filled"),
        }
    }

    /// Whether the result is owned by the node (and dropped with it).
    pub fn owns_result(&self) -> bool {
        matches!(self, ResultSlot::Owned(_))
    }

    /// The owned result, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ResultSlot::Owned(value) => Some(value),
            _ => None,
        }
    }

    pub fn write_int(&mut self, value: i64) {
        *self.ensure_value_of_kind(ValueKind::Integer).payload_mut() = Payload::Integer(value);
    }

    pub fn write_float(&mut self, value: f64) {
        *self.ensure_value_of_kind(ValueKind::Float).payload_mut() = Payload::Float(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        *self.ensure_value_of_kind(ValueKind::Boolean).payload_mut() = Payload::Boolean(value);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_string_with(|buffer| buffer.push_str(value));
    }

    /// Build a string result directly in the reused buffer.
    ///
    /// The buffer is cleared before `build` runs.
    pub fn write_string_with<R>(&mut self, build: impl FnOnce(&mut String) -> R) -> R {
        let payload = self.ensure_value_of_kind(ValueKind::String).payload_mut();
        if !matches!(payload, Payload::String(_)) {
            *payload = Payload::String(String::new());
        }
        match payload {
            Payload::String(buffer) => {
                buffer.clear();
                build(buffer)
            }
            _ => unreachable!("payload was just made a string"),
        }
    }

    /// Make argument `index` the result, without copying it.
    pub fn forward(&mut self, args: &Arguments<'_>, index: usize) -> Result<(), InternalError> {
        if index >= args.len() {
            return Err(InternalError::ArgumentOutOfRange {
                index,
                len: args.len(),
            });
        }
        *self = ResultSlot::Forward {
            index,
            promoted: args.is_promoted(index),
        };
        Ok(())
    }
}

/// Evaluated arguments of a call, as seen by its handler.
///
/// Arguments that the resolution promoted read as their Float shadow.
pub struct Arguments<'a> {
    args: &'a [Expression],
    promoted: &'a [bool],
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(args: &'a [Expression], promoted: &'a [bool]) -> Self {
        Self { args, promoted }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_promoted(&self, index: usize) -> bool {
        self.promoted.get(index).copied().unwrap_or(false)
    }

    /// The value of argument `index`.
    pub fn get(&self, index: usize) -> Result<ValueRef<'a>, InternalError> {
        let arg = self
            .args
            .get(index)
            .ok_or(InternalError::ArgumentOutOfRange {
                index,
                len: self.args.len(),
            })?;
        if self.is_promoted(index) {
            arg.current_promoted()
        } else {
            arg.current()
        }
    }

    /// The shared variable passed as argument `index`, if it is one.
    pub fn variable(&self, index: usize) -> Option<&'a Variable> {
        match self.args.get(index)? {
            Expression::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<ValueRef<'a>, InternalError>> + '_ {
        (0..self.args.len()).map(|index| self.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::census::Census;

    #[test]
    fn test_reuses_value_of_same_kind() {
        let mut slot = ResultSlot::default();
        slot.write_float(1.0);
        let census = Census::take();
        slot.write_float(2.0);
        slot.write_float(3.0);
        assert_eq!(census.delta().created, 0);
        assert_eq!(slot.value().and_then(Value::as_float), Some(3.0));
    }

    #[test]
    fn test_replaces_value_of_other_kind() {
        let mut slot = ResultSlot::default();
        slot.write_int(1);
        let census = Census::take();
        slot.write_bool(true);
        assert_eq!(
            census.delta(),
            Census {
                created: 1,
                dropped: 1
            }
        );
        assert_eq!(slot.value().and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_string_buffer_is_reused() {
        let mut slot = ResultSlot::default();
        slot.write_str("a long enough string");
        let census = Census::take();
        let len = slot.write_string_with(|buffer| {
            buffer.push_str("short");
            buffer.len()
        });
        assert_eq!(len, 5);
        assert_eq!(census.delta().created, 0);
        assert_eq!(slot.value().and_then(Value::as_str), Some("short"));
    }

    #[test]
    fn test_forward_does_not_own() {
        let args = [Expression::literal(Value::int(1))];
        let arguments = Arguments::new(&args, &[]);
        let mut slot = ResultSlot::default();
        slot.write_int(5);
        assert!(slot.owns_result());

        slot.forward(&arguments, 0).unwrap();
        assert!(!slot.owns_result());
        assert!(slot.value().is_none());
        assert!(matches!(
            slot,
            ResultSlot::Forward {
                index: 0,
                promoted: false
            }
        ));
    }

    #[test]
    fn test_forward_out_of_range() {
        let arguments = Arguments::new(&[], &[]);
        let mut slot = ResultSlot::default();
        assert_eq!(
            slot.forward(&arguments, 0),
            Err(InternalError::ArgumentOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_arguments_expose_variables() {
        let var = Variable::new("t", ValueKind::Float);
        let args = [Expression::variable(&var), Expression::literal(Value::float(1.0))];
        let arguments = Arguments::new(&args, &[]);
        assert!(arguments.variable(0).is_some_and(|v| v.ptr_eq(&var)));
        assert!(arguments.variable(1).is_none());
        assert!(arguments.variable(2).is_none());
        let values: Vec<f64> = arguments
            .iter()
            .map(|arg| arg.unwrap().as_float().unwrap())
            .collect();
        assert_eq!(values, [0.0, 1.0]);
    }
}
