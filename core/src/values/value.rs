//! The mutable typed cell every expression evaluates to.

use core::fmt;

use super::ValueKind;

/// Raised when a value of one kind is used where another kind is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} value, found {found}")]
pub struct TypeError {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// Kind-specific storage of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl Payload {
    /// The zero payload of a kind: `0`, `0.0`, `false` or `""`.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => Payload::Integer(0),
            ValueKind::Float => Payload::Float(0.0),
            ValueKind::Boolean => Payload::Boolean(false),
            ValueKind::String => Payload::String(String::new()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Payload::Integer(_) => ValueKind::Integer,
            Payload::Float(_) => ValueKind::Float,
            Payload::Boolean(_) => ValueKind::Boolean,
            Payload::String(_) => ValueKind::String,
        }
    }
}

/// A typed value with an optional name and an `assigned` flag.
///
/// The kind of a value never changes after construction: every mutator either
/// writes a payload of the same kind or fails with [`TypeError`]. The one
/// implicit conversion is the Integer to Float widening performed by
/// [`Value::assign`].
///
/// Values with a non-empty name are *variables*: the host shares them with
/// expression trees through [`Variable`](super::Variable) handles and polls
/// [`Value::assigned`] after running a program.
///
/// # Example
///
/// ```
/// use animo_core::values::{Value, ValueKind};
///
/// let mut speed = Value::new(ValueKind::Float).with_name("speed");
/// assert!(!speed.assigned());
///
/// speed.assign(&Value::int(3)).unwrap();
/// assert_eq!(speed.as_float(), Some(3.0));
/// assert!(speed.assigned());
/// ```
pub struct Value {
    pub(crate) payload: Payload,
    name: Option<String>,
    assigned: bool,
    /// Float copy of an Integer payload, kept for promotion fallback.
    shadow: Option<Box<Value>>,
}

impl Value {
    fn from_payload(payload: Payload) -> Self {
        #[cfg(test)]
        super::census::record_created();

        Self {
            payload,
            name: None,
            assigned: false,
            shadow: None,
        }
    }

    /// Create an anonymous value of `kind` holding the zero payload.
    pub fn new(kind: ValueKind) -> Self {
        Self::from_payload(Payload::zero(kind))
    }

    /// Create an integer value.
    pub fn int(value: i64) -> Self {
        Self::from_payload(Payload::Integer(value))
    }

    /// Create a float value.
    pub fn float(value: f64) -> Self {
        Self::from_payload(Payload::Float(value))
    }

    /// Create a boolean value.
    pub fn bool(value: bool) -> Self {
        Self::from_payload(Payload::Boolean(value))
    }

    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_payload(Payload::String(value.into()))
    }

    /// Give this value a name. An empty name leaves the value anonymous.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.payload.kind()
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this value is addressable as a variable.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Whether the payload was written since the flag was last reset.
    pub fn assigned(&self) -> bool {
        self.assigned
    }

    pub fn reset_assigned(&mut self) {
        self.assigned = false;
    }

    /// Copy the payload of `other` into this value.
    ///
    /// Succeeds when both kinds are equal, or when this value is a Float and
    /// `other` is an Integer (widening). String payloads reuse this value's
    /// buffer.
    pub fn assign(&mut self, other: &Value) -> Result<(), TypeError> {
        let expected = self.kind();
        match (&mut self.payload, &other.payload) {
            (Payload::Integer(dst), Payload::Integer(src)) => *dst = *src,
            (Payload::Float(dst), Payload::Float(src)) => *dst = *src,
            (Payload::Float(dst), Payload::Integer(src)) => *dst = *src as f64,
            (Payload::Boolean(dst), Payload::Boolean(src)) => *dst = *src,
            (Payload::String(dst), Payload::String(src)) => dst.clone_from(src),
            _ => {
                return Err(TypeError {
                    expected,
                    found: other.kind(),
                });
            }
        }
        self.assigned = true;
        Ok(())
    }

    // ========================================================================
    // Typed accessors
    // ========================================================================

    pub fn as_int(&self) -> Option<i64> {
        match self.payload {
            Payload::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn expect_int(&self) -> Result<i64, TypeError> {
        self.as_int().ok_or(self.mismatch(ValueKind::Integer))
    }

    pub fn expect_float(&self) -> Result<f64, TypeError> {
        self.as_float().ok_or(self.mismatch(ValueKind::Float))
    }

    pub fn expect_bool(&self) -> Result<bool, TypeError> {
        self.as_bool().ok_or(self.mismatch(ValueKind::Boolean))
    }

    pub fn expect_str(&self) -> Result<&str, TypeError> {
        self.as_str().ok_or(self.mismatch(ValueKind::String))
    }

    fn mismatch(&self, expected: ValueKind) -> TypeError {
        TypeError {
            expected,
            found: self.kind(),
        }
    }

    // ========================================================================
    // Typed setters
    // ========================================================================

    pub fn set_int(&mut self, value: i64) -> Result<(), TypeError> {
        match &mut self.payload {
            Payload::Integer(slot) => *slot = value,
            other => return Err(TypeError {
                expected: ValueKind::Integer,
                found: other.kind(),
            }),
        }
        self.assigned = true;
        Ok(())
    }

    pub fn set_float(&mut self, value: f64) -> Result<(), TypeError> {
        match &mut self.payload {
            Payload::Float(slot) => *slot = value,
            other => return Err(TypeError {
                expected: ValueKind::Float,
                found: other.kind(),
            }),
        }
        self.assigned = true;
        Ok(())
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), TypeError> {
        match &mut self.payload {
            Payload::Boolean(slot) => *slot = value,
            other => return Err(TypeError {
                expected: ValueKind::Boolean,
                found: other.kind(),
            }),
        }
        self.assigned = true;
        Ok(())
    }

    /// Overwrite a string payload in place, keeping its allocation.
    pub fn set_str(&mut self, value: &str) -> Result<(), TypeError> {
        match &mut self.payload {
            Payload::String(slot) => {
                slot.clear();
                slot.push_str(value);
            }
            other => return Err(TypeError {
                expected: ValueKind::String,
                found: other.kind(),
            }),
        }
        self.assigned = true;
        Ok(())
    }

    /// Flag a write that leaves the payload as it is (`x = x`).
    pub(crate) fn mark_assigned(&mut self) {
        self.assigned = true;
    }

    /// Mutable access for result slots, whose kind the caller already checked.
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        self.assigned = true;
        &mut self.payload
    }

    // ========================================================================
    // Promotion shadow
    // ========================================================================

    /// Bring the Float shadow of an Integer value up to date.
    ///
    /// The shadow is allocated on the first call and overwritten in place on
    /// every later one. Non-integer values have no shadow.
    pub fn refresh_shadow(&mut self) {
        if let Payload::Integer(value) = self.payload {
            let shadow = self
                .shadow
                .get_or_insert_with(|| Box::new(Value::new(ValueKind::Float)));
            shadow.payload = Payload::Float(value as f64);
        }
    }

    /// The value handlers see after promotion: the Float shadow of an Integer,
    /// or the value itself.
    pub fn promoted(&self) -> &Value {
        match (&self.payload, &self.shadow) {
            (Payload::Integer(_), Some(shadow)) => &**shadow,
            _ => self,
        }
    }
}

impl Clone for Value {
    /// Clones payload, name and flag. The promotion shadow is a cache and is
    /// not carried over.
    fn clone(&self) -> Self {
        let mut value = Value::from_payload(self.payload.clone());
        value.name = self.name.clone();
        value.assigned = self.assigned;
        value
    }
}

#[cfg(test)]
impl Drop for Value {
    fn drop(&mut self) {
        super::census::record_dropped();
    }
}

/// Values compare by payload only; names and flags are ignored.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Value");
        if let Some(name) = &self.name {
            s.field("name", name);
        }
        s.field("payload", &self.payload)
            .field("assigned", &self.assigned)
            .finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Integer(value) => write!(f, "{}", value),
            Payload::Float(value) => write!(f, "{}", value),
            Payload::Boolean(value) => write!(f, "{}", value),
            Payload::String(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod value_test;
