use core::fmt;

/// The closed set of primitive kinds a [`Value`](super::Value) can hold.
///
/// A value's kind is fixed when it is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// 64-bit signed integer
    Integer,

    /// Double precision float
    Float,

    /// Boolean
    Boolean,

    /// UTF-8 string
    String,
}

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::Boolean,
        ValueKind::String,
    ];

    /// The kind this kind turns into under promotion fallback.
    ///
    /// Only `Integer` promotes (to `Float`); every other kind maps to itself.
    #[inline]
    pub const fn promoted(self) -> ValueKind {
        match self {
            ValueKind::Integer => ValueKind::Float,
            other => other,
        }
    }

    /// Returns a human-readable name for this kind.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_integer_promotes() {
        assert_eq!(ValueKind::Integer.promoted(), ValueKind::Float);
        assert_eq!(ValueKind::Float.promoted(), ValueKind::Float);
        assert_eq!(ValueKind::Boolean.promoted(), ValueKind::Boolean);
        assert_eq!(ValueKind::String.promoted(), ValueKind::String);
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<String> = ValueKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["Integer", "Float", "Boolean", "String"]);
    }
}
