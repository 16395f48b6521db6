//! Engine configuration.

/// Floating-point exceptions turned into
/// [`ArithmeticDomain`](crate::evaluator::RuntimeError::ArithmeticDomain)
/// errors after each handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatTraps {
    /// NaN produced from non-NaN arguments (`ln(-3)`, `0.0 / 0.0`).
    pub invalid: bool,
    /// Infinity produced from finite arguments (`1.0 / 0.0`, `exp(1000)`).
    pub infinite: bool,
}

impl FloatTraps {
    /// Let every IEEE special value through.
    pub const NONE: FloatTraps = FloatTraps {
        invalid: false,
        infinite: false,
    };
}

impl Default for FloatTraps {
    fn default() -> Self {
        FloatTraps {
            invalid: true,
            infinite: true,
        }
    }
}

/// Options shared by every expression built from an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub float_traps: FloatTraps,
    /// Remember the last resolution of each call site and skip the registry
    /// lookup while the argument kinds stay the same.
    pub resolution_cache: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            float_traps: FloatTraps::default(),
            resolution_cache: true,
        }
    }
}
