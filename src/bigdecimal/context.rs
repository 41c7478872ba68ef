//! Rounding policy and precision context for decimal arithmetic.

use core::fmt;

/// How to pick between the two nearest representable results when an
/// operation is inexact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To the nearest neighbor; ties away from zero.
    HalfUp,
    /// To the nearest neighbor; ties toward zero.
    HalfDown,
    /// To the nearest neighbor; ties to the even last digit.
    HalfEven,
    /// No rounding allowed: the operation must be exact or fail.
    Unnecessary,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        };
        f.write_str(name)
    }
}

/// Target precision (significant decimal digits; 0 means unlimited) plus
/// the rounding rule applied when a result has to be shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: u32,
    rounding_mode: RoundingMode,
}

impl MathContext {
    /// Unlimited precision; operations fail rather than round.
    pub const UNLIMITED: MathContext = MathContext {
        precision: 0,
        rounding_mode: RoundingMode::HalfUp,
    };

    /// The IEEE 754R Decimal32 format: 7 digits, half-even.
    pub const DECIMAL32: MathContext = MathContext {
        precision: 7,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// The IEEE 754R Decimal64 format: 16 digits, half-even.
    pub const DECIMAL64: MathContext = MathContext {
        precision: 16,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// The IEEE 754R Decimal128 format: 34 digits, half-even.
    pub const DECIMAL128: MathContext = MathContext {
        precision: 34,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// A context with the given precision and rounding rule.
    #[inline]
    pub const fn new(precision: u32, rounding_mode: RoundingMode) -> MathContext {
        MathContext {
            precision,
            rounding_mode,
        }
    }

    /// Significant decimal digits kept by operations under this context;
    /// 0 means unlimited.
    #[inline]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// The tie-breaking/rounding policy.
    #[inline]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }
}

impl Default for MathContext {
    #[inline]
    fn default() -> Self {
        MathContext::UNLIMITED
    }
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "precision={} roundingMode={}",
            self.precision, self.rounding_mode
        )
    }
}
