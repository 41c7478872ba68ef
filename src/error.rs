//! Error types reported by fallible operations.

use thiserror::Error;

/// Failure of an arithmetic operation whose result cannot be represented
/// or computed under the requested rules.
///
/// Operator impls (`/`, `%`) panic on division by zero like the primitive
/// integer types do; every other failure in this taxonomy is only reachable
/// through `Result`-returning methods.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("modulus must be positive")]
    NonPositiveModulus,

    #[error("non-terminating decimal expansion; quotient has no exact decimal representation")]
    NonTerminating,

    #[error("rounding necessary but the rounding mode forbids it")]
    RoundingNecessary,

    #[error("scale out of the representable exponent range")]
    ScaleOverflow,

    #[error("value cannot be converted exactly to the requested type")]
    InvalidConversion,
}

/// Failure to parse a [`BigUint`](crate::BigUint) or [`BigInt`](crate::BigInt)
/// from a string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBigIntError {
    #[error("cannot parse integer from empty string")]
    Empty,

    #[error("invalid digit found in string")]
    InvalidDigit,

    #[error("radix must be in the range 2..=36")]
    InvalidRadix,
}

/// Failure to parse a [`BigDecimal`](crate::BigDecimal) from a string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBigDecimalError {
    #[error("cannot parse decimal from empty string")]
    Empty,

    #[error("invalid digit found in string")]
    InvalidDigit,

    #[error("exponent out of the representable range")]
    ExponentOverflow,
}
