//! Arbitrary-precision signed integers and scaled decimals.
//!
//! This crate provides three value types:
//!
//! - [`BigUint`]: an unsigned magnitude, a little-endian vector of 32-bit
//!   limbs.
//! - [`BigInt`]: a signed integer in sign-magnitude form with a compact
//!   machine-word representation for values that fit an `i64`, plus
//!   two's-complement bitwise semantics, modular arithmetic and (with the
//!   `prime` feature) probabilistic primality testing.
//! - [`BigDecimal`]: an unscaled [`BigInt`] and a power-of-ten scale, with
//!   explicit rounding control through [`RoundingMode`] and
//!   [`MathContext`].
//!
//! # Examples
//!
//! ```
//! use num_bigdec::{BigInt, BigDecimal, RoundingMode};
//! use core::str::FromStr;
//!
//! // integers of unbounded magnitude
//! let a = BigInt::from_str_radix("ff", 16).unwrap();
//! assert_eq!(a, BigInt::from(255u32));
//! assert_eq!(a.to_signed_bytes_be(), vec![0x00, 0xff]);
//!
//! let m = BigInt::from(561u32);
//! assert_eq!(BigInt::from(7u32).modpow(&BigInt::from(560u32), &m), BigInt::from(1u32));
//!
//! // decimals with explicit rounding
//! let third = BigDecimal::from(1u32)
//!     .div_with_scale(&BigDecimal::from(3u32), 5, RoundingMode::HalfUp)
//!     .unwrap();
//! assert_eq!(third.to_plain_string(), "0.33333");
//!
//! let stripped = BigDecimal::from_str("123.450").unwrap().strip_trailing_zeros();
//! assert_eq!(stripped.unscaled_value(), &BigInt::from(12345u32));
//! assert_eq!(stripped.scale(), 2);
//! ```
//!
//! # Features
//!
//! - `std` (default): standard-library integration; the crate is otherwise
//!   `no_std` + `alloc`.
//! - `rand` (default): random value generation via [`RandBigInt`].
//! - `prime` (default, implies `rand`): Miller-Rabin primality testing,
//!   probable-prime search and [`RandPrime`].
//! - `serde`: values serialize as their canonical decimal strings.
//! - `zeroize`: `Zeroize` impls for the value types.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::suspicious_arithmetic_impl)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod macros;

pub mod big_digit;

mod bigdecimal;
mod bigint;
mod biguint;
mod error;

pub mod algorithms;
pub mod traits;

#[cfg(feature = "rand")]
mod bigrand;

#[cfg(feature = "prime")]
pub mod prime;

#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::bigdecimal::context::{MathContext, RoundingMode};
pub use crate::bigdecimal::BigDecimal;
pub use crate::bigint::{BigInt, Sign};
pub use crate::biguint::BigUint;
pub use crate::error::{ArithmeticError, ParseBigDecimalError, ParseBigIntError};
pub use crate::traits::{ModInverse, ModPow};

#[cfg(feature = "rand")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
pub use crate::bigrand::{RandBigInt, RandomBits, UniformBigInt, UniformBigUint};

#[cfg(feature = "prime")]
#[cfg_attr(docsrs, doc(cfg(feature = "prime")))]
pub use crate::bigrand::RandPrime;
