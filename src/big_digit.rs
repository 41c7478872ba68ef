//! The machine word ("limb") underlying [`BigUint`](crate::BigUint).
//!
//! A big integer's magnitude is a little-endian sequence of `BigDigit`s;
//! all carry and borrow propagation widens into `DoubleBigDigit` so that
//! `a + b + carry` and `a * b + c + carry` cannot overflow.

/// A single limb of a big integer's magnitude.
pub type BigDigit = u32;

/// Two limbs, used as an intermediate while computing.
pub type DoubleBigDigit = u64;

/// Bit width of a [`BigDigit`].
pub const BITS: u8 = 32;

/// Half the bit width, used when splitting a limb.
pub const HALF_BITS: u8 = BITS / 2;

pub const MAX: BigDigit = BigDigit::MAX;

const LO_MASK: DoubleBigDigit = MAX as DoubleBigDigit;

#[inline]
fn get_hi(n: DoubleBigDigit) -> BigDigit {
    (n >> BITS) as BigDigit
}

#[inline]
fn get_lo(n: DoubleBigDigit) -> BigDigit {
    (n & LO_MASK) as BigDigit
}

/// Split one [`DoubleBigDigit`] into `(hi, lo)` limbs.
#[inline]
pub fn from_doublebigdigit(n: DoubleBigDigit) -> (BigDigit, BigDigit) {
    (get_hi(n), get_lo(n))
}

/// Join two limbs into one [`DoubleBigDigit`], `hi` on top.
#[inline]
pub fn to_doublebigdigit(hi: BigDigit, lo: BigDigit) -> DoubleBigDigit {
    DoubleBigDigit::from(lo) | (DoubleBigDigit::from(hi) << BITS)
}
