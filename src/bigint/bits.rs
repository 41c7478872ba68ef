//! Two's-complement bit semantics over the sign-magnitude representation.
//!
//! Bitwise operators behave as if every value were stored in
//! infinite-precision two's complement. Negative operands are never
//! materialized in that form: their limbs are converted on the fly with a
//! forward `negate_carry` chain, combined, and (for negative results)
//! converted back with a second chain.

use crate::big_digit::{BigDigit, DoubleBigDigit, BITS};
use crate::bigint::{BigInt, Repr, Sign};
use crate::biguint::{biguint_from_vec, BigUint};

use alloc::vec::Vec;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

use num_traits::Zero;

/// `!a + carry`, the streaming two's-complement step.
#[inline]
fn negate_carry(a: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += DoubleBigDigit::from(!a);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// Combine two values limb-wise under `op`, treating negative operands as
/// two's complement streams. `neg_result` is the sign of the result as
/// decided by `op` on the operands' (conceptual) sign bits.
fn bitwise_parts(
    sa: Sign,
    a: &[BigDigit],
    sb: Sign,
    b: &[BigDigit],
    op: impl Fn(BigDigit, BigDigit) -> BigDigit,
    neg_result: bool,
) -> BigInt {
    let neg_a = sa == Sign::Minus;
    let neg_b = sb == Sign::Minus;
    let len = Ord::max(a.len(), b.len());

    let mut out: Vec<BigDigit> = Vec::with_capacity(len + 1);
    let mut carry_a: DoubleBigDigit = 1;
    let mut carry_b: DoubleBigDigit = 1;
    let mut carry_out: DoubleBigDigit = 1;

    for i in 0..len {
        let da = a.get(i).copied().unwrap_or(0);
        let db = b.get(i).copied().unwrap_or(0);
        let la = if neg_a { negate_carry(da, &mut carry_a) } else { da };
        let lb = if neg_b { negate_carry(db, &mut carry_b) } else { db };
        let t = op(la, lb);
        out.push(if neg_result {
            negate_carry(t, &mut carry_out)
        } else {
            t
        });
    }

    // a normalized magnitude never carries past its top limb
    debug_assert!(!neg_a || carry_a == 0);
    debug_assert!(!neg_b || carry_b == 0);

    if neg_result {
        // beyond both operands every two's-complement limb of the result
        // is all-ones, so only a pending carry can extend the magnitude
        if carry_out != 0 {
            out.push(1);
        }
        BigInt::from_biguint(Sign::Minus, biguint_from_vec(out))
    } else {
        BigInt::from_biguint(Sign::Plus, biguint_from_vec(out))
    }
}

macro_rules! bitwise_binop {
    ($op:tt, $method:ident, $neg_rule:expr) => {
        fn $method(lhs: &BigInt, rhs: &BigInt) -> BigInt {
            match (&lhs.repr, &rhs.repr) {
                (Repr::Small(x), Repr::Small(y)) => BigInt::from(*x $op *y),
                _ => {
                    let mut ba = [0; 2];
                    let mut bb = [0; 2];
                    let (sa, a) = lhs.parts(&mut ba);
                    let (sb, b) = rhs.parts(&mut bb);
                    let neg_result = $neg_rule(sa == Sign::Minus, sb == Sign::Minus);
                    bitwise_parts(sa, a, sb, b, |x, y| x $op y, neg_result)
                }
            }
        }
    };
}

bitwise_binop!(&, bitand_inner, |na, nb| na && nb);
bitwise_binop!(|, bitor_inner, |na, nb| na || nb);
bitwise_binop!(^, bitxor_inner, |na: bool, nb: bool| na ^ nb);

forward_all_binop_to_ref_ref!(impl BitAnd for BigInt, bitand);

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn bitand(self, other: &BigInt) -> BigInt {
        bitand_inner(self, other)
    }
}

forward_all_binop_to_ref_ref!(impl BitOr for BigInt, bitor);

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn bitor(self, other: &BigInt) -> BigInt {
        bitor_inner(self, other)
    }
}

forward_all_binop_to_ref_ref!(impl BitXor for BigInt, bitxor);

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn bitxor(self, other: &BigInt) -> BigInt {
        bitxor_inner(self, other)
    }
}

impl BitAndAssign<&BigInt> for BigInt {
    #[inline]
    fn bitand_assign(&mut self, other: &BigInt) {
        *self = &*self & other;
    }
}

impl BitAndAssign<BigInt> for BigInt {
    #[inline]
    fn bitand_assign(&mut self, other: BigInt) {
        *self = &*self & &other;
    }
}

impl BitOrAssign<&BigInt> for BigInt {
    #[inline]
    fn bitor_assign(&mut self, other: &BigInt) {
        *self = &*self | other;
    }
}

impl BitOrAssign<BigInt> for BigInt {
    #[inline]
    fn bitor_assign(&mut self, other: BigInt) {
        *self = &*self | &other;
    }
}

impl BitXorAssign<&BigInt> for BigInt {
    #[inline]
    fn bitxor_assign(&mut self, other: &BigInt) {
        *self = &*self ^ other;
    }
}

impl BitXorAssign<BigInt> for BigInt {
    #[inline]
    fn bitxor_assign(&mut self, other: BigInt) {
        *self = &*self ^ &other;
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    /// `!x = -(x + 1)` in infinite two's complement.
    #[inline]
    fn not(self) -> BigInt {
        -(self + 1i32)
    }
}

impl Not for BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        !&self
    }
}

impl BigInt {
    /// `self & !other`.
    #[inline]
    pub fn and_not(&self, other: &BigInt) -> BigInt {
        self & &!other
    }

    /// Whether bit `bit` of the infinite two's-complement encoding is set.
    pub fn bit(&self, bit: u64) -> bool {
        match &self.repr {
            Repr::Small(v) => {
                if bit >= 64 {
                    *v < 0
                } else {
                    (*v >> bit) & 1 == 1
                }
            }
            Repr::Large(Sign::Plus, mag) => mag.bit(bit),
            Repr::Large(_, mag) => {
                // -m = !(m - 1): below and at the lowest set bit the limbs
                // agree with the magnitude, above it they are complemented
                let tz = mag.trailing_zeros().unwrap();
                if bit <= tz {
                    mag.bit(bit)
                } else {
                    !mag.bit(bit)
                }
            }
        }
    }

    /// Set or clear bit `bit`, preserving two's-complement semantics for
    /// negative values.
    pub fn set_bit(&mut self, bit: u64, value: bool) {
        if self.bit(bit) == value {
            return;
        }
        self.apply_bit(bit, |_| value);
    }

    /// Flip bit `bit`.
    #[inline]
    pub fn flip_bit(&mut self, bit: u64) {
        self.apply_bit(bit, |old| !old);
    }

    fn apply_bit(&mut self, bit: u64, f: impl Fn(bool) -> bool) {
        match &self.repr {
            Repr::Small(v) => {
                let v = *v;
                if bit < 63 {
                    let old = (v >> bit) & 1 == 1;
                    let new = if f(old) { v | (1 << bit) } else { v & !(1 << bit) };
                    self.repr = Repr::Small(new);
                    return;
                }
                // bit 63 and above reach past the compact word; take the
                // sign-magnitude path
                let old = if bit >= 64 { v < 0 } else { (v >> 63) & 1 == 1 };
                if f(old) == old {
                    return;
                }
                if v >= 0 {
                    // setting a high bit of a nonnegative value
                    let mut mag = BigUint::from(v as u64);
                    mag.set_bit(bit, true);
                    *self = BigInt::from_biguint(Sign::Plus, mag);
                } else {
                    let mag = BigUint::from(v.unsigned_abs());
                    *self = BigInt::from_biguint(
                        Sign::Minus,
                        negative_mag_apply_bit(&mag, bit, &f),
                    );
                }
            }
            Repr::Large(Sign::Plus, mag) => {
                let mut mag = mag.clone();
                mag.set_bit(bit, f(mag.bit(bit)));
                *self = BigInt::from_biguint(Sign::Plus, mag);
            }
            Repr::Large(_, mag) => {
                *self = BigInt::from_biguint(Sign::Minus, negative_mag_apply_bit(mag, bit, &f));
            }
        }
    }

    /// Two's-complement bit length: the bits needed excluding the sign,
    /// with one less for negative values whose magnitude is an exact power
    /// of two. Zero for both 0 and −1, which is why `is_zero` never
    /// consults this value.
    pub fn bit_length(&self) -> u64 {
        match self.sign() {
            Sign::NoSign => 0,
            Sign::Plus => self.bits(),
            Sign::Minus => {
                let mag = self.magnitude();
                mag.bits() - u64::from(mag.is_power_of_two())
            }
        }
    }

    /// Number of bits differing from the sign bit in the two's-complement
    /// encoding.
    pub fn bit_count(&self) -> u64 {
        match self.sign() {
            Sign::NoSign => 0,
            Sign::Plus => self.magnitude().count_ones(),
            Sign::Minus => {
                // -m = !(m - 1): zero bits of the encoding are the one bits
                // of m - 1
                let m1 = self.magnitude().as_ref() - 1u32;
                m1.count_ones()
            }
        }
    }

    /// Index of the lowest set bit of the two's-complement encoding, which
    /// coincides with the magnitude's; `None` for zero.
    pub fn trailing_zeros(&self) -> Option<u64> {
        if self.is_zero() {
            return None;
        }
        self.magnitude().trailing_zeros()
    }
}

/// Change one two's-complement bit of a negative value, given its
/// magnitude, without building the full two's-complement buffer: one pass
/// with a forward carry chain (into two's complement) and a backward chain
/// (out of it). The carry ripple covers the bit-0 flip of a negative value.
fn negative_mag_apply_bit(mag: &BigUint, bit: u64, f: &impl Fn(bool) -> bool) -> BigUint {
    let limb_i = (bit / u64::from(BITS)) as usize;
    let mask = 1 << (bit % u64::from(BITS));
    let len = Ord::max(mag.digits().len(), limb_i + 1) + 1;

    let mut out: Vec<BigDigit> = Vec::with_capacity(len + 1);
    let mut carry_fwd: DoubleBigDigit = 1;
    let mut carry_back: DoubleBigDigit = 1;

    for j in 0..len {
        let d = mag.digits().get(j).copied().unwrap_or(0);
        let mut t = negate_carry(d, &mut carry_fwd);
        if j == limb_i {
            let old = t & mask != 0;
            t = if f(old) { t | mask } else { t & !mask };
        }
        out.push(negate_carry(t, &mut carry_back));
    }
    if carry_back != 0 {
        out.push(1);
    }

    biguint_from_vec(out)
}

// --- shifts ---

fn shl_signed(lhs: &BigInt, shift: u64) -> BigInt {
    match &lhs.repr {
        Repr::Small(0) => BigInt::zero(),
        Repr::Small(v) if shift < 64 => BigInt::from_i128_exact(i128::from(*v) << shift),
        _ => {
            let sign = lhs.sign();
            BigInt::from_biguint(sign, lhs.magnitude().into_owned() << shift)
        }
    }
}

/// Arithmetic right shift: rounds toward negative infinity, like the
/// operator on the primitive signed types.
fn shr_signed(lhs: &BigInt, shift: u64) -> BigInt {
    match &lhs.repr {
        Repr::Small(v) => {
            let s = Ord::min(shift, 63) as u32;
            BigInt::from(*v >> s)
        }
        Repr::Large(Sign::Plus, mag) => BigInt::from_biguint(Sign::Plus, mag >> shift),
        Repr::Large(_, mag) => {
            let q = mag >> shift;
            // any dropped one-bit pulls a negative value further down
            let round_down = mag.trailing_zeros().unwrap() < shift;
            let q = if round_down { q + 1u32 } else { q };
            BigInt::from_biguint(Sign::Minus, q)
        }
    }
}

macro_rules! impl_shift_bigint_unsigned {
    ($($t:ty),*) => {$(
        impl Shl<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn shl(self, rhs: $t) -> BigInt {
                shl_signed(self, rhs as u64)
            }
        }

        impl Shl<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn shl(self, rhs: $t) -> BigInt {
                shl_signed(&self, rhs as u64)
            }
        }

        impl ShlAssign<$t> for BigInt {
            #[inline]
            fn shl_assign(&mut self, rhs: $t) {
                *self = shl_signed(self, rhs as u64);
            }
        }

        impl Shr<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn shr(self, rhs: $t) -> BigInt {
                shr_signed(self, rhs as u64)
            }
        }

        impl Shr<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn shr(self, rhs: $t) -> BigInt {
                shr_signed(&self, rhs as u64)
            }
        }

        impl ShrAssign<$t> for BigInt {
            #[inline]
            fn shr_assign(&mut self, rhs: $t) {
                *self = shr_signed(self, rhs as u64);
            }
        }
    )*};
}

impl_shift_bigint_unsigned!(u32, u64, usize);

macro_rules! impl_shift_bigint_signed {
    ($($t:ty),*) => {$(
        // a negative count shifts the other way
        impl Shl<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn shl(self, rhs: $t) -> BigInt {
                if rhs < 0 {
                    shr_signed(self, rhs.unsigned_abs() as u64)
                } else {
                    shl_signed(self, rhs as u64)
                }
            }
        }

        impl Shl<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn shl(self, rhs: $t) -> BigInt {
                &self << rhs
            }
        }

        impl Shr<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn shr(self, rhs: $t) -> BigInt {
                if rhs < 0 {
                    shl_signed(self, rhs.unsigned_abs() as u64)
                } else {
                    shr_signed(self, rhs as u64)
                }
            }
        }

        impl Shr<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn shr(self, rhs: $t) -> BigInt {
                &self >> rhs
            }
        }
    )*};
}

impl_shift_bigint_signed!(i32, i64);
