//! The signed integer type.
//!
//! A [`BigInt`] is a tagged union: values that fit a machine word live in
//! `Repr::Small(i64)`, everything else in `Repr::Large(Sign, BigUint)`.
//! The representation is canonical: `Large` is used exactly when the value
//! does not fit in an `i64`, so derived structural equality and hashing
//! coincide with numeric equality, and every constructor demotes results
//! that fit. Promotion happens whenever an operation's worst-case bit
//! length could exceed 63 bits, via checked arithmetic with an `i128`
//! escape hatch.

use crate::big_digit::{BigDigit, BITS};
use crate::biguint::addition::add2;
use crate::biguint::division::div_rem_ref;
use crate::biguint::multiplication::{mul3, sub_sign};
use crate::biguint::{biguint_from_vec, cmp_slice, BigUint};

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Pow, Signed, ToPrimitive, Zero};

pub mod bits;
pub mod convert;

/// A `Sign` is a [`BigInt`]'s composing element.
#[derive(PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Debug, Hash)]
pub enum Sign {
    Minus,
    NoSign,
    Plus,
}

impl Neg for Sign {
    type Output = Sign;

    /// Negate `Sign` value.
    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::NoSign => Sign::NoSign,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl core::ops::Mul<Sign> for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::NoSign, _) | (_, Sign::NoSign) => Sign::NoSign,
            (Sign::Plus, Sign::Plus) | (Sign::Minus, Sign::Minus) => Sign::Plus,
            (Sign::Plus, Sign::Minus) | (Sign::Minus, Sign::Plus) => Sign::Minus,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) enum Repr {
    /// The value fits in an `i64`.
    Small(i64),
    /// The magnitude exceeds `i64`; the sign is never `NoSign`.
    Large(Sign, BigUint),
}

/// An arbitrary-precision signed integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub(crate) repr: Repr,
}

/// Magnitude of an `u64` as limbs, written into a caller-provided buffer.
#[inline]
fn mag_digits(v: u64, buf: &mut [BigDigit; 2]) -> &[BigDigit] {
    buf[0] = v as BigDigit;
    buf[1] = (v >> BITS) as BigDigit;
    if buf[1] != 0 {
        &buf[..2]
    } else if buf[0] != 0 {
        &buf[..1]
    } else {
        &buf[..0]
    }
}

impl BigInt {
    /// Creates a `BigInt` from a sign and a magnitude.
    ///
    /// The result is canonical: a zero magnitude or `NoSign` yields zero,
    /// and magnitudes that fit a machine word are demoted to the compact
    /// representation. The magnitude `2^63` is the negation boundary; it
    /// is compact only with a `Minus` sign.
    pub fn from_biguint(sign: Sign, mag: BigUint) -> BigInt {
        if sign == Sign::NoSign || mag.is_zero() {
            return BigInt { repr: Repr::Small(0) };
        }
        match mag.to_u64() {
            Some(u) if sign == Sign::Plus && u <= i64::MAX as u64 => BigInt {
                repr: Repr::Small(u as i64),
            },
            Some(u) if sign == Sign::Minus && u < 1 << 63 => BigInt {
                repr: Repr::Small(-(u as i64)),
            },
            Some(u) if sign == Sign::Minus && u == 1 << 63 => BigInt {
                repr: Repr::Small(i64::MIN),
            },
            _ => BigInt {
                repr: Repr::Large(sign, mag),
            },
        }
    }

    #[inline]
    pub(crate) fn from_sign_slice(sign: Sign, digits: &[BigDigit]) -> BigInt {
        BigInt::from_biguint(sign, BigUint::from_slice(digits))
    }

    #[inline]
    pub(crate) fn from_i128_exact(v: i128) -> BigInt {
        match i64::try_from(v) {
            Ok(v) => BigInt { repr: Repr::Small(v) },
            Err(_) => {
                let sign = if v < 0 { Sign::Minus } else { Sign::Plus };
                BigInt {
                    repr: Repr::Large(sign, BigUint::from(v.unsigned_abs())),
                }
            }
        }
    }

    /// The sign of the value.
    #[inline]
    pub fn sign(&self) -> Sign {
        match &self.repr {
            Repr::Small(v) => match v.cmp(&0) {
                Ordering::Greater => Sign::Plus,
                Ordering::Equal => Sign::NoSign,
                Ordering::Less => Sign::Minus,
            },
            Repr::Large(s, _) => *s,
        }
    }

    /// The magnitude, borrowing the limb vector when one exists.
    #[inline]
    pub fn magnitude(&self) -> Cow<'_, BigUint> {
        match &self.repr {
            Repr::Small(v) => Cow::Owned(BigUint::from(v.unsigned_abs())),
            Repr::Large(_, mag) => Cow::Borrowed(mag),
        }
    }

    /// Destructure into sign and magnitude.
    #[inline]
    pub fn into_parts(self) -> (Sign, BigUint) {
        match self.repr {
            Repr::Small(v) => {
                let sign = match v.cmp(&0) {
                    Ordering::Greater => Sign::Plus,
                    Ordering::Equal => Sign::NoSign,
                    Ordering::Less => Sign::Minus,
                };
                (sign, BigUint::from(v.unsigned_abs()))
            }
            Repr::Large(s, mag) => (s, mag),
        }
    }

    /// The absolute value as a [`BigUint`].
    #[inline]
    pub fn unsigned_abs(&self) -> BigUint {
        self.magnitude().into_owned()
    }

    /// The value as a [`BigUint`], if nonnegative.
    #[inline]
    pub fn to_biguint(&self) -> Option<BigUint> {
        match self.sign() {
            Sign::Minus => None,
            _ => Some(self.unsigned_abs()),
        }
    }

    /// Sign and normalized magnitude limbs, without allocating for compact
    /// values.
    #[inline]
    pub(crate) fn parts<'a>(&'a self, buf: &'a mut [BigDigit; 2]) -> (Sign, &'a [BigDigit]) {
        match &self.repr {
            Repr::Small(v) => {
                let sign = match v.cmp(&0) {
                    Ordering::Greater => Sign::Plus,
                    Ordering::Equal => Sign::NoSign,
                    Ordering::Less => Sign::Minus,
                };
                (sign, mag_digits(v.unsigned_abs(), buf))
            }
            Repr::Large(s, mag) => (*s, &mag.data),
        }
    }

    /// Bit length of the magnitude (0 for zero).
    ///
    /// For the two's-complement bit length see
    /// [`bit_length`](BigInt::bit_length).
    #[inline]
    pub fn bits(&self) -> u64 {
        match &self.repr {
            Repr::Small(v) => 64 - v.unsigned_abs().leading_zeros() as u64,
            Repr::Large(_, mag) => mag.bits(),
        }
    }

    /// Compare magnitudes, ignoring signs.
    #[inline]
    pub(crate) fn cmp_abs(&self, other: &BigInt) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Small(a), Repr::Small(b)) => a.unsigned_abs().cmp(&b.unsigned_abs()),
            _ => {
                let mut ba = [0; 2];
                let mut bb = [0; 2];
                let (_, a) = self.parts(&mut ba);
                let (_, b) = other.parts(&mut bb);
                cmp_slice(a, b)
            }
        }
    }

    /// Raise to the power `exp`.
    pub fn pow(&self, exp: u64) -> BigInt {
        let sign = if exp % 2 == 0 {
            match self.sign() {
                Sign::NoSign => Sign::NoSign,
                _ => Sign::Plus,
            }
        } else {
            self.sign()
        };
        BigInt::from_biguint(sign, self.magnitude().pow(exp))
    }

    /// Modular exponentiation `self^exponent mod modulus`, in `[0, modulus)`.
    ///
    /// A negative exponent inverts the base modulo `modulus` first.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is not positive, or if the exponent is
    /// negative and the base has no inverse modulo `modulus`.
    pub fn modpow(&self, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        assert!(
            modulus.is_positive(),
            "modulus must be positive"
        );
        let m = modulus.magnitude();

        if exponent.is_negative() {
            let inv = crate::algorithms::mod_inverse_unsigned(
                self.mod_floor(modulus).magnitude().as_ref(),
                m.as_ref(),
            )
            .expect("negative exponent of a base with no modular inverse");
            let e = exponent.magnitude();
            return BigInt::from(inv.modpow(e.as_ref(), m.as_ref()));
        }

        let base = self.mod_floor(modulus);
        BigInt::from(
            base.magnitude()
                .as_ref()
                .modpow(exponent.magnitude().as_ref(), m.as_ref()),
        )
    }

    /// Greatest common divisor of the magnitudes; always nonnegative.
    #[inline]
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        Integer::gcd(self, other)
    }

    /// `true` if the value is probably prime, to within the given
    /// certainty: the probability of a composite passing is at most
    /// `2^-certainty`. Values `<= 1` are never prime.
    #[cfg(feature = "prime")]
    #[cfg_attr(docsrs, doc(cfg(feature = "prime")))]
    pub fn is_probable_prime(&self, certainty: u32) -> bool {
        if certainty == 0 {
            return true;
        }
        if !self.is_positive() {
            return false;
        }
        let mag = self.magnitude();
        let table = crate::prime::miller_rabin_rounds(mag.bits());
        let rounds = Ord::min((certainty as usize).div_ceil(2), table);
        crate::prime::probably_prime(mag.as_ref(), rounds)
    }

    /// The smallest probable prime strictly greater than `self`.
    #[cfg(feature = "prime")]
    #[cfg_attr(docsrs, doc(cfg(feature = "prime")))]
    pub fn next_probable_prime(&self) -> BigInt {
        if self.sign() != Sign::Plus {
            return BigInt::from(2u32);
        }
        BigInt::from(crate::prime::next_prime(self.magnitude().as_ref()))
    }
}

// --- signed slice arithmetic ---

fn add_slices(a: &[BigDigit], b: &[BigDigit]) -> BigUint {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut data: Vec<BigDigit> = Vec::with_capacity(long.len() + 1);
    data.extend_from_slice(long);
    data.push(0);
    add2(&mut data, short);
    biguint_from_vec(data)
}

fn add_parts(sa: Sign, a: &[BigDigit], sb: Sign, b: &[BigDigit]) -> BigInt {
    match (sa, sb) {
        (Sign::NoSign, _) => BigInt::from_sign_slice(sb, b),
        (_, Sign::NoSign) => BigInt::from_sign_slice(sa, a),
        _ if sa == sb => BigInt::from_biguint(sa, add_slices(a, b)),
        _ => {
            // opposite signs: the larger magnitude wins
            let (diff_sign, mag) = sub_sign(a, b);
            match diff_sign {
                Sign::Plus => BigInt::from_biguint(sa, mag),
                Sign::Minus => BigInt::from_biguint(sb, mag),
                Sign::NoSign => BigInt::zero(),
            }
        }
    }
}

forward_all_binop_to_ref_ref!(impl Add for BigInt, add);

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        match (&self.repr, &other.repr) {
            (Repr::Small(x), Repr::Small(y)) => {
                BigInt::from_i128_exact(i128::from(*x) + i128::from(*y))
            }
            _ => {
                let mut ba = [0; 2];
                let mut bb = [0; 2];
                let (sa, a) = self.parts(&mut ba);
                let (sb, b) = other.parts(&mut bb);
                add_parts(sa, a, sb, b)
            }
        }
    }
}

forward_all_binop_to_ref_ref!(impl Sub for BigInt, sub);

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        match (&self.repr, &other.repr) {
            (Repr::Small(x), Repr::Small(y)) => {
                BigInt::from_i128_exact(i128::from(*x) - i128::from(*y))
            }
            _ => {
                let mut ba = [0; 2];
                let mut bb = [0; 2];
                let (sa, a) = self.parts(&mut ba);
                let (sb, b) = other.parts(&mut bb);
                add_parts(sa, a, -sb, b)
            }
        }
    }
}

forward_all_binop_to_ref_ref!(impl Mul for BigInt, mul);

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        match (&self.repr, &other.repr) {
            (Repr::Small(x), Repr::Small(y)) => {
                BigInt::from_i128_exact(i128::from(*x) * i128::from(*y))
            }
            _ => {
                let mut ba = [0; 2];
                let mut bb = [0; 2];
                let (sa, a) = self.parts(&mut ba);
                let (sb, b) = other.parts(&mut bb);
                let sign = sa * sb;
                if sign == Sign::NoSign {
                    BigInt::zero()
                } else {
                    BigInt::from_biguint(sign, mul3(a, b))
                }
            }
        }
    }
}

/// Truncating division with remainder; the remainder takes the dividend's
/// sign.
fn div_rem_signed(lhs: &BigInt, rhs: &BigInt) -> (BigInt, BigInt) {
    match (&lhs.repr, &rhs.repr) {
        (Repr::Small(x), Repr::Small(y)) => {
            assert!(*y != 0, "attempt to divide by zero");
            if *x == i64::MIN && *y == -1 {
                // the lone quotient that does not fit the compact word
                return (BigInt::from_i128_exact(-(i128::from(i64::MIN))), BigInt::zero());
            }
            (BigInt::from(*x / *y), BigInt::from(*x % *y))
        }
        _ => {
            let sa = lhs.sign();
            let sb = rhs.sign();
            let (q, r) = div_rem_ref(lhs.magnitude().as_ref(), rhs.magnitude().as_ref());
            (BigInt::from_biguint(sa * sb, q), BigInt::from_biguint(sa, r))
        }
    }
}

forward_all_binop_to_ref_ref!(impl Div for BigInt, div);

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn div(self, other: &BigInt) -> BigInt {
        div_rem_signed(self, other).0
    }
}

forward_all_binop_to_ref_ref!(impl Rem for BigInt, rem);

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn rem(self, other: &BigInt) -> BigInt {
        div_rem_signed(self, other).1
    }
}

macro_rules! forward_assign {
    (impl $imp:ident for BigInt, $method:ident, $op:tt) => {
        impl $imp<&BigInt> for BigInt {
            #[inline]
            fn $method(&mut self, other: &BigInt) {
                *self = &*self $op other;
            }
        }

        impl $imp<BigInt> for BigInt {
            #[inline]
            fn $method(&mut self, other: BigInt) {
                *self = &*self $op &other;
            }
        }
    };
}

forward_assign!(impl AddAssign for BigInt, add_assign, +);
forward_assign!(impl SubAssign for BigInt, sub_assign, -);
forward_assign!(impl MulAssign for BigInt, mul_assign, *);
forward_assign!(impl DivAssign for BigInt, div_assign, /);
forward_assign!(impl RemAssign for BigInt, rem_assign, %);

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        match &self.repr {
            Repr::Small(v) => match v.checked_neg() {
                Some(n) => BigInt { repr: Repr::Small(n) },
                // -(i64::MIN) = 2^63 has no compact counterpart
                None => BigInt::from_biguint(Sign::Plus, BigUint::from(1u64 << 63)),
            },
            Repr::Large(s, mag) => BigInt::from_biguint(-*s, mag.clone()),
        }
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        -&self
    }
}

// --- scalar operators ---

macro_rules! bigint_scalar_ops {
    ($($t:ty),*) => {$(
        impl Add<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn add(self, other: $t) -> BigInt {
                self + BigInt::from(other)
            }
        }

        impl Add<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn add(self, other: $t) -> BigInt {
                &self + BigInt::from(other)
            }
        }

        impl Sub<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn sub(self, other: $t) -> BigInt {
                self - BigInt::from(other)
            }
        }

        impl Sub<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn sub(self, other: $t) -> BigInt {
                &self - BigInt::from(other)
            }
        }

        impl Mul<$t> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn mul(self, other: $t) -> BigInt {
                self * BigInt::from(other)
            }
        }

        impl Mul<$t> for BigInt {
            type Output = BigInt;

            #[inline]
            fn mul(self, other: $t) -> BigInt {
                &self * BigInt::from(other)
            }
        }
    )*};
}

bigint_scalar_ops!(u32, u64, i32, i64);

// --- comparison ---

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            _ => {
                let sa = self.sign();
                let sb = other.sign();
                match sa.cmp(&sb) {
                    Ordering::Equal => match sa {
                        Sign::Plus => self.cmp_abs(other),
                        Sign::Minus => other.cmp_abs(self),
                        Sign::NoSign => Ordering::Equal,
                    },
                    other => other,
                }
            }
        }
    }
}

// --- numeric traits ---

impl Default for BigInt {
    #[inline]
    fn default() -> BigInt {
        Zero::zero()
    }
}

impl Zero for BigInt {
    #[inline]
    fn zero() -> BigInt {
        BigInt { repr: Repr::Small(0) }
    }

    /// Representation-level zero test; intentionally not routed through the
    /// two's-complement bit length, whose zero encoding is shared with −1.
    #[inline]
    fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Small(0))
    }
}

impl One for BigInt {
    #[inline]
    fn one() -> BigInt {
        BigInt { repr: Repr::Small(1) }
    }

    #[inline]
    fn is_one(&self) -> bool {
        matches!(self.repr, Repr::Small(1))
    }
}

impl Signed for BigInt {
    #[inline]
    fn abs(&self) -> BigInt {
        match self.sign() {
            Sign::Minus => -self,
            _ => self.clone(),
        }
    }

    #[inline]
    fn abs_sub(&self, other: &BigInt) -> BigInt {
        if *self <= *other {
            Zero::zero()
        } else {
            self - other
        }
    }

    #[inline]
    fn signum(&self) -> BigInt {
        match self.sign() {
            Sign::Plus => One::one(),
            Sign::NoSign => Zero::zero(),
            Sign::Minus => -BigInt::one(),
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.sign() == Sign::Plus
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.sign() == Sign::Minus
    }
}

impl CheckedAdd for BigInt {
    #[inline]
    fn checked_add(&self, v: &BigInt) -> Option<BigInt> {
        Some(self.add(v))
    }
}

impl CheckedSub for BigInt {
    #[inline]
    fn checked_sub(&self, v: &BigInt) -> Option<BigInt> {
        Some(self.sub(v))
    }
}

impl CheckedMul for BigInt {
    #[inline]
    fn checked_mul(&self, v: &BigInt) -> Option<BigInt> {
        Some(self.mul(v))
    }
}

impl CheckedDiv for BigInt {
    #[inline]
    fn checked_div(&self, v: &BigInt) -> Option<BigInt> {
        if v.is_zero() {
            return None;
        }
        Some(self.div(v))
    }
}

impl Pow<u32> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn pow(self, exp: u32) -> BigInt {
        BigInt::pow(self, u64::from(exp))
    }
}

impl Pow<u64> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn pow(self, exp: u64) -> BigInt {
        BigInt::pow(self, exp)
    }
}

impl Integer for BigInt {
    #[inline]
    fn div_rem(&self, other: &BigInt) -> (BigInt, BigInt) {
        div_rem_signed(self, other)
    }

    #[inline]
    fn div_floor(&self, other: &BigInt) -> BigInt {
        let (q, r) = div_rem_signed(self, other);
        if !r.is_zero() && r.sign() != other.sign() {
            q - 1i32
        } else {
            q
        }
    }

    #[inline]
    fn mod_floor(&self, other: &BigInt) -> BigInt {
        let r = self % other;
        if !r.is_zero() && r.sign() != other.sign() {
            r + other
        } else {
            r
        }
    }

    fn div_mod_floor(&self, other: &BigInt) -> (BigInt, BigInt) {
        let (q, r) = div_rem_signed(self, other);
        if !r.is_zero() && r.sign() != other.sign() {
            (q - 1i32, r + other)
        } else {
            (q, r)
        }
    }

    #[inline]
    fn gcd(&self, other: &BigInt) -> BigInt {
        let g = crate::algorithms::gcd(self.magnitude(), other.magnitude());
        BigInt::from(g)
    }

    #[inline]
    fn lcm(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        let gcd = self.gcd(other);
        BigInt::from_biguint(Sign::Plus, (self * other).magnitude().into_owned()) / gcd
    }

    #[inline]
    fn is_multiple_of(&self, other: &BigInt) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    #[inline]
    fn is_even(&self) -> bool {
        match &self.repr {
            Repr::Small(v) => v & 1 == 0,
            Repr::Large(_, mag) => mag.is_even(),
        }
    }

    #[inline]
    fn is_odd(&self) -> bool {
        !self.is_even()
    }
}

impl core::iter::Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(Zero::zero(), |a, b| a + b)
    }
}

impl<'a> core::iter::Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a BigInt>>(iter: I) -> BigInt {
        iter.fold(Zero::zero(), |a, b| a + b)
    }
}

impl core::iter::Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(One::one(), |a, b| a * b)
    }
}

impl<'a> core::iter::Product<&'a BigInt> for BigInt {
    fn product<I: Iterator<Item = &'a BigInt>>(iter: I) -> BigInt {
        iter.fold(One::one(), |a, b| a * b)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.magnitude().to_str_radix(10))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &self.magnitude().to_str_radix(16))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0b", &self.magnitude().to_str_radix(2))
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0o", &self.magnitude().to_str_radix(8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::ToString;

    #[test]
    fn test_canonical_representation() {
        // everything that fits i64 is compact
        assert!(matches!(BigInt::from(i64::MAX).repr, Repr::Small(_)));
        assert!(matches!(BigInt::from(i64::MIN).repr, Repr::Small(_)));
        // one past the boundary is not
        let big = BigInt::from(i64::MAX) + 1i32;
        assert!(matches!(big.repr, Repr::Large(..)));
        // 2^63 is compact with a minus sign only
        let m = BigInt::from_biguint(Sign::Minus, BigUint::from(1u64 << 63));
        assert_eq!(m, BigInt::from(i64::MIN));
        assert!(matches!(m.repr, Repr::Small(i64::MIN)));
        let p = BigInt::from_biguint(Sign::Plus, BigUint::from(1u64 << 63));
        assert!(matches!(p.repr, Repr::Large(..)));
    }

    #[test]
    fn test_negation_promotes_at_the_boundary() {
        let min = BigInt::from(i64::MIN);
        let negated = -&min;
        assert!(matches!(negated.repr, Repr::Large(..)));
        assert_eq!(negated.to_string(), "9223372036854775808");
        assert_eq!(-&negated, min);
        assert_eq!(min.abs(), negated);
    }

    #[test]
    fn test_division_promotes_at_the_boundary() {
        let min = BigInt::from(i64::MIN);
        let q = &min / &BigInt::from(-1i32);
        assert_eq!(q.to_string(), "9223372036854775808");
        assert!(matches!(q.repr, Repr::Large(..)));
    }

    #[test]
    fn test_add_sub_inverse() {
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        use crate::bigrand::RandBigInt;

        let mut rng = XorShiftRng::from_seed([2u8; 16]);
        for bits in [10u64, 62, 63, 64, 65, 128, 1000] {
            let a = rng.gen_bigint(bits);
            let b = rng.gen_bigint(bits / 2 + 1);
            assert_eq!(&(&a + &b) - &b, a, "a={} b={}", a, b);
            assert_eq!(&(&a - &b) + &b, a);
        }
    }

    #[test]
    fn test_mixed_repr_arithmetic() {
        let small = BigInt::from(7i32);
        let large = BigInt::from(i64::MAX) * 10i32;
        let sum = &small + &large;
        assert_eq!(&sum - &large, small);
        // demotion: a large difference that fits becomes compact again
        let diff = &large - &(&large - 3i32);
        assert!(matches!(diff.repr, Repr::Small(3)));
    }

    #[test]
    fn test_truncating_division_signs() {
        let cases: [(i64, i64); 8] = [
            (7, 3),
            (-7, 3),
            (7, -3),
            (-7, -3),
            (6, 3),
            (-6, 3),
            (6, -2),
            (0, 5),
        ];
        for (a, b) in cases {
            let (q, r) = Integer::div_rem(&BigInt::from(a), &BigInt::from(b));
            assert_eq!(q, BigInt::from(a / b));
            assert_eq!(r, BigInt::from(a % b));
        }
    }

    #[test]
    fn test_euclidean_identity_large() {
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        use crate::bigrand::RandBigInt;

        let mut rng = XorShiftRng::from_seed([4u8; 16]);
        for _ in 0..20 {
            let a = rng.gen_bigint(300);
            let b = rng.gen_bigint(130);
            if b.is_zero() {
                continue;
            }
            let (q, r) = Integer::div_rem(&a, &b);
            assert_eq!(&q * &b + &r, a);
            assert!(r.cmp_abs(&b) == Ordering::Less);
            // the remainder takes the dividend's sign
            assert!(r.is_zero() || r.sign() == a.sign());
        }
    }

    #[test]
    fn test_floor_division() {
        let a = BigInt::from(-7i32);
        let b = BigInt::from(3i32);
        assert_eq!(a.div_floor(&b), BigInt::from(-3i32));
        assert_eq!(a.mod_floor(&b), BigInt::from(2i32));
        assert_eq!(a.div_floor(&-&b), BigInt::from(2i32));
        assert_eq!(a.mod_floor(&-&b), BigInt::from(-1i32));
    }

    #[test]
    fn test_gcd_laws() {
        let a = BigInt::from(-12i32);
        let b = BigInt::from(18i32);
        assert_eq!(a.gcd(&b), BigInt::from(6i32));
        assert_eq!(a.gcd(&BigInt::zero()), BigInt::from(12i32));
        assert_eq!(BigInt::zero().gcd(&a), BigInt::from(12i32));
    }

    #[test]
    fn test_pow_signs() {
        let neg_two = BigInt::from(-2i32);
        assert_eq!(neg_two.pow(3), BigInt::from(-8i32));
        assert_eq!(neg_two.pow(4), BigInt::from(16i32));
        assert_eq!(neg_two.pow(0), BigInt::one());
    }

    #[test]
    fn test_modpow() {
        let base = BigInt::from(7i32);
        let exp = BigInt::from(560i32);
        let m = BigInt::from(561i32);
        assert_eq!(base.modpow(&exp, &m), BigInt::one());

        // negative base reduces into the ring first
        let neg = BigInt::from(-5i32);
        assert_eq!(neg.modpow(&BigInt::from(3i32), &BigInt::from(7i32)), BigInt::from(6i32));

        // negative exponent inverts
        let inv = BigInt::from(3i32).modpow(&BigInt::from(-1i32), &BigInt::from(7i32));
        assert_eq!(inv, BigInt::from(5i32));
    }

    #[test]
    fn test_ordering_across_reprs() {
        let small_neg = BigInt::from(-5i32);
        let large_neg = BigInt::from(i64::MIN) * 3i32;
        let large_pos = BigInt::from(i64::MAX) * 3i32;
        assert!(large_neg < small_neg);
        assert!(small_neg < BigInt::zero());
        assert!(BigInt::zero() < large_pos);
        assert!(large_neg < large_pos);
    }
}
