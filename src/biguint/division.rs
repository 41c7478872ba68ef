use crate::big_digit::{self, BigDigit, DoubleBigDigit, BITS};
use crate::biguint::addition::__add2;
use crate::biguint::shift::biguint_shl;
use crate::biguint::{biguint_from_vec, BigUint};

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Div, DivAssign, Rem, RemAssign};

use num_integer::Integer;
use num_traits::{CheckedDiv, One, Zero};

/// Divide a two-limb dividend by a one-limb divisor, returning quotient and
/// remainder.
///
/// The caller must ensure `hi < divisor` so the quotient fits one limb.
#[inline]
fn div_wide(hi: BigDigit, lo: BigDigit, divisor: BigDigit) -> (BigDigit, BigDigit) {
    debug_assert!(hi < divisor);

    let lhs = big_digit::to_doublebigdigit(hi, lo);
    let rhs = DoubleBigDigit::from(divisor);
    ((lhs / rhs) as BigDigit, (lhs % rhs) as BigDigit)
}

/// `a / b` and `a % b` for a one-limb divisor, walking the dividend from the
/// top with a 64-bit window.
pub fn div_rem_digit(mut a: BigUint, b: BigDigit) -> (BigUint, BigDigit) {
    assert!(b != 0, "attempt to divide by zero");

    let mut rem = 0;
    for d in a.data.iter_mut().rev() {
        let (q, r) = div_wide(rem, *d, b);
        *d = q;
        rem = r;
    }

    (a.normalized(), rem)
}

/// `a % b` for a one-limb divisor, without computing the quotient.
pub fn rem_digit(a: &BigUint, b: BigDigit) -> BigDigit {
    assert!(b != 0, "attempt to divide by zero");

    let mut rem: DoubleBigDigit = 0;
    let b = DoubleBigDigit::from(b);
    for &d in a.data.iter().rev() {
        rem = ((rem << BITS) | DoubleBigDigit::from(d)) % b;
    }

    rem as BigDigit
}

/// Subtract `b * c` from `a` in place (`a.len() == b.len() + 1`), returning
/// 1 if the subtraction went negative.
fn sub_mul_digit_same_len(a: &mut [BigDigit], b: &[BigDigit], c: BigDigit) -> BigDigit {
    debug_assert!(a.len() == b.len() + 1);

    // the borrow stays in -1..=0 after the arithmetic shift
    let mut borrow: i64 = 0;
    let mut mul_carry: DoubleBigDigit = 0;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, &b) in a_lo.iter_mut().zip(b) {
        let prod = DoubleBigDigit::from(b) * DoubleBigDigit::from(c) + mul_carry;
        mul_carry = prod >> BITS;

        borrow += i64::from(*a);
        borrow -= i64::from(prod as BigDigit);
        *a = borrow as BigDigit;
        borrow >>= BITS;
    }

    let last = &mut a_hi[0];
    borrow += i64::from(*last);
    borrow -= mul_carry as i64;
    *last = borrow as BigDigit;
    borrow >>= BITS;

    borrow.unsigned_abs() as BigDigit
}

/// Knuth's Algorithm D.
///
/// `u` and `d` are already normalized: `d`'s top limb has its high bit set,
/// `d.data.len() >= 2`, and `u` carries one extra (possibly zero) high limb.
/// `shift` is the normalization amount, undone on the remainder at the end.
fn div_rem_core(mut u: BigUint, d: &BigUint, shift: u32) -> (BigUint, BigUint) {
    let n = d.data.len();
    debug_assert!(n >= 2);
    debug_assert!(d.data[n - 1] >> (BITS - 1) == 1);
    debug_assert!(u.data.len() > n);

    let q_len = u.data.len() - n;
    let mut q = vec![0; q_len];

    let v_top = DoubleBigDigit::from(d.data[n - 1]);
    let v_next = DoubleBigDigit::from(d.data[n - 2]);
    let b = DoubleBigDigit::from(big_digit::MAX) + 1;

    for j in (0..q_len).rev() {
        let u2 = DoubleBigDigit::from(u.data[j + n]);
        let u1 = DoubleBigDigit::from(u.data[j + n - 1]);
        let u0 = DoubleBigDigit::from(u.data[j + n - 2]);

        // trial digit from the top two dividend limbs over the top divisor
        // limb; off by at most two
        let (mut q_hat, mut r_hat) = if u2 == v_top {
            (b - 1, u1 + v_top)
        } else {
            let num = (u2 << BITS) | u1;
            (num / v_top, num % v_top)
        };

        // refine against the second divisor limb
        while r_hat < b && q_hat * v_next > (r_hat << BITS | u0) {
            q_hat -= 1;
            r_hat += v_top;
        }

        // multiply and subtract; a rare overshoot by one is repaired by
        // adding the divisor back
        let borrow = sub_mul_digit_same_len(&mut u.data[j..j + n + 1], &d.data, q_hat as BigDigit);
        if borrow != 0 {
            q_hat -= 1;
            // the carry out cancels the earlier borrow
            let carry = __add2(&mut u.data[j..j + n + 1], &d.data);
            debug_assert!(carry == 1);
        }

        q[j] = q_hat as BigDigit;
    }

    u.data.truncate(n);
    u.normalize();

    (biguint_from_vec(q), u >> u64::from(shift))
}

/// `(u / d, u % d)`.
pub fn div_rem(u: BigUint, d: BigUint) -> (BigUint, BigUint) {
    if d.is_zero() {
        panic!("attempt to divide by zero");
    }
    if u.is_zero() {
        return (BigUint::zero(), BigUint::zero());
    }

    if d.data.len() == 1 {
        if d.data[0] == 1 {
            return (u, BigUint::zero());
        }
        let (q, rem) = div_rem_digit(u, d.data[0]);
        return (q, BigUint::from(rem));
    }

    match u.cmp(&d) {
        Ordering::Less => return (BigUint::zero(), u),
        Ordering::Equal => return (BigUint::one(), BigUint::zero()),
        Ordering::Greater => (),
    }

    let shift = d.data.last().unwrap().leading_zeros();
    let d = biguint_shl(Cow::Owned(d), u64::from(shift));
    let mut u = biguint_shl(Cow::Owned(u), u64::from(shift));
    // one extra high limb so every trial window has three limbs to look at
    u.data.push(0);

    div_rem_core(u, &d, shift)
}

/// `(u / d, u % d)` without consuming the operands.
pub fn div_rem_ref(u: &BigUint, d: &BigUint) -> (BigUint, BigUint) {
    if d.is_zero() {
        panic!("attempt to divide by zero");
    }
    if u.is_zero() {
        return (BigUint::zero(), BigUint::zero());
    }

    if d.data.len() == 1 {
        if d.data[0] == 1 {
            return (u.clone(), BigUint::zero());
        }
        let (q, rem) = div_rem_digit(u.clone(), d.data[0]);
        return (q, BigUint::from(rem));
    }

    match u.cmp(d) {
        Ordering::Less => return (BigUint::zero(), u.clone()),
        Ordering::Equal => return (BigUint::one(), BigUint::zero()),
        Ordering::Greater => (),
    }

    let shift = d.data.last().unwrap().leading_zeros();
    let d = biguint_shl(Cow::Borrowed(d), u64::from(shift));
    let mut u = biguint_shl(Cow::Borrowed(u), u64::from(shift));
    u.data.push(0);

    div_rem_core(u, &d, shift)
}

forward_all_binop_to_ref_ref!(impl Div for BigUint, div);

impl Div<&BigUint> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn div(self, other: &BigUint) -> BigUint {
        let (q, _) = div_rem_ref(self, other);
        q
    }
}

impl DivAssign<&BigUint> for BigUint {
    #[inline]
    fn div_assign(&mut self, other: &BigUint) {
        *self = &*self / other;
    }
}

impl DivAssign<BigUint> for BigUint {
    #[inline]
    fn div_assign(&mut self, other: BigUint) {
        *self /= &other;
    }
}

forward_all_binop_to_ref_ref!(impl Rem for BigUint, rem);

impl Rem<&BigUint> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn rem(self, other: &BigUint) -> BigUint {
        let (_, r) = div_rem_ref(self, other);
        r
    }
}

impl RemAssign<&BigUint> for BigUint {
    #[inline]
    fn rem_assign(&mut self, other: &BigUint) {
        *self = &*self % other;
    }
}

impl RemAssign<BigUint> for BigUint {
    #[inline]
    fn rem_assign(&mut self, other: BigUint) {
        *self %= &other;
    }
}

fn scalar_div_u32(a: &BigUint, b: u32) -> BigUint {
    let (q, _) = div_rem_digit(a.clone(), b);
    q
}

fn scalar_rem_u32(a: &BigUint, b: u32) -> BigUint {
    BigUint::from(rem_digit(a, b))
}

fn scalar_div_u64(a: &BigUint, b: u64) -> BigUint {
    let hi = (b >> BITS) as BigDigit;
    if hi == 0 {
        scalar_div_u32(a, b as BigDigit)
    } else {
        a / BigUint::from(b)
    }
}

fn scalar_rem_u64(a: &BigUint, b: u64) -> BigUint {
    let hi = (b >> BITS) as BigDigit;
    if hi == 0 {
        scalar_rem_u32(a, b as BigDigit)
    } else {
        a % BigUint::from(b)
    }
}

forward_scalar_binop!(impl Div<u32> for BigUint, div = scalar_div_u32);
forward_scalar_binop!(impl Div<u64> for BigUint, div = scalar_div_u64);
forward_scalar_binop!(impl Rem<u32> for BigUint, rem = scalar_rem_u32);
forward_scalar_binop!(impl Rem<u64> for BigUint, rem = scalar_rem_u64);

impl CheckedDiv for BigUint {
    #[inline]
    fn checked_div(&self, v: &BigUint) -> Option<BigUint> {
        if v.is_zero() {
            return None;
        }
        Some(self.div(v))
    }
}

impl Integer for BigUint {
    #[inline]
    fn div_rem(&self, other: &BigUint) -> (BigUint, BigUint) {
        div_rem_ref(self, other)
    }

    #[inline]
    fn div_floor(&self, other: &BigUint) -> BigUint {
        let (q, _) = div_rem_ref(self, other);
        q
    }

    #[inline]
    fn mod_floor(&self, other: &BigUint) -> BigUint {
        let (_, r) = div_rem_ref(self, other);
        r
    }

    #[inline]
    fn div_mod_floor(&self, other: &BigUint) -> (BigUint, BigUint) {
        div_rem_ref(self, other)
    }

    /// Greatest common divisor, by the binary algorithm.
    #[inline]
    fn gcd(&self, other: &BigUint) -> BigUint {
        crate::algorithms::gcd(Cow::Borrowed(self), Cow::Borrowed(other))
    }

    /// Lowest common multiple.
    #[inline]
    fn lcm(&self, other: &BigUint) -> BigUint {
        if self.is_zero() || other.is_zero() {
            return BigUint::zero();
        }
        self / self.gcd(other) * other
    }

    #[inline]
    fn is_multiple_of(&self, other: &BigUint) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    #[inline]
    fn is_even(&self) -> bool {
        self.data.first().map_or(true, |x| x & 1 == 0)
    }

    #[inline]
    fn is_odd(&self) -> bool {
        !self.is_even()
    }

    #[inline]
    fn next_multiple_of(&self, other: &Self) -> Self {
        let m = self.mod_floor(other);
        if m.is_zero() {
            self.clone()
        } else {
            self + (other - m)
        }
    }

    #[inline]
    fn prev_multiple_of(&self, other: &Self) -> Self {
        self - self.mod_floor(other)
    }
}

/// Converts to a `u64` quotient digit vector; test support for residue
/// checks.
impl BigUint {
    /// The value as little-endian `u64` digits.
    pub fn to_u64_digits(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(self.data.len().div_ceil(2));
        for chunk in self.data.chunks(2) {
            let lo = u64::from(chunk[0]);
            let hi = chunk.get(1).map_or(0, |&d| u64::from(d));
            out.push(lo | (hi << BITS));
        }
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_traits::Num;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    #[test]
    fn test_div_rem_digit() {
        let a = BigUint::from(1_000_000_007u64 * 3 + 2);
        let (q, r) = div_rem_digit(a, 1_000_000_007);
        assert_eq!(q, BigUint::from(3u32));
        assert_eq!(r, 2);
    }

    #[test]
    fn test_div_rem_small_cases() {
        let zero = BigUint::zero();
        let one = BigUint::one();
        let seven = BigUint::from(7u32);

        assert_eq!(div_rem_ref(&zero, &seven), (zero.clone(), zero.clone()));
        assert_eq!(div_rem_ref(&seven, &one), (seven.clone(), zero.clone()));
        assert_eq!(div_rem_ref(&one, &seven), (zero.clone(), one.clone()));
        assert_eq!(div_rem_ref(&seven, &seven), (one.clone(), zero.clone()));
    }

    #[test]
    fn test_known_quotient() {
        let u = BigUint::from_str_radix("121932631137021795226185032733622923332237463801111263526900", 10)
            .unwrap();
        let d = BigUint::from_str_radix("987654321098765432109876543210", 10).unwrap();
        let q = BigUint::from_str_radix("123456789012345678901234567890", 10).unwrap();
        assert_eq!(div_rem_ref(&u, &d), (q, BigUint::zero()));
    }

    #[test]
    fn test_euclidean_identity() {
        let mut rng = XorShiftRng::from_seed([42u8; 16]);
        for (ab, bb) in [(1000u64, 50u64), (512, 512), (2048, 65), (257, 256), (64, 33)] {
            let a = rng.gen_biguint(ab);
            let b = rng.gen_biguint(bb) + 1u32;
            let (q, r) = div_rem_ref(&a, &b);
            assert!(r < b);
            assert_eq!(q * &b + &r, a);
        }
    }

    #[test]
    fn test_algorithm_d_add_back_case() {
        // dividend chosen so the trial digit overshoots and the add-back
        // path runs: top limbs equal forces q_hat = B - 1
        let d = biguint_from_vec(alloc::vec![0, 1, 0x8000_0000]);
        let u = biguint_from_vec(alloc::vec![1, 2, 0x7fff_ffff, 0x8000_0000]);
        let (q, r) = div_rem_ref(&u, &d);
        assert_eq!(&q * &d + &r, u);
        assert!(r < d);
    }
}
