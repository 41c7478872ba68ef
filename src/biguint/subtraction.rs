use crate::big_digit::{BigDigit, BITS};
use crate::biguint::BigUint;

use core::ops::{Sub, SubAssign};

use num_traits::{CheckedSub, Zero};

/// Subtract with borrow: `a - b - borrow`, keeping the borrow in `acc`.
///
/// The accumulator is signed so the borrow survives the arithmetic right
/// shift as `-1`.
#[inline]
pub fn sbb(a: BigDigit, b: BigDigit, acc: &mut i64) -> BigDigit {
    *acc += i64::from(a);
    *acc -= i64::from(b);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// Two argument subtraction of raw slices:
/// `a -= b`
///
/// The caller _must_ ensure that `a >= b`; the final borrow is asserted to
/// be zero.
pub fn sub2(a: &mut [BigDigit], b: &[BigDigit]) {
    let mut borrow = 0;

    let len = Ord::min(a.len(), b.len());
    let (a_lo, a_hi) = a.split_at_mut(len);
    let (b_lo, b_hi) = b.split_at(len);

    for (a, b) in a_lo.iter_mut().zip(b_lo) {
        *a = sbb(*a, *b, &mut borrow);
    }

    if borrow != 0 {
        for a in a_hi {
            *a = sbb(*a, 0, &mut borrow);
            if borrow == 0 {
                break;
            }
        }
    }

    // note: we're _required_ to fail on underflow
    assert!(
        borrow == 0 && b_hi.iter().all(|x| x.is_zero()),
        "cannot subtract b from a because b is larger than a"
    );
}

/// Two argument subtraction of raw slices:
/// `b = a - b`
///
/// Returns the final borrow, which the caller must resolve; `b` must be at
/// least as long as `a`.
pub fn __sub2rev(a: &[BigDigit], b: &mut [BigDigit]) -> BigDigit {
    debug_assert!(b.len() >= a.len());

    let mut borrow = 0;

    let len = Ord::min(a.len(), b.len());
    let (a_lo, a_hi) = a.split_at(len);
    let (b_lo, b_hi) = b.split_at_mut(len);

    for (a, b) in a_lo.iter().zip(b_lo) {
        *b = sbb(*a, *b, &mut borrow);
    }

    assert!(a_hi.is_empty());

    // note: we can't just report the borrow here because we may have a
    // higher word to take the borrow from
    for b in b_hi {
        *b = sbb(0, *b, &mut borrow);
        if borrow == 0 {
            break;
        }
    }

    borrow as BigDigit
}

/// Two argument subtraction of raw slices:
/// `b = a - b`
///
/// The caller _must_ ensure that `a >= b`.
pub fn sub2rev(a: &[BigDigit], b: &mut [BigDigit]) {
    let borrow = __sub2rev(a, b);

    // note: we're _required_ to fail on underflow
    assert!(
        borrow == 0,
        "cannot subtract b from a because b is larger than a"
    );
}

forward_all_binop_to_ref_ref!(impl Sub for BigUint, sub);

impl Sub<&BigUint> for &BigUint {
    type Output = BigUint;

    fn sub(self, other: &BigUint) -> BigUint {
        let mut big = self.clone();
        big -= other;
        big
    }
}

impl SubAssign<&BigUint> for BigUint {
    fn sub_assign(&mut self, other: &BigUint) {
        sub2(&mut self.data[..], &other.data[..]);
        self.normalize();
    }
}

impl SubAssign<BigUint> for BigUint {
    #[inline]
    fn sub_assign(&mut self, other: BigUint) {
        *self -= &other;
    }
}

fn scalar_sub(a: &BigUint, b: u64) -> BigUint {
    let mut out = a.clone();
    let lo = b as BigDigit;
    let hi = (b >> BITS) as BigDigit;
    if hi == 0 {
        sub2(&mut out.data, &[lo]);
    } else {
        sub2(&mut out.data, &[lo, hi]);
    }
    out.normalize();
    out
}

#[inline]
fn scalar_sub_u32(a: &BigUint, b: u32) -> BigUint {
    scalar_sub(a, u64::from(b))
}

forward_scalar_binop!(impl Sub<u32> for BigUint, sub = scalar_sub_u32);
forward_scalar_binop!(impl Sub<u64> for BigUint, sub = scalar_sub);

impl CheckedSub for BigUint {
    #[inline]
    fn checked_sub(&self, v: &BigUint) -> Option<BigUint> {
        if self < v {
            return None;
        }
        Some(self.sub(v))
    }
}
