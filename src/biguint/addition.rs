use crate::big_digit::{BigDigit, DoubleBigDigit, BITS};
use crate::biguint::BigUint;

use core::ops::{Add, AddAssign};

use num_traits::CheckedAdd;

/// Add with carry: `a + b + *acc`, keeping the carry in `acc`.
#[inline]
pub fn adc(a: BigDigit, b: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += DoubleBigDigit::from(a);
    *acc += DoubleBigDigit::from(b);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// Two argument addition of raw slices, `a += b`, returning the carry.
///
/// This is used when the data `Vec` might need to resize to push a non-zero
/// carry, so we perform the addition first hoping that it will fit.
///
/// The caller _must_ ensure that `a` is at least as long as `b`.
#[inline]
pub fn __add2(a: &mut [BigDigit], b: &[BigDigit]) -> BigDigit {
    debug_assert!(a.len() >= b.len());

    let mut carry = 0;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, *b, &mut carry);
    }

    if carry != 0 {
        for a in a_hi {
            *a = adc(*a, 0, &mut carry);
            if carry == 0 {
                break;
            }
        }
    }

    carry as BigDigit
}

/// Two argument addition of raw slices:
/// `a += b`
///
/// The caller _must_ ensure that `a` is big enough to store the result - typically this means
/// resizing `a` to `max(a.len(), b.len()) + 1`, to fit a possible carry.
pub fn add2(a: &mut [BigDigit], b: &[BigDigit]) {
    let carry = __add2(a, b);

    debug_assert!(carry == 0);
}

forward_all_binop_to_ref_ref!(impl Add for BigUint, add);

impl Add<&BigUint> for &BigUint {
    type Output = BigUint;

    fn add(self, other: &BigUint) -> BigUint {
        let mut big = self.clone();
        big += other;
        big
    }
}

impl AddAssign<&BigUint> for BigUint {
    #[inline]
    fn add_assign(&mut self, other: &BigUint) {
        let self_len = self.data.len();
        let carry = if self_len < other.data.len() {
            let lo_carry = __add2(&mut self.data[..], &other.data[..self_len]);
            self.data.extend_from_slice(&other.data[self_len..]);
            __add2(&mut self.data[self_len..], &[lo_carry])
        } else {
            __add2(&mut self.data[..], &other.data[..])
        };
        if carry != 0 {
            self.data.push(carry);
        }
    }
}

impl AddAssign<BigUint> for BigUint {
    #[inline]
    fn add_assign(&mut self, other: BigUint) {
        *self += &other;
    }
}

fn scalar_add(a: &BigUint, b: u64) -> BigUint {
    let mut out = a.clone();
    let mut carry = b;
    for d in out.data.iter_mut() {
        if carry == 0 {
            break;
        }
        carry += u64::from(*d);
        *d = carry as BigDigit;
        carry >>= BITS;
    }
    while carry != 0 {
        out.data.push(carry as BigDigit);
        carry >>= BITS;
    }
    out
}

#[inline]
fn scalar_add_u32(a: &BigUint, b: u32) -> BigUint {
    scalar_add(a, u64::from(b))
}

forward_scalar_binop_commutative!(impl Add<u32> for BigUint, add = scalar_add_u32);
forward_scalar_binop_commutative!(impl Add<u64> for BigUint, add = scalar_add);

impl AddAssign<u32> for BigUint {
    #[inline]
    fn add_assign(&mut self, other: u32) {
        *self = &*self + other;
    }
}

impl AddAssign<u64> for BigUint {
    #[inline]
    fn add_assign(&mut self, other: u64) {
        *self = &*self + other;
    }
}

impl CheckedAdd for BigUint {
    #[inline]
    fn checked_add(&self, v: &BigUint) -> Option<BigUint> {
        Some(self.add(v))
    }
}
