use crate::big_digit::{BigDigit, BITS};
use crate::biguint::{biguint_from_vec, BigUint};

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use num_traits::Zero;

/// `n << shift`, decomposed into a whole-limb move plus a sub-limb carry
/// chain.
pub fn biguint_shl(n: Cow<'_, BigUint>, shift: u64) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let digits = (shift / u64::from(BITS)) as usize;
    let sub_shift = (shift % u64::from(BITS)) as u32;

    let mut data: Vec<BigDigit> = vec![0; digits];
    if sub_shift == 0 {
        data.extend_from_slice(&n.data);
    } else {
        let mut carry = 0;
        for &d in &n.data {
            data.push((d << sub_shift) | carry);
            carry = d >> (BITS as u32 - sub_shift);
        }
        if carry != 0 {
            data.push(carry);
        }
    }

    biguint_from_vec(data)
}

/// `n >> shift`, dropping whole limbs first and then the sub-limb bits.
pub fn biguint_shr(n: Cow<'_, BigUint>, shift: u64) -> BigUint {
    let digits = (shift / u64::from(BITS)) as usize;
    if digits >= n.data.len() {
        return BigUint::zero();
    }
    let sub_shift = (shift % u64::from(BITS)) as u32;

    let mut data: Vec<BigDigit> = n.data[digits..].to_vec();
    if sub_shift > 0 {
        let mut borrow = 0;
        for d in data.iter_mut().rev() {
            let new_borrow = *d << (BITS as u32 - sub_shift);
            *d = (*d >> sub_shift) | borrow;
            borrow = new_borrow;
        }
    }

    biguint_from_vec(data)
}

macro_rules! impl_shift_unsigned {
    ($($t:ty),*) => {$(
        impl Shl<$t> for &BigUint {
            type Output = BigUint;

            #[inline]
            fn shl(self, rhs: $t) -> BigUint {
                biguint_shl(Cow::Borrowed(self), rhs as u64)
            }
        }

        impl Shl<$t> for BigUint {
            type Output = BigUint;

            #[inline]
            fn shl(self, rhs: $t) -> BigUint {
                biguint_shl(Cow::Owned(self), rhs as u64)
            }
        }

        impl ShlAssign<$t> for BigUint {
            #[inline]
            fn shl_assign(&mut self, rhs: $t) {
                let n = core::mem::take(self);
                *self = n << rhs;
            }
        }

        impl Shr<$t> for &BigUint {
            type Output = BigUint;

            #[inline]
            fn shr(self, rhs: $t) -> BigUint {
                biguint_shr(Cow::Borrowed(self), rhs as u64)
            }
        }

        impl Shr<$t> for BigUint {
            type Output = BigUint;

            #[inline]
            fn shr(self, rhs: $t) -> BigUint {
                biguint_shr(Cow::Owned(self), rhs as u64)
            }
        }

        impl ShrAssign<$t> for BigUint {
            #[inline]
            fn shr_assign(&mut self, rhs: $t) {
                let n = core::mem::take(self);
                *self = n >> rhs;
            }
        }
    )*};
}

impl_shift_unsigned!(u32, u64, usize);
