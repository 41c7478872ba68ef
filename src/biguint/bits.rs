use crate::biguint::BigUint;

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

forward_all_binop_to_ref_ref!(impl BitAnd for BigUint, bitand);

impl BitAnd<&BigUint> for &BigUint {
    type Output = BigUint;

    fn bitand(self, other: &BigUint) -> BigUint {
        let mut out = self.clone();
        out &= other;
        out
    }
}

impl BitAndAssign<&BigUint> for BigUint {
    fn bitand_assign(&mut self, other: &BigUint) {
        self.data.truncate(other.data.len());
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a &= b;
        }
        self.normalize();
    }
}

impl BitAndAssign<BigUint> for BigUint {
    #[inline]
    fn bitand_assign(&mut self, other: BigUint) {
        *self &= &other;
    }
}

forward_all_binop_to_ref_ref!(impl BitOr for BigUint, bitor);

impl BitOr<&BigUint> for &BigUint {
    type Output = BigUint;

    fn bitor(self, other: &BigUint) -> BigUint {
        let mut out = self.clone();
        out |= other;
        out
    }
}

impl BitOrAssign<&BigUint> for BigUint {
    fn bitor_assign(&mut self, other: &BigUint) {
        if self.data.len() < other.data.len() {
            self.data.resize(other.data.len(), 0);
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
    }
}

impl BitOrAssign<BigUint> for BigUint {
    #[inline]
    fn bitor_assign(&mut self, other: BigUint) {
        *self |= &other;
    }
}

forward_all_binop_to_ref_ref!(impl BitXor for BigUint, bitxor);

impl BitXor<&BigUint> for &BigUint {
    type Output = BigUint;

    fn bitxor(self, other: &BigUint) -> BigUint {
        let mut out = self.clone();
        out ^= other;
        out
    }
}

impl BitXorAssign<&BigUint> for BigUint {
    fn bitxor_assign(&mut self, other: &BigUint) {
        if self.data.len() < other.data.len() {
            self.data.resize(other.data.len(), 0);
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a ^= b;
        }
        self.normalize();
    }
}

impl BitXorAssign<BigUint> for BigUint {
    #[inline]
    fn bitxor_assign(&mut self, other: BigUint) {
        *self ^= &other;
    }
}
