use alloc::borrow::Cow;

use num_integer::Integer;
use num_traits::Signed;

use crate::algorithms::{mod_inverse, mod_inverse_unsigned};
use crate::{BigInt, BigUint};

/// Generic trait for modular multiplicative inverse.
///
/// Computes the [modular multiplicative inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse)
/// of an integer *a* modulo *m*.
///
/// Returns `None` if the inverse does not exist (i.e., `gcd(a, m) != 1`).
pub trait ModInverse<R: Sized>: Sized {
    /// The output type of the modular inverse.
    type Output: Sized;

    /// Returns the modular inverse of `self` modulo `m`, or `None` if it does not exist.
    fn mod_inverse(self, m: R) -> Option<Self::Output>;
}

/// Generic trait for modular exponentiation.
///
/// Computes `self^exponent mod modulus`, returning `None` when the modulus
/// is not positive, or when the exponent is negative and `self` has no
/// inverse modulo the modulus.
pub trait ModPow<E: Sized, M: Sized>: Sized {
    /// The output type of the modular power.
    type Output: Sized;

    /// Returns `self^exponent mod modulus` in `[0, modulus)`.
    fn mod_pow(self, exponent: E, modulus: M) -> Option<Self::Output>;
}

// --- ModInverse impls ---

impl ModInverse<&BigUint> for BigUint {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigUint) -> Option<BigInt> {
        mod_inverse(Cow::Owned(self), Cow::Borrowed(m))
    }
}

impl ModInverse<BigUint> for BigUint {
    type Output = BigInt;

    fn mod_inverse(self, m: BigUint) -> Option<BigInt> {
        mod_inverse(Cow::Owned(self), Cow::Owned(m))
    }
}

impl ModInverse<&BigUint> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigUint) -> Option<BigInt> {
        if self.is_negative() {
            let m_int = BigInt::from(m.clone());
            let v = self.mod_floor(&m_int).into_parts().1;
            mod_inverse(Cow::Owned(v), Cow::Borrowed(m))
        } else {
            mod_inverse(Cow::Owned(self.into_parts().1), Cow::Borrowed(m))
        }
    }
}

impl ModInverse<&BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        let modulus = m.magnitude().into_owned();

        if self.is_negative() {
            let v = self
                .mod_floor(&BigInt::from(modulus.clone()))
                .into_parts()
                .1;
            mod_inverse(Cow::Owned(v), Cow::Owned(modulus))
        } else {
            mod_inverse(Cow::Owned(self.into_parts().1), Cow::Owned(modulus))
        }
    }
}

impl ModInverse<BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        self.mod_inverse(&m)
    }
}

// --- ModPow impls ---

impl ModPow<&BigUint, &BigUint> for &BigUint {
    type Output = BigUint;

    fn mod_pow(self, exponent: &BigUint, modulus: &BigUint) -> Option<BigUint> {
        use num_traits::Zero;

        if modulus.is_zero() {
            return None;
        }
        Some(self.modpow(exponent, modulus))
    }
}

impl ModPow<&BigInt, &BigInt> for &BigInt {
    type Output = BigInt;

    fn mod_pow(self, exponent: &BigInt, modulus: &BigInt) -> Option<BigInt> {
        if !modulus.is_positive() {
            return None;
        }
        if exponent.is_negative() {
            let base = self.mod_floor(modulus);
            let inv = mod_inverse_unsigned(
                base.magnitude().as_ref(),
                modulus.magnitude().as_ref(),
            )?;
            let e = exponent.magnitude();
            let m = modulus.magnitude();
            return Some(BigInt::from(inv.modpow(e.as_ref(), m.as_ref())));
        }
        Some(self.modpow(exponent, modulus))
    }
}
