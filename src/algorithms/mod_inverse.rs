use crate::bigint::Sign::Minus;
use crate::{BigInt, BigUint};

use alloc::borrow::Cow;

use num_integer::Integer;
use num_traits::{One, Zero};

/// Modular multiplicative inverse of `g` modulo `m`, in `[0, m)`, or `None`
/// when `gcd(g, m) != 1` (or `m` is zero).
///
/// Odd moduli use Kaliski's Montgomery inverse; even moduli use the
/// multiplication-free shifting Euclidean algorithm.
pub fn mod_inverse(g: Cow<'_, BigUint>, m: Cow<'_, BigUint>) -> Option<BigInt> {
    mod_inverse_unsigned(g.as_ref(), m.as_ref()).map(BigInt::from)
}

pub fn mod_inverse_unsigned(g: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    if m.is_one() {
        return Some(BigUint::zero());
    }
    let a = g % m;
    if a.is_zero() {
        return None;
    }
    if m.is_odd() {
        montgomery_inverse_odd(&a, m)
    } else {
        shifting_euclid_inverse(&a, m)
    }
}

/// Kaliski's Montgomery inverse, for odd `m` and `0 < a < m`.
///
/// Phase one runs the binary extended Euclidean walk and produces the
/// almost inverse `a^-1 * 2^k mod m`; phase two strips the `2^k` factor
/// with modular halvings, each exact because `m` is odd.
fn montgomery_inverse_odd(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    debug_assert!(m.is_odd());

    let mut u = m.clone();
    let mut v = a.clone();
    let mut r = BigUint::zero();
    let mut s = BigUint::one();
    let mut k: u64 = 0;

    while !v.is_zero() {
        if u.is_even() {
            u >>= 1u32;
            s <<= 1u32;
        } else if v.is_even() {
            v >>= 1u32;
            r <<= 1u32;
        } else if u > v {
            u -= &v;
            u >>= 1u32;
            r += &s;
            s <<= 1u32;
        } else {
            v -= &u;
            v >>= 1u32;
            s += &r;
            r <<= 1u32;
        }
        k += 1;
    }

    // u has shrunk to gcd(a, m)
    if !u.is_one() {
        return None;
    }

    while r >= *m {
        r -= m;
    }
    let mut r = m - r;

    for _ in 0..k {
        if r.is_even() {
            r >>= 1u32;
        } else {
            r = (r + m) >> 1u32;
        }
    }

    Some(r)
}

/// Hars' shifting Euclidean inverse: reduction by shifted addition or
/// subtraction only, valid for any modulus.
///
/// Invariant: `r * a = u (mod m)` and `s * a = v (mod m)`; each step
/// cancels the top bit of the larger of `u`, `v` against the other.
fn shifting_euclid_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let mut u = BigInt::from(m.clone());
    let mut v = BigInt::from(a.clone());
    let mut r = BigInt::zero();
    let mut s = BigInt::one();

    while !v.is_zero() {
        let du = u.bits();
        let dv = v.bits();
        if du >= dv {
            let f = du - dv;
            if u.sign() == v.sign() {
                u -= &v << f;
                r -= &s << f;
            } else {
                u += &v << f;
                r += &s << f;
            }
        }
        if u.cmp_abs(&v) == core::cmp::Ordering::Less {
            core::mem::swap(&mut u, &mut v);
            core::mem::swap(&mut r, &mut s);
        }
    }

    // r * a = u = ±gcd (mod m)
    let (sign, mag) = u.into_parts();
    if !mag.is_one() {
        return None;
    }
    let inv = if sign == Minus { -r } else { r };
    let inv = inv.mod_floor(&BigInt::from(m.clone()));
    let (_, inv) = inv.into_parts();
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BigUint;

    use num_integer::Integer;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    fn check_inverse(a: &BigUint, m: &BigUint) {
        match mod_inverse_unsigned(a, m) {
            Some(inv) => {
                assert!(inv < *m);
                assert_eq!(
                    (a * &inv) % m,
                    BigUint::one(),
                    "{} * {} != 1 (mod {})",
                    a,
                    inv,
                    m
                );
            }
            None => {
                assert!(
                    !a.gcd(m).is_one(),
                    "inverse of {} mod {} should exist",
                    a,
                    m
                );
            }
        }
    }

    #[test]
    fn test_known_inverses() {
        let inv = mod_inverse_unsigned(&BigUint::from(3u32), &BigUint::from(7u32)).unwrap();
        assert_eq!(inv, BigUint::from(5u32));

        let inv = mod_inverse_unsigned(&BigUint::from(3u32), &BigUint::from(10u32)).unwrap();
        assert_eq!(inv, BigUint::from(7u32));

        // 2^j inverses modulo odd numbers, the CRT recombination case
        let inv = mod_inverse_unsigned(&BigUint::from(8u32), &BigUint::from(561u32)).unwrap();
        assert_eq!((BigUint::from(8u32) * inv) % BigUint::from(561u32), BigUint::one());
    }

    #[test]
    fn test_no_inverse() {
        assert_eq!(
            mod_inverse_unsigned(&BigUint::from(6u32), &BigUint::from(9u32)),
            None
        );
        assert_eq!(
            mod_inverse_unsigned(&BigUint::from(4u32), &BigUint::from(8u32)),
            None
        );
        assert_eq!(
            mod_inverse_unsigned(&BigUint::zero(), &BigUint::from(17u32)),
            None
        );
    }

    #[test]
    fn test_modulus_one() {
        assert_eq!(
            mod_inverse_unsigned(&BigUint::from(5u32), &BigUint::one()),
            Some(BigUint::zero())
        );
    }

    #[test]
    fn test_random_odd_moduli() {
        let mut rng = XorShiftRng::from_seed([21u8; 16]);
        for bits in [8u64, 32, 64, 200] {
            for _ in 0..10 {
                let m = rng.gen_biguint(bits) | BigUint::one();
                if m.is_one() {
                    continue;
                }
                let a = rng.gen_biguint(bits + 3);
                check_inverse(&a, &m);
            }
        }
    }

    #[test]
    fn test_random_even_moduli() {
        let mut rng = XorShiftRng::from_seed([22u8; 16]);
        for bits in [8u64, 32, 64, 200] {
            for _ in 0..10 {
                let m = rng.gen_biguint(bits) << 1u32;
                if m.is_zero() {
                    continue;
                }
                let a = rng.gen_biguint(bits + 3) | BigUint::one();
                check_inverse(&a, &m);
            }
        }
    }
}
