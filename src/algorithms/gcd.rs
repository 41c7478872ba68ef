use crate::BigUint;

use alloc::borrow::Cow;

use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Once the operands' bit lengths differ by this much, a single Euclidean
/// reduction replaces the subtract-and-shift walk.
const EUCLID_SHORTCUT_BITS: u64 = 64;

/// GCD sets z to the greatest common divisor of a and b and returns z.
///
/// The binary algorithm: common factors of two are stripped up front, then
/// the larger operand is repeatedly reduced by the smaller and re-stripped,
/// with two escapes: a modulo reduction when the operands are far apart,
/// and the native-word GCD once both fit in a machine word.
///
/// GCD(0, 0) = 0, GCD(a, 0) = a, GCD(0, b) = b.
pub fn gcd(a_in: Cow<'_, BigUint>, b_in: Cow<'_, BigUint>) -> BigUint {
    if a_in.is_zero() {
        return b_in.into_owned();
    }
    if b_in.is_zero() {
        return a_in.into_owned();
    }

    let mut a = a_in.into_owned();
    let mut b = b_in.into_owned();

    // strip factors of two; the common ones come back at the end
    let a_twos = a.trailing_zeros().unwrap();
    a >>= a_twos;
    let b_twos = b.trailing_zeros().unwrap();
    b >>= b_twos;
    let shift = Ord::min(a_twos, b_twos);

    // both odd from here on, so every difference is even
    loop {
        debug_assert!(a.is_odd());
        debug_assert!(b.is_odd());

        if let (Some(x), Some(y)) = (a.to_u64(), b.to_u64()) {
            return BigUint::from(x.gcd(&y)) << shift;
        }

        if a < b {
            core::mem::swap(&mut a, &mut b);
        }

        if a.bits() >= b.bits() + EUCLID_SHORTCUT_BITS {
            a = &a % &b;
        } else {
            a -= &b;
        }

        if a.is_zero() {
            return b << shift;
        }
        a >>= a.trailing_zeros().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BigUint;

    use core::str::FromStr;

    use num_traits::One;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    fn euclid_gcd(mut a: BigUint, mut b: BigUint) -> BigUint {
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    #[test]
    fn test_gcd_zero_cases() {
        let zero = BigUint::zero();
        let seven = BigUint::from(7u32);

        assert_eq!(gcd(Cow::Borrowed(&zero), Cow::Borrowed(&zero)), zero);
        assert_eq!(gcd(Cow::Borrowed(&seven), Cow::Borrowed(&zero)), seven);
        assert_eq!(gcd(Cow::Borrowed(&zero), Cow::Borrowed(&seven)), seven);
    }

    #[test]
    fn test_gcd_known_cases() {
        let cases = [
            ["240", "46", "2"],
            ["12", "18", "6"],
            ["1", "98920366548084643601728869055592650835572950932266967461790948584315647051443", "1"],
            ["935000000000000000", "935", "935"],
            [
                "18446744073709551616",
                "4722366482869645213696",
                "18446744073709551616",
            ],
        ];
        for [a, b, expected] in cases {
            let a = BigUint::from_str(a).unwrap();
            let b = BigUint::from_str(b).unwrap();
            let expected = BigUint::from_str(expected).unwrap();
            assert_eq!(gcd(Cow::Borrowed(&a), Cow::Borrowed(&b)), expected);
            assert_eq!(gcd(Cow::Borrowed(&b), Cow::Borrowed(&a)), expected);
        }
    }

    #[test]
    fn test_gcd_matches_euclid() {
        let mut rng = XorShiftRng::from_seed([1u8; 16]);

        for i in 1usize..40 {
            for j in &[1usize, 16, 64, 128] {
                let a = rng.gen_biguint((i * j) as u64);
                let b = rng.gen_biguint((i * j / 2 + 1) as u64);
                let g = gcd(Cow::Borrowed(&a), Cow::Borrowed(&b));
                assert_eq!(
                    g,
                    euclid_gcd(a.clone(), b.clone()),
                    "gcd({}, {})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_gcd_divides_both() {
        let mut rng = XorShiftRng::from_seed([9u8; 16]);

        for _ in 0..50 {
            let a = rng.gen_biguint(300);
            let b = rng.gen_biguint(200);
            let g = gcd(Cow::Borrowed(&a), Cow::Borrowed(&b));
            if g.is_zero() {
                assert!(a.is_zero() && b.is_zero());
                continue;
            }
            assert!((&a % &g).is_zero());
            assert!((&b % &g).is_zero());
        }
    }

    #[test]
    fn test_gcd_shared_power_of_two() {
        let a = BigUint::from(3u32 * 64);
        let b = BigUint::from(5u32 * 16);
        assert_eq!(gcd(Cow::Owned(a), Cow::Owned(b)), BigUint::from(16u32));
        let one = BigUint::one();
        let big = (BigUint::one() << 200u32) + 1u32;
        assert_eq!(gcd(Cow::Borrowed(&big), Cow::Borrowed(&one)), one);
    }
}
