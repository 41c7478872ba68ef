use crate::big_digit::{self, BigDigit, DoubleBigDigit, BITS};
use crate::bigint::Sign::{self, Minus, NoSign, Plus};
use crate::biguint::addition::{__add2, add2};
use crate::biguint::subtraction::sub2;
use crate::biguint::{biguint_from_vec, cmp_slice, BigUint};

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Mul, MulAssign};

use num_traits::{CheckedMul, Zero};

/// Number of limbs below which plain long multiplication is used.
///
/// Above it the operands are split and multiplied with Karatsuba's three
/// half-size products.
const KARATSUBA_THRESHOLD: usize = 63;

/// Multiply-accumulate with carry: `a + b * c + *acc`, keeping the overflow
/// in `acc`.
#[inline]
pub fn mac_with_carry(a: BigDigit, b: BigDigit, c: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += DoubleBigDigit::from(a);
    *acc += DoubleBigDigit::from(b) * DoubleBigDigit::from(c);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// `acc += b * c` for a single digit `c`.
///
/// `acc` must be long enough to absorb the final carry.
pub fn mac_digit(acc: &mut [BigDigit], b: &[BigDigit], c: BigDigit) {
    if c == 0 {
        return;
    }

    let mut carry = 0;
    let (a_lo, a_hi) = acc.split_at_mut(b.len());

    for (a, &b) in a_lo.iter_mut().zip(b) {
        *a = mac_with_carry(*a, b, c, &mut carry);
    }

    // the carry after `a + b * c` fits one digit
    debug_assert!(carry >> BITS == 0);
    let carry = __add2(a_hi, &[carry as BigDigit]);
    debug_assert!(carry == 0);
}

/// Three argument multiply-accumulate:
/// `acc += b * c`
///
/// `acc` must be at least `b.len() + c.len()` digits long.
pub fn mac3(acc: &mut [BigDigit], b: &[BigDigit], c: &[BigDigit]) {
    // order the operands so `x` is the shorter one
    let (x, y) = if b.len() < c.len() { (b, c) } else { (c, b) };

    // trim leading/trailing zeros off the short operand
    let x = match x.iter().rposition(|&d| d != 0) {
        Some(last) => &x[..=last],
        None => return,
    };

    if x.len() <= 1 || x.len() < KARATSUBA_THRESHOLD {
        // Long multiplication
        for (i, &xi) in x.iter().enumerate() {
            mac_digit(&mut acc[i..], y, xi);
        }
        return;
    }

    // Karatsuba multiplication:
    //
    // Split x = x0 + x1 * B^b, y = y0 + y1 * B^b at the half-limb boundary
    // of the shorter operand. Then
    //
    //     x * y = x1y1 * B^2b
    //           + (x1y1 + x0y0 - (x1 - x0)(y1 - y0)) * B^b
    //           + x0y0
    //
    // which costs three recursive products instead of four.
    let b = x.len() / 2;
    let (x0, x1) = x.split_at(b);
    let (y0, y1) = y.split_at(b);

    // `p` holds a sub-product; reused between the three products
    let len = x1.len() + y1.len() + 1;
    let mut p = BigUint { data: vec![0; len] };

    // p = x1 * y1
    mac3(&mut p.data, x1, y1);
    p.normalize();

    add2(&mut acc[b..], &p.data);
    add2(&mut acc[b * 2..], &p.data);

    // p = x0 * y0
    p.data.truncate(0);
    p.data.resize(x0.len() + y0.len() + 1, 0);
    mac3(&mut p.data, x0, y0);
    p.normalize();

    add2(acc, &p.data);
    add2(&mut acc[b..], &p.data);

    // the cross term (x1 - x0)(y1 - y0) is signed; its sign decides
    // whether the middle coefficient gains or loses it
    let (j0_sign, j0) = sub_sign(x1, x0);
    let (j1_sign, j1) = sub_sign(y1, y0);

    match j0_sign * j1_sign {
        Plus => {
            p.data.truncate(0);
            p.data.resize(j0.data.len() + j1.data.len() + 1, 0);
            mac3(&mut p.data, &j0.data, &j1.data);
            p.normalize();

            sub2(&mut acc[b..], &p.data);
        }
        Minus => {
            mac3(&mut acc[b..], &j0.data, &j1.data);
        }
        NoSign => (),
    }
}

/// Three argument multiplication: `b * c` into a fresh [`BigUint`].
pub fn mul3(b: &[BigDigit], c: &[BigDigit]) -> BigUint {
    let len = b.len() + c.len() + 1;
    let mut prod = BigUint { data: vec![0; len] };

    mac3(&mut prod.data, b, c);
    prod.normalized()
}

/// `a *= b` for a single digit `b`.
pub fn scalar_mul(a: &mut BigUint, b: BigDigit) {
    match b {
        0 => a.set_zero(),
        1 => (),
        _ => {
            let mut carry = 0;
            for d in a.data.iter_mut() {
                carry += DoubleBigDigit::from(*d) * DoubleBigDigit::from(b);
                *d = carry as BigDigit;
                carry >>= BITS;
            }
            if carry != 0 {
                a.data.push(carry as BigDigit);
            }
        }
    }
}

/// Squaring.
///
/// Only the `i < j` cross products are computed; they are doubled with a
/// single shift and the `a[i]^2` diagonal is added on top, roughly halving
/// the digit multiplications of a general product.
pub fn sqr(a: &[BigDigit]) -> BigUint {
    if a.len() >= KARATSUBA_THRESHOLD {
        // the divide-and-conquer product already skips the redundant work
        return mul3(a, a);
    }

    let mut prod: Vec<BigDigit> = vec![0; a.len() * 2 + 1];

    // cross products a[i] * a[j] for i < j, at position i + j
    for (i, &ai) in a.iter().enumerate() {
        mac_digit(&mut prod[i * 2 + 1..], &a[i + 1..], ai);
    }

    // double
    let mut carry = 0;
    for d in prod.iter_mut() {
        let next = *d >> (BITS - 1);
        *d = (*d << 1) | carry;
        carry = next;
    }
    debug_assert!(carry == 0);

    // diagonal a[i]^2 at position 2i
    for (i, &ai) in a.iter().enumerate() {
        let (hi, lo) = big_digit::from_doublebigdigit(DoubleBigDigit::from(ai) * DoubleBigDigit::from(ai));
        let carry = __add2(&mut prod[i * 2..], &[lo, hi]);
        debug_assert!(carry == 0);
    }

    biguint_from_vec(prod)
}

/// `a - b` as a signed magnitude, ignoring any zero-trimming the caller has
/// not done.
pub fn sub_sign(mut a: &[BigDigit], mut b: &[BigDigit]) -> (Sign, BigUint) {
    // strip high zeros so the comparison is meaningful
    if let Some(last) = a.iter().rposition(|&d| d != 0) {
        a = &a[..=last];
    } else {
        a = &[];
    }
    if let Some(last) = b.iter().rposition(|&d| d != 0) {
        b = &b[..=last];
    } else {
        b = &[];
    }

    match cmp_slice(a, b) {
        core::cmp::Ordering::Greater => {
            let mut a = a.to_vec();
            sub2(&mut a, b);
            (Plus, biguint_from_vec(a))
        }
        core::cmp::Ordering::Less => {
            let mut b = b.to_vec();
            sub2(&mut b, a);
            (Minus, biguint_from_vec(b))
        }
        core::cmp::Ordering::Equal => (NoSign, BigUint::zero()),
    }
}

forward_all_binop_to_ref_ref!(impl Mul for BigUint, mul);

impl Mul<&BigUint> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn mul(self, other: &BigUint) -> BigUint {
        if self.is_zero() || other.is_zero() {
            return BigUint::zero();
        }
        mul3(&self.data, &other.data)
    }
}

impl MulAssign<&BigUint> for BigUint {
    #[inline]
    fn mul_assign(&mut self, other: &BigUint) {
        *self = &*self * other;
    }
}

impl MulAssign<BigUint> for BigUint {
    #[inline]
    fn mul_assign(&mut self, other: BigUint) {
        *self = &*self * &other;
    }
}

fn scalar_mul_u32(a: &BigUint, b: u32) -> BigUint {
    let mut out = a.clone();
    scalar_mul(&mut out, b);
    out.normalize();
    out
}

fn scalar_mul_u64(a: &BigUint, b: u64) -> BigUint {
    let lo = b as BigDigit;
    let hi = (b >> BITS) as BigDigit;
    if hi == 0 {
        scalar_mul_u32(a, lo)
    } else if a.is_zero() {
        BigUint::zero()
    } else {
        mul3(&a.data, &[lo, hi])
    }
}

forward_scalar_binop_commutative!(impl Mul<u32> for BigUint, mul = scalar_mul_u32);
forward_scalar_binop_commutative!(impl Mul<u64> for BigUint, mul = scalar_mul_u64);

impl CheckedMul for BigUint {
    #[inline]
    fn checked_mul(&self, v: &BigUint) -> Option<BigUint> {
        Some(self.mul(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biguint::BigUint;

    use num_traits::Num;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    #[test]
    fn test_sub_sign() {
        let a = [1, 2, 3];
        let b = [1, 2];

        let (sign, diff) = sub_sign(&a, &b);
        assert_eq!(sign, Plus);
        assert_eq!(diff, BigUint::new(alloc::vec![0, 0, 3]));

        let (sign, diff) = sub_sign(&b, &a);
        assert_eq!(sign, Minus);
        assert_eq!(diff, BigUint::new(alloc::vec![0, 0, 3]));

        let (sign, _) = sub_sign(&a, &a);
        assert_eq!(sign, NoSign);
    }

    #[test]
    fn test_sqr_matches_mul() {
        let mut rng = XorShiftRng::from_seed([7u8; 16]);
        for bits in [0u64, 1, 31, 32, 64, 100, 1000, 2500] {
            let a = rng.gen_biguint(bits);
            assert_eq!(sqr(&a.data), &a * &a, "sqr disagrees at {} bits", bits);
        }
    }

    /// Plain long multiplication, with no threshold switch.
    fn long_mul(a: &BigUint, b: &BigUint) -> BigUint {
        let mut prod = alloc::vec![0; a.data.len() + b.data.len() + 1];
        for (i, &d) in a.data.iter().enumerate() {
            mac_digit(&mut prod[i..], &b.data, d);
        }
        biguint_from_vec(prod)
    }

    #[test]
    fn test_karatsuba_agrees_with_schoolbook_across_the_threshold() {
        let mut rng = XorShiftRng::from_seed([8u8; 16]);
        for limbs in [
            KARATSUBA_THRESHOLD - 1,
            KARATSUBA_THRESHOLD,
            KARATSUBA_THRESHOLD + 1,
            KARATSUBA_THRESHOLD * 2,
            KARATSUBA_THRESHOLD * 3 + 7,
        ] {
            let a = rng.gen_biguint(32 * limbs as u64);
            let b = rng.gen_biguint(32 * limbs as u64 - 13);
            assert_eq!(&a * &b, long_mul(&a, &b), "disagreement at {} limbs", limbs);
        }
    }

    #[test]
    fn test_product_residues() {
        // residues modulo word-sized primes are preserved by a correct product
        const P: [u64; 3] = [4_294_967_291, 1_000_000_007, 999_999_937];

        let mut rng = XorShiftRng::from_seed([3u8; 16]);
        for bits in [
            31u64 * KARATSUBA_THRESHOLD as u64,
            32 * KARATSUBA_THRESHOLD as u64,
            33 * KARATSUBA_THRESHOLD as u64,
            64 * KARATSUBA_THRESHOLD as u64,
        ] {
            let a = rng.gen_biguint(bits);
            let b = rng.gen_biguint(bits / 2 + 3);
            let prod = &a * &b;
            for p in P {
                let pa = (&a % p).to_u64_digits().first().copied().unwrap_or(0);
                let pb = (&b % p).to_u64_digits().first().copied().unwrap_or(0);
                let pp = (&prod % p).to_u64_digits().first().copied().unwrap_or(0);
                assert_eq!(pa * pb % p, pp);
            }
        }
    }

    #[test]
    fn test_known_product() {
        let a = BigUint::from_str_radix("123456789012345678901234567890", 10).unwrap();
        let b = BigUint::from_str_radix("987654321098765432109876543210", 10).unwrap();
        let expected = BigUint::from_str_radix(
            "121932631137021795226185032733622923332237463801111263526900",
            10,
        )
        .unwrap();
        assert_eq!(&a * &b, expected);
    }
}
