use crate::big_digit::{BigDigit, DoubleBigDigit, BITS};
use crate::biguint::division::div_rem_ref;
use crate::biguint::multiplication::{mac_digit, mac3};
use crate::biguint::subtraction::sub2;
use crate::biguint::{biguint_from_vec, cmp_slice, BigUint};

use alloc::vec;
use alloc::vec::Vec;

use num_integer::Integer;
use num_traits::{One, Zero};

/// Multiplicative inverse of an odd limb modulo 2^32, by Newton-Hensel
/// lifting: each step doubles the number of correct low bits.
fn inv_mod_limb(n: BigDigit) -> BigDigit {
    debug_assert!(n & 1 == 1);
    let mut x = n;
    for _ in 0..5 {
        x = x.wrapping_mul(2u32.wrapping_sub(n.wrapping_mul(x)));
    }
    debug_assert!(n.wrapping_mul(x) == 1);
    x
}

/// Montgomery context for an odd modulus: the limbs of `m` and
/// `-m[0]^-1 mod 2^32`.
struct MontyReducer<'a> {
    m: &'a [BigDigit],
    k0: BigDigit,
}

impl<'a> MontyReducer<'a> {
    fn new(m: &'a BigUint) -> Self {
        let k0 = inv_mod_limb(m.data[0]).wrapping_neg();
        MontyReducer { m: &m.data, k0 }
    }

    /// Fold a double-width product `t` back to `n` limbs: for each low limb,
    /// add the multiple of `m` that clears it, then drop the low half.
    /// The result may still be one conditional subtraction away from `< m`.
    fn reduce(&self, t: &mut Vec<BigDigit>) -> Vec<BigDigit> {
        let n = self.m.len();
        t.resize(2 * n + 1, 0);

        for i in 0..n {
            let u = t[i].wrapping_mul(self.k0);
            mac_digit(&mut t[i..], self.m, u);
            debug_assert!(t[i] == 0);
        }

        let mut r: Vec<BigDigit> = t[n..].to_vec();
        if cmp_slice_ge(&r, self.m) {
            sub2(&mut r, self.m);
        }
        // the folded value is < m, so exactly n limbs
        r.truncate(n);
        r
    }

    /// Montgomery product: `x * y / R mod m`, with `x`, `y` in Montgomery
    /// form and `R = 2^(32 n)`.
    fn mul(&self, x: &[BigDigit], y: &[BigDigit]) -> Vec<BigDigit> {
        let n = self.m.len();
        let mut t = vec![0; 2 * n + 1];
        mac3(&mut t, x, y);
        self.reduce(&mut t)
    }
}

fn cmp_slice_ge(a: &[BigDigit], b: &[BigDigit]) -> bool {
    let a_trim = a.iter().rposition(|&d| d != 0).map_or(0, |p| p + 1);
    let b_trim = b.iter().rposition(|&d| d != 0).map_or(0, |p| p + 1);
    cmp_slice(&a[..a_trim], &b[..b_trim]) != core::cmp::Ordering::Less
}

/// Modular exponentiation `x^exp mod m` for an odd modulus, entirely in
/// Montgomery form.
///
/// Small exponents run plain square-and-multiply; larger ones use a 4-bit
/// sliding window over precomputed odd powers of the base.
pub fn monty_modpow(x: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    debug_assert!(m.is_odd());
    if m.is_one() {
        return BigUint::zero();
    }
    if exp.is_zero() {
        return BigUint::one();
    }

    let n = m.data.len();
    let mr = MontyReducer::new(m);

    // R mod m and R^2 mod m seed the Montgomery conversions
    let r = {
        let (_, r) = div_rem_ref(&(BigUint::one() << (32 * n as u64)), m);
        pad(&r, n)
    };
    let rr = {
        let (_, rr) = div_rem_ref(&(BigUint::one() << (64 * n as u64)), m);
        pad(&rr, n)
    };

    let x = {
        let (_, xr) = div_rem_ref(x, m);
        pad(&xr, n)
    };

    // x * R mod m
    let xm = mr.mul(&x, &rr);

    let ebits = exp.bits();
    let result = if ebits <= 8 || n <= 2 {
        // plain square-and-multiply, left to right
        let mut acc = r;
        for i in (0..ebits).rev() {
            acc = mr.mul(&acc, &acc);
            if exp.bit(i) {
                acc = mr.mul(&acc, &xm);
            }
        }
        acc
    } else {
        // precompute odd powers x^1, x^3, ..., x^15 in Montgomery form
        const WINDOW: u64 = 4;
        let x2 = mr.mul(&xm, &xm);
        let mut odd_powers: Vec<Vec<BigDigit>> = Vec::with_capacity(8);
        odd_powers.push(xm);
        for i in 1..8 {
            let next = mr.mul(&odd_powers[i - 1], &x2);
            odd_powers.push(next);
        }

        let mut acc = r;
        let mut i = ebits as i64 - 1;
        while i >= 0 {
            if !exp.bit(i as u64) {
                acc = mr.mul(&acc, &acc);
                i -= 1;
            } else {
                // longest window of at most WINDOW bits ending in a 1
                let bottom = (i + 1 - WINDOW as i64).max(0);
                let mut j = bottom;
                while !exp.bit(j as u64) {
                    j += 1;
                }
                let mut val: usize = 0;
                for k in (j..=i).rev() {
                    acc = mr.mul(&acc, &acc);
                    val = (val << 1) | usize::from(exp.bit(k as u64));
                }
                acc = mr.mul(&acc, &odd_powers[(val - 1) / 2]);
                i = j - 1;
            }
        }
        acc
    };

    // leave Montgomery form: multiply by 1 and reduce
    let mut one_limb = vec![0; n];
    one_limb[0] = 1;
    let out = mr.mul(&result, &one_limb);
    biguint_from_vec(out)
}

fn pad(x: &BigUint, n: usize) -> Vec<BigDigit> {
    let mut v = x.data.clone();
    v.resize(n, 0);
    v
}

/// `x^exp mod 2^j`.
///
/// For odd bases the exponent is first reduced modulo φ(2^j) = 2^(j-1);
/// even bases vanish once the exponent reaches `j`.
pub fn modpow2(x: &BigUint, exp: &BigUint, j: u64) -> BigUint {
    debug_assert!(j >= 1);
    let trunc = |v: BigUint| v.keep_low_bits(j);

    let base = trunc(x.clone());
    if base.is_zero() {
        return BigUint::zero();
    }
    if exp.is_zero() {
        return BigUint::one();
    }

    if base.is_even() {
        // base = 2^t * c with t >= 1: for exponents >= j the product is a
        // multiple of 2^j
        if exp >= &BigUint::from(j) {
            return BigUint::zero();
        }
        let e = exp.to_u64_digits().first().copied().unwrap_or(0);
        let mut acc = BigUint::one();
        let mut b = base;
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                acc = trunc(&acc * &b);
            }
            e >>= 1;
            if e > 0 {
                b = trunc(&b * &b);
            }
        }
        return acc;
    }

    let e = exp.clone().keep_low_bits(j - 1);
    if e.is_zero() {
        return BigUint::one();
    }
    let mut acc = BigUint::one();
    let mut b = base;
    for i in 0..e.bits() {
        if e.bit(i) {
            acc = trunc(&acc * &b);
        }
        if i + 1 < e.bits() {
            b = trunc(&b * &b);
        }
    }
    acc
}

/// General modular exponentiation dispatch.
///
/// Odd moduli go straight to Montgomery; even moduli are split as
/// `m = q * 2^j` with `q` odd, solved separately, and recombined by CRT.
pub fn modpow(x: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "attempt to take a modulus of zero");
    if m.is_one() {
        return BigUint::zero();
    }
    if exp.is_zero() {
        return BigUint::one();
    }

    if m.is_odd() {
        return monty_modpow(x, exp, m);
    }

    let j = m.trailing_zeros().unwrap();
    let q = m >> j;
    let a2 = modpow2(x, exp, j);
    if q.is_one() {
        return a2;
    }

    let (_, xq) = div_rem_ref(x, &q);
    let a1 = monty_modpow(&xq, exp, &q);

    // CRT: r = a1 * 2^j * y1 + a2 * q * y2 with
    //   2^j * y1 = 1 (mod q),  q * y2 = 1 (mod 2^j)
    let p2 = BigUint::one() << j;
    let y1 = crate::algorithms::mod_inverse_unsigned(&p2, &q)
        .expect("2^j is invertible modulo an odd number");
    let y2 = crate::algorithms::mod_inverse_unsigned(&q, &p2)
        .expect("an odd number is invertible modulo 2^j");

    let r = a1 * &p2 * y1 + a2 * &q * y2;
    let (_, r) = div_rem_ref(&r, m);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biguint::BigUint;

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    #[test]
    fn test_inv_mod_limb() {
        for n in [1u32, 3, 5, 0xffff_ffff, 0x8000_0001, 12345 * 2 + 1] {
            assert_eq!(n.wrapping_mul(inv_mod_limb(n)), 1);
        }
    }

    fn naive_modpow(x: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
        let mut acc = &BigUint::one() % m;
        let mut base = x % m;
        for i in 0..exp.bits() {
            if exp.bit(i) {
                acc = &(&acc * &base) % m;
            }
            base = &(&base * &base) % m;
        }
        acc
    }

    #[test]
    fn test_monty_matches_naive_odd_modulus() {
        let mut rng = XorShiftRng::from_seed([11u8; 16]);
        for bits in [8u64, 33, 64, 150, 300] {
            let m = rng.gen_biguint(bits) | BigUint::one();
            if m.is_one() {
                continue;
            }
            let x = rng.gen_biguint(bits + 7);
            let e = rng.gen_biguint(bits.min(80));
            assert_eq!(
                monty_modpow(&x, &e, &m),
                naive_modpow(&x, &e, &m),
                "x={} e={} m={}",
                x,
                e,
                m
            );
        }
    }

    #[test]
    fn test_modpow_matches_naive_even_modulus() {
        let mut rng = XorShiftRng::from_seed([13u8; 16]);
        for bits in [8u64, 35, 70, 150] {
            let m = rng.gen_biguint(bits) << 3u32;
            if m.is_zero() {
                continue;
            }
            let x = rng.gen_biguint(bits + 5);
            let e = rng.gen_biguint(bits.min(64));
            assert_eq!(
                modpow(&x, &e, &m),
                naive_modpow(&x, &e, &m),
                "x={} e={} m={}",
                x,
                e,
                m
            );
        }
    }

    #[test]
    fn test_modpow_pow2_modulus() {
        let m = BigUint::one() << 64u32;
        let x = BigUint::from(0xdead_beefu32);
        let e = BigUint::from(12345u32);
        assert_eq!(modpow(&x, &e, &m), naive_modpow(&x, &e, &m));
    }

    #[test]
    fn test_carmichael_pseudoprime() {
        // 561 = 3 * 11 * 17 is a Carmichael number: b^560 = 1 for all b
        // coprime to it
        let m = BigUint::from(561u32);
        let e = BigUint::from(560u32);
        assert_eq!(modpow(&BigUint::from(7u32), &e, &m), BigUint::one());
        assert_eq!(modpow(&BigUint::from(2u32), &e, &m), BigUint::one());
    }
}
