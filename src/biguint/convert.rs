use crate::big_digit::{BigDigit, BITS};
use crate::biguint::addition::__add2;
use crate::biguint::division::div_rem_digit;
use crate::biguint::multiplication::scalar_mul;
use crate::biguint::{biguint_from_vec, BigUint};
use crate::error::ParseBigIntError;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::str::FromStr;

use num_traits::float::FloatCore;
use num_traits::{FromPrimitive, Num, One, ToPrimitive, Zero};

const DIGIT_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The largest power of `radix` that fits one limb, as `(base, power)`.
fn big_base(radix: u32) -> (BigDigit, usize) {
    debug_assert!((2..=36).contains(&radix) && !radix.is_power_of_two());
    let mut base: BigDigit = radix;
    let mut power = 1;
    while let Some(next) = base.checked_mul(radix) {
        base = next;
        power += 1;
    }
    (base, power)
}

pub(crate) fn to_str_radix(u: &BigUint, radix: u32) -> String {
    assert!((2..=36).contains(&radix), "radix must be in the range 2..=36");

    if u.is_zero() {
        return String::from("0");
    }

    let mut digits: Vec<u8> = Vec::new();

    if radix.is_power_of_two() {
        // nibble-style extraction straight from the limbs
        let bits_per_digit = u64::from(radix.trailing_zeros());
        let mask = radix - 1;
        let total_bits = u.bits();
        let mut bit = 0;
        while bit < total_bits {
            let limb = (bit / u64::from(BITS)) as usize;
            let shift = (bit % u64::from(BITS)) as u32;
            let mut d = u.data[limb] >> shift;
            let taken = u32::from(BITS) - shift;
            if taken < bits_per_digit as u32 {
                if let Some(&next) = u.data.get(limb + 1) {
                    d |= next << taken;
                }
            }
            digits.push(DIGIT_CHARS[(d & mask) as usize]);
            bit += bits_per_digit;
        }
    } else {
        // peel off the largest radix power fitting a limb, then split the
        // chunk into single digits
        let (base, power) = big_base(radix);
        let mut rest = u.clone();
        while !rest.is_zero() {
            let (q, mut chunk) = div_rem_digit(rest, base);
            rest = q;
            let limit = if rest.is_zero() { 0 } else { power };
            let mut produced = 0;
            while chunk != 0 || produced < limit {
                digits.push(DIGIT_CHARS[(chunk % radix) as usize]);
                chunk /= radix;
                produced += 1;
            }
        }
    }

    digits.reverse();
    // digit characters are ASCII
    String::from_utf8(digits).unwrap()
}

pub(crate) fn from_str_radix_unsigned(s: &str, radix: u32) -> Result<BigUint, ParseBigIntError> {
    if !(2..=36).contains(&radix) {
        return Err(ParseBigIntError::InvalidRadix);
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return Err(ParseBigIntError::Empty);
    }

    let mut values = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c.to_digit(radix) {
            Some(d) => values.push(d),
            None => return Err(ParseBigIntError::InvalidDigit),
        }
    }

    if radix.is_power_of_two() {
        let bits_per_digit = u64::from(radix.trailing_zeros());
        let total = bits_per_digit * values.len() as u64;
        let mut data = vec![0; total.div_ceil(u64::from(BITS)) as usize];
        let mut bit = 0;
        for &v in values.iter().rev() {
            let limb = (bit / u64::from(BITS)) as usize;
            let shift = (bit % u64::from(BITS)) as u32;
            data[limb] |= v << shift;
            let taken = u32::from(BITS) - shift;
            if taken < bits_per_digit as u32 {
                data[limb + 1] |= v >> taken;
            }
            bit += bits_per_digit;
        }
        return Ok(biguint_from_vec(data));
    }

    // accumulate fixed-width chunks: acc = acc * radix^power + chunk
    let (base, power) = big_base(radix);
    let head_len = values.len() % power;

    fn mul_add(acc: &mut BigUint, base: BigDigit, v: BigDigit) {
        scalar_mul(acc, base);
        if acc.data.is_empty() {
            if v != 0 {
                acc.data.push(v);
            }
        } else {
            let carry = __add2(&mut acc.data, &[v]);
            if carry != 0 {
                acc.data.push(carry);
            }
        }
    }

    let mut acc = BigUint::zero();
    let (head, rest) = values.split_at(head_len);
    if !head.is_empty() {
        // the first chunk is shorter, so scale by its own width
        let head_base = (0..head.len()).fold(1 as BigDigit, |b, _| b * radix);
        let v = head.iter().fold(0 as BigDigit, |v, &d| v * radix + d);
        mul_add(&mut acc, head_base, v);
    }
    for chunk in rest.chunks(power) {
        let v = chunk.iter().fold(0 as BigDigit, |v, &d| v * radix + d);
        mul_add(&mut acc, base, v);
    }
    acc.normalize();
    Ok(acc)
}

impl Num for BigUint {
    type FromStrRadixErr = ParseBigIntError;

    fn from_str_radix(s: &str, radix: u32) -> Result<BigUint, ParseBigIntError> {
        from_str_radix_unsigned(s, radix)
    }
}

impl FromStr for BigUint {
    type Err = ParseBigIntError;

    #[inline]
    fn from_str(s: &str) -> Result<BigUint, ParseBigIntError> {
        from_str_radix_unsigned(s, 10)
    }
}

impl BigUint {
    /// Parse from `radix` digits, most significant first.
    #[inline]
    pub fn parse_bytes(bytes: &[u8], radix: u32) -> Option<BigUint> {
        let s = core::str::from_utf8(bytes).ok()?;
        from_str_radix_unsigned(s, radix).ok()
    }

    /// Format in the given radix, using lowercase digit characters.
    #[inline]
    pub fn to_str_radix(&self, radix: u32) -> String {
        to_str_radix(self, radix)
    }

    /// Big-endian byte encoding of the magnitude, without a sign. Returns
    /// `[0]` for zero.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.to_bytes_le();
        bytes.reverse();
        bytes
    }

    /// Little-endian byte encoding of the magnitude. Returns `[0]` for zero.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![0];
        }
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for d in &self.data {
            bytes.extend_from_slice(&d.to_le_bytes());
        }
        while bytes.len() > 1 && *bytes.last().unwrap() == 0 {
            bytes.pop();
        }
        bytes
    }

    /// Interpret big-endian bytes as a magnitude.
    pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
        let mut v = bytes.to_vec();
        v.reverse();
        BigUint::from_bytes_le(&v)
    }

    /// Interpret little-endian bytes as a magnitude.
    pub fn from_bytes_le(bytes: &[u8]) -> BigUint {
        let mut data = Vec::with_capacity(bytes.len().div_ceil(4));
        for chunk in bytes.chunks(4) {
            let mut buf = [0u8; 4];
            buf[..chunk.len()].copy_from_slice(chunk);
            data.push(BigDigit::from_le_bytes(buf));
        }
        biguint_from_vec(data)
    }
}

/// Round the top of a magnitude into an `f64`, to nearest with ties to
/// even, overflowing to infinity.
pub(crate) fn biguint_to_f64(u: &BigUint) -> f64 {
    let bits = u.bits();
    if bits == 0 {
        return 0.0;
    }
    if bits <= 53 {
        return u.to_u64().unwrap() as f64;
    }
    if bits > 1026 {
        return f64::INFINITY;
    }

    // top 54 bits: 53 for the mantissa plus one rounding bit
    let shift = bits - 54;
    let top = (u >> shift).to_u64().unwrap();
    let sticky = u.trailing_zeros().unwrap() < shift;

    let mut mant = top >> 1;
    let round = top & 1 == 1;
    let mut exp = shift as i64 + 1;
    if round && (sticky || mant & 1 == 1) {
        mant += 1;
        if mant == 1 << 53 {
            mant >>= 1;
            exp += 1;
        }
    }

    // value = mant * 2^exp with mant in [2^52, 2^53)
    let biased = 1023 + 52 + exp;
    if biased >= 2047 {
        return f64::INFINITY;
    }
    f64::from_bits(((biased as u64) << 52) | (mant & ((1 << 52) - 1)))
}

impl ToPrimitive for BigUint {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.to_u64().and_then(|n| i64::try_from(n).ok())
    }

    #[inline]
    fn to_i128(&self) -> Option<i128> {
        self.to_u128().and_then(|n| i128::try_from(n).ok())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        match self.data.len() {
            0 => Some(0),
            1 => Some(u64::from(self.data[0])),
            2 => Some(u64::from(self.data[0]) | u64::from(self.data[1]) << BITS),
            _ => None,
        }
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        if self.data.len() > 4 {
            return None;
        }
        let mut out: u128 = 0;
        for (i, &d) in self.data.iter().enumerate() {
            out |= u128::from(d) << (32 * i);
        }
        Some(out)
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(biguint_to_f64(self))
    }
}

impl FromPrimitive for BigUint {
    #[inline]
    fn from_i64(n: i64) -> Option<BigUint> {
        u64::try_from(n).ok().map(BigUint::from)
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigUint> {
        u128::try_from(n).ok().map(BigUint::from)
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigUint> {
        Some(BigUint::from(n))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigUint> {
        Some(BigUint::from(n))
    }

    fn from_f64(n: f64) -> Option<BigUint> {
        if !n.is_finite() || n < 0.0 {
            return None;
        }
        let n = FloatCore::trunc(n);
        if n < 1.0 {
            return Some(BigUint::zero());
        }
        let (mantissa, exponent, _sign) = FloatCore::integer_decode(n);
        let m = BigUint::from(mantissa);
        if exponent >= 0 {
            Some(m << exponent as u64)
        } else {
            Some(m >> (-exponent) as u64)
        }
    }
}

impl From<u8> for BigUint {
    #[inline]
    fn from(n: u8) -> Self {
        BigUint::from(u32::from(n))
    }
}

impl From<u16> for BigUint {
    #[inline]
    fn from(n: u16) -> Self {
        BigUint::from(u32::from(n))
    }
}

impl From<u32> for BigUint {
    #[inline]
    fn from(n: u32) -> Self {
        if n == 0 {
            BigUint::zero()
        } else {
            BigUint { data: vec![n] }
        }
    }
}

impl From<u64> for BigUint {
    #[inline]
    fn from(n: u64) -> Self {
        biguint_from_vec(vec![n as BigDigit, (n >> BITS) as BigDigit])
    }
}

impl From<u128> for BigUint {
    #[inline]
    fn from(n: u128) -> Self {
        biguint_from_vec(vec![
            n as BigDigit,
            (n >> 32) as BigDigit,
            (n >> 64) as BigDigit,
            (n >> 96) as BigDigit,
        ])
    }
}

impl From<usize> for BigUint {
    #[inline]
    fn from(n: usize) -> Self {
        BigUint::from(n as u64)
    }
}

impl One for BigUint {
    #[inline]
    fn one() -> BigUint {
        BigUint { data: vec![1] }
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.data == [1]
    }
}

impl Zero for BigUint {
    #[inline]
    fn zero() -> BigUint {
        BigUint { data: Vec::new() }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn set_zero(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biguint::BigUint;

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::bigrand::RandBigInt;

    #[test]
    fn test_radix_round_trip() {
        let mut rng = XorShiftRng::from_seed([5u8; 16]);
        for bits in [1u64, 40, 130, 700] {
            let n = rng.gen_biguint(bits);
            for radix in 2..=36 {
                let s = n.to_str_radix(radix);
                assert_eq!(
                    BigUint::from_str_radix(&s, radix).unwrap(),
                    n,
                    "radix {} failed for {}",
                    radix,
                    s
                );
            }
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            BigUint::from_str_radix("ff", 16).unwrap(),
            BigUint::from(255u32)
        );
        assert_eq!(
            BigUint::from_str_radix("deadbeef00112233", 16).unwrap(),
            BigUint::from(0xdead_beef_0011_2233u64)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            BigUint::from_str_radix("", 10),
            Err(ParseBigIntError::Empty)
        );
        assert_eq!(
            BigUint::from_str_radix("12a", 10),
            Err(ParseBigIntError::InvalidDigit)
        );
        assert_eq!(
            BigUint::from_str_radix("0", 37),
            Err(ParseBigIntError::InvalidRadix)
        );
    }

    #[test]
    fn test_decimal_format() {
        let n = BigUint::from(1_234_567_890_123_456_789u64);
        assert_eq!(n.to_str_radix(10), "1234567890123456789");
        assert_eq!(BigUint::zero().to_str_radix(10), "0");
    }

    #[test]
    fn test_bytes_round_trip() {
        let n = BigUint::from(0x0102_0304_0506u64);
        assert_eq!(n.to_bytes_be(), alloc::vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(BigUint::from_bytes_be(&n.to_bytes_be()), n);
        assert_eq!(BigUint::from_bytes_le(&n.to_bytes_le()), n);
        assert_eq!(BigUint::zero().to_bytes_be(), alloc::vec![0]);
    }

    #[test]
    fn test_to_f64_round_to_even() {
        let base = BigUint::from(1u64 << 53);
        // one above an even mantissa rounds down, three above rounds up
        assert_eq!((&base + 1u32).to_f64().unwrap(), (1u64 << 53) as f64);
        assert_eq!((&base + 3u32).to_f64().unwrap(), ((1u64 << 53) + 4) as f64);
        // overflow goes to infinity
        let huge = BigUint::one() << 1100u64;
        assert_eq!(huge.to_f64().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_from_f64_truncates() {
        assert_eq!(BigUint::from_f64(3.99).unwrap(), BigUint::from(3u32));
        assert_eq!(BigUint::from_f64(0.5).unwrap(), BigUint::zero());
        assert_eq!(BigUint::from_f64(-1.0), None);
        assert_eq!(BigUint::from_f64(f64::NAN), None);
        assert_eq!(
            BigUint::from_f64(2f64.powi(80)).unwrap(),
            BigUint::one() << 80u64
        );
    }
}
