use crate::bigint::{BigInt, Repr, Sign};
use crate::biguint::convert::{biguint_to_f64, from_str_radix_unsigned};
use crate::biguint::BigUint;
use crate::error::ParseBigIntError;

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use num_traits::float::FloatCore;
use num_traits::{FromPrimitive, Num, Signed, ToPrimitive, Zero};

impl BigInt {
    /// Parse from `radix` digits with an optional leading sign.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseBigIntError::InvalidRadix);
        }
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Minus, rest),
            None => (Sign::Plus, s.strip_prefix('+').unwrap_or(s)),
        };
        let mag = from_str_radix_unsigned(digits, radix)?;
        Ok(BigInt::from_biguint(sign, mag))
    }

    /// Parse from `radix` digit bytes with an optional leading sign.
    #[inline]
    pub fn parse_bytes(bytes: &[u8], radix: u32) -> Option<BigInt> {
        let s = core::str::from_utf8(bytes).ok()?;
        BigInt::from_str_radix(s, radix).ok()
    }

    /// Format in the given radix, with a leading `-` for negative values.
    pub fn to_str_radix(&self, radix: u32) -> String {
        let mag = self.magnitude().to_str_radix(radix);
        if self.is_negative() {
            let mut s = String::with_capacity(mag.len() + 1);
            s.push('-');
            s.push_str(&mag);
            s
        } else {
            mag
        }
    }

    /// Creates a `BigInt` from a sign and big-endian magnitude bytes.
    #[inline]
    pub fn from_bytes_be(sign: Sign, bytes: &[u8]) -> BigInt {
        BigInt::from_biguint(sign, BigUint::from_bytes_be(bytes))
    }

    /// Creates a `BigInt` from a sign and little-endian magnitude bytes.
    #[inline]
    pub fn from_bytes_le(sign: Sign, bytes: &[u8]) -> BigInt {
        BigInt::from_biguint(sign, BigUint::from_bytes_le(bytes))
    }

    /// Sign and big-endian magnitude bytes.
    #[inline]
    pub fn to_bytes_be(&self) -> (Sign, Vec<u8>) {
        (self.sign(), self.magnitude().to_bytes_be())
    }

    /// Sign and little-endian magnitude bytes.
    #[inline]
    pub fn to_bytes_le(&self) -> (Sign, Vec<u8>) {
        (self.sign(), self.magnitude().to_bytes_le())
    }

    /// The minimal big-endian two's-complement encoding.
    ///
    /// At least one byte; a leading `0x00`/`0xff` sign-extension byte
    /// appears only when the top bit of the magnitude would otherwise be
    /// read as the wrong sign.
    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.to_signed_bytes_le();
        bytes.reverse();
        bytes
    }

    /// The minimal little-endian two's-complement encoding.
    pub fn to_signed_bytes_le(&self) -> Vec<u8> {
        match self.sign() {
            Sign::NoSign => alloc::vec![0],
            Sign::Plus => {
                let mut bytes = self.magnitude().to_bytes_le();
                if bytes.last().unwrap() & 0x80 != 0 {
                    bytes.push(0);
                }
                bytes
            }
            Sign::Minus => {
                let mut bytes = self.magnitude().to_bytes_le();
                // two's complement, least significant byte first
                let mut carry = true;
                for b in bytes.iter_mut() {
                    *b = !*b;
                    if carry {
                        let (nb, c) = b.overflowing_add(1);
                        *b = nb;
                        carry = c;
                    }
                }
                debug_assert!(!carry);
                // drop redundant 0xff sign bytes
                while bytes.len() > 1 {
                    let len = bytes.len();
                    if bytes[len - 1] == 0xff && bytes[len - 2] & 0x80 != 0 {
                        bytes.pop();
                    } else {
                        break;
                    }
                }
                if bytes.last().unwrap() & 0x80 == 0 {
                    bytes.push(0xff);
                }
                bytes
            }
        }
    }

    /// Interpret big-endian bytes as two's complement.
    pub fn from_signed_bytes_be(bytes: &[u8]) -> BigInt {
        let mut v = bytes.to_vec();
        v.reverse();
        BigInt::from_signed_bytes_le(&v)
    }

    /// Interpret little-endian bytes as two's complement.
    pub fn from_signed_bytes_le(bytes: &[u8]) -> BigInt {
        if bytes.is_empty() {
            return BigInt::zero();
        }
        let negative = bytes.last().unwrap() & 0x80 != 0;
        if !negative {
            return BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_le(bytes));
        }
        // magnitude = two's complement of the bytes
        let mut mag = bytes.to_vec();
        let mut carry = true;
        for b in mag.iter_mut() {
            *b = !*b;
            if carry {
                let (nb, c) = b.overflowing_add(1);
                *b = nb;
                carry = c;
            }
        }
        BigInt::from_biguint(Sign::Minus, BigUint::from_bytes_le(&mag))
    }
}

impl Num for BigInt {
    type FromStrRadixErr = ParseBigIntError;

    #[inline]
    fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        BigInt::from_str_radix(s, radix)
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    #[inline]
    fn from_str(s: &str) -> Result<BigInt, ParseBigIntError> {
        BigInt::from_str_radix(s, 10)
    }
}

macro_rules! bigint_from_small_int {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(n: $t) -> Self {
                BigInt { repr: Repr::Small(i64::from(n)) }
            }
        }
    )*};
}

bigint_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for BigInt {
    #[inline]
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(v) => BigInt { repr: Repr::Small(v) },
            Err(_) => BigInt {
                repr: Repr::Large(Sign::Plus, BigUint::from(n)),
            },
        }
    }
}

impl From<u128> for BigInt {
    #[inline]
    fn from(n: u128) -> Self {
        match i64::try_from(n) {
            Ok(v) => BigInt { repr: Repr::Small(v) },
            Err(_) => BigInt {
                repr: Repr::Large(Sign::Plus, BigUint::from(n)),
            },
        }
    }
}

impl From<i128> for BigInt {
    #[inline]
    fn from(n: i128) -> Self {
        BigInt::from_i128_exact(n)
    }
}

impl From<usize> for BigInt {
    #[inline]
    fn from(n: usize) -> Self {
        BigInt::from(n as u64)
    }
}

impl From<isize> for BigInt {
    #[inline]
    fn from(n: isize) -> Self {
        BigInt::from(n as i64)
    }
}

impl From<BigUint> for BigInt {
    #[inline]
    fn from(n: BigUint) -> Self {
        BigInt::from_biguint(Sign::Plus, n)
    }
}

impl TryFrom<&BigInt> for BigUint {
    type Error = crate::error::ArithmeticError;

    #[inline]
    fn try_from(value: &BigInt) -> Result<BigUint, Self::Error> {
        value
            .to_biguint()
            .ok_or(crate::error::ArithmeticError::InvalidConversion)
    }
}

impl ToPrimitive for BigInt {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        match &self.repr {
            Repr::Small(v) => Some(*v),
            // canonical form: Large never fits
            Repr::Large(..) => None,
        }
    }

    #[inline]
    fn to_i128(&self) -> Option<i128> {
        match &self.repr {
            Repr::Small(v) => Some(i128::from(*v)),
            Repr::Large(sign, mag) => {
                let u = mag.to_u128()?;
                match sign {
                    Sign::Plus => i128::try_from(u).ok(),
                    _ => {
                        if u == 1 << 127 {
                            Some(i128::MIN)
                        } else {
                            i128::try_from(u).ok().map(|v| -v)
                        }
                    }
                }
            }
        }
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        match &self.repr {
            Repr::Small(v) => u64::try_from(*v).ok(),
            Repr::Large(Sign::Plus, mag) => mag.to_u64(),
            Repr::Large(..) => None,
        }
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        match &self.repr {
            Repr::Small(v) => u128::try_from(*v).ok(),
            Repr::Large(Sign::Plus, mag) => mag.to_u128(),
            Repr::Large(..) => None,
        }
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        match &self.repr {
            Repr::Small(v) => Some(*v as f64),
            Repr::Large(sign, mag) => {
                let m = biguint_to_f64(mag);
                Some(if *sign == Sign::Minus { -m } else { m })
            }
        }
    }
}

impl FromPrimitive for BigInt {
    #[inline]
    fn from_i64(n: i64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    fn from_f64(n: f64) -> Option<BigInt> {
        if !n.is_finite() {
            return None;
        }
        let t = FloatCore::trunc(FloatCore::abs(n));
        let mag = BigUint::from_f64(t)?;
        let sign = if n < 0.0 { Sign::Minus } else { Sign::Plus };
        Some(BigInt::from_biguint(sign, mag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::ToString;
    use num_traits::One;

    #[test]
    fn test_signed_bytes_known_values() {
        // 255 needs the 0x00 disambiguation byte
        assert_eq!(BigInt::from(255u32).to_signed_bytes_be(), alloc::vec![0x00, 0xff]);
        assert_eq!(BigInt::from(127u32).to_signed_bytes_be(), alloc::vec![0x7f]);
        assert_eq!(BigInt::from(128u32).to_signed_bytes_be(), alloc::vec![0x00, 0x80]);
        assert_eq!(BigInt::zero().to_signed_bytes_be(), alloc::vec![0]);
        assert_eq!(BigInt::from(-1i32).to_signed_bytes_be(), alloc::vec![0xff]);
        assert_eq!(BigInt::from(-128i32).to_signed_bytes_be(), alloc::vec![0x80]);
        assert_eq!(BigInt::from(-129i32).to_signed_bytes_be(), alloc::vec![0xff, 0x7f]);
        assert_eq!(BigInt::from(-256i32).to_signed_bytes_be(), alloc::vec![0xff, 0x00]);
        assert_eq!(BigInt::from(256u32).to_signed_bytes_be(), alloc::vec![0x01, 0x00]);
    }

    #[test]
    fn test_signed_bytes_round_trip() {
        use num_traits::Pow;

        let samples = [
            BigInt::zero(),
            BigInt::one(),
            BigInt::from(-1i32),
            BigInt::from(i64::MIN),
            BigInt::from(i64::MAX),
            Pow::pow(&BigInt::from(-3i32), 71u32),
            Pow::pow(&BigInt::from(7i32), 100u32),
        ];
        for n in samples {
            let be = n.to_signed_bytes_be();
            assert_eq!(BigInt::from_signed_bytes_be(&be), n, "value {}", n);
            let le = n.to_signed_bytes_le();
            assert_eq!(BigInt::from_signed_bytes_le(&le), n, "value {}", n);
        }
    }

    #[test]
    fn test_radix_parse() {
        assert_eq!(
            BigInt::from_str_radix("ff", 16).unwrap(),
            BigInt::from(255u32)
        );
        assert_eq!(
            BigInt::from_str_radix("-ff", 16).unwrap(),
            BigInt::from(-255i32)
        );
        assert_eq!(
            BigInt::from_str_radix("+101", 2).unwrap(),
            BigInt::from(5u32)
        );
        assert!(BigInt::from_str_radix("-", 10).is_err());
    }

    #[test]
    fn test_string_round_trip_signed() {
        let v = BigInt::from_str("-123456789012345678901234567890123456789").unwrap();
        assert_eq!(v.to_string(), "-123456789012345678901234567890123456789");
        for radix in 2..=36 {
            let s = v.to_str_radix(radix);
            assert_eq!(BigInt::from_str_radix(&s, radix).unwrap(), v);
        }
    }

    #[test]
    fn test_primitive_round_trips() {
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInt::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(BigInt::from(-5i32).to_u64(), None);
        assert_eq!(BigInt::from(1u128 << 100).to_u128(), Some(1u128 << 100));
    }

    #[test]
    fn test_f64_conversions() {
        assert_eq!(BigInt::from(-3i32).to_f64(), Some(-3.0));
        assert_eq!(BigInt::from_f64(-3.99), Some(BigInt::from(-3i32)));
        assert_eq!(BigInt::from_f64(f64::INFINITY), None);
        let big = BigInt::from(1u64 << 60) << 40u32;
        assert_eq!(big.to_f64(), Some(2f64.powi(100)));
    }
}
