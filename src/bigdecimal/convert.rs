//! Parsing and numeric conversions for [`BigDecimal`].

use crate::bigdecimal::{ten_pow, BigDecimal};
use crate::bigint::{BigInt, Sign};
use crate::biguint::convert::biguint_to_f64;
use crate::biguint::division::div_rem_ref;
use crate::biguint::shift::biguint_shl;
use crate::biguint::BigUint;
use crate::error::{ArithmeticError, ParseBigDecimalError};

use alloc::borrow::Cow;
use alloc::string::String;
use core::num::IntErrorKind;
use core::str::FromStr;

use num_traits::float::FloatCore;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

impl FromStr for BigDecimal {
    type Err = ParseBigDecimalError;

    /// Accepts `[sign] digits [. digits] [(e|E) [sign] digits]`.
    fn from_str(s: &str) -> Result<BigDecimal, ParseBigDecimalError> {
        if s.is_empty() {
            return Err(ParseBigDecimalError::Empty);
        }

        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (mantissa, exp) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exp_str = &rest[pos + 1..];
                if exp_str.is_empty() {
                    return Err(ParseBigDecimalError::InvalidDigit);
                }
                let exp = i64::from_str(exp_str).map_err(|e| match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        ParseBigDecimalError::ExponentOverflow
                    }
                    _ => ParseBigDecimalError::InvalidDigit,
                })?;
                (&rest[..pos], exp)
            }
            None => (rest, 0),
        };

        let (int_part, frac_part) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseBigDecimalError::InvalidDigit);
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseBigDecimalError::InvalidDigit);
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);

        let mag = crate::biguint::convert::from_str_radix_unsigned(&digits, 10)
            .map_err(|_| ParseBigDecimalError::InvalidDigit)?;

        let scale = frac_part.len() as i64 - exp;
        let scale =
            i32::try_from(scale).map_err(|_| ParseBigDecimalError::ExponentOverflow)?;

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(BigDecimal::new(BigInt::from_biguint(sign, mag), scale))
    }
}

/// Exact conversion from a binary double: every finite `f64` is a dyadic
/// rational, so `m * 2^-k` becomes `(m * 5^k) * 10^-k` without loss.
impl TryFrom<f64> for BigDecimal {
    type Error = ArithmeticError;

    fn try_from(n: f64) -> Result<BigDecimal, ArithmeticError> {
        if !n.is_finite() {
            return Err(ArithmeticError::InvalidConversion);
        }
        if n == 0.0 {
            return Ok(BigDecimal::zero());
        }

        let (mantissa, exponent, fsign) = FloatCore::integer_decode(n);
        let sign = if fsign < 0 { Sign::Minus } else { Sign::Plus };

        if exponent >= 0 {
            let mag = BigUint::from(mantissa) << exponent as u64;
            return Ok(BigDecimal::new(BigInt::from_biguint(sign, mag), 0));
        }

        // shed the power of two shared between mantissa and exponent
        let twos = Ord::min(u64::from(mantissa.trailing_zeros()), (-exponent) as u64);
        let mantissa = mantissa >> twos;
        let k = (-exponent) as u64 - twos;

        let mag = BigUint::from(mantissa) * BigUint::from(5u32).pow(k);
        let scale = i32::try_from(k).map_err(|_| ArithmeticError::ScaleOverflow)?;
        Ok(BigDecimal::new(BigInt::from_biguint(sign, mag), scale))
    }
}

impl TryFrom<f32> for BigDecimal {
    type Error = ArithmeticError;

    #[inline]
    fn try_from(n: f32) -> Result<BigDecimal, ArithmeticError> {
        BigDecimal::try_from(f64::from(n))
    }
}

/// `unscaled * 10^-scale` as the nearest double, ties to even, with
/// explicit underflow-to-subnormal/zero and overflow-to-infinity handling.
pub(crate) fn bigdecimal_to_f64(unscaled: &BigInt, scale: i32) -> f64 {
    if unscaled.is_zero() {
        return 0.0;
    }
    let negative = unscaled.is_negative();
    let sign = |v: f64| if negative { -v } else { v };
    let n = unscaled.magnitude();
    let s = i64::from(scale);

    if s <= 0 {
        // an integer: n * 10^(-s)
        let p = s.unsigned_abs();
        // 217706/65536 underestimates log2(10), so this lower bound on the
        // bit length is safe for the infinity cutoff
        let low_bits = n.bits() as i128 + (i128::from(p) * 217_706) / 65_536;
        if low_bits > 1100 {
            return sign(f64::INFINITY);
        }
        return sign(biguint_to_f64(&(n.as_ref() * ten_pow(p))));
    }

    // a fraction: n / 10^s
    // 217727/65536 overestimates log2(10); the two estimates bracket the
    // quotient's bit length for the coarse range cutoffs
    let est_hi = n.bits() as i128 - (i128::from(s) * 217_706) / 65_536 + 2;
    let est_lo = n.bits() as i128 - (i128::from(s) * 217_727) / 65_536 - 2;
    if est_lo > 1030 {
        return sign(f64::INFINITY);
    }
    if est_hi < -1080 {
        return sign(0.0);
    }

    let d = ten_pow(s as u64);
    // scale the dividend so the quotient carries at least 55 bits
    let k = (d.bits() as i64 - n.bits() as i64 + 55).max(0) as u64;
    let (q, r) = div_rem_ref(&biguint_shl(Cow::Borrowed(n.as_ref()), k), &d);

    let qb = q.bits() as i64;
    // exponent of the value's most significant bit
    let e_msb = qb - 1 - k as i64;
    if e_msb > 1023 {
        return sign(f64::INFINITY);
    }
    if e_msb < -1075 {
        return sign(0.0);
    }

    // mantissa bits actually available: 53 for normals, fewer as the value
    // sinks into the subnormal range
    let t = if e_msb >= -1022 {
        53
    } else {
        e_msb + 1075
    };
    let drop = qb - t;
    debug_assert!(drop >= 1);

    let mant = (&q >> drop as u64).to_u64().unwrap();
    let round = q.bit(drop as u64 - 1);
    let sticky = !r.is_zero() || q.trailing_zeros().unwrap() < drop as u64 - 1;

    let mut mant = mant;
    let mut e = drop - k as i64;
    if round && (sticky || mant & 1 == 1) {
        mant += 1;
        if t == 53 && mant == 1 << 53 {
            mant >>= 1;
            e += 1;
        }
    }

    if mant == 0 {
        return sign(0.0);
    }

    if t == 53 {
        // normal range
        let biased = 1023 + 52 + e;
        if biased >= 2047 {
            return sign(f64::INFINITY);
        }
        debug_assert!(biased >= 1);
        sign(f64::from_bits(
            ((biased as u64) << 52) | (mant & ((1 << 52) - 1)),
        ))
    } else {
        // subnormal: the unit in the last place is 2^-1074, so the
        // mantissa is the raw bit pattern; a round-up into 2^52 lands
        // exactly on the smallest normal encoding
        debug_assert!(e == -1074);
        sign(f64::from_bits(mant))
    }
}

impl BigDecimal {
    /// Truncate toward zero to a [`BigInt`].
    pub fn to_bigint(&self) -> BigInt {
        if self.scale() <= 0 {
            self.unscaled_value() * BigInt::from(ten_pow(i64::from(self.scale()).unsigned_abs()))
        } else {
            let (q, _) = div_rem_ref(
                self.unscaled_value().magnitude().as_ref(),
                &ten_pow(self.scale() as u64),
            );
            BigInt::from_biguint(self.sign(), q)
        }
    }

    /// The nearest double, ties to even; infinite on overflow.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        bigdecimal_to_f64(self.unscaled_value(), self.scale())
    }
}

impl ToPrimitive for BigDecimal {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.to_bigint().to_i64()
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.to_bigint().to_u64()
    }

    #[inline]
    fn to_i128(&self) -> Option<i128> {
        self.to_bigint().to_i128()
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        self.to_bigint().to_u128()
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(BigDecimal::to_f64(self))
    }
}

impl FromPrimitive for BigDecimal {
    #[inline]
    fn from_i64(n: i64) -> Option<BigDecimal> {
        Some(BigDecimal::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigDecimal> {
        Some(BigDecimal::from(n))
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigDecimal> {
        Some(BigDecimal::new(BigInt::from(n), 0))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigDecimal> {
        Some(BigDecimal::new(BigInt::from(n), 0))
    }

    #[inline]
    fn from_f64(n: f64) -> Option<BigDecimal> {
        BigDecimal::try_from(n).ok()
    }
}

macro_rules! bigdecimal_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for BigDecimal {
            #[inline]
            fn from(n: $t) -> Self {
                BigDecimal::new(BigInt::from(n), 0)
            }
        }
    )*};
}

bigdecimal_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<BigInt> for BigDecimal {
    #[inline]
    fn from(n: BigInt) -> Self {
        BigDecimal::new(n, 0)
    }
}

impl From<BigUint> for BigDecimal {
    #[inline]
    fn from(n: BigUint) -> Self {
        BigDecimal::new(BigInt::from(n), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::ToString;
    use core::cmp::Ordering;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(dec("123").scale(), 0);
        assert_eq!(dec("123.45").scale(), 2);
        assert_eq!(dec("-123.45").unscaled_value(), &BigInt::from(-12345i32));
        assert_eq!(dec("1.23e2").cmp(&dec("123")), Ordering::Equal);
        assert_eq!(dec("1.23E+2").scale(), 0);
        assert_eq!(dec("123e-2").scale(), 2);
        assert_eq!(dec(".5").cmp(&dec("0.5")), Ordering::Equal);
        assert_eq!(dec("5.").cmp(&dec("5")), Ordering::Equal);
        assert_eq!(dec("1E+1000").scale(), -1000);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(BigDecimal::from_str(""), Err(ParseBigDecimalError::Empty));
        assert_eq!(
            BigDecimal::from_str("abc"),
            Err(ParseBigDecimalError::InvalidDigit)
        );
        assert_eq!(
            BigDecimal::from_str("1.2.3"),
            Err(ParseBigDecimalError::InvalidDigit)
        );
        assert_eq!(
            BigDecimal::from_str("1e"),
            Err(ParseBigDecimalError::InvalidDigit)
        );
        assert_eq!(
            BigDecimal::from_str("."),
            Err(ParseBigDecimalError::InvalidDigit)
        );
        assert_eq!(
            BigDecimal::from_str("1e99999999999999999999"),
            Err(ParseBigDecimalError::ExponentOverflow)
        );
    }

    #[test]
    fn test_string_round_trip() {
        for s in [
            "0",
            "1",
            "-1",
            "123.456",
            "-0.000123",
            "1E-7",
            "6E+2",
            "1.23E+3",
            "9999999999999999999999999999.999999999",
        ] {
            let v = dec(s);
            assert_eq!(BigDecimal::from_str(&v.to_sci_string()).unwrap(), v, "{}", s);
        }
    }

    #[test]
    fn test_exact_double_construction() {
        // the binary double nearest 0.1, expanded exactly
        let d = BigDecimal::try_from(0.1f64).unwrap();
        assert_eq!(d.scale(), 55);
        assert_eq!(
            d.unscaled_value().to_string(),
            "1000000000000000055511151231257827021181583404541015625"
        );

        assert_eq!(
            BigDecimal::try_from(0.5f64).unwrap(),
            BigDecimal::new(BigInt::from(5u32), 1)
        );
        assert_eq!(
            BigDecimal::try_from(2.0f64).unwrap(),
            BigDecimal::new(BigInt::from(2u32), 0)
        );
        assert_eq!(
            BigDecimal::try_from(-2.5f64).unwrap(),
            BigDecimal::new(BigInt::from(-25i32), 1)
        );
        assert!(BigDecimal::try_from(f64::NAN).is_err());
        assert!(BigDecimal::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_f64_round_trip_simple() {
        for v in [0.0f64, 0.5, -0.5, 1.0, 123.456, 1e300, -1e-300, 0.1] {
            let d = BigDecimal::try_from(v).unwrap();
            assert_eq!(d.to_f64(), v, "round-tripping {}", v);
        }
    }

    #[test]
    fn test_to_f64_rounding() {
        // decimal strings parse to the same double core's parser picks
        for s in ["0.1", "3.14159265358979", "2.718281828459045", "1e-310", "123456789.123456789"] {
            let expected: f64 = s.parse().unwrap();
            assert_eq!(dec(s).to_f64(), expected, "for {}", s);
        }
    }

    #[test]
    fn test_to_f64_extremes() {
        assert_eq!(dec("1E+400").to_f64(), f64::INFINITY);
        assert_eq!(dec("-1E+400").to_f64(), f64::NEG_INFINITY);
        assert_eq!(dec("1E-400").to_f64(), 0.0);
        // subnormal territory
        let tiny: f64 = "1e-320".parse().unwrap();
        assert!(tiny > 0.0 && !tiny.is_normal());
        assert_eq!(dec("1e-320").to_f64(), tiny);
        // smallest subnormal and below
        assert_eq!(dec("4.9E-324").to_f64(), f64::from_bits(1));
        assert_eq!(dec("1E-325").to_f64(), 0.0);
    }

    #[test]
    fn test_to_bigint_truncates() {
        assert_eq!(dec("3.99").to_bigint(), BigInt::from(3u32));
        assert_eq!(dec("-3.99").to_bigint(), BigInt::from(-3i32));
        assert_eq!(dec("6E+2").to_bigint(), BigInt::from(600u32));
        assert_eq!(dec("0.001").to_bigint(), BigInt::zero());
    }

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(dec("42.9").to_i64(), Some(42));
        assert_eq!(dec("-42.9").to_i64(), Some(-42));
        assert_eq!(BigDecimal::from(7u32), dec("7"));
        assert_eq!(BigDecimal::from_f64(0.25).unwrap().cmp(&dec("0.25")), Ordering::Equal);
    }
}
