//! The scaled decimal type.
//!
//! A [`BigDecimal`] is an unscaled [`BigInt`] plus a 32-bit decimal scale:
//! value = unscaled × 10^(−scale). Equality and hashing are structural
//! (`1.0` and `1.00` are distinct) while ordering is numerical, matching
//! the contract of the decimal types this models. The decimal digit count
//! (`precision`) is a memoize-once field: it is derived from immutable
//! state and recomputation is idempotent, so it lives in a relaxed atomic
//! rather than behind a lock.

use crate::bigdecimal::context::{MathContext, RoundingMode};
use crate::bigint::{BigInt, Sign};
use crate::biguint::division::{div_rem_digit, div_rem_ref};
use crate::biguint::BigUint;
use crate::error::ArithmeticError;

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};
use core::sync::atomic::{AtomicU64, Ordering as Relax};

use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

pub mod context;
pub mod convert;

/// An arbitrary-precision scaled decimal.
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i32,
    /// Cached decimal digit count of the unscaled value; 0 means "not yet
    /// computed" (every real precision is >= 1). Relaxed is enough: the
    /// value is a pure function of `unscaled`, so concurrent first
    /// computations all store the same thing.
    precision: AtomicU64,
}

/// 10^n as a magnitude.
pub(crate) fn ten_pow(n: u64) -> BigUint {
    BigUint::from(10u32).pow(n)
}

/// Decimal digit count of a magnitude; 1 for zero.
pub(crate) fn decimal_digits(mag: &BigUint) -> u64 {
    if mag.is_zero() {
        return 1;
    }
    if let Some(v) = mag.to_u64() {
        return u64::from(v.ilog10()) + 1;
    }
    // 30103/100000 slightly overestimates log10(2); correct by comparison
    let bits = mag.bits();
    let mut d = ((u128::from(bits) - 1) * 30103 / 100000) as u64 + 1;
    while *mag >= ten_pow(d) {
        d += 1;
    }
    while d > 1 && *mag < ten_pow(d - 1) {
        d -= 1;
    }
    d
}

/// Whether a discarded remainder rounds the quotient away from zero.
///
/// `half_cmp` is `2*remainder` compared against the divisor; `q_odd` is the
/// parity of the truncated quotient, which decides HALF_EVEN ties (an even
/// decimal last digit is exactly an even number).
fn needs_increment(
    mode: RoundingMode,
    sign: Sign,
    q_odd: bool,
    half_cmp: Ordering,
) -> Result<bool, ArithmeticError> {
    Ok(match mode {
        RoundingMode::Unnecessary => return Err(ArithmeticError::RoundingNecessary),
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => sign != Sign::Minus,
        RoundingMode::Floor => sign == Sign::Minus,
        RoundingMode::HalfUp => half_cmp != Ordering::Less,
        RoundingMode::HalfDown => half_cmp == Ordering::Greater,
        RoundingMode::HalfEven => match half_cmp {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => q_odd,
        },
    })
}

/// `num / den` rounded per `mode`, carrying `sign` onto the result.
fn divide_and_round(
    num: BigUint,
    den: BigUint,
    sign: Sign,
    mode: RoundingMode,
) -> Result<BigInt, ArithmeticError> {
    let (q, r) = div_rem_ref(&num, &den);
    if r.is_zero() {
        return Ok(BigInt::from_biguint(sign, q));
    }
    let half_cmp = (&r << 1u32).cmp(&den);
    let inc = needs_increment(mode, sign, q.is_odd(), half_cmp)?;
    let q = if inc { q + 1u32 } else { q };
    Ok(BigInt::from_biguint(sign, q))
}

impl BigDecimal {
    /// A decimal from an unscaled value and a scale:
    /// value = `unscaled` × 10^(−`scale`).
    #[inline]
    pub fn new(unscaled: BigInt, scale: i32) -> BigDecimal {
        BigDecimal {
            unscaled,
            scale,
            precision: AtomicU64::new(0),
        }
    }

    /// The unscaled value.
    #[inline]
    pub fn unscaled_value(&self) -> &BigInt {
        &self.unscaled
    }

    /// The scale: the power of ten the unscaled value is divided by.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Number of significant decimal digits; 1 for zero.
    pub fn precision(&self) -> u64 {
        let cached = self.precision.load(Relax::Relaxed);
        if cached != 0 {
            return cached;
        }
        let p = decimal_digits(self.unscaled.magnitude().as_ref());
        self.precision.store(p, Relax::Relaxed);
        p
    }

    /// The sign of the value.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.unscaled.sign()
    }

    // --- scale alignment ---

    /// Unscaled values of `self` and `other` brought to the common
    /// (larger) scale, plus that scale.
    fn align(&self, other: &BigDecimal) -> (BigInt, BigInt, i32) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.unscaled.clone(), other.unscaled.clone(), self.scale),
            Ordering::Less => {
                let diff = u64::try_from(i64::from(other.scale) - i64::from(self.scale)).unwrap();
                (
                    &self.unscaled * BigInt::from(ten_pow(diff)),
                    other.unscaled.clone(),
                    other.scale,
                )
            }
            Ordering::Greater => {
                let diff = u64::try_from(i64::from(self.scale) - i64::from(other.scale)).unwrap();
                (
                    self.unscaled.clone(),
                    &other.unscaled * BigInt::from(ten_pow(diff)),
                    self.scale,
                )
            }
        }
    }

    // --- multiplication with a typed overflow ---

    /// Product; fails if the result scale leaves the 32-bit range.
    pub fn checked_mul(&self, other: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let scale = i64::from(self.scale) + i64::from(other.scale);
        let scale = i32::try_from(scale).map_err(|_| ArithmeticError::ScaleOverflow)?;
        Ok(BigDecimal::new(&self.unscaled * &other.unscaled, scale))
    }

    // --- the four division modes ---

    /// Quotient at an explicit target scale under the given rounding rule.
    pub fn div_with_scale(
        &self,
        divisor: &BigDecimal,
        scale: i32,
        mode: RoundingMode,
    ) -> Result<BigDecimal, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(BigDecimal::new(BigInt::zero(), scale));
        }

        // q = ua * 10^(scale - sa + sb) / ub, with the power of ten on
        // whichever side keeps it nonnegative
        let exp10 = i64::from(scale) - i64::from(self.scale) + i64::from(divisor.scale);
        let mut num = self.unscaled.magnitude().into_owned();
        let mut den = divisor.unscaled.magnitude().into_owned();
        if exp10 >= 0 {
            num *= ten_pow(exp10 as u64);
        } else {
            den *= ten_pow(exp10.unsigned_abs());
        }

        let sign = self.sign() * divisor.sign();
        let unscaled = divide_and_round(num, den, sign, mode)?;
        Ok(BigDecimal::new(unscaled, scale))
    }

    /// Quotient at the dividend's scale under the given rounding rule.
    #[inline]
    pub fn div_with_rounding(
        &self,
        divisor: &BigDecimal,
        mode: RoundingMode,
    ) -> Result<BigDecimal, ArithmeticError> {
        self.div_with_scale(divisor, self.scale, mode)
    }

    /// Exact quotient.
    ///
    /// Fails with [`ArithmeticError::NonTerminating`] unless the divisor,
    /// after removing its common factor with the dividend, consists only
    /// of twos and fives.
    pub fn div_exact(&self, divisor: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let preferred = i64::from(self.scale) - i64::from(divisor.scale);
        if self.is_zero() {
            let scale = preferred.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            return Ok(BigDecimal::new(BigInt::zero(), scale));
        }

        let ua = self.unscaled.magnitude().into_owned();
        let ub = divisor.unscaled.magnitude().into_owned();
        let g = ua.gcd(&ub);
        let ua = ua / &g;
        let ub = ub / &g;

        // the reduced divisor must be 2^i * 5^j for a finite expansion
        let i = ub.trailing_zeros().unwrap();
        let mut c = &ub >> i;
        let mut j: u64 = 0;
        loop {
            let (q, r) = div_rem_digit(c.clone(), 5);
            if r != 0 {
                break;
            }
            c = q;
            j += 1;
        }
        if !c.is_one() {
            return Err(ArithmeticError::NonTerminating);
        }

        let k = Ord::max(i, j);
        let unscaled_mag =
            ua * BigUint::from(2u32).pow(k - i) * BigUint::from(5u32).pow(k - j);
        let scale = preferred + k as i64;
        let scale = i32::try_from(scale).map_err(|_| ArithmeticError::ScaleOverflow)?;
        let sign = self.sign() * divisor.sign();
        Ok(BigDecimal::new(BigInt::from_biguint(sign, unscaled_mag), scale))
    }

    /// Quotient rounded to the context's precision, with trailing zeros
    /// stripped back toward the preferred scale
    /// (`self.scale - divisor.scale`).
    pub fn div_with_context(
        &self,
        divisor: &BigDecimal,
        ctx: &MathContext,
    ) -> Result<BigDecimal, ArithmeticError> {
        let p = u64::from(ctx.precision());
        if p == 0 {
            return self.div_exact(divisor);
        }
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let preferred = i64::from(self.scale) - i64::from(divisor.scale);
        if self.is_zero() {
            let scale = preferred.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            return Ok(BigDecimal::new(BigInt::zero(), scale));
        }

        // target scale so the quotient carries about `p` digits, then
        // correct against a truncated probe; the rounded division below is
        // the only rounding performed
        let mut s: i64 = p as i64 + decimal_digits(divisor.unscaled.magnitude().as_ref()) as i64
            - self.precision() as i64
            + preferred;
        for _ in 0..4 {
            let scale = checked_scale(s)?;
            let probe = self.div_with_scale(divisor, scale, RoundingMode::Down)?;
            let digits = if probe.unscaled.is_zero() {
                0
            } else {
                probe.precision() as i64
            };
            if digits == p as i64 {
                break;
            }
            s += p as i64 - digits;
        }

        let scale = checked_scale(s)?;
        let mut q = self.div_with_scale(divisor, scale, ctx.rounding_mode())?;
        if q.precision() > p {
            // carried into an extra digit (…999 rounding up); the low digit
            // is a zero, dropping it is exact
            let unscaled = &q.unscaled / BigInt::from(10u32);
            q = BigDecimal::new(unscaled, checked_scale(i64::from(q.scale) - 1)?);
        }

        // exact trailing zeros shrink back toward the preferred scale
        while i64::from(q.scale) > preferred {
            let (quot, rem) = Integer::div_rem(&q.unscaled, &BigInt::from(10u32));
            if !rem.is_zero() {
                break;
            }
            q = BigDecimal::new(quot, q.scale - 1);
        }
        Ok(q)
    }

    /// The integral part of the quotient, with the preferred scale
    /// (`self.scale - divisor.scale`, floored at zero) realized with
    /// trailing zeros.
    pub fn divide_integral(&self, divisor: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let exp10 = i64::from(divisor.scale) - i64::from(self.scale);
        let mut num = self.unscaled.magnitude().into_owned();
        let mut den = divisor.unscaled.magnitude().into_owned();
        if exp10 >= 0 {
            num *= ten_pow(exp10 as u64);
        } else {
            den *= ten_pow(exp10.unsigned_abs());
        }
        let (q, _) = div_rem_ref(&num, &den);
        let q = BigInt::from_biguint(self.sign() * divisor.sign(), q);

        let preferred = i64::from(self.scale) - i64::from(divisor.scale);
        if preferred > 0 {
            let scale = checked_scale(preferred)?;
            Ok(BigDecimal::new(
                q * BigInt::from(ten_pow(preferred as u64)),
                scale,
            ))
        } else {
            Ok(BigDecimal::new(q, 0))
        }
    }

    /// Remainder after [`divide_integral`](Self::divide_integral); takes
    /// the dividend's sign.
    pub fn rem_checked(&self, divisor: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let (_, r) = self.div_rem(divisor)?;
        Ok(r)
    }

    /// Integral quotient and remainder in one pass.
    pub fn div_rem(
        &self,
        divisor: &BigDecimal,
    ) -> Result<(BigDecimal, BigDecimal), ArithmeticError> {
        let q = self.divide_integral(divisor)?;
        let r = self - &(&q * divisor);
        Ok((q, r))
    }

    // --- rounding and rescaling ---

    /// Rounded to the context's precision; identity when the context is
    /// unlimited or the value already fits.
    pub fn round(&self, ctx: &MathContext) -> Result<BigDecimal, ArithmeticError> {
        let p = u64::from(ctx.precision());
        if p == 0 {
            return Ok(self.clone());
        }
        let digits = self.precision();
        if digits <= p {
            return Ok(self.clone());
        }
        let drop = digits - p;
        let mut scale = i64::from(self.scale) - drop as i64;
        let mut unscaled = divide_and_round(
            self.unscaled.magnitude().into_owned(),
            ten_pow(drop),
            self.sign(),
            ctx.rounding_mode(),
        )?;
        if decimal_digits(unscaled.magnitude().as_ref()) > p {
            unscaled = unscaled / BigInt::from(10u32);
            scale -= 1;
        }
        Ok(BigDecimal::new(unscaled, checked_scale(scale)?))
    }

    /// The same numeric value at a different scale, rounding if digits are
    /// discarded.
    pub fn with_scale(&self, scale: i32, mode: RoundingMode) -> Result<BigDecimal, ArithmeticError> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => {
                let diff = (i64::from(scale) - i64::from(self.scale)) as u64;
                Ok(BigDecimal::new(
                    &self.unscaled * BigInt::from(ten_pow(diff)),
                    scale,
                ))
            }
            Ordering::Less => {
                let diff = (i64::from(self.scale) - i64::from(scale)) as u64;
                let unscaled = divide_and_round(
                    self.unscaled.magnitude().into_owned(),
                    ten_pow(diff),
                    self.sign(),
                    mode,
                )?;
                Ok(BigDecimal::new(unscaled, scale))
            }
        }
    }

    /// The numerically equal value with all trailing zeros removed from
    /// the unscaled part; zero collapses to scale 0.
    pub fn strip_trailing_zeros(&self) -> BigDecimal {
        if self.is_zero() {
            return BigDecimal::new(BigInt::zero(), 0);
        }
        let sign = self.sign();
        let mut mag = self.unscaled.magnitude().into_owned();
        let mut scale = i64::from(self.scale);

        // peel nine zeros at a time, then the stragglers
        loop {
            if scale - 9 < i64::from(i32::MIN) {
                break;
            }
            let (q, r) = div_rem_digit(mag.clone(), 1_000_000_000);
            if r != 0 {
                break;
            }
            mag = q;
            scale -= 9;
        }
        loop {
            if scale - 1 < i64::from(i32::MIN) {
                break;
            }
            let (q, r) = div_rem_digit(mag.clone(), 10);
            if r != 0 {
                break;
            }
            mag = q;
            scale -= 1;
        }

        BigDecimal::new(BigInt::from_biguint(sign, mag), scale as i32)
    }

    // --- point movement ---

    /// Value × 10^(−n), keeping at least scale zero.
    pub fn move_point_left(&self, n: i32) -> Result<BigDecimal, ArithmeticError> {
        let new_scale = i64::from(self.scale) + i64::from(n);
        if new_scale >= 0 {
            Ok(BigDecimal::new(self.unscaled.clone(), checked_scale(new_scale)?))
        } else {
            // a negative target scale pads the unscaled value instead
            Ok(BigDecimal::new(
                &self.unscaled * BigInt::from(ten_pow(new_scale.unsigned_abs())),
                0,
            ))
        }
    }

    /// Value × 10^n, keeping at least scale zero.
    pub fn move_point_right(&self, n: i32) -> Result<BigDecimal, ArithmeticError> {
        self.move_point_left(n.checked_neg().ok_or(ArithmeticError::ScaleOverflow)?)
    }

    /// Value × 10^n by adjusting only the scale.
    pub fn scale_by_power_of_ten(&self, n: i32) -> Result<BigDecimal, ArithmeticError> {
        let new_scale = i64::from(self.scale) - i64::from(n);
        Ok(BigDecimal::new(self.unscaled.clone(), checked_scale(new_scale)?))
    }

    /// `self^exp`; the scale multiplies accordingly.
    ///
    /// # Panics
    ///
    /// Panics if the result scale leaves the 32-bit range.
    pub fn pow(&self, exp: u32) -> BigDecimal {
        let scale = i64::from(self.scale) * i64::from(exp);
        let scale = i32::try_from(scale).expect("scale out of range in pow");
        BigDecimal::new(self.unscaled.pow(u64::from(exp)), scale)
    }

    /// Absolute value.
    #[inline]
    pub fn abs(&self) -> BigDecimal {
        BigDecimal::new(Signed::abs(&self.unscaled), self.scale)
    }

    /// −1, 0 or 1 as the value is negative, zero or positive.
    #[inline]
    pub fn signum(&self) -> BigDecimal {
        BigDecimal::new(self.unscaled.signum(), 0)
    }

    /// The smaller of the two values (numerically).
    pub fn min(&self, other: &BigDecimal) -> BigDecimal {
        if self <= other {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// The larger of the two values (numerically).
    pub fn max(&self, other: &BigDecimal) -> BigDecimal {
        if self >= other {
            self.clone()
        } else {
            other.clone()
        }
    }
}

fn checked_scale(s: i64) -> Result<i32, ArithmeticError> {
    i32::try_from(s).map_err(|_| ArithmeticError::ScaleOverflow)
}

// --- structural equality, numeric ordering ---

impl Clone for BigDecimal {
    fn clone(&self) -> Self {
        BigDecimal {
            unscaled: self.unscaled.clone(),
            scale: self.scale,
            precision: AtomicU64::new(self.precision.load(Relax::Relaxed)),
        }
    }
}

/// Structural: same unscaled value *and* same scale. `1.0 != 1.00` even
/// though they compare `Equal` under [`Ord`]; this split is deliberate and
/// mirrors the scale-carrying decimal model.
impl PartialEq for BigDecimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale && self.unscaled == other.unscaled
    }
}

impl Eq for BigDecimal {}

impl Hash for BigDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unscaled.hash(state);
        self.scale.hash(state);
    }
}

impl PartialOrd for BigDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numerical ordering: scale differences are aligned away.
impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sa = self.sign();
        let sb = other.sign();
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == Sign::NoSign {
            return Ordering::Equal;
        }

        // compare decimal orders of magnitude before aligning, so wildly
        // different scales never force a huge multiplication
        let adj_a = self.precision() as i64 - i64::from(self.scale);
        let adj_b = other.precision() as i64 - i64::from(other.scale);
        if adj_a != adj_b {
            let by_magnitude = adj_a.cmp(&adj_b);
            return if sa == Sign::Minus {
                by_magnitude.reverse()
            } else {
                by_magnitude
            };
        }

        // equal adjusted exponents keep the scale difference small
        let (a, b, _) = self.align(other);
        a.cmp(&b)
    }
}

// --- arithmetic operators ---

forward_all_binop_to_ref_ref!(impl Add for BigDecimal, add);

impl Add<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, other: &BigDecimal) -> BigDecimal {
        let (a, b, scale) = self.align(other);
        BigDecimal::new(a + b, scale)
    }
}

forward_all_binop_to_ref_ref!(impl Sub for BigDecimal, sub);

impl Sub<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, other: &BigDecimal) -> BigDecimal {
        let (a, b, scale) = self.align(other);
        BigDecimal::new(a - b, scale)
    }
}

forward_all_binop_to_ref_ref!(impl Mul for BigDecimal, mul);

impl Mul<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    /// # Panics
    ///
    /// Panics if the result scale leaves the 32-bit range; use
    /// [`BigDecimal::checked_mul`] for a fallible variant.
    fn mul(self, other: &BigDecimal) -> BigDecimal {
        self.checked_mul(other).expect("scale out of range in multiplication")
    }
}

forward_all_binop_to_ref_ref!(impl Div for BigDecimal, div);

impl Div<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    /// Exact division.
    ///
    /// # Panics
    ///
    /// Panics on division by zero and on a non-terminating expansion; use
    /// the `div_*` methods for fallible variants with explicit rounding.
    fn div(self, other: &BigDecimal) -> BigDecimal {
        self.div_exact(other)
            .expect("quotient has no exact decimal representation")
    }
}

forward_all_binop_to_ref_ref!(impl Rem for BigDecimal, rem);

impl Rem<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    /// # Panics
    ///
    /// Panics on division by zero.
    fn rem(self, other: &BigDecimal) -> BigDecimal {
        self.rem_checked(other).expect("attempt to divide by zero")
    }
}

impl AddAssign<&BigDecimal> for BigDecimal {
    #[inline]
    fn add_assign(&mut self, other: &BigDecimal) {
        *self = &*self + other;
    }
}

impl AddAssign<BigDecimal> for BigDecimal {
    #[inline]
    fn add_assign(&mut self, other: BigDecimal) {
        *self = &*self + &other;
    }
}

impl SubAssign<&BigDecimal> for BigDecimal {
    #[inline]
    fn sub_assign(&mut self, other: &BigDecimal) {
        *self = &*self - other;
    }
}

impl SubAssign<BigDecimal> for BigDecimal {
    #[inline]
    fn sub_assign(&mut self, other: BigDecimal) {
        *self = &*self - &other;
    }
}

impl MulAssign<&BigDecimal> for BigDecimal {
    #[inline]
    fn mul_assign(&mut self, other: &BigDecimal) {
        *self = &*self * other;
    }
}

impl MulAssign<BigDecimal> for BigDecimal {
    #[inline]
    fn mul_assign(&mut self, other: BigDecimal) {
        *self = &*self * &other;
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn neg(self) -> BigDecimal {
        BigDecimal::new(-&self.unscaled, self.scale)
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn neg(self) -> BigDecimal {
        BigDecimal::new(-self.unscaled, self.scale)
    }
}

impl Zero for BigDecimal {
    #[inline]
    fn zero() -> BigDecimal {
        BigDecimal::new(BigInt::zero(), 0)
    }

    /// Zero at any scale.
    #[inline]
    fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }
}

impl One for BigDecimal {
    #[inline]
    fn one() -> BigDecimal {
        BigDecimal::new(BigInt::one(), 0)
    }

    /// One at any scale: `1.00` counts.
    #[inline]
    fn is_one(&self) -> bool {
        self.cmp(&BigDecimal::one()) == Ordering::Equal
    }
}

impl Default for BigDecimal {
    #[inline]
    fn default() -> Self {
        Zero::zero()
    }
}

// --- display ---

/// Lay out `digits` (the unscaled magnitude, no sign) at `scale`, choosing
/// plain or scientific notation the way the canonical decimal string does:
/// plain iff scale >= 0 and adjusted exponent >= -6.
fn layout(digits: &str, scale: i64, negative: bool, engineering: bool) -> String {
    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    let adjusted = -scale + (digits.len() as i64 - 1);
    if scale >= 0 && adjusted >= -6 {
        // plain notation
        if scale == 0 {
            out.push_str(digits);
        } else if (digits.len() as i64) > scale {
            let point = digits.len() - scale as usize;
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        } else {
            out.push_str("0.");
            for _ in 0..(scale as usize - digits.len()) {
                out.push('0');
            }
            out.push_str(digits);
        }
        return out;
    }

    if !engineering {
        // scientific: d.ddd E±nn
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        push_exponent(&mut out, adjusted);
        return out;
    }

    // engineering: exponent forced to a multiple of three
    if digits == "0" {
        let r = adjusted.rem_euclid(3);
        if r == 0 {
            out.push('0');
            if adjusted != 0 {
                push_exponent(&mut out, adjusted);
            }
        } else {
            out.push_str("0.");
            for _ in 0..(3 - r) {
                out.push('0');
            }
            push_exponent(&mut out, adjusted + (3 - r));
        }
        return out;
    }

    let r = adjusted.rem_euclid(3) as usize;
    let int_digits = r + 1;
    let exp = adjusted - r as i64;
    if digits.len() <= int_digits {
        out.push_str(digits);
        for _ in 0..(int_digits - digits.len()) {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..int_digits]);
        out.push('.');
        out.push_str(&digits[int_digits..]);
    }
    if exp != 0 {
        push_exponent(&mut out, exp);
    }
    out
}

fn push_exponent(out: &mut String, exp: i64) {
    use alloc::string::ToString;

    out.push('E');
    if exp >= 0 {
        out.push('+');
    }
    out.push_str(&exp.to_string());
}

impl BigDecimal {
    /// Canonical string: plain notation when the scale is nonnegative and
    /// the adjusted exponent is at least −6, scientific otherwise.
    pub fn to_sci_string(&self) -> String {
        let digits = self.unscaled.magnitude().to_str_radix(10);
        layout(&digits, i64::from(self.scale), self.sign() == Sign::Minus, false)
    }

    /// Plain notation, unconditionally (may be very long).
    pub fn to_plain_string(&self) -> String {
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let scale = i64::from(self.scale);
        let mut out = String::new();
        if self.sign() == Sign::Minus {
            out.push('-');
        }
        if scale <= 0 {
            out.push_str(&digits);
            for _ in 0..scale.unsigned_abs() {
                out.push('0');
            }
        } else if (digits.len() as i64) > scale {
            let point = digits.len() - scale as usize;
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        } else {
            out.push_str("0.");
            for _ in 0..(scale as usize - digits.len()) {
                out.push('0');
            }
            out.push_str(&digits);
        }
        out
    }

    /// Like the canonical string, but with the exponent constrained to a
    /// multiple of three.
    pub fn to_engineering_string(&self) -> String {
        let digits = self.unscaled.magnitude().to_str_radix(10);
        layout(&digits, i64::from(self.scale), self.sign() == Sign::Minus, true)
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_sci_string())
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigDecimal({}, scale={})", self.unscaled, self.scale)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for BigDecimal {
    fn zeroize(&mut self) {
        self.unscaled.zeroize();
        self.scale.zeroize();
        self.precision.store(0, Relax::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_scale_alignment_in_add_sub() {
        let a = dec("1.25");
        let b = dec("0.005");
        let sum = &a + &b;
        assert_eq!(sum, dec("1.255"));
        assert_eq!(sum.scale(), 3);
        assert_eq!(&sum - &b, dec("1.250"));
        // note: the difference keeps the larger scale, so it is *not*
        // structurally equal to "1.25"
        assert_ne!(&sum - &b, dec("1.25"));
    }

    #[test]
    fn test_mul_adds_scales() {
        let a = dec("1.5");
        let b = dec("0.25");
        let p = &a * &b;
        assert_eq!(p, dec("0.375"));
        assert_eq!(p.scale(), 3);

        let neg = dec("-1.5");
        assert_eq!(&neg * &b, dec("-0.375"));
    }

    #[test]
    fn test_structural_equality_vs_numeric_ordering() {
        let one_0 = dec("1.0");
        let one_00 = dec("1.00");
        assert_ne!(one_0, one_00);
        assert_eq!(one_0.cmp(&one_00), Ordering::Equal);
        assert!(dec("2") > dec("1.9999"));
        assert!(dec("-2") < dec("-1.9999"));
        // far-apart scales compare without aligning
        assert!(dec("1E+1000") > dec("1E-1000"));
        assert!(dec("-1E+1000") < dec("1E-1000"));
    }

    #[test]
    fn test_div_with_scale_half_up() {
        // 1 / 3 at scale 5, HALF_UP
        let q = dec("1")
            .div_with_scale(&dec("3"), 5, RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(q.to_plain_string(), "0.33333");

        let q = dec("2")
            .div_with_scale(&dec("3"), 5, RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(q.to_plain_string(), "0.66667");
    }

    #[test]
    fn test_rounding_modes_on_last_digit() {
        let cases = [
            ("5.5", RoundingMode::Up, "6"),
            ("5.5", RoundingMode::Down, "5"),
            ("5.5", RoundingMode::Ceiling, "6"),
            ("5.5", RoundingMode::Floor, "5"),
            ("5.5", RoundingMode::HalfUp, "6"),
            ("5.5", RoundingMode::HalfDown, "5"),
            ("5.5", RoundingMode::HalfEven, "6"),
            ("2.5", RoundingMode::HalfEven, "2"),
            ("2.5", RoundingMode::HalfUp, "3"),
            ("1.6", RoundingMode::HalfDown, "2"),
            ("-5.5", RoundingMode::Ceiling, "-5"),
            ("-5.5", RoundingMode::Floor, "-6"),
            ("-2.5", RoundingMode::HalfEven, "-2"),
            ("-5.5", RoundingMode::HalfUp, "-6"),
            ("-1.1", RoundingMode::Up, "-2"),
            ("-1.9", RoundingMode::Down, "-1"),
        ];
        for (input, mode, expected) in cases {
            let got = dec(input).with_scale(0, mode).unwrap();
            assert_eq!(
                got.to_plain_string(),
                expected,
                "{} under {}",
                input,
                mode
            );
        }
    }

    #[test]
    fn test_unnecessary_fails_exactly_when_inexact() {
        assert_eq!(
            dec("1.25").with_scale(1, RoundingMode::Unnecessary),
            Err(ArithmeticError::RoundingNecessary)
        );
        assert_eq!(
            dec("1.20")
                .with_scale(1, RoundingMode::Unnecessary)
                .unwrap()
                .to_plain_string(),
            "1.2"
        );
    }

    #[test]
    fn test_div_exact() {
        // terminating: divisor reduces to 2^i * 5^j
        assert_eq!((&dec("1") / &dec("8")).to_plain_string(), "0.125");
        assert_eq!((&dec("1.0") / &dec("0.5")).to_plain_string(), "2");
        assert_eq!((&dec("10") / &dec("4")).to_plain_string(), "2.5");
        // common factors cancel before the 2-5 test
        assert_eq!((&dec("3") / &dec("3")).to_plain_string(), "1");
        assert_eq!((&dec("6") / &dec("3")).to_plain_string(), "2");

        assert_eq!(
            dec("1").div_exact(&dec("3")),
            Err(ArithmeticError::NonTerminating)
        );
        assert_eq!(
            dec("1").div_exact(&dec("0")),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_with_context() {
        let ctx = MathContext::new(5, RoundingMode::HalfUp);
        let q = dec("1").div_with_context(&dec("3"), &ctx).unwrap();
        assert_eq!(q.to_plain_string(), "0.33333");

        let q = dec("2").div_with_context(&dec("3"), &ctx).unwrap();
        assert_eq!(q.to_plain_string(), "0.66667");

        // exactly representable quotients strip back to the preferred scale
        let q = dec("10").div_with_context(&dec("2"), &MathContext::new(4, RoundingMode::HalfUp)).unwrap();
        assert_eq!(q.to_plain_string(), "5");

        // the carry case: 999/10 to two digits rounds to 1.0E+2
        let q = dec("999")
            .div_with_context(&dec("10"), &MathContext::new(2, RoundingMode::HalfUp))
            .unwrap();
        assert_eq!(q.cmp(&dec("100")), Ordering::Equal);
        assert_eq!(q.precision(), 2);
    }

    #[test]
    fn test_divide_integral_and_rem() {
        let (q, r) = dec("7.5").div_rem(&dec("2")).unwrap();
        assert_eq!(q.cmp(&dec("3")), Ordering::Equal);
        assert_eq!(r.cmp(&dec("1.5")), Ordering::Equal);

        // remainder takes the dividend's sign
        let (q, r) = dec("-7.5").div_rem(&dec("2")).unwrap();
        assert_eq!(q.cmp(&dec("-3")), Ordering::Equal);
        assert_eq!(r.cmp(&dec("-1.5")), Ordering::Equal);

        let r = dec("5.75") % dec("0.5");
        assert_eq!(r.cmp(&dec("0.25")), Ordering::Equal);
    }

    #[test]
    fn test_round_to_context() {
        let v = dec("123.4567");
        assert_eq!(
            v.round(&MathContext::new(5, RoundingMode::HalfUp))
                .unwrap()
                .to_plain_string(),
            "123.46"
        );
        assert_eq!(
            v.round(&MathContext::new(2, RoundingMode::Down))
                .unwrap()
                .to_sci_string(),
            "1.2E+2"
        );
        assert_eq!(v.round(&MathContext::UNLIMITED).unwrap(), v);
        // 99.95 to three digits HALF_UP carries into 100
        let got = dec("99.95")
            .round(&MathContext::new(3, RoundingMode::HalfUp))
            .unwrap();
        assert_eq!(got.cmp(&dec("100")), Ordering::Equal);
    }

    #[test]
    fn test_strip_trailing_zeros() {
        let v = dec("123.450");
        let stripped = v.strip_trailing_zeros();
        assert_eq!(stripped.unscaled_value(), &BigInt::from(12345u32));
        assert_eq!(stripped.scale(), 2);

        let v = dec("600.0");
        let stripped = v.strip_trailing_zeros();
        assert_eq!(stripped.unscaled_value(), &BigInt::from(6u32));
        assert_eq!(stripped.scale(), -2);

        assert_eq!(dec("0.000").strip_trailing_zeros().scale(), 0);
    }

    #[test]
    fn test_precision() {
        assert_eq!(dec("0").precision(), 1);
        assert_eq!(dec("0.00").precision(), 1);
        assert_eq!(dec("123.45").precision(), 5);
        assert_eq!(dec("-123.45").precision(), 5);
        assert_eq!(dec("1E+10").precision(), 1);
        let many_nines = BigDecimal::new(
            BigInt::from_str(&"9".repeat(40)).unwrap(),
            0,
        );
        assert_eq!(many_nines.precision(), 40);
        let one_forty = BigDecimal::new(
            BigInt::from_str(&alloc::format!("1{}", "0".repeat(40))).unwrap(),
            0,
        );
        assert_eq!(one_forty.precision(), 41);
    }

    #[test]
    fn test_display_notation_choice() {
        assert_eq!(dec("123.45").to_sci_string(), "123.45");
        assert_eq!(dec("0.000001").to_sci_string(), "0.000001");
        // adjusted exponent below -6 switches to scientific
        assert_eq!(dec("0.0000001").to_sci_string(), "1E-7");
        // negative scale is always scientific
        assert_eq!(BigDecimal::new(BigInt::from(6u32), -2).to_sci_string(), "6E+2");
        assert_eq!(dec("-0.0000001").to_sci_string(), "-1E-7");
        assert_eq!(BigDecimal::new(BigInt::from(123u32), -1).to_sci_string(), "1.23E+3");
    }

    #[test]
    fn test_engineering_notation() {
        assert_eq!(dec("1E-7").to_engineering_string(), "100E-9");
        assert_eq!(BigDecimal::new(BigInt::from(1u32), -3).to_engineering_string(), "1E+3");
        assert_eq!(BigDecimal::new(BigInt::from(123u32), -1).to_engineering_string(), "1.23E+3");
        assert_eq!(BigDecimal::new(BigInt::from(12u32), -2).to_engineering_string(), "1.2E+3");
        // plain region stays plain
        assert_eq!(dec("123.45").to_engineering_string(), "123.45");
        // zero pads toward the next multiple of three
        assert_eq!(BigDecimal::new(BigInt::zero(), -7).to_engineering_string(), "0.00E+9");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(BigDecimal::new(BigInt::from(6u32), -2).to_plain_string(), "600");
        assert_eq!(dec("0.0000001").to_plain_string(), "0.0000001");
        assert_eq!(dec("-12.05").to_plain_string(), "-12.05");
    }

    #[test]
    fn test_point_movement() {
        let v = dec("12.345");
        assert_eq!(v.move_point_left(2).unwrap().to_plain_string(), "0.12345");
        assert_eq!(v.move_point_right(2).unwrap().to_plain_string(), "1234.5");
        // moving right past the scale pads with zeros at scale 0
        assert_eq!(v.move_point_right(5).unwrap().to_plain_string(), "1234500");
        assert_eq!(
            v.scale_by_power_of_ten(3).unwrap().cmp(&dec("12345")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_pow() {
        assert_eq!(dec("1.5").pow(2).to_plain_string(), "2.25");
        assert_eq!(dec("-0.5").pow(3).to_plain_string(), "-0.125");
        assert_eq!(dec("7").pow(0).to_plain_string(), "1");
    }

    #[test]
    fn test_min_max_signum() {
        assert_eq!(dec("1.5").min(&dec("2")), dec("1.5"));
        assert_eq!(dec("1.5").max(&dec("2")), dec("2"));
        assert_eq!(dec("-3.2").signum(), dec("-1"));
        assert_eq!(dec("0.00").signum(), dec("0"));
        assert_eq!(dec("-3.2").abs(), dec("3.2"));
    }
}
