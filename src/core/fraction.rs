use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Exact rational number over arbitrary-precision integers.
///
/// The denominator is kept positive, so the sign lives on the numerator.
/// Comparisons are by value: `1/2 == 2/4`.
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        let numerator = numerator.into();
        let denominator = denominator.into();
        assert!(!denominator.is_zero(), "fraction denominator must be non-zero");
        if denominator.is_negative() {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value, 1)
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// # Panics
    ///
    /// Panics if the fraction is zero.
    pub fn invert(&self) -> Self {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: &Fraction) -> Self {
        if self.denominator == other.denominator {
            return Self::new(&self.numerator + &other.numerator, self.denominator.clone());
        }
        Self::new(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn subtract(&self, other: &Fraction) -> Self {
        if self.denominator == other.denominator {
            return Self::new(&self.numerator - &other.numerator, self.denominator.clone());
        }
        Self::new(
            &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn multiply(&self, other: &Fraction) -> Self {
        Self::new(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }

    /// # Panics
    ///
    /// Panics if `other` is zero.
    pub fn divide(&self, other: &Fraction) -> Self {
        Self::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    /// `raw * self`, truncated. Negative results clamp to zero.
    pub fn scale_raw(&self, raw: &BigUint) -> BigUint {
        let product = BigInt::from(raw.clone()) * &self.numerator / &self.denominator;
        non_negative(product)
    }

    /// Decimal rendering with `decimals` places, rounding half away from zero.
    pub fn to_fixed(&self, decimals: u32) -> String {
        let scale = ten_pow(decimals);
        let scaled = &self.numerator * &scale;
        let mut rounded = &scaled / &self.denominator;
        let remainder = &scaled % &self.denominator;
        if remainder.abs() * BigInt::from(2u8) >= self.denominator {
            if scaled.is_negative() {
                rounded -= BigInt::one();
            } else {
                rounded += BigInt::one();
            }
        }

        let sign = if rounded.is_negative() { "-" } else { "" };
        let magnitude = rounded.abs();
        let integer = &magnitude / &scale;
        if decimals == 0 {
            return format!("{}{}", sign, integer);
        }
        let fractional = (&magnitude % &scale).to_string();
        format!(
            "{}{}.{:0>width$}",
            sign,
            integer,
            fractional,
            width = decimals as usize
        )
    }
}

pub(crate) fn ten_pow(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

pub(crate) fn non_negative(value: BigInt) -> BigUint {
    match value.into_parts() {
        (Sign::Minus, _) => BigUint::zero(),
        (_, magnitude) => magnitude,
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Fraction", 2)?;
        state.serialize_field("numerator", &self.numerator.to_string())?;
        state.serialize_field("denominator", &self.denominator.to_string())?;
        state.end()
    }
}

/// A fraction of one, e.g. a slippage tolerance or a price impact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Percent(Fraction);

impl Percent {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        Self(Fraction::new(numerator, denominator))
    }

    pub fn from_fraction(fraction: Fraction) -> Self {
        Self(fraction)
    }

    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    pub fn from_bps(bps: u32) -> Self {
        Self::new(bps, crate::core::constants::BPS_DENOMINATOR)
    }

    /// `value` is read as a percentage: `0.5` means half a percent.
    pub fn from_decimal_percent(value: Decimal) -> Self {
        let denominator = ten_pow(value.scale()) * BigInt::from(100u8);
        Self::new(value.mantissa(), denominator)
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Percentage rendering, e.g. `0.50` for 50 bps.
    pub fn to_fixed(&self, decimals: u32) -> String {
        self.0.multiply(&Fraction::from_integer(100)).to_fixed(decimals)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_fixed(2))
    }
}
