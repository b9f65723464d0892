use crate::core::error::{SwapError, SwapResult};
use crate::core::fraction::{ten_pow, Fraction};
use crate::core::types::Currency;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Serialize, Serializer};
use std::fmt;

/// Serializes big unsigned integers as decimal strings.
pub(crate) fn serialize_decimal<S: Serializer>(
    value: &BigUint,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// A raw (smallest-unit) amount of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    #[serde(serialize_with = "serialize_decimal")]
    pub raw: BigUint,
}

impl CurrencyAmount {
    pub fn new(currency: Currency, raw: impl Into<BigUint>) -> Self {
        Self {
            currency,
            raw: raw.into(),
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn add(&self, other: &CurrencyAmount) -> SwapResult<CurrencyAmount> {
        if self.currency != other.currency {
            return Err(SwapError::CurrencyMismatch(format!(
                "cannot add {} to {}",
                other.currency, self.currency
            )));
        }
        Ok(Self::new(self.currency.clone(), &self.raw + &other.raw))
    }

    /// Same amount, relabelled with another currency (e.g. wrapped -> native).
    pub fn with_currency(&self, currency: Currency) -> CurrencyAmount {
        Self::new(currency, self.raw.clone())
    }

    /// `self * factor`, truncated.
    pub fn scale(&self, factor: &Fraction) -> CurrencyAmount {
        Self::new(self.currency.clone(), factor.scale_raw(&self.raw))
    }

    /// Human-readable amount using the currency's decimals.
    pub fn to_exact(&self) -> String {
        let decimals = u32::from(self.currency.decimals());
        Fraction::new(BigInt::from(self.raw.clone()), ten_pow(decimals)).to_fixed(decimals)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency)
    }
}

/// Price of `base` in units of `quote`, stored as raw quote per raw base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub base: Currency,
    pub quote: Currency,
    pub ratio: Fraction,
}

impl Price {
    /// Price implied by swapping `base_raw` of `base` for `quote_raw` of `quote`.
    ///
    /// # Panics
    ///
    /// Panics if `base_raw` is zero.
    pub fn new(
        base: Currency,
        quote: Currency,
        base_raw: impl Into<BigInt>,
        quote_raw: impl Into<BigInt>,
    ) -> Self {
        Self {
            base,
            quote,
            ratio: Fraction::new(quote_raw, base_raw),
        }
    }

    pub fn from_ratio(base: Currency, quote: Currency, ratio: Fraction) -> Self {
        Self { base, quote, ratio }
    }

    pub fn from_amounts(base: &CurrencyAmount, quote: &CurrencyAmount) -> SwapResult<Self> {
        if base.is_zero() {
            return Err(SwapError::InvalidAmount(format!(
                "cannot price against a zero amount of {}",
                base.currency
            )));
        }
        Ok(Self::new(
            base.currency.clone(),
            quote.currency.clone(),
            BigInt::from(base.raw.clone()),
            BigInt::from(quote.raw.clone()),
        ))
    }

    /// Swaps base and quote. A zero price has no inverse.
    pub fn invert(&self) -> SwapResult<Price> {
        if self.ratio.is_zero() {
            return Err(SwapError::InvalidAmount(format!(
                "zero price of {} in {} cannot be inverted",
                self.base, self.quote
            )));
        }
        Ok(Self::from_ratio(
            self.quote.clone(),
            self.base.clone(),
            self.ratio.invert(),
        ))
    }

    /// Chains `self` (A in B) with `other` (B in C) into A in C.
    pub fn multiply(&self, other: &Price) -> SwapResult<Price> {
        if self.quote.wrapped() != other.base.wrapped() {
            return Err(SwapError::CurrencyMismatch(format!(
                "price quoted in {} cannot chain with price based on {}",
                self.quote, other.base
            )));
        }
        Ok(Self::from_ratio(
            self.base.clone(),
            other.quote.clone(),
            self.ratio.multiply(&other.ratio),
        ))
    }

    /// Converts an amount of `base` to `quote` at this price, truncated.
    pub fn quote(&self, amount: &CurrencyAmount) -> SwapResult<CurrencyAmount> {
        if amount.currency != self.base {
            return Err(SwapError::CurrencyMismatch(format!(
                "price based on {} cannot quote {}",
                self.base, amount.currency
            )));
        }
        Ok(CurrencyAmount::new(
            self.quote.clone(),
            self.ratio.scale_raw(&amount.raw),
        ))
    }

    /// Ratio in whole units rather than raw units.
    pub fn adjusted_for_decimals(&self) -> Fraction {
        let scalar = Fraction::new(
            ten_pow(u32::from(self.base.decimals())),
            ten_pow(u32::from(self.quote.decimals())),
        );
        self.ratio.multiply(&scalar)
    }

    pub fn to_fixed(&self, decimals: u32) -> String {
        self.adjusted_for_decimals().to_fixed(decimals)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.to_fixed(6), self.quote, self.base)
    }
}
