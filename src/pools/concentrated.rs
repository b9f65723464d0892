use crate::core::amount::serialize_decimal;
use crate::core::{Currency, Price, SwapError, SwapResult, Token, FEE_DENOMINATOR, Q192};
use crate::pools::PoolQuery;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::Serialize;
use std::fmt;

/// Pool fee in hundredths of a bip (`3000` is 0.30%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FeeAmount(u32);

impl FeeAmount {
    pub const LOWEST: FeeAmount = FeeAmount(100);
    pub const LOW: FeeAmount = FeeAmount(500);
    pub const MEDIUM: FeeAmount = FeeAmount(3000);
    pub const HIGH: FeeAmount = FeeAmount(10_000);

    pub fn new(fee: u32) -> SwapResult<Self> {
        if fee >= FEE_DENOMINATOR {
            return Err(SwapError::InvalidPoolState(format!(
                "fee {} must be below {}",
                fee, FEE_DENOMINATOR
            )));
        }
        Ok(Self(fee))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Q64.96 square root of `amount1 / amount0`.
///
/// # Panics
///
/// Panics if `amount0` is zero.
pub fn encode_sqrt_ratio_x96(amount1: impl Into<BigUint>, amount0: impl Into<BigUint>) -> BigUint {
    let amount1: BigUint = amount1.into();
    let amount0: BigUint = amount0.into();
    let ratio_x192 = (amount1 << 192usize) / amount0;
    ratio_x192.sqrt()
}

/// Concentrated-liquidity pool state as read from chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcentratedPool {
    token0: Token,
    token1: Token,
    fee: FeeAmount,
    #[serde(serialize_with = "serialize_decimal")]
    sqrt_price_x96: BigUint,
    liquidity: u128,
    tick_current: i32,
}

impl ConcentratedPool {
    /// `sqrt_price_x96` is relative to the sorted pair (token1 per token0),
    /// whatever order `token_a` and `token_b` are given in.
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_price_x96: impl Into<BigUint>,
        liquidity: u128,
        tick_current: i32,
    ) -> SwapResult<Self> {
        let sqrt_price_x96 = sqrt_price_x96.into();
        if sqrt_price_x96.is_zero() {
            return Err(SwapError::InvalidPoolState(format!(
                "concentrated pool {}/{} has a zero price",
                token_a, token_b
            )));
        }

        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_price_x96,
            liquidity,
            tick_current,
        })
    }

    pub fn fee(&self) -> FeeAmount {
        self.fee
    }

    pub fn sqrt_price_x96(&self) -> &BigUint {
        &self.sqrt_price_x96
    }

    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    pub fn tick_current(&self) -> i32 {
        self.tick_current
    }
}

impl PoolQuery for ConcentratedPool {
    fn token0(&self) -> &Token {
        &self.token0
    }

    fn token1(&self) -> &Token {
        &self.token1
    }

    fn token0_price(&self) -> Price {
        let price_x192 = &self.sqrt_price_x96 * &self.sqrt_price_x96;
        Price::new(
            Currency::Token(self.token0.clone()),
            Currency::Token(self.token1.clone()),
            BigInt::from((*Q192).clone()),
            BigInt::from(price_x192),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Address;

    fn token(byte: u8) -> Token {
        Token::new(1, Address([byte; 20]), 18, None)
    }

    #[test]
    fn test_encode_sqrt_ratio() {
        assert_eq!(encode_sqrt_ratio_x96(1u32, 1u32), *crate::core::Q96);
        assert_eq!(encode_sqrt_ratio_x96(4u32, 1u32), BigUint::from(2u8) << 96);
    }

    #[test]
    fn test_spot_price_from_sqrt() {
        let pool = ConcentratedPool::new(
            token(1),
            token(2),
            FeeAmount::MEDIUM,
            encode_sqrt_ratio_x96(3u32, 4u32),
            1_000_000,
            0,
        )
        .unwrap();
        assert_eq!(pool.spot_price(true).to_fixed(4), "0.7500");
        assert_eq!(pool.spot_price(false).to_fixed(4), "1.3333");
    }

    #[test]
    fn test_fee_bounds() {
        assert!(FeeAmount::new(3000).is_ok());
        assert!(FeeAmount::new(1_000_000).is_err());
        assert_eq!(FeeAmount::LOW.get(), 500);
    }

    #[test]
    fn test_rejects_zero_price() {
        let err = ConcentratedPool::new(token(1), token(2), FeeAmount::LOW, 0u32, 0, 0).unwrap_err();
        assert_eq!(err.code(), "INVALID_POOL_STATE");
    }
}
