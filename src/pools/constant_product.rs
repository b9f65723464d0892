use crate::core::amount::serialize_decimal;
use crate::core::{Currency, Price, SwapError, SwapResult, Token};
use crate::pools::PoolQuery;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

/// Two-reserve pool priced by `reserve0 * reserve1 = k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantProductPool {
    token0: Token,
    token1: Token,
    #[serde(serialize_with = "serialize_decimal")]
    reserve0: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    reserve1: BigUint,
}

impl ConstantProductPool {
    /// Builds a pool from two `(token, reserve)` sides in any order; the
    /// side whose address sorts first becomes `token0`.
    pub fn new(
        token_a: Token,
        reserve_a: impl Into<BigUint>,
        token_b: Token,
        reserve_b: impl Into<BigUint>,
    ) -> SwapResult<Self> {
        let reserve_a = reserve_a.into();
        let reserve_b = reserve_b.into();
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(SwapError::InvalidPoolState(format!(
                "constant product pool {}/{} has a zero reserve",
                token_a, token_b
            )));
        }

        let pool = if token_a.sorts_before(&token_b)? {
            Self {
                token0: token_a,
                token1: token_b,
                reserve0: reserve_a,
                reserve1: reserve_b,
            }
        } else {
            Self {
                token0: token_b,
                token1: token_a,
                reserve0: reserve_b,
                reserve1: reserve_a,
            }
        };
        Ok(pool)
    }

    pub fn reserve0(&self) -> &BigUint {
        &self.reserve0
    }

    pub fn reserve1(&self) -> &BigUint {
        &self.reserve1
    }

    /// Reserve held for `token`, if the pool involves it.
    pub fn reserve_of(&self, token: &Token) -> Option<&BigUint> {
        if token == &self.token0 {
            Some(&self.reserve0)
        } else if token == &self.token1 {
            Some(&self.reserve1)
        } else {
            None
        }
    }
}

impl PoolQuery for ConstantProductPool {
    fn token0(&self) -> &Token {
        &self.token0
    }

    fn token1(&self) -> &Token {
        &self.token1
    }

    fn token0_price(&self) -> Price {
        Price::new(
            Currency::Token(self.token0.clone()),
            Currency::Token(self.token1.clone()),
            self.reserve0.clone(),
            self.reserve1.clone(),
        )
    }
}
