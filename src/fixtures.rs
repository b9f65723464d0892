//! Shared builders for unit tests.

use crate::core::{
    Address, Currency, CurrencyAmount, NativeCurrency, SwapError, SwapResult, Token,
};
use crate::pools::{
    encode_sqrt_ratio_x96, ConcentratedPool, ConstantProductPool, FeeAmount, LiquidityPool,
    PoolQuery,
};
use crate::quotes::PoolSimulator;

pub const WETH: u8 = 9;

pub fn token(i: u8) -> Token {
    let symbol = format!("T{}", i);
    Token::new(1, Address([i + 1; 20]), 18, Some(&symbol))
}

pub fn weth() -> Token {
    Token::new(1, Address([WETH + 1; 20]), 18, Some("WETH"))
}

pub fn native() -> Currency {
    Currency::Native(NativeCurrency::new(weth(), "ETH"))
}

pub fn currency(i: u8) -> Currency {
    if i == WETH {
        Currency::Token(weth())
    } else {
        Currency::Token(token(i))
    }
}

pub fn amount(i: u8, raw: u64) -> CurrencyAmount {
    CurrencyAmount::new(currency(i), raw)
}

pub fn native_amount(raw: u64) -> CurrencyAmount {
    CurrencyAmount::new(native(), raw)
}

pub fn cp_pool(a: u8, b: u8, reserve_a: u64, reserve_b: u64) -> LiquidityPool {
    let token_a = currency(a).wrapped().clone();
    let token_b = currency(b).wrapped().clone();
    ConstantProductPool::new(token_a, reserve_a, token_b, reserve_b)
        .unwrap()
        .into()
}

/// Concentrated pool (medium fee) where one `a` is worth `num / den` of `b`.
pub fn cl_pool(a: u8, b: u8, num: u64, den: u64) -> LiquidityPool {
    cl_pool_with_fee(a, b, num, den, FeeAmount::MEDIUM)
}

pub fn cl_pool_with_fee(a: u8, b: u8, num: u64, den: u64, fee: FeeAmount) -> LiquidityPool {
    let token_a = currency(a).wrapped().clone();
    let token_b = currency(b).wrapped().clone();
    let sqrt_price = if token_a.address < token_b.address {
        encode_sqrt_ratio_x96(num, den)
    } else {
        encode_sqrt_ratio_x96(den, num)
    };
    ConcentratedPool::new(token_a, token_b, fee, sqrt_price, 1_000_000, 0)
        .unwrap()
        .into()
}

/// Fills every swap at the pool's mid price, truncating.
pub struct MidPriceSimulator;

impl PoolSimulator for MidPriceSimulator {
    fn output_amount(
        &self,
        pool: &LiquidityPool,
        input: &CurrencyAmount,
    ) -> SwapResult<CurrencyAmount> {
        let token_in = input.currency.wrapped();
        let token_out = pool
            .other_token(token_in)
            .ok_or_else(|| SwapError::SimulationFailed(format!("{} not in pool", token_in)))?;
        let price = pool.price_of(token_in)?;
        Ok(CurrencyAmount::new(
            Currency::Token(token_out.clone()),
            price.ratio.scale_raw(&input.raw),
        ))
    }

    fn input_amount(
        &self,
        pool: &LiquidityPool,
        output: &CurrencyAmount,
    ) -> SwapResult<CurrencyAmount> {
        let token_out = output.currency.wrapped();
        let token_in = pool
            .other_token(token_out)
            .ok_or_else(|| SwapError::SimulationFailed(format!("{} not in pool", token_out)))?;
        let price = pool.price_of(token_out)?;
        Ok(CurrencyAmount::new(
            Currency::Token(token_in.clone()),
            price.ratio.scale_raw(&output.raw),
        ))
    }
}
