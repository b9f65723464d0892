//! JSON descriptions of routes and trades.
//!
//! Descriptors are plain serde structs. `build()` turns them into validated
//! domain values, so every construction rule still applies.

use crate::core::{Currency, CurrencyAmount, Protocol, SwapError, SwapResult, Token, TradeType};
use crate::pools::{ConcentratedPool, ConstantProductPool, FeeAmount, LiquidityPool};
use crate::routing::{Leg, Route, Trade};
use log::debug;
use num_bigint::BigUint;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct PoolDescriptor {
    /// `constant-product` or `concentrated`.
    #[serde(rename = "type")]
    pub kind: String,
    pub token_a: Token,
    pub token_b: Token,
    #[serde(default)]
    pub reserve_a: Option<String>,
    #[serde(default)]
    pub reserve_b: Option<String>,
    #[serde(default)]
    pub fee: Option<u32>,
    #[serde(default)]
    pub sqrt_price_x96: Option<String>,
    #[serde(default)]
    pub liquidity: u128,
    #[serde(default)]
    pub tick: i32,
}

impl PoolDescriptor {
    pub fn build(&self) -> SwapResult<LiquidityPool> {
        match self.kind.as_str() {
            "constant-product" => {
                let reserve_a = parse_raw(required(&self.reserve_a, "reserve_a")?)?;
                let reserve_b = parse_raw(required(&self.reserve_b, "reserve_b")?)?;
                let pool = ConstantProductPool::new(
                    self.token_a.clone(),
                    reserve_a,
                    self.token_b.clone(),
                    reserve_b,
                )?;
                Ok(pool.into())
            }
            "concentrated" => {
                let fee = self
                    .fee
                    .ok_or_else(|| SwapError::InvalidPoolState("missing fee".to_string()))?;
                let sqrt_price = parse_raw(required(&self.sqrt_price_x96, "sqrt_price_x96")?)?;
                let pool = ConcentratedPool::new(
                    self.token_a.clone(),
                    self.token_b.clone(),
                    FeeAmount::new(fee)?,
                    sqrt_price,
                    self.liquidity,
                    self.tick,
                )?;
                Ok(pool.into())
            }
            other => Err(SwapError::InvalidPoolVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDescriptor {
    /// `V2`, `V3` or `MIXED`; derived from the pools when absent.
    #[serde(default)]
    pub protocol: Option<String>,
    pub pools: Vec<PoolDescriptor>,
    pub input: Currency,
    pub output: Currency,
}

impl RouteDescriptor {
    pub fn build(&self) -> SwapResult<Route> {
        let pools = self
            .pools
            .iter()
            .map(PoolDescriptor::build)
            .collect::<SwapResult<Vec<_>>>()?;
        match &self.protocol {
            Some(tag) => {
                let protocol = Protocol::from_str(tag)?;
                Route::with_protocol(pools, self.input.clone(), self.output.clone(), protocol)
            }
            None => Route::new(pools, self.input.clone(), self.output.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegDescriptor {
    pub route: RouteDescriptor,
    pub input_amount: String,
    pub output_amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeDescriptor {
    pub trade_type: TradeType,
    pub legs: Vec<LegDescriptor>,
}

impl TradeDescriptor {
    pub fn build(&self) -> SwapResult<Trade> {
        let legs = self
            .legs
            .iter()
            .map(|leg| {
                let route = leg.route.build()?;
                let input = CurrencyAmount::new(route.input().clone(), parse_raw(&leg.input_amount)?);
                let output =
                    CurrencyAmount::new(route.output().clone(), parse_raw(&leg.output_amount)?);
                Leg::new(route, input, output)
            })
            .collect::<SwapResult<Vec<_>>>()?;
        Trade::from_legs(legs, self.trade_type)
    }
}

pub fn parse_route(json: &str) -> SwapResult<Route> {
    let descriptor: RouteDescriptor = serde_json::from_str(json)?;
    descriptor.build()
}

pub fn parse_trade(json: &str) -> SwapResult<Trade> {
    let descriptor: TradeDescriptor = serde_json::from_str(json)?;
    debug!(
        "parsed {} trade descriptor with {} legs",
        descriptor.trade_type,
        descriptor.legs.len()
    );
    descriptor.build()
}

fn required<'a>(value: &'a Option<String>, field: &str) -> SwapResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| SwapError::InvalidPoolState(format!("missing {}", field)))
}

fn parse_raw(value: &str) -> SwapResult<BigUint> {
    BigUint::from_str(value.trim())
        .map_err(|_| SwapError::InvalidAmount(format!("{} is not a raw integer amount", value)))
}
