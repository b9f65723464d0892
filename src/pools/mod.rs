pub mod concentrated;
pub mod constant_product;

use crate::core::{
    Address, Price, Protocol, SwapError, SwapResult, Token, CONSTANT_PRODUCT_FEE_PLACEHOLDER,
};
use serde::Serialize;
use std::fmt;

pub use concentrated::{encode_sqrt_ratio_x96, ConcentratedPool, FeeAmount};
pub use constant_product::ConstantProductPool;

/// Queries every pool variant answers the same way.
pub trait PoolQuery {
    fn token0(&self) -> &Token;

    fn token1(&self) -> &Token;

    /// Price of `token0` in `token1`.
    fn token0_price(&self) -> Price;

    fn token1_price(&self) -> Price {
        // pool prices are never zero: reserves and sqrt price are checked on construction
        let price = self.token0_price();
        Price::from_ratio(price.quote, price.base, price.ratio.invert())
    }

    fn chain_id(&self) -> u64 {
        self.token0().chain_id
    }

    fn involves_token(&self, token: &Token) -> bool {
        token == self.token0() || token == self.token1()
    }

    /// The side opposite `token`, or `None` if the pool does not hold it.
    fn other_token(&self, token: &Token) -> Option<&Token> {
        if token == self.token0() {
            Some(self.token1())
        } else if token == self.token1() {
            Some(self.token0())
        } else {
            None
        }
    }

    /// Mid price for swapping token0 into token1 (`zero_for_one`) or back.
    fn spot_price(&self, zero_for_one: bool) -> Price {
        if zero_for_one {
            self.token0_price()
        } else {
            self.token1_price()
        }
    }

    /// Price of `token` in terms of the other side.
    fn price_of(&self, token: &Token) -> SwapResult<Price> {
        if token == self.token0() {
            Ok(self.token0_price())
        } else if token == self.token1() {
            Ok(self.token1_price())
        } else {
            Err(SwapError::InvalidPoolState(format!(
                "token {} is not in pool {}/{}",
                token,
                self.token0(),
                self.token1()
            )))
        }
    }
}

/// Identity used for duplicate detection across trade legs.
///
/// One constant-product pool exists per pair, and one concentrated pool per
/// pair and fee, so these keys match how pool contracts are addressed.
/// Two constant-product snapshots of the same pair, even with different
/// reserves, count as the same liquidity source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKey {
    ConstantProduct {
        chain_id: u64,
        token0: Address,
        token1: Address,
    },
    Concentrated {
        chain_id: u64,
        token0: Address,
        token1: Address,
        fee: FeeAmount,
    },
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKey::ConstantProduct {
                chain_id,
                token0,
                token1,
            } => write!(f, "constant-product {}/{} on chain {}", token0, token1, chain_id),
            PoolKey::Concentrated {
                chain_id,
                token0,
                token1,
                fee,
            } => write!(
                f,
                "concentrated {}/{} fee {} on chain {}",
                token0, token1, fee, chain_id
            ),
        }
    }
}

/// A pool of either pricing model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LiquidityPool {
    ConstantProduct(ConstantProductPool),
    Concentrated(ConcentratedPool),
}

impl LiquidityPool {
    pub fn protocol(&self) -> Protocol {
        match self {
            LiquidityPool::ConstantProduct(_) => Protocol::V2,
            LiquidityPool::Concentrated(_) => Protocol::V3,
        }
    }

    pub fn same_variant(&self, other: &LiquidityPool) -> bool {
        self.protocol() == other.protocol()
    }

    pub fn fee(&self) -> Option<FeeAmount> {
        match self {
            LiquidityPool::ConstantProduct(_) => None,
            LiquidityPool::Concentrated(pool) => Some(pool.fee()),
        }
    }

    /// Fee slot written into a packed path for this hop.
    pub fn path_fee(&self) -> u32 {
        self.fee()
            .map(|fee| fee.get())
            .unwrap_or(CONSTANT_PRODUCT_FEE_PLACEHOLDER)
    }

    pub fn key(&self) -> PoolKey {
        let chain_id = self.chain_id();
        let token0 = self.token0().address;
        let token1 = self.token1().address;
        match self {
            LiquidityPool::ConstantProduct(_) => PoolKey::ConstantProduct {
                chain_id,
                token0,
                token1,
            },
            LiquidityPool::Concentrated(pool) => PoolKey::Concentrated {
                chain_id,
                token0,
                token1,
                fee: pool.fee(),
            },
        }
    }
}

impl PoolQuery for LiquidityPool {
    fn token0(&self) -> &Token {
        match self {
            LiquidityPool::ConstantProduct(pool) => pool.token0(),
            LiquidityPool::Concentrated(pool) => pool.token0(),
        }
    }

    fn token1(&self) -> &Token {
        match self {
            LiquidityPool::ConstantProduct(pool) => pool.token1(),
            LiquidityPool::Concentrated(pool) => pool.token1(),
        }
    }

    fn token0_price(&self) -> Price {
        match self {
            LiquidityPool::ConstantProduct(pool) => pool.token0_price(),
            LiquidityPool::Concentrated(pool) => pool.token0_price(),
        }
    }
}

impl From<ConstantProductPool> for LiquidityPool {
    fn from(pool: ConstantProductPool) -> Self {
        LiquidityPool::ConstantProduct(pool)
    }
}

impl From<ConcentratedPool> for LiquidityPool {
    fn from(pool: ConcentratedPool) -> Self {
        LiquidityPool::Concentrated(pool)
    }
}
