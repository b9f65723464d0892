pub mod core;
pub mod descriptor;
pub mod pools;
pub mod quotes;
pub mod routing;
pub mod transaction;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use crate::core::{
    Currency, CurrencyAmount, Percent, PlannerConfig, Price, SwapError, SwapResult, Token,
    TradeType,
};
pub use crate::pools::{LiquidityPool, PoolQuery};
pub use crate::quotes::PoolSimulator;
pub use crate::routing::{Leg, Route, Trade};
pub use crate::transaction::{ExecutionPlan, Operation, SwapOptions, SwapPlan, SwapRouter};
