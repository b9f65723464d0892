use crate::core::{CurrencyAmount, SwapResult};
use crate::pools::LiquidityPool;

/// Pool-specific swap simulation, supplied by the caller.
///
/// Implementations receive and return amounts of the pool's own (wrapped)
/// tokens. Pricing and tick math live behind this trait, not in this crate.
pub trait PoolSimulator {
    /// Amount of the other token received for an exact `input`.
    fn output_amount(&self, pool: &LiquidityPool, input: &CurrencyAmount)
        -> SwapResult<CurrencyAmount>;

    /// Amount of the other token required to receive an exact `output`.
    fn input_amount(&self, pool: &LiquidityPool, output: &CurrencyAmount)
        -> SwapResult<CurrencyAmount>;
}
