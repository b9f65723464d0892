use crate::core::{Currency, Fraction, Price, Protocol, SwapError, SwapResult, Token};
use crate::pools::{LiquidityPool, PoolQuery};
use log::trace;
use once_cell::sync::OnceCell;
use serde::Serialize;

/// A validated path of pools from `input` to `output`.
///
/// `input`/`output` may be native; the pools only see their wrapped forms.
/// The mid price is computed on first use and then kept.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pools: Vec<LiquidityPool>,
    token_path: Vec<Token>,
    input: Currency,
    output: Currency,
    chain_id: u64,
    protocol: Protocol,
    #[serde(skip)]
    mid_price: OnceCell<Price>,
}

impl Route {
    pub fn new(pools: Vec<LiquidityPool>, input: Currency, output: Currency) -> SwapResult<Self> {
        let first = pools.first().ok_or(SwapError::EmptyRoute)?;
        let chain_id = first.chain_id();
        if let Some(pool) = pools.iter().find(|pool| pool.chain_id() != chain_id) {
            return Err(SwapError::ChainMismatch {
                expected: chain_id,
                found: pool.chain_id(),
            });
        }

        let wrapped_input = input.wrapped();
        if !first.involves_token(wrapped_input) {
            return Err(SwapError::InputNotInFirstPool(input.to_string()));
        }
        let last = &pools[pools.len() - 1];
        if !last.involves_token(output.wrapped()) {
            return Err(SwapError::OutputNotInLastPool(output.to_string()));
        }

        let mut token_path = Vec::with_capacity(pools.len() + 1);
        token_path.push(wrapped_input.clone());
        for (hop, pool) in pools.iter().enumerate() {
            let current = &token_path[hop];
            let next = pool
                .other_token(current)
                .ok_or_else(|| SwapError::DiscontinuousPath {
                    hop,
                    token: current.to_string(),
                })?
                .clone();
            token_path.push(next);
        }
        if token_path.last() != Some(output.wrapped()) {
            return Err(SwapError::OutputNotInLastPool(output.to_string()));
        }

        let protocol = if pools.iter().all(|pool| pool.protocol() == Protocol::V2) {
            Protocol::V2
        } else if pools.iter().all(|pool| pool.protocol() == Protocol::V3) {
            Protocol::V3
        } else {
            Protocol::Mixed
        };

        Ok(Self {
            pools,
            token_path,
            input,
            output,
            chain_id,
            protocol,
            mid_price: OnceCell::new(),
        })
    }

    /// Route carrying an explicit protocol tag.
    ///
    /// `Mixed` accepts any pools, so an all-concentrated path can still be
    /// planned segment by segment. `V2`/`V3` require every pool to match.
    pub fn with_protocol(
        pools: Vec<LiquidityPool>,
        input: Currency,
        output: Currency,
        protocol: Protocol,
    ) -> SwapResult<Self> {
        let mut route = Self::new(pools, input, output)?;
        if protocol != Protocol::Mixed && route.protocol != protocol {
            return Err(SwapError::UnsupportedProtocol(format!(
                "{} route over {} pools",
                protocol, route.protocol
            )));
        }
        route.protocol = protocol;
        Ok(route)
    }

    pub fn pools(&self) -> &[LiquidityPool] {
        &self.pools
    }

    /// Wrapped tokens visited, one more than the number of pools.
    pub fn token_path(&self) -> &[Token] {
        &self.token_path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn is_single_hop(&self) -> bool {
        self.pools.len() == 1
    }

    /// Product of each hop's spot price along the walked direction,
    /// labelled with the route's own (possibly native) input and output.
    pub fn mid_price(&self) -> &Price {
        self.mid_price.get_or_init(|| {
            let mut next_input = &self.token_path[0];
            let mut ratio = Fraction::one();
            for pool in &self.pools {
                let zero_for_one = next_input == pool.token0();
                ratio = ratio.multiply(&pool.spot_price(zero_for_one).ratio);
                next_input = if zero_for_one {
                    pool.token1()
                } else {
                    pool.token0()
                };
            }
            trace!("route {} -> {} mid price {}", self.input, self.output, ratio);
            Price::from_ratio(self.input.clone(), self.output.clone(), ratio)
        })
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.pools == other.pools
            && self.input == other.input
            && self.output == other.output
            && self.protocol == other.protocol
    }
}

impl Eq for Route {}
