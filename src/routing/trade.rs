use crate::core::fraction::non_negative;
use crate::core::{
    Currency, CurrencyAmount, Fraction, Percent, Price, SwapError, SwapResult, TradeType,
};
use crate::pools::PoolKey;
use crate::quotes::PoolSimulator;
use crate::routing::Route;
use log::debug;
use num_bigint::BigInt;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashSet;

/// One route of a trade with the amounts it is expected to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    route: Route,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
}

impl Leg {
    /// Amounts must be denominated in the route's own input and output.
    pub fn new(
        route: Route,
        input_amount: CurrencyAmount,
        output_amount: CurrencyAmount,
    ) -> SwapResult<Self> {
        if &input_amount.currency != route.input() {
            return Err(SwapError::InputCurrencyMismatch {
                expected: route.input().to_string(),
                found: input_amount.currency.to_string(),
            });
        }
        if &output_amount.currency != route.output() {
            return Err(SwapError::OutputCurrencyMismatch {
                expected: route.output().to_string(),
                found: output_amount.currency.to_string(),
            });
        }
        Ok(Self {
            route,
            input_amount,
            output_amount,
        })
    }

    /// Runs `amount` through the route with `simulator` to find the other side.
    pub fn simulate(
        route: Route,
        amount: CurrencyAmount,
        trade_type: TradeType,
        simulator: &dyn PoolSimulator,
    ) -> SwapResult<Self> {
        match trade_type {
            TradeType::ExactInput => {
                if &amount.currency != route.input() {
                    return Err(SwapError::InputCurrencyMismatch {
                        expected: route.input().to_string(),
                        found: amount.currency.to_string(),
                    });
                }
                let mut current =
                    amount.with_currency(Currency::Token(route.input().wrapped().clone()));
                for (pool, next) in route.pools().iter().zip(&route.token_path()[1..]) {
                    current = simulator.output_amount(pool, &current)?;
                    expect_token(&current, next)?;
                }
                let output = current.with_currency(route.output().clone());
                Self::new(route, amount, output)
            }
            TradeType::ExactOutput => {
                if &amount.currency != route.output() {
                    return Err(SwapError::OutputCurrencyMismatch {
                        expected: route.output().to_string(),
                        found: amount.currency.to_string(),
                    });
                }
                let path = route.token_path();
                let mut current =
                    amount.with_currency(Currency::Token(path[path.len() - 1].clone()));
                for (pool, previous) in route.pools().iter().zip(path).rev() {
                    current = simulator.input_amount(pool, &current)?;
                    expect_token(&current, previous)?;
                }
                let input = current.with_currency(route.input().clone());
                Self::new(route, input, amount)
            }
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }
}

fn expect_token(amount: &CurrencyAmount, token: &crate::core::Token) -> SwapResult<()> {
    if amount.currency.wrapped() != token {
        return Err(SwapError::SimulationFailed(format!(
            "simulator returned {} where {} was expected",
            amount.currency, token
        )));
    }
    Ok(())
}

fn slippage_factor(slippage_tolerance: &Percent) -> SwapResult<Fraction> {
    if slippage_tolerance.is_negative() {
        return Err(SwapError::NegativeSlippageTolerance);
    }
    Ok(Fraction::one().add(slippage_tolerance.as_fraction()))
}

fn raw_fraction(amount: &CurrencyAmount) -> Fraction {
    Fraction::from_integer(BigInt::from(amount.raw.clone()))
}

/// One or more legs swapping the same input for the same output.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    legs: Vec<Leg>,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    #[serde(skip)]
    execution_price: OnceCell<Price>,
    #[serde(skip)]
    price_impact: OnceCell<Percent>,
}

impl Trade {
    /// Single-route trade; the counter amount comes from `simulator`.
    pub fn from_route(
        route: Route,
        amount: CurrencyAmount,
        trade_type: TradeType,
        simulator: &dyn PoolSimulator,
    ) -> SwapResult<Self> {
        let leg = Leg::simulate(route, amount, trade_type, simulator)?;
        Self::from_legs(vec![leg], trade_type)
    }

    /// Multi-route trade; each route's counter amount comes from `simulator`.
    pub fn from_routes(
        routes: Vec<(Route, CurrencyAmount)>,
        trade_type: TradeType,
        simulator: &dyn PoolSimulator,
    ) -> SwapResult<Self> {
        let legs = routes
            .into_iter()
            .map(|(route, amount)| Leg::simulate(route, amount, trade_type, simulator))
            .collect::<SwapResult<Vec<_>>>()?;
        Self::from_legs(legs, trade_type)
    }

    /// Single-route trade from an already quoted pair of amounts.
    pub fn from_quoted_route(
        route: Route,
        input_amount: CurrencyAmount,
        output_amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> SwapResult<Self> {
        let leg = Leg::new(route, input_amount, output_amount)?;
        Self::from_legs(vec![leg], trade_type)
    }

    /// Multi-route trade from `(route, input, output)` quotes.
    pub fn from_quoted_routes(
        quotes: Vec<(Route, CurrencyAmount, CurrencyAmount)>,
        trade_type: TradeType,
    ) -> SwapResult<Self> {
        let legs = quotes
            .into_iter()
            .map(|(route, input, output)| Leg::new(route, input, output))
            .collect::<SwapResult<Vec<_>>>()?;
        Self::from_legs(legs, trade_type)
    }

    /// Multi-route trade from already quoted legs.
    pub fn from_legs(legs: Vec<Leg>, trade_type: TradeType) -> SwapResult<Self> {
        let first = legs.first().ok_or(SwapError::EmptyTrade)?;
        let chain_id = first.route.chain_id();
        if let Some(leg) = legs.iter().find(|leg| leg.route.chain_id() != chain_id) {
            return Err(SwapError::ChainMismatch {
                expected: chain_id,
                found: leg.route.chain_id(),
            });
        }

        let mut seen: HashSet<PoolKey> = HashSet::new();
        for pool in legs.iter().flat_map(|leg| leg.route.pools()) {
            let key = pool.key();
            if !seen.insert(key) {
                return Err(SwapError::PoolsDuplicated(key.to_string()));
            }
        }

        let input_currency = &first.input_amount.currency;
        let output_currency = &first.output_amount.currency;
        for leg in &legs[1..] {
            if &leg.input_amount.currency != input_currency {
                return Err(SwapError::InputCurrencyMatch {
                    expected: input_currency.to_string(),
                    found: leg.input_amount.currency.to_string(),
                });
            }
            if &leg.output_amount.currency != output_currency {
                return Err(SwapError::OutputCurrencyMatch {
                    expected: output_currency.to_string(),
                    found: leg.output_amount.currency.to_string(),
                });
            }
        }

        let mut input_amount = CurrencyAmount::zero(input_currency.clone());
        let mut output_amount = CurrencyAmount::zero(output_currency.clone());
        for leg in &legs {
            input_amount = input_amount.add(&leg.input_amount)?;
            output_amount = output_amount.add(&leg.output_amount)?;
        }
        if input_amount.is_zero() || output_amount.is_zero() {
            return Err(SwapError::InvalidAmount(format!(
                "trade moves {} for {}",
                input_amount, output_amount
            )));
        }

        debug!(
            "trade {} over {} legs: {} -> {}",
            trade_type,
            legs.len(),
            input_amount,
            output_amount
        );

        Ok(Self {
            legs,
            trade_type,
            input_amount,
            output_amount,
            execution_price: OnceCell::new(),
            price_impact: OnceCell::new(),
        })
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Number of single-pool swaps across all legs.
    pub fn swap_count(&self) -> usize {
        self.legs.iter().map(|leg| leg.route.pools().len()).sum()
    }

    pub fn execution_price(&self) -> &Price {
        self.execution_price.get_or_init(|| {
            Price::new(
                self.input_amount.currency.clone(),
                self.output_amount.currency.clone(),
                BigInt::from(self.input_amount.raw.clone()),
                BigInt::from(self.output_amount.raw.clone()),
            )
        })
    }

    /// Shortfall of the output against what each leg's mid price promises.
    pub fn price_impact(&self) -> &Percent {
        self.price_impact.get_or_init(|| {
            let spot_output = self.legs.iter().fold(Fraction::zero(), |acc, leg| {
                let quoted = leg.route.mid_price().ratio.scale_raw(&leg.input_amount.raw);
                acc.add(&Fraction::from_integer(BigInt::from(quoted)))
            });
            if spot_output.is_zero() {
                return Percent::zero();
            }
            let shortfall = spot_output.subtract(&raw_fraction(&self.output_amount));
            Percent::from_fraction(shortfall.divide(&spot_output))
        })
    }

    /// Least output accepted at `slippage_tolerance`.
    ///
    /// Each leg is bounded by `output / (1 + tolerance)`; the exact per-leg
    /// bounds are summed and the total truncated once.
    pub fn minimum_amount_out(&self, slippage_tolerance: &Percent) -> SwapResult<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?.invert();
        if self.trade_type == TradeType::ExactOutput {
            return Ok(self.output_amount.clone());
        }
        let bounded = self.legs.iter().fold(Fraction::zero(), |acc, leg| {
            acc.add(&raw_fraction(&leg.output_amount).multiply(&factor))
        });
        Ok(CurrencyAmount::new(
            self.output_amount.currency.clone(),
            non_negative(bounded.quotient()),
        ))
    }

    /// Most input spent at `slippage_tolerance`; the mirror of
    /// [`minimum_amount_out`](Self::minimum_amount_out).
    pub fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> SwapResult<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?;
        if self.trade_type == TradeType::ExactInput {
            return Ok(self.input_amount.clone());
        }
        let bounded = self.legs.iter().fold(Fraction::zero(), |acc, leg| {
            acc.add(&raw_fraction(&leg.input_amount).multiply(&factor))
        });
        Ok(CurrencyAmount::new(
            self.input_amount.currency.clone(),
            non_negative(bounded.quotient()),
        ))
    }

    /// Truncated minimum output of a single leg.
    pub fn leg_minimum_amount_out(
        &self,
        leg: &Leg,
        slippage_tolerance: &Percent,
    ) -> SwapResult<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactOutput => Ok(leg.output_amount.clone()),
            TradeType::ExactInput => Ok(leg.output_amount.scale(&factor.invert())),
        }
    }

    /// Truncated maximum input of a single leg.
    pub fn leg_maximum_amount_in(
        &self,
        leg: &Leg,
        slippage_tolerance: &Percent,
    ) -> SwapResult<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactInput => Ok(leg.input_amount.clone()),
            TradeType::ExactOutput => Ok(leg.input_amount.scale(&factor)),
        }
    }

    /// Execution price after the worst slippage `slippage_tolerance` allows.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> SwapResult<Price> {
        let maximum_in = self.maximum_amount_in(slippage_tolerance)?;
        let minimum_out = self.minimum_amount_out(slippage_tolerance)?;
        Price::from_amounts(&maximum_in, &minimum_out)
    }

    pub fn input_currency(&self) -> &Currency {
        &self.input_amount.currency
    }

    pub fn output_currency(&self) -> &Currency {
        &self.output_amount.currency
    }

    /// Pools of every leg, in leg order.
    pub fn pools(&self) -> impl Iterator<Item = &crate::pools::LiquidityPool> {
        self.legs.iter().flat_map(|leg| leg.route.pools())
    }

    pub fn chain_id(&self) -> u64 {
        self.legs[0].route.chain_id()
    }
}
