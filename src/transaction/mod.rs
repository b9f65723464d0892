pub mod operation;
pub mod path;

use crate::core::amount::serialize_decimal;
use crate::core::{
    Address, CurrencyAmount, Percent, PlannerConfig, Protocol, SwapError, SwapResult, TradeType,
};
use crate::routing::{segment_route, Leg, Trade};
use log::{debug, info};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

pub use operation::{ExecutionPlan, FeeOptions, Operation, PermitOptions, Validation};
pub use path::{encode_route_to_path, EncodedPath};

/// Caller choices for one swap call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapOptions {
    pub slippage_tolerance: Percent,
    /// Defaults to the sender sentinel.
    pub recipient: Option<Address>,
    pub validation: Option<Validation>,
    pub input_permit: Option<PermitOptions>,
    pub fee: Option<FeeOptions>,
}

impl SwapOptions {
    pub fn new(slippage_tolerance: Percent) -> Self {
        Self {
            slippage_tolerance,
            recipient: None,
            validation: None,
            input_permit: None,
            fee: None,
        }
    }

    /// Options using the configured default slippage.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.default_slippage())
    }

    pub fn with_recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_permit(mut self, permit: PermitOptions) -> Self {
        self.input_permit = Some(permit);
        self
    }

    pub fn with_fee(mut self, fee: FeeOptions) -> Self {
        self.fee = Some(fee);
        self
    }
}

/// Compiled plan plus the amounts and custody facts behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapPlan {
    pub plan: ExecutionPlan,
    pub router_must_custody: bool,
    pub input_is_native: bool,
    pub output_is_native: bool,
    /// Sum of each trade's maximum input.
    pub total_amount_in: CurrencyAmount,
    /// Sum of each trade's minimum output.
    pub minimum_amount_out: CurrencyAmount,
    /// Sum of each trade's quoted output.
    pub quote_amount_out: CurrencyAmount,
    /// Native value to attach to the call.
    #[serde(serialize_with = "serialize_decimal")]
    pub value: BigUint,
}

/// Compiles trades into router operations.
#[derive(Debug, Clone, Default)]
pub struct SwapRouter {
    config: PlannerConfig,
}

impl SwapRouter {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Full plan: swaps, then unwrap/sweep and native refund where needed.
    pub fn swap_call_parameters(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> SwapResult<SwapPlan> {
        let mut summary = self.encode_swaps(trades, options, false)?;
        let recipient = self.final_recipient(options);

        if summary.router_must_custody {
            let amount_minimum = summary.minimum_amount_out.raw.clone();
            let fee = options.fee.clone();
            let step = if summary.output_is_native {
                Operation::UnwrapNative {
                    amount_minimum,
                    recipient,
                    fee,
                }
            } else {
                Operation::SweepToken {
                    token: summary.minimum_amount_out.currency.wrapped().address,
                    amount_minimum,
                    recipient,
                    fee,
                }
            };
            summary.plan.push(step);
        }

        let trade_type = trades[0].trade_type();
        if summary.input_is_native && trade_type == TradeType::ExactOutput {
            summary.plan.push(Operation::RefundNative);
        }

        summary.plan.set_validation(options.validation.clone());

        info!(
            "planned {} operations for {} trades: {}",
            summary.plan.len(),
            trades.len(),
            summary.plan.methods().join(", ")
        );
        Ok(summary)
    }

    /// Swap operations only, for callers that add their own post steps.
    ///
    /// With `swap_and_add` the proceeds always stay with the router so a
    /// following liquidity step can use them.
    pub fn encode_swaps(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
        swap_and_add: bool,
    ) -> SwapResult<SwapPlan> {
        if options.slippage_tolerance.is_negative() {
            return Err(SwapError::NegativeSlippageTolerance);
        }
        let sample = trades.first().ok_or(SwapError::EmptyTrade)?;
        let trade_type = sample.trade_type();
        for trade in &trades[1..] {
            if trade.input_currency() != sample.input_currency() {
                return Err(SwapError::InputCurrencyMatch {
                    expected: sample.input_currency().to_string(),
                    found: trade.input_currency().to_string(),
                });
            }
            if trade.output_currency() != sample.output_currency() {
                return Err(SwapError::OutputCurrencyMatch {
                    expected: sample.output_currency().to_string(),
                    found: trade.output_currency().to_string(),
                });
            }
            if trade.trade_type() != trade_type {
                return Err(SwapError::TradeTypeMismatch);
            }
        }

        let input_is_native = sample.input_currency().is_native();
        let output_is_native = sample.output_currency().is_native();

        let mut plan = ExecutionPlan::new();
        if let Some(permit) = &options.input_permit {
            if input_is_native {
                return Err(SwapError::NonTokenPermit(sample.input_currency().to_string()));
            }
            plan.push(Operation::SelfPermit {
                token: sample.input_currency().wrapped().address,
                permit: permit.clone(),
            });
        }

        let swap_count: usize = trades.iter().map(Trade::swap_count).sum();
        let aggregated_check = trade_type == TradeType::ExactInput
            && swap_count > self.config.aggregated_slippage_swap_threshold;
        let router_must_custody =
            output_is_native || options.fee.is_some() || swap_and_add || aggregated_check;
        let recipient = if router_must_custody {
            self.config.router_custody_address
        } else {
            self.final_recipient(options)
        };
        debug!(
            "{} swaps across {} trades, custody {}, aggregated check {}",
            swap_count,
            trades.len(),
            router_must_custody,
            aggregated_check
        );

        let tolerance = &options.slippage_tolerance;
        for trade in trades {
            for leg in trade.legs() {
                let step = LegPlan {
                    trade,
                    leg,
                    recipient,
                    tolerance,
                    aggregated_check,
                };
                for operation in self.encode_leg(&step)? {
                    plan.push(operation);
                }
            }
        }

        let mut total_amount_in = CurrencyAmount::zero(sample.input_currency().clone());
        let mut minimum_amount_out = CurrencyAmount::zero(sample.output_currency().clone());
        let mut quote_amount_out = CurrencyAmount::zero(sample.output_currency().clone());
        for trade in trades {
            total_amount_in = total_amount_in.add(&trade.maximum_amount_in(tolerance)?)?;
            minimum_amount_out = minimum_amount_out.add(&trade.minimum_amount_out(tolerance)?)?;
            quote_amount_out = quote_amount_out.add(trade.output_amount())?;
        }
        let value = if input_is_native {
            total_amount_in.raw.clone()
        } else {
            BigUint::zero()
        };

        Ok(SwapPlan {
            plan,
            router_must_custody,
            input_is_native,
            output_is_native,
            total_amount_in,
            minimum_amount_out,
            quote_amount_out,
            value,
        })
    }

    fn final_recipient(&self, options: &SwapOptions) -> Address {
        options.recipient.unwrap_or(self.config.msg_sender_address)
    }

    fn encode_leg(&self, step: &LegPlan<'_>) -> SwapResult<Vec<Operation>> {
        let route = step.leg.route();
        match route.protocol() {
            Protocol::V2 | Protocol::V3 => {
                let operation = if route.is_single_hop() {
                    step.single_hop()?
                } else {
                    step.multi_hop()?
                };
                Ok(vec![operation])
            }
            Protocol::Mixed => self.encode_mixed_leg(step),
        }
    }

    /// One operation per same-model segment, handing funds along through
    /// the router.
    fn encode_mixed_leg(&self, step: &LegPlan<'_>) -> SwapResult<Vec<Operation>> {
        let route = step.leg.route();
        if route.is_single_hop() {
            return Err(SwapError::UnsupportedSingleHopMixedRoute);
        }
        if step.trade.trade_type() == TradeType::ExactOutput {
            return Err(SwapError::MixedRouteExactOutput);
        }

        let amount_in = step.amount_in()?;
        let amount_out_minimum = step.amount_out_minimum()?;
        let segments = segment_route(route)?;
        let last = segments.len() - 1;
        let operations = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| Operation::ExactInput {
                path: encode_route_to_path(segment, false),
                recipient: if index == last {
                    step.recipient
                } else {
                    self.config.router_custody_address
                },
                amount_in: if index == 0 {
                    amount_in.clone()
                } else {
                    BigUint::from(crate::core::CONTRACT_BALANCE)
                },
                amount_out_minimum: if index == last {
                    amount_out_minimum.clone()
                } else {
                    BigUint::zero()
                },
            })
            .collect();
        Ok(operations)
    }
}

/// Everything needed to encode one leg.
struct LegPlan<'a> {
    trade: &'a Trade,
    leg: &'a Leg,
    recipient: Address,
    tolerance: &'a Percent,
    aggregated_check: bool,
}

impl LegPlan<'_> {
    fn amount_in(&self) -> SwapResult<BigUint> {
        Ok(self
            .trade
            .leg_maximum_amount_in(self.leg, self.tolerance)?
            .raw)
    }

    /// Zero when the output is checked once for the whole plan.
    fn amount_out_minimum(&self) -> SwapResult<BigUint> {
        if self.aggregated_check {
            return Ok(BigUint::zero());
        }
        Ok(self
            .trade
            .leg_minimum_amount_out(self.leg, self.tolerance)?
            .raw)
    }

    fn single_hop(&self) -> SwapResult<Operation> {
        let route = self.leg.route();
        let path = route.token_path();
        let token_in = path[0].address;
        let token_out = path[1].address;
        let fee = route.pools()[0].fee();
        let operation = match self.trade.trade_type() {
            TradeType::ExactInput => Operation::ExactInputSingle {
                token_in,
                token_out,
                fee,
                recipient: self.recipient,
                amount_in: self.amount_in()?,
                amount_out_minimum: self.amount_out_minimum()?,
            },
            TradeType::ExactOutput => Operation::ExactOutputSingle {
                token_in,
                token_out,
                fee,
                recipient: self.recipient,
                amount_out: self.leg.output_amount().raw.clone(),
                amount_in_maximum: self.amount_in()?,
            },
        };
        Ok(operation)
    }

    fn multi_hop(&self) -> SwapResult<Operation> {
        let route = self.leg.route();
        let operation = match self.trade.trade_type() {
            TradeType::ExactInput => Operation::ExactInput {
                path: encode_route_to_path(route, false),
                recipient: self.recipient,
                amount_in: self.amount_in()?,
                amount_out_minimum: self.amount_out_minimum()?,
            },
            TradeType::ExactOutput => Operation::ExactOutput {
                path: encode_route_to_path(route, true),
                recipient: self.recipient,
                amount_out: self.leg.output_amount().raw.clone(),
                amount_in_maximum: self.amount_in()?,
            },
        };
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Currency, ADDRESS_THIS, CONSTANT_PRODUCT_FEE_PLACEHOLDER, MSG_SENDER};
    use crate::fixtures::*;
    use crate::pools::{FeeAmount, LiquidityPool};
    use crate::routing::Route;
    use pretty_assertions::assert_eq;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn five_percent() -> SwapOptions {
        SwapOptions::new(Percent::new(5, 100))
    }

    fn quoted(
        pools: Vec<LiquidityPool>,
        input: CurrencyAmount,
        output: CurrencyAmount,
        trade_type: TradeType,
    ) -> Trade {
        let route = Route::new(pools, input.currency.clone(), output.currency.clone()).unwrap();
        Trade::from_quoted_route(route, input, output, trade_type).unwrap()
    }

    fn raw(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_single_hop_exact_input() {
        init();
        let trade = quoted(
            vec![cl_pool(0, 1, 1, 1)],
            amount(0, 100),
            amount(1, 69),
            TradeType::ExactInput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();

        assert_eq!(
            plan.plan.operations(),
            &[Operation::ExactInputSingle {
                token_in: token(0).address,
                token_out: token(1).address,
                fee: Some(FeeAmount::MEDIUM),
                recipient: MSG_SENDER,
                amount_in: raw(100),
                amount_out_minimum: raw(65),
            }]
        );
        assert!(!plan.router_must_custody);
        assert_eq!(plan.total_amount_in, amount(0, 100));
        assert_eq!(plan.minimum_amount_out, amount(1, 65));
        assert_eq!(plan.quote_amount_out, amount(1, 69));
        assert_eq!(plan.value, BigUint::zero());
    }

    #[test]
    fn test_single_hop_exact_output_constant_product() {
        let trade = quoted(
            vec![cp_pool(0, 1, 10, 10)],
            amount(0, 156),
            amount(1, 100),
            TradeType::ExactOutput,
        );
        let options = five_percent().with_recipient(Address([7; 20]));
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &options)
            .unwrap();

        assert_eq!(
            plan.plan.operations(),
            &[Operation::ExactOutputSingle {
                token_in: token(0).address,
                token_out: token(1).address,
                fee: None,
                recipient: Address([7; 20]),
                amount_out: raw(100),
                amount_in_maximum: raw(163),
            }]
        );
        assert_eq!(plan.total_amount_in, amount(0, 163));
        assert_eq!(plan.minimum_amount_out, amount(1, 100));
    }

    #[test]
    fn test_multi_hop_exact_output_path_is_reversed() {
        let trade = quoted(
            vec![cl_pool(0, 1, 1, 1), cl_pool_with_fee(1, 2, 1, 1, FeeAmount::LOW)],
            amount(0, 100),
            amount(2, 90),
            TradeType::ExactOutput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();

        match &plan.plan.operations()[0] {
            Operation::ExactOutput {
                path,
                amount_out,
                amount_in_maximum,
                ..
            } => {
                assert_eq!(
                    path.tokens(),
                    &[token(2).address, token(1).address, token(0).address]
                );
                assert_eq!(path.fees(), &[500, 3000]);
                assert_eq!(amount_out, &raw(90));
                assert_eq!(amount_in_maximum, &raw(105));
            }
            other => panic!("unexpected operation {}", other),
        }
    }

    #[test]
    fn test_native_output_unwraps_through_router() {
        let trade = quoted(
            vec![cl_pool(0, WETH, 1, 1)],
            amount(0, 100),
            native_amount(69),
            TradeType::ExactInput,
        );
        let options = five_percent().with_recipient(Address([7; 20]));
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &options)
            .unwrap();

        assert!(plan.router_must_custody);
        assert!(plan.output_is_native);
        assert_eq!(plan.plan.methods(), vec!["exactInputSingle", "unwrapNative"]);
        assert_eq!(plan.plan.operations()[0].recipient(), Some(ADDRESS_THIS));
        assert_eq!(
            plan.plan.operations()[1],
            Operation::UnwrapNative {
                amount_minimum: raw(65),
                recipient: Address([7; 20]),
                fee: None,
            }
        );
    }

    #[test]
    fn test_native_input_exact_output_refunds() {
        let trade = quoted(
            vec![cp_pool(WETH, 1, 10, 10)],
            native_amount(156),
            amount(1, 100),
            TradeType::ExactOutput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();

        assert!(plan.input_is_native);
        assert!(!plan.router_must_custody);
        assert_eq!(plan.plan.methods(), vec!["exactOutputSingle", "refundNative"]);
        assert_eq!(plan.value, raw(163));
        match &plan.plan.operations()[0] {
            Operation::ExactOutputSingle { token_in, .. } => assert_eq!(token_in, &weth().address),
            other => panic!("unexpected operation {}", other),
        }
    }

    #[test]
    fn test_aggregated_slippage_check() {
        let direct = Route::new(vec![cl_pool(0, 2, 1, 1)], currency(0), currency(2)).unwrap();
        let hop = Route::new(
            vec![cl_pool(0, 1, 1, 1), cl_pool(1, 2, 1, 1)],
            currency(0),
            currency(2),
        )
        .unwrap();
        let legs = vec![
            Leg::new(direct, amount(0, 50), amount(2, 35)).unwrap(),
            Leg::new(hop, amount(0, 50), amount(2, 34)).unwrap(),
        ];
        let trade = Trade::from_legs(legs, TradeType::ExactInput).unwrap();

        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade.clone()], &five_percent())
            .unwrap();
        assert!(plan.router_must_custody);
        assert_eq!(
            plan.plan.methods(),
            vec!["exactInputSingle", "exactInput", "sweepToken"]
        );
        for operation in &plan.plan.operations()[..2] {
            assert_eq!(operation.recipient(), Some(ADDRESS_THIS));
            match operation {
                Operation::ExactInputSingle {
                    amount_out_minimum, ..
                }
                | Operation::ExactInput {
                    amount_out_minimum, ..
                } => assert!(amount_out_minimum.is_zero()),
                other => panic!("unexpected operation {}", other),
            }
        }
        assert_eq!(
            plan.plan.operations()[2],
            Operation::SweepToken {
                token: token(2).address,
                amount_minimum: raw(65),
                recipient: MSG_SENDER,
                fee: None,
            }
        );

        // raising the threshold keeps per-leg checks
        let relaxed = SwapRouter::new(PlannerConfig {
            aggregated_slippage_swap_threshold: 3,
            ..PlannerConfig::default()
        });
        let plan = relaxed
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();
        assert!(!plan.router_must_custody);
        assert_eq!(plan.plan.methods(), vec!["exactInputSingle", "exactInput"]);
        match &plan.plan.operations()[0] {
            Operation::ExactInputSingle {
                amount_out_minimum, ..
            } => assert_eq!(amount_out_minimum, &raw(33)),
            other => panic!("unexpected operation {}", other),
        }
    }

    #[test]
    fn test_mixed_leg_segments() {
        let trade = quoted(
            vec![cp_pool(0, 1, 10, 10), cl_pool(1, 2, 1, 1)],
            amount(0, 100),
            amount(2, 69),
            TradeType::ExactInput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();

        assert!(!plan.router_must_custody);
        let operations = plan.plan.operations();
        assert_eq!(operations.len(), 2);
        match (&operations[0], &operations[1]) {
            (
                Operation::ExactInput {
                    path: first_path,
                    recipient: first_recipient,
                    amount_in: first_in,
                    amount_out_minimum: first_min,
                },
                Operation::ExactInput {
                    path: second_path,
                    recipient: second_recipient,
                    amount_in: second_in,
                    amount_out_minimum: second_min,
                },
            ) => {
                assert_eq!(first_path.tokens(), &[token(0).address, token(1).address]);
                assert_eq!(first_path.fees(), &[CONSTANT_PRODUCT_FEE_PLACEHOLDER]);
                assert_eq!(first_recipient, &ADDRESS_THIS);
                assert_eq!(first_in, &raw(100));
                assert!(first_min.is_zero());

                assert_eq!(second_path.tokens(), &[token(1).address, token(2).address]);
                assert_eq!(second_path.fees(), &[3000]);
                assert_eq!(second_recipient, &MSG_SENDER);
                assert!(second_in.is_zero());
                assert_eq!(second_min, &raw(65));
            }
            other => panic!("unexpected operations {:?}", other),
        }
    }

    #[test]
    fn test_mixed_leg_last_segment_goes_to_router_when_unwrapping() {
        let trade = quoted(
            vec![cp_pool(0, 1, 10, 10), cl_pool(1, WETH, 1, 1)],
            amount(0, 100),
            native_amount(69),
            TradeType::ExactInput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap();
        assert_eq!(
            plan.plan.methods(),
            vec!["exactInput", "exactInput", "unwrapNative"]
        );
        assert_eq!(plan.plan.operations()[1].recipient(), Some(ADDRESS_THIS));
        assert_eq!(plan.plan.operations()[2].recipient(), Some(MSG_SENDER));
    }

    #[test]
    fn test_mixed_leg_rejections() {
        let single = Route::with_protocol(
            vec![cl_pool(0, 1, 1, 1)],
            currency(0),
            currency(1),
            Protocol::Mixed,
        )
        .unwrap();
        let trade =
            Trade::from_quoted_route(single, amount(0, 10), amount(1, 9), TradeType::ExactInput)
                .unwrap();
        let err = SwapRouter::default()
            .swap_call_parameters(&[trade], &five_percent())
            .unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_SINGLE_HOP_MIXED_ROUTE");

        let exact_out = quoted(
            vec![cp_pool(0, 1, 10, 10), cl_pool(1, 2, 1, 1)],
            amount(0, 100),
            amount(2, 69),
            TradeType::ExactOutput,
        );
        let err = SwapRouter::default()
            .swap_call_parameters(&[exact_out], &five_percent())
            .unwrap_err();
        assert_eq!(err.code(), "MIXED_ROUTE_EXACT_OUTPUT");
    }

    #[test]
    fn test_permit_and_fee() {
        let permit = PermitOptions::Standard {
            v: 27,
            r: "0x01".to_string(),
            s: "0x02".to_string(),
            amount: raw(100),
            deadline: 1_700_000_000,
        };
        let fee = FeeOptions {
            fee: Percent::from_bps(15),
            recipient: Address([9; 20]),
        };
        let trade = quoted(
            vec![cl_pool(0, 1, 1, 1)],
            amount(0, 100),
            amount(1, 69),
            TradeType::ExactInput,
        );
        let options = five_percent()
            .with_permit(permit.clone())
            .with_fee(fee.clone())
            .with_validation(Validation::Deadline(1_700_000_000));
        let plan = SwapRouter::default()
            .swap_call_parameters(&[trade], &options)
            .unwrap();

        assert_eq!(
            plan.plan.methods(),
            vec!["selfPermit", "exactInputSingle", "sweepToken"]
        );
        assert_eq!(
            plan.plan.operations()[0],
            Operation::SelfPermit {
                token: token(0).address,
                permit: permit.clone(),
            }
        );
        match &plan.plan.operations()[2] {
            Operation::SweepToken { fee: Some(f), .. } => assert_eq!(f, &fee),
            other => panic!("unexpected operation {}", other),
        }
        assert_eq!(plan.plan.validation(), Some(&Validation::Deadline(1_700_000_000)));

        let native_trade = quoted(
            vec![cl_pool(WETH, 1, 1, 1)],
            native_amount(100),
            amount(1, 69),
            TradeType::ExactInput,
        );
        let err = SwapRouter::default()
            .swap_call_parameters(&[native_trade], &five_percent().with_permit(permit))
            .unwrap_err();
        assert_eq!(err.code(), "NON_TOKEN_PERMIT");
    }

    #[test]
    fn test_swap_and_add_keeps_custody() {
        let trade = quoted(
            vec![cl_pool(0, 1, 1, 1)],
            amount(0, 100),
            amount(1, 69),
            TradeType::ExactInput,
        );
        let summary = SwapRouter::default()
            .encode_swaps(&[trade], &five_percent(), true)
            .unwrap();
        assert!(summary.router_must_custody);
        assert_eq!(summary.plan.methods(), vec!["exactInputSingle"]);
        assert_eq!(summary.plan.operations()[0].recipient(), Some(ADDRESS_THIS));
    }

    #[test]
    fn test_trade_set_consistency() {
        let router = SwapRouter::default();
        let a = quoted(
            vec![cl_pool(0, 2, 1, 1)],
            amount(0, 100),
            amount(2, 69),
            TradeType::ExactInput,
        );
        let b = quoted(
            vec![cl_pool(1, 2, 1, 1)],
            amount(1, 100),
            amount(2, 69),
            TradeType::ExactInput,
        );
        let c = quoted(
            vec![cp_pool(0, 2, 10, 10)],
            amount(0, 100),
            amount(2, 69),
            TradeType::ExactOutput,
        );

        let err = router
            .swap_call_parameters(&[a.clone(), b], &five_percent())
            .unwrap_err();
        assert_eq!(err.code(), "INPUT_CURRENCY_MATCH");
        let err = router
            .swap_call_parameters(&[a.clone(), c], &five_percent())
            .unwrap_err();
        assert_eq!(err.code(), "TRADE_TYPE_MISMATCH");
        assert_eq!(
            router.swap_call_parameters(&[], &five_percent()).unwrap_err().code(),
            "EMPTY_TRADE"
        );
        let err = router
            .swap_call_parameters(&[a], &SwapOptions::new(Percent::new(-1, 100)))
            .unwrap_err();
        assert_eq!(err.code(), "NEGATIVE_SLIPPAGE_TOLERANCE");
    }

    #[test]
    fn test_multiple_trades_sum_amounts() {
        let a = quoted(
            vec![cl_pool(0, 2, 1, 1)],
            amount(0, 100),
            amount(2, 69),
            TradeType::ExactInput,
        );
        let b = quoted(
            vec![cp_pool(0, 2, 10, 10)],
            amount(0, 50),
            amount(2, 30),
            TradeType::ExactInput,
        );
        let plan = SwapRouter::default()
            .swap_call_parameters(&[a, b], &SwapOptions::new(Percent::zero()))
            .unwrap();
        assert_eq!(plan.total_amount_in, amount(0, 150));
        assert_eq!(plan.minimum_amount_out, amount(2, 99));
        assert_eq!(plan.quote_amount_out, amount(2, 99));
        assert_eq!(plan.plan.len(), 2);
    }

    #[test]
    fn test_plans_are_deterministic() {
        let build = || {
            let trade = quoted(
                vec![cp_pool(0, 1, 10, 10), cl_pool(1, 2, 1, 1), cp_pool(2, 3, 10, 10)],
                amount(0, 1000),
                amount(3, 900),
                TradeType::ExactInput,
            );
            SwapRouter::default()
                .swap_call_parameters(&[trade], &SwapOptions::from_config(&PlannerConfig::default()))
                .unwrap()
        };
        let first = build();
        assert_eq!(first, build());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&build()).unwrap()
        );
        assert_eq!(first.plan.len(), 4);
        assert!(!first.output_is_native);
        assert_eq!(first.minimum_amount_out.currency, Currency::Token(token(3)));

        // three pools exceed the threshold, so the sweep carries the only minimum
        assert!(first.router_must_custody);
        match &first.plan.operations()[2] {
            Operation::ExactInput {
                path,
                recipient,
                amount_in,
                amount_out_minimum,
            } => {
                assert_eq!(path.tokens(), &[token(2).address, token(3).address]);
                assert_eq!(recipient, &ADDRESS_THIS);
                assert!(amount_in.is_zero());
                assert!(amount_out_minimum.is_zero());
            }
            other => panic!("unexpected operation {:?}", other),
        }
        assert_eq!(first.plan.methods()[3], "sweepToken");
    }
}
