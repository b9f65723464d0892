use crate::core::{constants::*, error::SwapResult, types::Address, Percent, SwapError};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Exact-input plans with more single-pool swaps than this check
    /// slippage once, in aggregate, after all legs.
    pub aggregated_slippage_swap_threshold: usize,
    pub default_slippage_bps: u16,
    /// Recipient that keeps funds inside the router between steps.
    pub router_custody_address: Address,
    /// Recipient used when the caller does not name one.
    pub msg_sender_address: Address,
}

impl PlannerConfig {
    pub fn from_env() -> SwapResult<Self> {
        dotenv::dotenv().ok();

        let router_custody_address = match env::var("ROUTER_CUSTODY_ADDRESS") {
            Ok(raw) => Address::from_str(&raw)?,
            Err(_) => ADDRESS_THIS,
        };
        let msg_sender_address = match env::var("MSG_SENDER_ADDRESS") {
            Ok(raw) => Address::from_str(&raw)?,
            Err(_) => MSG_SENDER,
        };

        let config = Self {
            aggregated_slippage_swap_threshold: env::var("AGGREGATED_SLIPPAGE_SWAP_THRESHOLD")
                .unwrap_or_default()
                .parse()
                .unwrap_or(AGGREGATED_SLIPPAGE_SWAP_THRESHOLD),
            default_slippage_bps: env::var("DEFAULT_SLIPPAGE_BPS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_SLIPPAGE_BPS),
            router_custody_address,
            msg_sender_address,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SwapResult<()> {
        if u32::from(self.default_slippage_bps) > BPS_DENOMINATOR {
            return Err(SwapError::ConfigError(
                "Default slippage cannot exceed 100%".to_string(),
            ));
        }

        if self.router_custody_address == self.msg_sender_address {
            return Err(SwapError::ConfigError(
                "Router custody and sender sentinels must differ".to_string(),
            ));
        }

        Ok(())
    }

    pub fn default_slippage(&self) -> Percent {
        Percent::from_bps(u32::from(self.default_slippage_bps))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            aggregated_slippage_swap_threshold: AGGREGATED_SLIPPAGE_SWAP_THRESHOLD,
            default_slippage_bps: DEFAULT_SLIPPAGE_BPS,
            router_custody_address: ADDRESS_THIS,
            msg_sender_address: MSG_SENDER,
        }
    }
}
