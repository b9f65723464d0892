use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

/// Broad grouping of failures, used by tooling to pick a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A route or pool could not be assembled.
    Structural,
    /// Legs or trades disagree with each other.
    TradeConsistency,
    /// The plan compiler refused the request.
    Compiler,
    /// Malformed caller input (amounts, addresses, config, JSON).
    Input,
}

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Route has no pools")]
    EmptyRoute,

    #[error("Chain mismatch: expected chain {expected}, found chain {found}")]
    ChainMismatch { expected: u64, found: u64 },

    #[error("Input currency {0} is not in the first pool")]
    InputNotInFirstPool(String),

    #[error("Output currency {0} is not in the last pool")]
    OutputNotInLastPool(String),

    #[error("Pool at hop {hop} does not involve token {token}")]
    DiscontinuousPath { hop: usize, token: String },

    #[error("Invalid pool variant: {0}")]
    InvalidPoolVariant(String),

    #[error("Invalid pool state: {0}")]
    InvalidPoolState(String),

    #[error("Trade has no legs")]
    EmptyTrade,

    #[error("Pool {0} is used by more than one leg")]
    PoolsDuplicated(String),

    #[error("Amount currency {found} does not match route input {expected}")]
    InputCurrencyMismatch { expected: String, found: String },

    #[error("Amount currency {found} does not match route output {expected}")]
    OutputCurrencyMismatch { expected: String, found: String },

    #[error("Leg input currency {found} differs from {expected}")]
    InputCurrencyMatch { expected: String, found: String },

    #[error("Leg output currency {found} differs from {expected}")]
    OutputCurrencyMatch { expected: String, found: String },

    #[error("Trade types differ across trades")]
    TradeTypeMismatch,

    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("Mixed route legs need at least two pools")]
    UnsupportedSingleHopMixedRoute,

    #[error("Mixed routes only support exact input trades")]
    MixedRouteExactOutput,

    #[error("Input permit requested for native currency {0}")]
    NonTokenPermit(String),

    #[error("Slippage tolerance must not be negative")]
    NegativeSlippageTolerance,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SwapError {
    /// Stable reason code for callers that present diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            SwapError::EmptyRoute => "EMPTY_ROUTE",
            SwapError::ChainMismatch { .. } => "CHAIN_MISMATCH",
            SwapError::InputNotInFirstPool(_) => "INPUT_NOT_IN_FIRST_POOL",
            SwapError::OutputNotInLastPool(_) => "OUTPUT_NOT_IN_LAST_POOL",
            SwapError::DiscontinuousPath { .. } => "DISCONTINUOUS_PATH",
            SwapError::InvalidPoolVariant(_) => "INVALID_POOL_VARIANT",
            SwapError::InvalidPoolState(_) => "INVALID_POOL_STATE",
            SwapError::EmptyTrade => "EMPTY_TRADE",
            SwapError::PoolsDuplicated(_) => "POOLS_DUPLICATED",
            SwapError::InputCurrencyMismatch { .. } => "INPUT_CURRENCY_MISMATCH",
            SwapError::OutputCurrencyMismatch { .. } => "OUTPUT_CURRENCY_MISMATCH",
            SwapError::InputCurrencyMatch { .. } => "INPUT_CURRENCY_MATCH",
            SwapError::OutputCurrencyMatch { .. } => "OUTPUT_CURRENCY_MATCH",
            SwapError::TradeTypeMismatch => "TRADE_TYPE_MISMATCH",
            SwapError::CurrencyMismatch(_) => "CURRENCY_MISMATCH",
            SwapError::InvalidAmount(_) => "INVALID_AMOUNT",
            SwapError::UnsupportedProtocol(_) => "UNSUPPORTED_PROTOCOL",
            SwapError::UnsupportedSingleHopMixedRoute => "UNSUPPORTED_SINGLE_HOP_MIXED_ROUTE",
            SwapError::MixedRouteExactOutput => "MIXED_ROUTE_EXACT_OUTPUT",
            SwapError::NonTokenPermit(_) => "NON_TOKEN_PERMIT",
            SwapError::NegativeSlippageTolerance => "NEGATIVE_SLIPPAGE_TOLERANCE",
            SwapError::InvalidAddress(_) => "INVALID_ADDRESS",
            SwapError::SimulationFailed(_) => "SIMULATION_FAILED",
            SwapError::ConfigError(_) => "CONFIG_ERROR",
            SwapError::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SwapError::EmptyRoute
            | SwapError::ChainMismatch { .. }
            | SwapError::InputNotInFirstPool(_)
            | SwapError::OutputNotInLastPool(_)
            | SwapError::DiscontinuousPath { .. }
            | SwapError::InvalidPoolVariant(_)
            | SwapError::InvalidPoolState(_) => ErrorCategory::Structural,
            SwapError::EmptyTrade
            | SwapError::PoolsDuplicated(_)
            | SwapError::InputCurrencyMismatch { .. }
            | SwapError::OutputCurrencyMismatch { .. }
            | SwapError::InputCurrencyMatch { .. }
            | SwapError::OutputCurrencyMatch { .. }
            | SwapError::TradeTypeMismatch
            | SwapError::CurrencyMismatch(_) => ErrorCategory::TradeConsistency,
            SwapError::UnsupportedProtocol(_)
            | SwapError::UnsupportedSingleHopMixedRoute
            | SwapError::MixedRouteExactOutput
            | SwapError::NonTokenPermit(_)
            | SwapError::NegativeSlippageTolerance => ErrorCategory::Compiler,
            SwapError::InvalidAmount(_)
            | SwapError::InvalidAddress(_)
            | SwapError::SimulationFailed(_)
            | SwapError::ConfigError(_)
            | SwapError::SerializationError(_) => ErrorCategory::Input,
        }
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}

impl From<hex::FromHexError> for SwapError {
    fn from(err: hex::FromHexError) -> Self {
        SwapError::InvalidAddress(err.to_string())
    }
}
