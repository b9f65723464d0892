use crate::core::error::{SwapError, SwapResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// 20-byte account identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Address whose low eight bytes hold `value` big-endian.
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SwapError;

    fn from_str(s: &str) -> SwapResult<Self> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| SwapError::InvalidAddress(format!("{} is not 20 bytes", s)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// An ERC20-style token. Identity is `(chain_id, address)`; decimals and
/// symbol are descriptive only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: Option<&str>) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.map(str::to_string),
        }
    }

    /// Address ordering used to pick `token0` of a pool.
    pub fn sorts_before(&self, other: &Token) -> SwapResult<bool> {
        if self.chain_id != other.chain_id {
            return Err(SwapError::ChainMismatch {
                expected: self.chain_id,
                found: other.chain_id,
            });
        }
        if self.address == other.address {
            return Err(SwapError::InvalidPoolState(format!(
                "token {} cannot be paired with itself",
                self.address
            )));
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{}", self.address),
        }
    }
}

/// The chain's native asset. Pools only ever hold its wrapped token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub chain_id: u64,
    pub decimals: u8,
    pub symbol: String,
    pub wrapped: Token,
}

impl NativeCurrency {
    pub fn new(wrapped: Token, symbol: &str) -> Self {
        Self {
            chain_id: wrapped.chain_id,
            decimals: wrapped.decimals,
            symbol: symbol.to_string(),
            wrapped,
        }
    }
}

impl PartialEq for NativeCurrency {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for NativeCurrency {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Currency {
    Native(NativeCurrency),
    Token(Token),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Currency::Token(_))
    }

    /// The form pools understand: the token itself, or the wrapped native token.
    pub fn wrapped(&self) -> &Token {
        match self {
            Currency::Native(native) => &native.wrapped,
            Currency::Token(token) => token,
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Currency::Native(native) => native.chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native(native) => native.decimals,
            Currency::Token(token) => token.decimals,
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Currency::Native(native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Native(native) => write!(f, "{}", native.symbol),
            Currency::Token(token) => write!(f, "{}", token),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::ExactInput => write!(f, "EXACT_INPUT"),
            TradeType::ExactOutput => write!(f, "EXACT_OUTPUT"),
        }
    }
}

/// Which pricing models a route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Constant-product pools only.
    V2,
    /// Concentrated-liquidity pools only.
    V3,
    /// Both models in one path.
    #[serde(rename = "MIXED")]
    Mixed,
}

impl FromStr for Protocol {
    type Err = SwapError;

    fn from_str(s: &str) -> SwapResult<Self> {
        match s.to_uppercase().as_str() {
            "V2" => Ok(Protocol::V2),
            "V3" => Ok(Protocol::V3),
            "MIXED" => Ok(Protocol::Mixed),
            _ => Err(SwapError::UnsupportedProtocol(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::V2 => write!(f, "V2"),
            Protocol::V3 => write!(f, "V3"),
            Protocol::Mixed => write!(f, "MIXED"),
        }
    }
}
