use crate::core::{Address, ADDRESS_SIZE, FEE_SIZE};
use crate::routing::Route;
use serde::Serialize;
use std::fmt;

/// Alternating `token, fee, token, ..., token` path for multi-hop calls.
///
/// Constant-product hops carry the fee placeholder so every hop has the
/// same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EncodedPath {
    tokens: Vec<Address>,
    fees: Vec<u32>,
}

impl EncodedPath {
    pub fn tokens(&self) -> &[Address] {
        &self.tokens
    }

    pub fn fees(&self) -> &[u32] {
        &self.fees
    }

    /// Both sequences reversed, i.e. the same hops walked from the other end.
    pub fn reversed(&self) -> EncodedPath {
        EncodedPath {
            tokens: self.tokens.iter().rev().copied().collect(),
            fees: self.fees.iter().rev().copied().collect(),
        }
    }

    /// 20-byte addresses interleaved with 3-byte big-endian fees.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            self.tokens.len() * ADDRESS_SIZE + self.fees.len() * FEE_SIZE,
        );
        for (index, token) in self.tokens.iter().enumerate() {
            bytes.extend_from_slice(token.as_bytes());
            if let Some(fee) = self.fees.get(index) {
                bytes.extend_from_slice(&fee.to_be_bytes()[4 - FEE_SIZE..]);
            }
        }
        bytes
    }
}

impl fmt::Display for EncodedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_packed_bytes()))
    }
}

/// Path for `route`; exact-output calls take it from output to input.
pub fn encode_route_to_path(route: &Route, exact_output: bool) -> EncodedPath {
    let path = EncodedPath {
        tokens: route.token_path().iter().map(|token| token.address).collect(),
        fees: route.pools().iter().map(|pool| pool.path_fee()).collect(),
    };
    if exact_output {
        path.reversed()
    } else {
        path
    }
}
