use crate::core::types::Address;
use num_bigint::BigUint;

// Recipient sentinels understood by the router contract
pub const MSG_SENDER: Address = Address::from_low_u64(1);
pub const ADDRESS_THIS: Address = Address::from_low_u64(2);

/// Fee slot written for constant-product hops in a packed path.
/// Larger than any valid fee so decoders can tell the hop apart.
pub const CONSTANT_PRODUCT_FEE_PLACEHOLDER: u32 = 0x80_0000;

/// Fees are expressed in hundredths of a bip; 1_000_000 is 100%.
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// Amount value meaning "spend whatever the router currently holds".
pub const CONTRACT_BALANCE: u64 = 0;

// Custody heuristic
pub const AGGREGATED_SLIPPAGE_SWAP_THRESHOLD: usize = 2;

// Transaction Configuration
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50; // 0.5%
pub const BPS_DENOMINATOR: u32 = 10_000;

// Packed path widths
pub const ADDRESS_SIZE: usize = 20;
pub const FEE_SIZE: usize = 3;

lazy_static::lazy_static! {
    pub static ref Q96: BigUint = BigUint::from(1u8) << 96;
    pub static ref Q192: BigUint = BigUint::from(1u8) << 192;
}
