pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod fraction;
pub mod types;

pub use amount::{CurrencyAmount, Price};
pub use config::PlannerConfig;
pub use constants::*;
pub use error::{ErrorCategory, SwapError, SwapResult};
pub use fraction::{Fraction, Percent};
pub use types::*;
