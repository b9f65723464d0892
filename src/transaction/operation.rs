use crate::core::amount::serialize_decimal;
use crate::core::{Address, Percent};
use crate::pools::FeeAmount;
use crate::transaction::path::EncodedPath;
use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;

/// Protocol fee taken from the output before it reaches the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeOptions {
    pub fee: Percent,
    pub recipient: Address,
}

/// Signed permit for the input token, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermitOptions {
    Standard {
        v: u8,
        r: String,
        s: String,
        #[serde(serialize_with = "serialize_decimal")]
        amount: BigUint,
        deadline: u64,
    },
    Allowed {
        v: u8,
        r: String,
        s: String,
        #[serde(serialize_with = "serialize_decimal")]
        nonce: BigUint,
        expiry: u64,
    },
}

/// Checked by the router before any operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Unix timestamp after which the call reverts.
    Deadline(u64),
    /// Hex hash the previous block must have.
    PreviousBlockhash(String),
}

/// One router call, described by method and typed parameters.
///
/// An `amount_in` of zero on a swap means the router spends whatever
/// balance of `token_in` it holds at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Operation {
    SelfPermit {
        token: Address,
        permit: PermitOptions,
    },
    ExactInputSingle {
        token_in: Address,
        token_out: Address,
        /// `None` for constant-product pools.
        fee: Option<FeeAmount>,
        recipient: Address,
        #[serde(serialize_with = "serialize_decimal")]
        amount_in: BigUint,
        #[serde(serialize_with = "serialize_decimal")]
        amount_out_minimum: BigUint,
    },
    ExactOutputSingle {
        token_in: Address,
        token_out: Address,
        fee: Option<FeeAmount>,
        recipient: Address,
        #[serde(serialize_with = "serialize_decimal")]
        amount_out: BigUint,
        #[serde(serialize_with = "serialize_decimal")]
        amount_in_maximum: BigUint,
    },
    ExactInput {
        path: EncodedPath,
        recipient: Address,
        #[serde(serialize_with = "serialize_decimal")]
        amount_in: BigUint,
        #[serde(serialize_with = "serialize_decimal")]
        amount_out_minimum: BigUint,
    },
    /// `path` runs from output to input.
    ExactOutput {
        path: EncodedPath,
        recipient: Address,
        #[serde(serialize_with = "serialize_decimal")]
        amount_out: BigUint,
        #[serde(serialize_with = "serialize_decimal")]
        amount_in_maximum: BigUint,
    },
    UnwrapNative {
        #[serde(serialize_with = "serialize_decimal")]
        amount_minimum: BigUint,
        recipient: Address,
        fee: Option<FeeOptions>,
    },
    SweepToken {
        token: Address,
        #[serde(serialize_with = "serialize_decimal")]
        amount_minimum: BigUint,
        recipient: Address,
        fee: Option<FeeOptions>,
    },
    RefundNative,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Operation::SelfPermit { .. } => "selfPermit",
            Operation::ExactInputSingle { .. } => "exactInputSingle",
            Operation::ExactOutputSingle { .. } => "exactOutputSingle",
            Operation::ExactInput { .. } => "exactInput",
            Operation::ExactOutput { .. } => "exactOutput",
            Operation::UnwrapNative { .. } => "unwrapNative",
            Operation::SweepToken { .. } => "sweepToken",
            Operation::RefundNative => "refundNative",
        }
    }

    pub fn is_swap(&self) -> bool {
        matches!(
            self,
            Operation::ExactInputSingle { .. }
                | Operation::ExactOutputSingle { .. }
                | Operation::ExactInput { .. }
                | Operation::ExactOutput { .. }
        )
    }

    pub fn recipient(&self) -> Option<Address> {
        match self {
            Operation::ExactInputSingle { recipient, .. }
            | Operation::ExactOutputSingle { recipient, .. }
            | Operation::ExactInput { recipient, .. }
            | Operation::ExactOutput { recipient, .. }
            | Operation::UnwrapNative { recipient, .. }
            | Operation::SweepToken { recipient, .. } => Some(*recipient),
            Operation::SelfPermit { .. } | Operation::RefundNative => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ExactInput { path, .. } | Operation::ExactOutput { path, .. } => {
                write!(f, "{}({})", self.method(), path)
            }
            _ => write!(f, "{}", self.method()),
        }
    }
}

/// Ordered operations produced by [`SwapRouter`](crate::transaction::SwapRouter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    operations: Vec<Operation>,
    validation: Option<Validation>,
}

impl ExecutionPlan {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub(crate) fn set_validation(&mut self, validation: Option<Validation>) {
        self.validation = validation;
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.operations.iter().map(Operation::method).collect()
    }
}
