//! Error taxonomy for the swap core.
//!
//! Every failure mode a handler can hit is a distinct variant so callers can
//! match on it instead of parsing strings. Supply-counter underflow and
//! genesis corruption are programmer errors per the spec's classification
//! and are raised via `fatal` rather than returned as a `Result`.

use thiserror::Error;

/// Result type alias for swap-core operations.
pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("asset not supported: {denom}")]
    AssetNotSupported { denom: String },

    #[error("asset not active: {denom}")]
    AssetNotActive { denom: String },

    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("insufficient amount: {reason}")]
    InsufficientAmount { reason: String },

    #[error("invalid timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("invalid time span: {reason}")]
    InvalidTimeSpan { reason: String },

    #[error("invalid swap account: sender and recipient must include exactly one deputy side")]
    InvalidSwapAccount,

    #[error("swap already exists: {swap_id}")]
    SwapAlreadyExists { swap_id: String },

    #[error("swap not found: {swap_id}")]
    SwapNotFound { swap_id: String },

    #[error("swap not claimable in current state: {swap_id}")]
    SwapNotClaimable { swap_id: String },

    #[error("swap not refundable in current state: {swap_id}")]
    SwapNotRefundable { swap_id: String },

    #[error("invalid claim secret for swap: {swap_id}")]
    InvalidClaimSecret { swap_id: String },

    #[error("exceeds supply limit for {denom}: current {current} + incoming {incoming} + amount {amount} > limit {limit}")]
    ExceedsSupplyLimit {
        denom: String,
        current: u64,
        incoming: u64,
        amount: u64,
        limit: u64,
    },

    #[error("exceeds available supply for {denom}: outgoing {outgoing} + amount {amount} > current {current}")]
    ExceedsAvailableSupply {
        denom: String,
        outgoing: u64,
        amount: u64,
        current: u64,
    },

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("bank error: {0}")]
    Bank(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sled::Error> for SwapError {
    fn from(e: sled::Error) -> Self {
        SwapError::Storage(e.to_string())
    }
}

impl From<bincode::Error> for SwapError {
    fn from(e: bincode::Error) -> Self {
        SwapError::Storage(format!("serialization: {e}"))
    }
}

/// Panics with a message tagged as a programmer-error / corrupt-state
/// condition — used for supply-counter underflow and genesis validation
/// failures, which `spec.md` §7 classifies as fatal rather than recoverable.
#[track_caller]
pub fn fatal(msg: impl std::fmt::Display) -> ! {
    panic!("swap-core: fatal invariant violation: {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_distinct_variants() {
        let a = SwapError::SwapNotFound {
            swap_id: "abc".into(),
        };
        let b = SwapError::SwapNotClaimable {
            swap_id: "abc".into(),
        };
        assert_ne!(a, b);
        assert!(a.to_string().contains("not found"));
    }

    #[test]
    #[should_panic(expected = "fatal invariant violation")]
    fn fatal_panics() {
        fatal("underflow");
    }
}
