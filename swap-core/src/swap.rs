//! Core HTLC data model: `AtomicSwap`, its `Direction`, and `SwapStatus`.
//!
//! A swap's identity (`swapID`) is derived, never stored as its own field —
//! see `crypto::calc_swap_id`. Storing it separately would let a record and
//! its ID drift out of sync under a buggy write path; deriving it on demand
//! makes that impossible.

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};

use crate::crypto::calc_swap_id;
use crate::error::{SwapError, SwapResult};

/// Bech32 human-readable prefix addresses are encoded with at rest.
///
/// Swap records carry addresses as strings for cross-format stability;
/// swap-ID derivation uses the 20-byte binary form underneath (`spec.md`
/// §9) — these two helpers are the single place that boundary is crossed.
pub const ADDRESS_HRP: &str = "bnb";

pub fn encode_address(addr: &[u8; 20]) -> String {
    bech32::encode(ADDRESS_HRP, addr.to_base32(), Variant::Bech32).expect("fixed-width address always encodes")
}

pub fn decode_address(s: &str) -> SwapResult<[u8; 20]> {
    let (hrp, data, _variant) = bech32::decode(s).map_err(|e| SwapError::InvalidAmount {
        reason: format!("malformed address {s:?}: {e}"),
    })?;
    if hrp != ADDRESS_HRP {
        return Err(SwapError::InvalidAmount {
            reason: format!("address {s:?} has unexpected prefix {hrp:?}"),
        });
    }
    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| SwapError::InvalidAmount {
        reason: format!("malformed address {s:?}: {e}"),
    })?;
    if bytes.len() != 20 {
        return Err(SwapError::InvalidAmount {
            reason: format!("address {s:?} decodes to {} bytes, expected 20", bytes.len()),
        });
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Which side of the peg this swap moves value across.
///
/// Inferred from which of sender/recipient is the deputy — there is no
/// client-supplied direction field that could disagree with the peg
/// accounting (`spec.md` §9).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Deputy is the sender: value is pegged in, minted on claim.
    Incoming,
    /// Deputy is the recipient: value is pegged out, burned on claim.
    Outgoing,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// `AtomicSwap::status` lifecycle. See the state diagram in `spec.md` §4.5:
/// `Open` → `Completed` via Claim, `Open` → `Expired` via the Expirer tick,
/// `Expired` → `Completed` via Refund. `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwapStatus {
    Open,
    Completed,
    Expired,
}

/// One HTLC instance.
///
/// `amount` is a single coin (denom, quantity) — the spec requires exactly
/// one coin per swap, enforced by `SwapEngine::create` before this type is
/// ever constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtomicSwap {
    pub denom: String,
    pub amount: u64,
    pub random_number_hash: [u8; 32],
    pub expire_timestamp: u64,
    /// Claimant-supplied nonce, *not* block time — see `crypto` module docs.
    pub timestamp: u64,
    /// 20-byte on-chain address.
    pub sender: [u8; 20],
    /// 20-byte on-chain address.
    pub recipient: [u8; 20],
    /// Opaque other-chain address string, ≤ 64 bytes.
    pub sender_other_chain: String,
    /// Opaque other-chain address string, ≤ 64 bytes.
    pub recipient_other_chain: String,
    /// Block height at which the swap was closed (Completed); `0` while
    /// still `Open` or `Expired`.
    pub closed_block: u64,
    pub status: SwapStatus,
    pub cross_chain: bool,
    pub direction: Direction,
}

impl AtomicSwap {
    /// Derives this swap's 32-byte identity:
    /// `sha256(randomNumberHash ‖ senderAddrBytes ‖ senderOtherChain)`.
    pub fn swap_id(&self) -> [u8; 32] {
        calc_swap_id(&self.random_number_hash, &self.sender, &self.sender_other_chain)
    }
}
