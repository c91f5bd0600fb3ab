//! HTLC hash-lock and swap-ID derivation.
//!
//! Both functions are pure SHA-256 over a fixed-width concatenation of
//! their inputs — there is no length prefixing, so callers must enforce the
//! widths documented on each parameter (random=32, hash=32, address=20).

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// `sha256(random ‖ be64(timestamp))`.
///
/// `timestamp` here is the claimant-supplied nonce carried on the swap
/// record (see `swap.rs::AtomicSwap::timestamp`), *not* block time — its
/// only role is letting both chains derive the same hash from the same
/// secret.
pub fn calc_random_number_hash(random: &[u8; 32], timestamp: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(random);
    hasher.update(timestamp.to_be_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `sha256(randomNumberHash ‖ senderAddrBytes ‖ senderOtherChain_utf8)`.
///
/// Binds a swap's identity to a specific initiator: the same hash-lock
/// reused by a different sender (or a different other-chain address)
/// produces a different swap ID.
pub fn calc_swap_id(random_number_hash: &[u8; 32], sender_addr: &[u8; 20], sender_other_chain: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(random_number_hash);
    hasher.update(sender_addr);
    hasher.update(sender_other_chain.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Constant-time check that a revealed `random_number` actually hashes (with
/// `timestamp`) to `expected_hash` — used by `Claim` so secret verification
/// doesn't leak timing information about where the mismatch occurred.
pub fn verify_random_number(random_number: &[u8; 32], timestamp: u64, expected_hash: &[u8; 32]) -> bool {
    let computed = calc_random_number_hash(random_number, timestamp);
    computed.ct_eq(expected_hash).into()
}

/// Full claim-secret check from `spec.md` §4.5 step 2: recompute the
/// hash-lock from the revealed `random_number`, rederive the swap ID from
/// that hash, and compare against the swap ID the caller claimed against —
/// in one constant-time comparison, so a correct hash with a forged ID (or
/// vice versa) fails exactly like a wholesale wrong guess.
pub fn verify_claim(
    random_number: &[u8; 32],
    timestamp: u64,
    sender: &[u8; 20],
    sender_other_chain: &str,
    expected_swap_id: &[u8; 32],
) -> bool {
    let hash = calc_random_number_hash(random_number, timestamp);
    let id = calc_swap_id(&hash, sender, sender_other_chain);
    id.ct_eq(expected_swap_id).into()
}
