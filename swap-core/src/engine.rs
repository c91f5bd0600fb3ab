//! `SwapEngine` — orchestrates Create/Claim/Refund against Params,
//! SupplyLedger, SwapStore, and the Bank/Accounts collaborators.
//!
//! Every handler validates its preconditions fully before mutating
//! anything: `spec.md` §4.7 requires a failed handler to leave no state
//! modified, and since this core has no transactional wrapper of its own,
//! that guarantee has to come from ordering — all fallible checks run
//! first, then the (infallible, by construction) mutations run in one
//! block.

use tracing::{info, warn};

use crate::collaborators::{is_module_reserved, Accounts, Bank, MODULE_NAME};
use crate::error::{SwapError, SwapResult};
use crate::events::{self, EventSink};
use crate::params::Params;
use crate::store::SwapStore;
use crate::supply::SupplyLedger;
use crate::swap::{encode_address, AtomicSwap, Direction, SwapStatus};

/// `timestamp` lower bound relative to block time: 15 minutes, in seconds.
const TIMESTAMP_LOWER_BOUND_SECS: i64 = 15 * 60;
/// `timestamp` upper bound relative to block time: 30 minutes, in seconds
/// (exclusive).
const TIMESTAMP_UPPER_BOUND_SECS: i64 = 30 * 60;
/// GC retention window, in block heights (~1 week at ~1s blocks).
pub const RETENTION_BLOCKS: u64 = 7 * 24 * 60 * 60;

/// Parameters a `Create` request supplies.
pub struct CreateRequest {
    pub random_number_hash: [u8; 32],
    pub timestamp: u64,
    /// Requested lock duration, in minutes.
    pub time_span_minutes: u64,
    pub sender: [u8; 20],
    pub recipient: [u8; 20],
    pub sender_other_chain: String,
    pub recipient_other_chain: String,
    pub denom: String,
    pub amount: u64,
    pub cross_chain: bool,
}

/// Result handed back to the caller: swap ID and hash-lock, per the
/// richer Result shape `spec.md` §9 specifies as the one to implement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    pub swap_id: [u8; 32],
    pub random_number_hash: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    pub swap_id: [u8; 32],
    pub random_number_hash: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundResult {
    pub swap_id: [u8; 32],
    pub random_number_hash: [u8; 32],
}

/// Orchestrates the three request handlers. Holds no state of its own —
/// every mutable collaborator is borrowed for the duration of one call.
pub struct SwapEngine;

impl SwapEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn create<B: Bank, A: Accounts, S: EventSink>(
        params: &Params,
        supply: &mut SupplyLedger,
        store: &SwapStore,
        bank: &mut B,
        accounts: &mut A,
        events: &mut S,
        req: CreateRequest,
        block_time: u64,
    ) -> SwapResult<CreateResult> {
        // 1. Derive swapID; fail if it already exists.
        let probe = AtomicSwap {
            denom: req.denom.clone(),
            amount: req.amount,
            random_number_hash: req.random_number_hash,
            expire_timestamp: 0,
            timestamp: req.timestamp,
            sender: req.sender,
            recipient: req.recipient,
            sender_other_chain: req.sender_other_chain.clone(),
            recipient_other_chain: req.recipient_other_chain.clone(),
            closed_block: 0,
            status: SwapStatus::Open,
            cross_chain: req.cross_chain,
            direction: Direction::Incoming, // placeholder, overwritten below
        };
        let swap_id = probe.swap_id();
        if store.get(&swap_id)?.is_some() {
            return Err(SwapError::SwapAlreadyExists {
                swap_id: hex::encode(swap_id),
            });
        }

        // 2. Reject module-reserved recipients.
        if is_module_reserved(&req.recipient) {
            return Err(SwapError::Unauthorized {
                reason: "recipient is a module-reserved account".into(),
            });
        }

        // 3-4. Asset must be active; amount within bounds.
        let param = params.require_active(&req.denom)?;
        params.check_amount(&req.denom, req.amount)?;

        // 5. timestamp in [blockTime - 15min, blockTime + 30min).
        let block_time_i = block_time as i64;
        let ts = req.timestamp as i64;
        if ts < block_time_i - TIMESTAMP_LOWER_BOUND_SECS || ts >= block_time_i + TIMESTAMP_UPPER_BOUND_SECS {
            return Err(SwapError::InvalidTimestamp {
                reason: format!("timestamp {} outside permitted window around block time {}", req.timestamp, block_time),
            });
        }

        // 6. Determine direction.
        let deputy = crate::swap::decode_address(&param.deputy_address)?;
        let direction = if req.sender == deputy && req.recipient != deputy {
            Direction::Incoming
        } else if req.sender != deputy && req.recipient == deputy {
            Direction::Outgoing
        } else {
            return Err(SwapError::InvalidSwapAccount);
        };

        // 7. Direction-specific validation, staged before any mutation.
        if direction == Direction::Outgoing {
            params.check_time_span(&req.denom, req.time_span_minutes)?;
            let min_required = param.fixed_fee.checked_add(param.min_swap_amount).ok_or_else(|| SwapError::InvalidAmount {
                reason: "fixed_fee + min_swap_amount overflows".into(),
            })?;
            if req.amount <= min_required {
                return Err(SwapError::InsufficientAmount {
                    reason: format!("amount {} must exceed fixed_fee + min_swap_amount ({})", req.amount, min_required),
                });
            }
        } else {
            params.check_time_span(&req.denom, req.time_span_minutes)?;
        }

        // Validation complete — commit.
        match direction {
            Direction::Incoming => {
                if !accounts.exists(&req.recipient) {
                    accounts.create_with_address(&req.recipient)?;
                }
                supply.inc_inc(params, &req.denom, req.amount)?;
            }
            Direction::Outgoing => {
                supply.inc_out(&req.denom, req.amount)?;
                bank.send_from_account_to_module(&req.sender, MODULE_NAME, &req.denom, req.amount)?;
            }
        }

        let expire_timestamp = block_time + req.time_span_minutes * 60;
        let swap = AtomicSwap {
            expire_timestamp,
            direction,
            ..probe
        };
        store.put(&swap)?;
        store.insert_by_expiry(expire_timestamp, &swap_id)?;

        crate::metrics::SWAPS_CREATED_TOTAL.with_label_values(&[&direction.to_string()]).inc();
        crate::metrics::OPEN_SWAPS.with_label_values(&[&req.denom]).inc();

        info!(swap_id = %hex::encode(swap_id), %direction, denom = %req.denom, amount = req.amount, "created atomic swap");

        events.emit(events::create_atomic_swap(
            &encode_address(&swap.sender),
            &encode_address(&swap.recipient),
            &hex::encode(swap_id),
            &hex::encode(swap.random_number_hash),
            swap.timestamp,
            &swap.sender_other_chain,
            expire_timestamp,
            swap.amount,
            direction,
        ));

        Ok(CreateResult {
            swap_id,
            random_number_hash: req.random_number_hash,
        })
    }

    pub fn claim<B: Bank, S: EventSink>(
        params: &Params,
        supply: &mut SupplyLedger,
        store: &SwapStore,
        bank: &mut B,
        events: &mut S,
        swap_id: [u8; 32],
        random_number: [u8; 32],
        block_height: u64,
    ) -> SwapResult<ClaimResult> {
        let swap = store
            .get(&swap_id)?
            .ok_or_else(|| SwapError::SwapNotFound { swap_id: hex::encode(swap_id) })?;
        if swap.status != SwapStatus::Open {
            return Err(SwapError::SwapNotClaimable {
                swap_id: hex::encode(swap_id),
            });
        }

        if !crate::crypto::verify_claim(&random_number, swap.timestamp, &swap.sender, &swap.sender_other_chain, &swap_id) {
            return Err(SwapError::InvalidClaimSecret {
                swap_id: hex::encode(swap_id),
            });
        }

        match swap.direction {
            Direction::Incoming => {
                supply.dec_inc(&swap.denom, swap.amount);
                supply.inc_current(params, &swap.denom, swap.amount);
                bank.mint(MODULE_NAME, &swap.denom, swap.amount)?;
                bank.send_from_module_to_account(MODULE_NAME, &swap.recipient, &swap.denom, swap.amount)?;
            }
            Direction::Outgoing => {
                supply.dec_out(&swap.denom, swap.amount);
                supply.dec_current(&swap.denom, swap.amount);
                bank.burn(MODULE_NAME, &swap.denom, swap.amount)?;
            }
        }

        let mut closed = swap.clone();
        closed.status = SwapStatus::Completed;
        closed.closed_block = block_height;
        store.put(&closed)?;
        store.remove_by_expiry(swap.expire_timestamp, &swap_id)?;
        store.insert_gc(block_height + RETENTION_BLOCKS, &swap_id)?;

        crate::metrics::SWAPS_CLAIMED_TOTAL.with_label_values(&[&swap.direction.to_string()]).inc();
        crate::metrics::OPEN_SWAPS.with_label_values(&[&swap.denom]).dec();
        crate::metrics::SUPPLY_CURRENT
            .with_label_values(&[&swap.denom])
            .set(supply.get(&swap.denom).current_supply as f64);

        info!(swap_id = %hex::encode(swap_id), direction = %swap.direction, "claimed atomic swap");

        events.emit(events::claim_atomic_swap(
            &encode_address(&swap.sender),
            &encode_address(&swap.recipient),
            &hex::encode(swap_id),
            &hex::encode(swap.random_number_hash),
            &hex::encode(random_number),
        ));

        Ok(ClaimResult {
            swap_id,
            random_number_hash: swap.random_number_hash,
        })
    }

    pub fn refund<B: Bank, S: EventSink>(
        supply: &mut SupplyLedger,
        store: &SwapStore,
        bank: &mut B,
        events: &mut S,
        swap_id: [u8; 32],
        block_height: u64,
    ) -> SwapResult<RefundResult> {
        let swap = store
            .get(&swap_id)?
            .ok_or_else(|| SwapError::SwapNotFound { swap_id: hex::encode(swap_id) })?;
        if swap.status != SwapStatus::Expired {
            return Err(SwapError::SwapNotRefundable {
                swap_id: hex::encode(swap_id),
            });
        }

        match swap.direction {
            Direction::Incoming => {
                supply.dec_inc(&swap.denom, swap.amount);
            }
            Direction::Outgoing => {
                supply.dec_out(&swap.denom, swap.amount);
                bank.send_from_module_to_account(MODULE_NAME, &swap.sender, &swap.denom, swap.amount)?;
            }
        }

        let mut closed = swap.clone();
        closed.status = SwapStatus::Completed;
        closed.closed_block = block_height;
        store.put(&closed)?;
        store.insert_gc(block_height + RETENTION_BLOCKS, &swap_id)?;

        crate::metrics::SWAPS_REFUNDED_TOTAL.with_label_values(&[&swap.direction.to_string()]).inc();

        warn!(swap_id = %hex::encode(swap_id), direction = %swap.direction, "refunded atomic swap");

        events.emit(events::refund_atomic_swap(
            &encode_address(&swap.sender),
            &encode_address(&swap.sender),
            &hex::encode(swap_id),
            &hex::encode(swap.random_number_hash),
        ));

        Ok(RefundResult {
            swap_id,
            random_number_hash: swap.random_number_hash,
        })
    }
}
