//! `Expirer` — the per-block sweep that rolls supply windows, flips expired
//! swaps, and garbage-collects long-closed ones.
//!
//! Runs in three passes (`spec.md` §4.6), each collecting its target IDs
//! before mutating anything, per the concurrency model in §5: "mutation
//! during iteration must stage changes".

use tracing::info;

use crate::engine::RETENTION_BLOCKS;
use crate::error::SwapResult;
use crate::events::{self, EventSink};
use crate::params::Params;
use crate::store::SwapStore;
use crate::supply::SupplyLedger;
use crate::swap::SwapStatus;

pub struct Expirer;

impl Expirer {
    /// Runs one block's sweep. `previous_block_time` is the block time the
    /// host observed on the prior tick (used only for the window-roll
    /// delta); `0` on genesis is harmless since the roll is a no-op for
    /// `delta == 0`.
    pub fn tick<S: EventSink>(
        params: &Params,
        supply: &mut SupplyLedger,
        store: &SwapStore,
        events: &mut S,
        block_time: u64,
        block_height: u64,
        previous_block_time: u64,
    ) -> SwapResult<()> {
        let delta = block_time.saturating_sub(previous_block_time);
        supply.roll_windows(params, delta);

        let due = store.iterate_by_expiry_up_to(block_time)?;
        let mut expired_ids = Vec::new();
        for swap_id in due {
            let Some(mut swap) = store.get(&swap_id)? else {
                // Already gone (deleted by a prior GC pass racing this
                // sweep); the store tolerates this per spec.md §4.7.
                continue;
            };
            if swap.status != SwapStatus::Open {
                continue;
            }
            swap.status = SwapStatus::Expired;
            store.put(&swap)?;
            store.remove_by_expiry(swap.expire_timestamp, &swap_id)?;
            crate::metrics::SWAPS_EXPIRED_TOTAL.with_label_values(&[&swap.denom]).inc();
            expired_ids.push(hex::encode(swap_id));
        }
        if !expired_ids.is_empty() {
            info!(count = expired_ids.len(), block_height, "expired atomic swaps");
            events.emit(events::swaps_expired(&expired_ids, block_height));
        }

        let gc_due = store.iterate_gc_up_to(block_height)?;
        for swap_id in gc_due {
            let Some(swap) = store.get(&swap_id)? else {
                continue;
            };
            store.delete(&swap_id)?;
            store.remove_gc(swap.closed_block + RETENTION_BLOCKS, &swap_id)?;
        }

        Ok(())
    }
}
