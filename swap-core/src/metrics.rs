//! Prometheus metrics for the swap engine and expirer.
//!
//! `spec.md`'s Non-goals exclude fee markets and governance, not
//! observability — this mirrors `supernova-core/src/atomic_swap/metrics.rs`'s
//! `prometheus` + `lazy_static` convention so operators get the same class
//! of dashboard the teacher's own atomic-swap module exposes.

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge_vec, CounterVec, GaugeVec};

lazy_static! {
    pub static ref SWAPS_CREATED_TOTAL: CounterVec = register_counter_vec!(
        "swap_core_swaps_created_total",
        "Total swaps created, by direction",
        &["direction"]
    )
    .expect("metric registration is infallible at process start");
    pub static ref SWAPS_CLAIMED_TOTAL: CounterVec = register_counter_vec!(
        "swap_core_swaps_claimed_total",
        "Total swaps claimed, by direction",
        &["direction"]
    )
    .expect("metric registration is infallible at process start");
    pub static ref SWAPS_REFUNDED_TOTAL: CounterVec = register_counter_vec!(
        "swap_core_swaps_refunded_total",
        "Total swaps refunded, by direction",
        &["direction"]
    )
    .expect("metric registration is infallible at process start");
    pub static ref SWAPS_EXPIRED_TOTAL: CounterVec = register_counter_vec!(
        "swap_core_swaps_expired_total",
        "Total swaps flipped to Expired by the expirer",
        &["denom"]
    )
    .expect("metric registration is infallible at process start");
    pub static ref OPEN_SWAPS: GaugeVec =
        register_gauge_vec!("swap_core_open_swaps", "Currently open swaps, by denom", &["denom"])
            .expect("metric registration is infallible at process start");
    pub static ref SUPPLY_CURRENT: GaugeVec =
        register_gauge_vec!("swap_core_supply_current", "Current pegged supply, by denom", &["denom"])
            .expect("metric registration is infallible at process start");
}
