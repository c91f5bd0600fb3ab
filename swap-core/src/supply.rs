//! Peg-accounting supply ledger.
//!
//! Tracks, per denom, how much value is pegged in via incoming swaps and
//! pegged out via outgoing swaps, plus the running `current` balance that
//! actually backs claims, and the tumbling time-window counter used by
//! rate-limited assets. All counters are `u64`; every decrement is checked
//! and underflow is a programmer error — raised via `error::fatal` rather
//! than returned as a `Result` (per `spec.md` §7's fatal classification).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{fatal, SwapError, SwapResult};
use crate::params::{Denom, Params};

/// Running peg-accounting counters for one denom.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetSupply {
    pub incoming_supply: u64,
    pub outgoing_supply: u64,
    pub current_supply: u64,
    /// Fraction of `current_supply` accumulated in the active rolling
    /// window; only meaningful if the asset is `time_limited`.
    pub time_limited_current_supply: u64,
    /// Seconds elapsed in the current window.
    pub time_elapsed: u64,
}

/// Per-denom `AssetSupply` store plus the counter operations from
/// `spec.md` §4.3.
#[derive(Debug, Default)]
pub struct SupplyLedger {
    supplies: HashMap<Denom, AssetSupply>,
}

impl SupplyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, denom: &str) -> AssetSupply {
        self.supplies.get(denom).cloned().unwrap_or_default()
    }

    /// Seeds a denom's counters directly — used by genesis import, which
    /// restores previously-committed totals rather than deriving them
    /// through the checked operations below.
    pub fn set(&mut self, denom: &str, supply: AssetSupply) {
        self.supplies.insert(denom.to_string(), supply);
    }

    fn entry(&mut self, denom: &str) -> &mut AssetSupply {
        self.supplies.entry(denom.to_string()).or_default()
    }

    /// `IncInc(coin)` — for a new inbound swap. Fails `ExceedsSupplyLimit`
    /// if `currentSupply + incomingSupply + coin > limit`, or (when
    /// time-limited) if `timeLimitedCurrentSupply + incomingSupply + coin >
    /// timeBasedLimit`.
    pub fn inc_inc(&mut self, params: &Params, denom: &str, amount: u64) -> SwapResult<()> {
        let param = params.require_active(denom)?;
        let supply = self.get(denom);

        let projected = supply
            .current_supply
            .checked_add(supply.incoming_supply)
            .and_then(|v| v.checked_add(amount));
        let over_limit = match projected {
            Some(v) => v > param.supply_limit.limit,
            None => true,
        };
        if over_limit {
            return Err(SwapError::ExceedsSupplyLimit {
                denom: denom.to_string(),
                current: supply.current_supply,
                incoming: supply.incoming_supply,
                amount,
                limit: param.supply_limit.limit,
            });
        }

        if param.supply_limit.time_limited {
            let projected_window = supply
                .time_limited_current_supply
                .checked_add(supply.incoming_supply)
                .and_then(|v| v.checked_add(amount));
            let over_window = match projected_window {
                Some(v) => v > param.supply_limit.time_based_limit,
                None => true,
            };
            if over_window {
                return Err(SwapError::ExceedsSupplyLimit {
                    denom: denom.to_string(),
                    current: supply.time_limited_current_supply,
                    incoming: supply.incoming_supply,
                    amount,
                    limit: param.supply_limit.time_based_limit,
                });
            }
        }

        self.entry(denom).incoming_supply += amount;
        Ok(())
    }

    /// `IncOut(coin)` — for a new outbound swap. Fails
    /// `ExceedsAvailableSupply` if `outgoingSupply + coin > currentSupply`.
    pub fn inc_out(&mut self, denom: &str, amount: u64) -> SwapResult<()> {
        let supply = self.get(denom);
        let projected = supply.outgoing_supply.checked_add(amount);
        let over = match projected {
            Some(v) => v > supply.current_supply,
            None => true,
        };
        if over {
            return Err(SwapError::ExceedsAvailableSupply {
                denom: denom.to_string(),
                outgoing: supply.outgoing_supply,
                amount,
                current: supply.current_supply,
            });
        }
        self.entry(denom).outgoing_supply += amount;
        Ok(())
    }

    /// `DecInc(coin)` — monotone reversal of `inc_inc`; underflow is fatal.
    pub fn dec_inc(&mut self, denom: &str, amount: u64) {
        let entry = self.entry(denom);
        entry.incoming_supply = entry
            .incoming_supply
            .checked_sub(amount)
            .unwrap_or_else(|| fatal(format!("incoming_supply underflow for {denom}")));
    }

    /// `DecOut(coin)` — monotone reversal of `inc_out`; underflow is fatal.
    pub fn dec_out(&mut self, denom: &str, amount: u64) {
        let entry = self.entry(denom);
        entry.outgoing_supply = entry
            .outgoing_supply
            .checked_sub(amount)
            .unwrap_or_else(|| fatal(format!("outgoing_supply underflow for {denom}")));
    }

    /// `IncCurrent(coin)` — on inbound claim: bumps `currentSupply`, and
    /// (when time-limited) `timeLimitedCurrentSupply`.
    pub fn inc_current(&mut self, params: &Params, denom: &str, amount: u64) {
        let time_limited = params.get(denom).map(|p| p.supply_limit.time_limited).unwrap_or(false);
        let entry = self.entry(denom);
        entry.current_supply += amount;
        if time_limited {
            entry.time_limited_current_supply += amount;
        }
    }

    /// `DecCurrent(coin)` — on outbound claim; underflow is fatal.
    pub fn dec_current(&mut self, denom: &str, amount: u64) {
        let entry = self.entry(denom);
        entry.current_supply = entry
            .current_supply
            .checked_sub(amount)
            .unwrap_or_else(|| fatal(format!("current_supply underflow for {denom}")));
    }

    /// Advances every time-limited asset's window by `delta_seconds`,
    /// tumbling (resetting `time_limited_current_supply` to zero) each time
    /// `time_elapsed` crosses `time_period`. Invoked by the Expirer once per
    /// block.
    pub fn roll_windows(&mut self, params: &Params, delta_seconds: u64) {
        for param in params.iter() {
            if !param.supply_limit.time_limited {
                continue;
            }
            let entry = self.supplies.entry(param.denom.clone()).or_default();
            entry.time_elapsed += delta_seconds;
            while param.supply_limit.time_period > 0 && entry.time_elapsed >= param.supply_limit.time_period {
                entry.time_elapsed -= param.supply_limit.time_period;
                entry.time_limited_current_supply = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AssetParam, SupplyLimit};

    fn params_with(denom: &str, limit: u64, time_based_limit: u64, time_period: u64) -> Params {
        let mut params = Params::new();
        params
            .register(AssetParam {
                denom: denom.to_string(),
                coin_id: 1,
                active: true,
                deputy_address: "bnb1deputy".into(),
                fixed_fee: 0,
                min_swap_amount: 1,
                max_swap_amount: limit,
                supply_limit: SupplyLimit {
                    limit,
                    time_limited: time_period > 0,
                    time_period,
                    time_based_limit,
                },
                swap_time_span_min: 360,
            })
            .unwrap();
        params
    }

    #[test]
    fn inc_inc_over_limit_rejected() {
        let params = params_with("bnb", 100, 100, 0);
        let mut ledger = SupplyLedger::new();
        ledger.inc_inc(&params, "bnb", 60).unwrap();
        assert!(ledger.inc_inc(&params, "bnb", 50).is_err());
        assert!(ledger.inc_inc(&params, "bnb", 40).is_ok());
    }

    #[test]
    fn inc_inc_over_time_based_limit_rejected() {
        let params = params_with("bnb", 1_000, 50, 3600);
        let mut ledger = SupplyLedger::new();
        assert!(ledger.inc_inc(&params, "bnb", 60).is_err());
        assert!(ledger.inc_inc(&params, "bnb", 50).is_ok());
    }

    #[test]
    fn claim_moves_incoming_to_current() {
        let params = params_with("bnb", 1_000, 1_000, 0);
        let mut ledger = SupplyLedger::new();
        ledger.inc_inc(&params, "bnb", 100).unwrap();
        ledger.dec_inc("bnb", 100);
        ledger.inc_current(&params, "bnb", 100);
        let supply = ledger.get("bnb");
        assert_eq!(supply.incoming_supply, 0);
        assert_eq!(supply.current_supply, 100);
    }

    #[test]
    fn outgoing_cannot_exceed_current() {
        let params = params_with("bnb", 1_000, 1_000, 0);
        let mut ledger = SupplyLedger::new();
        ledger.inc_inc(&params, "bnb", 100).unwrap();
        ledger.dec_inc("bnb", 100);
        ledger.inc_current(&params, "bnb", 100);
        assert!(ledger.inc_out("bnb", 200).is_err());
        assert!(ledger.inc_out("bnb", 50).is_ok());
    }

    #[test]
    #[should_panic(expected = "fatal invariant violation")]
    fn dec_inc_underflow_is_fatal() {
        let mut ledger = SupplyLedger::new();
        ledger.dec_inc("bnb", 1);
    }

    #[test]
    fn window_tumbles_at_boundary() {
        let params = params_with("bnb", 1_000, 100, 3600);
        let mut ledger = SupplyLedger::new();
        ledger.inc_inc(&params, "bnb", 80).unwrap();
        ledger.dec_inc("bnb", 80);
        ledger.inc_current(&params, "bnb", 80);
        assert_eq!(ledger.get("bnb").time_limited_current_supply, 80);

        ledger.roll_windows(&params, 3600);
        let supply = ledger.get("bnb");
        assert_eq!(supply.time_limited_current_supply, 0);
        assert_eq!(supply.time_elapsed, 0);
    }
}
