//! Asset parameter registry.
//!
//! `AssetParam` entries gate which denominations `SwapEngine` will accept
//! and bound their per-swap amounts, fees, and supply ceilings. The
//! registry is built up programmatically (`Params::register`) or imported
//! in bulk from a `config::AssetParamsConfig` at genesis; both paths run
//! the same validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SwapError, SwapResult};

/// A denomination identifier, e.g. `"bnb"`, `"btc"`.
pub type Denom = String;

/// Upper bound on `swapTimeSpan`, in minutes: 3 days.
pub const MAX_SWAP_TIME_SPAN_MINUTES: u64 = 4320;

/// Per-denom supply ceiling configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyLimit {
    /// Hard ceiling on `currentSupply + incomingSupply`.
    pub limit: u64,
    /// Whether the rolling time-windowed ceiling applies at all.
    pub time_limited: bool,
    /// Window length in seconds (meaningless if `!time_limited`).
    pub time_period: u64,
    /// Ceiling on `timeLimitedCurrentSupply + incomingSupply` within the
    /// active window. Must be `<= limit`.
    pub time_based_limit: u64,
}

/// Governance-controlled parameters for one swappable asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetParam {
    pub denom: Denom,
    /// Informational coin identifier from the other chain; not validated
    /// beyond being present.
    pub coin_id: u64,
    pub active: bool,
    /// The off-chain counterparty account. Every swap in this denom must
    /// have the deputy as exactly one of sender/recipient.
    pub deputy_address: String,
    /// Non-negative fee charged implicitly on outgoing swaps.
    pub fixed_fee: u64,
    pub min_swap_amount: u64,
    pub max_swap_amount: u64,
    pub supply_limit: SupplyLimit,
    /// Maximum `swapTimeSpan` in minutes; the minimum is always 1.
    pub swap_time_span_min: u64,
}

impl AssetParam {
    fn validate(&self) -> SwapResult<()> {
        if !is_valid_denom(&self.denom) {
            return Err(SwapError::InvalidAmount {
                reason: format!("denom {:?} does not match [a-zA-Z][a-zA-Z0-9/]{{2,127}}", self.denom),
            });
        }
        if self.min_swap_amount == 0 || self.max_swap_amount == 0 {
            return Err(SwapError::InvalidAmount {
                reason: format!("{}: min/max swap amount must be positive", self.denom),
            });
        }
        if self.min_swap_amount > self.max_swap_amount {
            return Err(SwapError::InvalidAmount {
                reason: format!(
                    "{}: min_swap_amount {} > max_swap_amount {}",
                    self.denom, self.min_swap_amount, self.max_swap_amount
                ),
            });
        }
        if self.supply_limit.time_based_limit > self.supply_limit.limit {
            return Err(SwapError::InvalidAmount {
                reason: format!(
                    "{}: time_based_limit {} exceeds limit {}",
                    self.denom, self.supply_limit.time_based_limit, self.supply_limit.limit
                ),
            });
        }
        if self.deputy_address.trim().is_empty() {
            return Err(SwapError::InvalidAmount {
                reason: format!("{}: deputy_address must not be empty", self.denom),
            });
        }
        if self.swap_time_span_min == 0 || self.swap_time_span_min > MAX_SWAP_TIME_SPAN_MINUTES {
            return Err(SwapError::InvalidTimeSpan {
                reason: format!(
                    "{}: swap_time_span_min {} outside [1, {}]",
                    self.denom, self.swap_time_span_min, MAX_SWAP_TIME_SPAN_MINUTES
                ),
            });
        }
        Ok(())
    }
}

fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let rest: Vec<char> = chars.collect();
    if rest.len() < 2 || rest.len() > 127 {
        return false;
    }
    rest.iter().all(|c| c.is_ascii_alphanumeric() || *c == '/')
}

/// In-memory registry of `AssetParam`s, keyed by denom.
#[derive(Debug, Default)]
pub struct Params {
    assets: HashMap<Denom, AssetParam>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces an asset's parameters after validating them.
    pub fn register(&mut self, param: AssetParam) -> SwapResult<()> {
        param.validate()?;
        self.assets.insert(param.denom.clone(), param);
        Ok(())
    }

    pub fn get(&self, denom: &str) -> Option<&AssetParam> {
        self.assets.get(denom)
    }

    pub fn get_by_coin_id(&self, coin_id: u64) -> Option<&AssetParam> {
        self.assets.values().find(|p| p.coin_id == coin_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetParam> {
        self.assets.values()
    }

    /// Returns the asset's params, failing if unknown or deactivated.
    pub fn require_active(&self, denom: &str) -> SwapResult<&AssetParam> {
        let param = self.assets.get(denom).ok_or_else(|| SwapError::AssetNotSupported {
            denom: denom.to_string(),
        })?;
        if !param.active {
            return Err(SwapError::AssetNotActive {
                denom: denom.to_string(),
            });
        }
        Ok(param)
    }

    /// Validates a requested amount against `[min, max]` for the denom.
    pub fn check_amount(&self, denom: &str, amount: u64) -> SwapResult<()> {
        let param = self.require_active(denom)?;
        if amount < param.min_swap_amount || amount > param.max_swap_amount {
            return Err(SwapError::InvalidAmount {
                reason: format!(
                    "{} amount {} outside [{}, {}]",
                    denom, amount, param.min_swap_amount, param.max_swap_amount
                ),
            });
        }
        Ok(())
    }

    /// Validates a requested `swapTimeSpan` (minutes) for the denom: must be
    /// in `[1, swap_time_span_min]` per `spec.md` §4.5 step 7.
    pub fn check_time_span(&self, denom: &str, span_minutes: u64) -> SwapResult<()> {
        let param = self.require_active(denom)?;
        if span_minutes < 1 || span_minutes > param.swap_time_span_min {
            return Err(SwapError::InvalidTimeSpan {
                reason: format!(
                    "{} time span {} outside [1, {}]",
                    denom, span_minutes, param.swap_time_span_min
                ),
            });
        }
        Ok(())
    }
}
