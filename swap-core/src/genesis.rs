//! Genesis import/export and validation.
//!
//! `spec.md` §6: genesis carries `{params, swaps, supplies,
//! previousBlockTime}`. Import re-validates everything rather than trusting
//! the serialized state, since a corrupted or hand-edited genesis file is
//! exactly the kind of input this validation exists to catch before it
//! reaches the engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SwapError, SwapResult};
use crate::params::{AssetParam, Params};
use crate::supply::{AssetSupply, SupplyLedger};
use crate::swap::{AtomicSwap, Direction, SwapStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genesis {
    pub params: Vec<AssetParam>,
    pub swaps: Vec<AtomicSwap>,
    pub supplies: HashMap<String, AssetSupply>,
    pub previous_block_time: u64,
}

/// Validated, ready-to-use state built from a `Genesis`.
pub struct GenesisState {
    pub params: Params,
    pub supply: SupplyLedger,
    pub swaps: Vec<AtomicSwap>,
    pub previous_block_time: u64,
}

impl Genesis {
    /// Validates and converts this genesis into engine-ready state.
    ///
    /// Checks, in order: every `AssetParam` registers cleanly; every
    /// supply's denom is known; `currentSupply + incomingSupply <= limit`
    /// per denom; `incomingSupply`/`outgoingSupply` match the sum of
    /// still-Open swaps of that direction; every swap individually
    /// validates.
    pub fn validate(self) -> SwapResult<GenesisState> {
        let mut params = Params::new();
        for param in self.params {
            params.register(param)?;
        }

        for swap in &self.swaps {
            validate_swap(&params, swap)?;
        }

        let mut open_incoming: HashMap<String, u64> = HashMap::new();
        let mut open_outgoing: HashMap<String, u64> = HashMap::new();
        for swap in &self.swaps {
            if swap.status != SwapStatus::Open {
                continue;
            }
            let bucket = match swap.direction {
                Direction::Incoming => &mut open_incoming,
                Direction::Outgoing => &mut open_outgoing,
            };
            *bucket.entry(swap.denom.clone()).or_insert(0) += swap.amount;
        }

        let mut supply = SupplyLedger::new();
        for (denom, asset_supply) in &self.supplies {
            let param = params.get(denom).ok_or_else(|| SwapError::AssetNotSupported { denom: denom.clone() })?;
            if asset_supply.current_supply + asset_supply.incoming_supply > param.supply_limit.limit {
                return Err(SwapError::ExceedsSupplyLimit {
                    denom: denom.clone(),
                    current: asset_supply.current_supply,
                    incoming: asset_supply.incoming_supply,
                    amount: 0,
                    limit: param.supply_limit.limit,
                });
            }
            let expected_incoming = open_incoming.get(denom).copied().unwrap_or(0);
            if asset_supply.incoming_supply != expected_incoming {
                return Err(SwapError::InvalidAmount {
                    reason: format!(
                        "{denom}: incoming_supply {} does not match sum of open incoming swaps {}",
                        asset_supply.incoming_supply, expected_incoming
                    ),
                });
            }
            let expected_outgoing = open_outgoing.get(denom).copied().unwrap_or(0);
            if asset_supply.outgoing_supply != expected_outgoing {
                return Err(SwapError::InvalidAmount {
                    reason: format!(
                        "{denom}: outgoing_supply {} does not match sum of open outgoing swaps {}",
                        asset_supply.outgoing_supply, expected_outgoing
                    ),
                });
            }
            supply.set(denom, asset_supply.clone());
        }

        Ok(GenesisState {
            params,
            supply,
            swaps: self.swaps,
            previous_block_time: self.previous_block_time,
        })
    }
}

fn validate_swap(params: &Params, swap: &AtomicSwap) -> SwapResult<()> {
    let param = params.require_active(&swap.denom)?;
    if swap.amount < param.min_swap_amount || swap.amount > param.max_swap_amount {
        return Err(SwapError::InvalidAmount {
            reason: format!("swap amount {} outside asset bounds for {}", swap.amount, swap.denom),
        });
    }
    if swap.sender_other_chain.len() > 64 || swap.recipient_other_chain.len() > 64 {
        return Err(SwapError::InvalidAmount {
            reason: "other-chain address exceeds 64 bytes".into(),
        });
    }
    if swap.status == SwapStatus::Open && swap.closed_block != 0 {
        return Err(SwapError::InvalidAmount {
            reason: "open swap must have closed_block == 0".into(),
        });
    }
    let expected_id = swap.swap_id();
    let recomputed = crate::crypto::calc_swap_id(&swap.random_number_hash, &swap.sender, &swap.sender_other_chain);
    if expected_id != recomputed {
        return Err(SwapError::InvalidAmount {
            reason: "swap id derivation mismatch".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SupplyLimit;

    fn param(denom: &str, limit: u64) -> AssetParam {
        AssetParam {
            denom: denom.to_string(),
            coin_id: 714,
            active: true,
            deputy_address: crate::swap::encode_address(&[0xdeu8; 20]),
            fixed_fee: 1_000,
            min_swap_amount: 1,
            max_swap_amount: 1_000_000_000,
            supply_limit: SupplyLimit {
                limit,
                time_limited: false,
                time_period: 0,
                time_based_limit: 0,
            },
            swap_time_span_min: 360,
        }
    }

    fn open_incoming(denom: &str, amount: u64) -> AtomicSwap {
        let random_number_hash = [0x11; 32];
        let sender = [0xde; 20];
        AtomicSwap {
            denom: denom.to_string(),
            amount,
            random_number_hash,
            expire_timestamp: 1_000,
            timestamp: 500,
            sender,
            recipient: [0x02; 20],
            sender_other_chain: "other".into(),
            recipient_other_chain: "other2".into(),
            closed_block: 0,
            status: SwapStatus::Open,
            cross_chain: true,
            direction: Direction::Incoming,
        }
    }

    #[test]
    fn accepts_consistent_genesis() {
        let swap = open_incoming("bnb", 1_000);
        let mut supplies = HashMap::new();
        supplies.insert(
            "bnb".to_string(),
            AssetSupply {
                incoming_supply: 1_000,
                outgoing_supply: 0,
                current_supply: 0,
                time_limited_current_supply: 0,
                time_elapsed: 0,
            },
        );
        let genesis = Genesis {
            params: vec![param("bnb", 1_000_000)],
            swaps: vec![swap],
            supplies,
            previous_block_time: 100,
        };
        assert!(genesis.validate().is_ok());
    }

    #[test]
    fn rejects_incoming_supply_mismatch() {
        let swap = open_incoming("bnb", 1_000);
        let mut supplies = HashMap::new();
        supplies.insert(
            "bnb".to_string(),
            AssetSupply {
                incoming_supply: 500,
                outgoing_supply: 0,
                current_supply: 0,
                time_limited_current_supply: 0,
                time_elapsed: 0,
            },
        );
        let genesis = Genesis {
            params: vec![param("bnb", 1_000_000)],
            swaps: vec![swap],
            supplies,
            previous_block_time: 100,
        };
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn rejects_unknown_denom_supply() {
        let supplies = HashMap::from([("eth".to_string(), AssetSupply::default())]);
        let genesis = Genesis {
            params: vec![param("bnb", 1_000_000)],
            swaps: vec![],
            supplies,
            previous_block_time: 0,
        };
        assert!(genesis.validate().is_err());
    }
}
