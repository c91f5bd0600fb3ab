//! On-chain core of a BEP3-style Hashed Timelock Contract atomic-swap
//! module: swap state machine, indexed storage, and asset-supply peg
//! accounting. See `README`-level documentation in each module for the
//! piece it owns; dependency order (leaves first) is
//! `crypto` → `params` → `supply` → `swap`/`store` → `expirer`/`engine`.

pub mod collaborators;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod events;
pub mod expirer;
pub mod genesis;
pub mod metrics;
pub mod params;
pub mod store;
pub mod supply;
pub mod swap;

pub use engine::{ClaimResult, CreateRequest, CreateResult, RefundResult, SwapEngine};
pub use error::{SwapError, SwapResult};
pub use expirer::Expirer;
pub use genesis::{Genesis, GenesisState};
pub use params::{AssetParam, Denom, Params, SupplyLimit};
pub use store::SwapStore;
pub use supply::{AssetSupply, SupplyLedger};
pub use swap::{AtomicSwap, Direction, SwapStatus};
