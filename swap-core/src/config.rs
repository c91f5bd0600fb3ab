//! TOML-loadable asset parameter configuration.
//!
//! Mirrors `params::AssetParam` field-for-field so a genesis or deployment
//! config file can be deserialized straight into the registry without a
//! bespoke conversion layer; the conversion that exists (`into_params`)
//! just runs the same validation `Params::register` would.

use serde::{Deserialize, Serialize};

use crate::error::SwapResult;
use crate::params::{AssetParam, Params};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetParamsConfig {
    pub assets: Vec<AssetParam>,
}

impl AssetParamsConfig {
    pub fn from_toml_str(contents: &str) -> SwapResult<Self> {
        toml::from_str(contents).map_err(|e| crate::error::SwapError::Storage(format!("config parse: {e}")))
    }

    /// Builds a `Params` registry from this config, validating every entry
    /// exactly as `Params::register` would for a programmatic call.
    pub fn into_params(self) -> SwapResult<Params> {
        let mut params = Params::new();
        for asset in self.assets {
            params.register(asset)?;
        }
        Ok(params)
    }
}
