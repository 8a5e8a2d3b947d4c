//! CLI command implementations

pub mod rates;
pub mod recurrence;
pub mod verify;

use anyhow::{Context, Result};
use cryptomus_lib::{ClientConfig, Cryptomus, ReqwestTransport};

/// Load configuration from the environment, applying the `--base-url` override
pub fn load_config(base_url: Option<&str>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Build a client over the default HTTP transport
pub fn build_client(base_url: Option<&str>) -> Result<Cryptomus<ReqwestTransport>> {
    let config = load_config(base_url)?;
    Cryptomus::new(config).context("Failed to build Cryptomus client")
}
