use dns_intercept_domain::{CliOverrides, Config};
use tracing::info;

/// Load and validate configuration; any error here is fatal before binding.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;

    if let Some(path) = path {
        info!(path, "Configuration loaded from file");
    }

    Ok(config)
}
