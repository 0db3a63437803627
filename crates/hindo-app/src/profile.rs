use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use hindo_config::Config;

/// Picked up from the working directory when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Resolve the run configuration: config file (or defaults), then environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            tracing::debug!("No config file, using defaults");
            Config::default()
        }
    };

    config.apply_env();
    Ok(config)
}

pub fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}
