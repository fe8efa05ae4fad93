//! CLI configuration, loadable from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration for `eo-filter`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Adapter TOML used instead of the built-in Vivado synthesis adapter.
    #[serde(default)]
    pub adapter: Option<PathBuf>,
    /// Adapter TOML used instead of the built-in implementation adapter.
    #[serde(default)]
    pub implementation_adapter: Option<PathBuf>,
    /// Emit diagnostics as JSON instead of plain text.
    #[serde(default)]
    pub json_logs: bool,
    /// Tags for `--influxdb` output.
    #[serde(default)]
    pub influx: InfluxConfig,
}

/// InfluxDB line-protocol settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxConfig {
    #[serde(default = "default_measurement_prefix")]
    pub measurement_prefix: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_design")]
    pub design: String,
}

fn default_measurement_prefix() -> String {
    "vivado_synthesis".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_design() -> String {
    "unknown".to_string()
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            measurement_prefix: default_measurement_prefix(),
            branch: default_branch(),
            design: default_design(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
