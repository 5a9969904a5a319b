//! Simulator configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tangle_types::ProtocolParams;
use tangle_utils::LogFormat;

use crate::error::SimError;
use crate::scenario::Scenario;

/// Configuration for one simulator run.
///
/// Can be loaded from a TOML file via [`SimConfig::from_toml_file`]; CLI
/// flags override whatever the file sets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Faulty validators tolerated; sets validator count and quorum.
    #[serde(default = "default_fault_tolerance")]
    pub byzantine_fault_tolerance: usize,

    /// Fixture to run.
    #[serde(default)]
    pub scenario: Scenario,

    /// Seed for graph growth. Equal seeds give equal graphs.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Run each round's validators on the rayon pool.
    #[serde(default)]
    pub parallel: bool,

    /// Where to write the Graphviz rendering, if anywhere.
    #[serde(default = "default_dot_output")]
    pub dot_output: Option<PathBuf>,

    /// Where to write the JSON run report, if anywhere.
    #[serde(default)]
    pub report_output: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_fault_tolerance() -> usize {
    ProtocolParams::default().byzantine_fault_tolerance
}

fn default_seed() -> u64 {
    1
}

fn default_dot_output() -> Option<PathBuf> {
    Some(PathBuf::from("g.dot"))
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SimConfig {
    pub fn params(&self) -> ProtocolParams {
        ProtocolParams::new(self.byzantine_fault_tolerance)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.params().is_supported() {
            return Err(SimError::Config(format!(
                "byzantine_fault_tolerance {} exceeds the maximum of {}",
                self.byzantine_fault_tolerance,
                ProtocolParams::MAX_FAULT_TOLERANCE
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            byzantine_fault_tolerance: default_fault_tolerance(),
            scenario: Scenario::default(),
            seed: default_seed(),
            parallel: false,
            dot_output: default_dot_output(),
            report_output: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
