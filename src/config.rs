use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

fn default_loops() -> usize {
    10_000
}

fn default_repeat() -> usize {
    10
}

fn default_prefix() -> String {
    "time".to_string()
}

fn default_skip_marker() -> String {
    "nodict".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Body executions per trial.
    #[serde(default = "default_loops")]
    pub loops: usize,
    /// Trials per measurement; the fastest one is kept.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

impl TimingConfig {
    /// Preset for smoke runs.
    pub fn quick() -> Self {
        Self {
            loops: 10,
            repeat: 1,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loops: default_loops(),
            repeat: default_repeat(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Case names starting with this are picked up when none are requested.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Case names containing this are not run on the baseline.
    #[serde(default = "default_skip_marker")]
    pub baseline_skip_marker: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            baseline_skip_marker: default_skip_marker(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BenchConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BenchConfig =
            serde_yaml::from_str(text).context("Failed to parse benchmark configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.timing.loops > 0, "timing.loops must be greater than zero");
        ensure!(
            self.timing.repeat > 0,
            "timing.repeat must be greater than zero"
        );
        ensure!(
            !self.discovery.baseline_skip_marker.is_empty(),
            "discovery.baseline_skip_marker must not be empty"
        );
        Ok(())
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<BenchConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        BenchConfig::from_yaml_str(&data).with_context(|| format!("Invalid config {}", path.display()))
    }
}
