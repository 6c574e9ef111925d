use std::path::{Path, PathBuf};

use crate::engine::{EngineConfig, EngineError};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Game settings as read from TOML. Every key is optional.
///
/// ```toml
/// rows = 4
/// columns = 4
/// goal = 2048
/// seed = 7
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "defaults::rows")]
    pub rows: usize,
    #[serde(default = "defaults::columns")]
    pub columns: usize,
    #[serde(default = "defaults::goal")]
    pub goal: u32,
    /// Fixed RNG seed for reproducible spawns; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            columns: defaults::columns(),
            goal: defaults::goal(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.engine()?;
        Ok(cfg)
    }

    /// Validate into engine parameters.
    pub fn engine(&self) -> Result<EngineConfig, EngineError> {
        EngineConfig::new(self.rows, self.columns, self.goal)
    }
}

/// Command-line flags shared by the binaries: an optional config file plus
/// per-key overrides that win over whatever the file says.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct Overrides {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grid rows (overrides config)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns (overrides config)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Goal tile value (overrides config)
    #[arg(long)]
    pub goal: Option<u32>,

    /// RNG seed for reproducible spawns (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Overrides {
    /// Read the config file (or take defaults) and apply the flags on top.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let base = match &self.config {
            Some(path) => Config::from_toml(path)?,
            None => Config::default(),
        };
        let cfg = self.apply(base);
        cfg.engine()?;
        Ok(cfg)
    }

    pub fn apply(&self, mut cfg: Config) -> Config {
        if let Some(rows) = self.rows {
            cfg.rows = rows;
        }
        if let Some(columns) = self.columns {
            cfg.columns = columns;
        }
        if let Some(goal) = self.goal {
            cfg.goal = goal;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        cfg
    }
}

mod defaults {
    pub fn rows() -> usize { 4 }
    pub fn columns() -> usize { 4 }
    pub fn goal() -> u32 { 2048 }
}
