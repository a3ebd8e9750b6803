//! Configuration file support for ferro-pgx.
//!
//! # Example Configuration
//!
//! ```toml
//! [parser]
//! max_bytes = 2000000
//!
//! [analysis]
//! parallel = false
//!
//! [report]
//! patient_id_prefix = "SAMPLE_"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. An explicit `--config` path
//! 2. `.ferro-pgx.toml` in current directory
//! 3. `~/.config/ferro/pgx.toml`
//!
//! CLI flags take precedence over config file settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisOptions;
use crate::error::FerroError;
use crate::report::DEFAULT_PATIENT_ID_PREFIX;
use crate::vcf::DEFAULT_MAX_VCF_BYTES;

/// File name searched for in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".ferro-pgx.toml";

/// Parsed configuration from a `.ferro-pgx.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PgxConfig {
    /// VCF parsing settings.
    pub parser: ParserConfig,
    /// Pipeline settings.
    pub analysis: AnalysisConfig,
    /// Report settings.
    pub report: ReportConfig,
}

/// Parser section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Byte ceiling for VCF content (default: 5,000,000).
    pub max_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_VCF_BYTES,
        }
    }
}

/// Analysis section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Evaluate drugs in parallel (default: true).
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Report section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Prefix for generated patient ids (default: "PATIENT_").
    pub patient_id_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            patient_id_prefix: DEFAULT_PATIENT_ID_PREFIX.to_string(),
        }
    }
}

impl PgxConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-pgx.toml` in current directory
    /// 2. `~/.config/ferro/pgx.toml`
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load() -> Result<Option<Self>, FerroError> {
        let cwd_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if cwd_config.exists() {
            return Self::load_from_path(&cwd_config).map(Some);
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("pgx.toml");
            if home_config.exists() {
                return Self::load_from_path(&home_config).map(Some);
            }
        }

        Ok(None)
    }

    /// Load from an explicit path if given, else from the default locations,
    /// else fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, FerroError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::load()?.unwrap_or_default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, FerroError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FerroError::Config {
            msg: format!("{}: {}", path.display(), e),
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, FerroError> {
        let config: PgxConfig = toml::from_str(content)?;
        if config.parser.max_bytes == 0 {
            return Err(FerroError::Config {
                msg: "parser.max_bytes must be greater than zero".to_string(),
            });
        }
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, FerroError> {
        toml::to_string_pretty(self).map_err(|e| FerroError::Config { msg: e.to_string() })
    }

    /// Convert this config to analysis options.
    pub fn to_analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::new()
            .with_max_bytes(self.parser.max_bytes)
            .with_parallel(self.analysis.parallel)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        cli_max_bytes: Option<usize>,
        cli_no_parallel: bool,
    ) -> AnalysisOptions {
        let mut options = self.to_analysis_options();
        if let Some(max_bytes) = cli_max_bytes {
            options.max_bytes = max_bytes;
        }
        if cli_no_parallel {
            options.parallel = false;
        }
        options
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
