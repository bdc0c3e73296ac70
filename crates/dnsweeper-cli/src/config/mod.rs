//! Configuration management.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use dnsweeper::{RiskCalculatorConfig, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Default minimum level for `analyze`.
    pub min_level: Option<RiskLevel>,

    /// Scoring thresholds and suspicious-name patterns.
    #[serde(default)]
    pub risk: RiskCalculatorConfig,
}

impl Config {
    /// Get the platform config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "dnsweeper", "dnsweeper")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "output_format = \"json\"\n\n[risk]\nunused_days_threshold = 90\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.min_level, None);
        assert_eq!(config.risk.unused_days_threshold, 90);
        assert_eq!(config.risk.high_risk_ttl_threshold, 300);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            output_format: Some(OutputFormat::Yaml),
            min_level: Some(RiskLevel::Medium),
            risk: RiskCalculatorConfig::new().suspicious_patterns(["legacy"]),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_format = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
