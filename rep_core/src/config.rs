//! Configuration file support for Repcount.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/repcount/config.toml`.

use crate::counter::{ExtremeDetection, MAX_BAND_MARGIN};
use crate::{AngleDomain, Error, ExerciseProfile, PercentDirection, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub counting: CountingConfig,

    #[serde(default)]
    pub profiles: Vec<CustomProfile>,
}

/// How the counter recognises the extremes of a repetition
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Exact,
    Band,
}

/// Rep counting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountingConfig {
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,

    #[serde(default = "default_band_margin")]
    pub band_margin: u8,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            band_margin: default_band_margin(),
        }
    }
}

impl CountingConfig {
    /// The detection strategy this configuration selects
    pub fn extreme_detection(&self) -> ExtremeDetection {
        match self.strategy {
            StrategyKind::Exact => ExtremeDetection::Exact,
            StrategyKind::Band => ExtremeDetection::Band {
                margin: self.band_margin,
            },
        }
    }
}

/// Custom exercise profile definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomProfile {
    pub id: String,
    pub name: String,
    pub proximal: usize,
    pub joint: usize,
    pub distal: usize,
    pub min_angle: f32,
    pub max_angle: f32,
    #[serde(default = "default_direction")]
    pub direction: PercentDirection,
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,
}

impl CustomProfile {
    pub fn to_profile(&self) -> ExerciseProfile {
        ExerciseProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            proximal: self.proximal,
            joint: self.joint,
            distal: self.distal,
            angle_domain: AngleDomain::new(self.min_angle, self.max_angle),
            percent_direction: self.direction,
            visibility_threshold: self.visibility_threshold,
        }
    }
}

// Default value functions
fn default_strategy() -> StrategyKind {
    StrategyKind::Exact
}

fn default_band_margin() -> u8 {
    5
}

fn default_direction() -> PercentDirection {
    PercentDirection::Forward
}

fn default_visibility_threshold() -> f32 {
    0.5
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Check settings that would break counting
    ///
    /// Custom profiles are validated when they are added to a registry.
    pub fn validate(&self) -> Result<()> {
        if self.counting.strategy == StrategyKind::Band
            && self.counting.band_margin > MAX_BAND_MARGIN
        {
            return Err(Error::Config(format!(
                "band_margin {} exceeds {}",
                self.counting.band_margin, MAX_BAND_MARGIN
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_default()
        });
        base.join("repcount").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.counting.strategy, StrategyKind::Exact);
        assert_eq!(config.counting.band_margin, 5);
        assert!(config.profiles.is_empty());
        assert_eq!(config.counting.extreme_detection(), ExtremeDetection::Exact);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[counting]
strategy = "band"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.counting.extreme_detection(),
            ExtremeDetection::Band { margin: 5 }
        );
    }

    #[test]
    fn test_custom_profile_defaults() {
        let toml_str = r#"
[[profiles]]
id = "pushup"
name = "Push-up"
proximal = 16
joint = 14
distal = 12
min_angle = 70.0
max_angle = 165.0
direction = "reversed"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profiles.len(), 1);

        let profile = config.profiles[0].to_profile();
        assert_eq!(profile.percent_direction, PercentDirection::Reversed);
        assert_eq!(profile.visibility_threshold, 0.5);
        assert_eq!(profile.angle_domain, AngleDomain::new(70.0, 165.0));
    }

    #[test]
    fn test_oversized_band_margin_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[counting]\nstrategy = \"band\"\nband_margin = 50\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.counting.strategy = StrategyKind::Band;
        config.counting.band_margin = 3;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.counting.strategy, StrategyKind::Band);
        assert_eq!(loaded.counting.band_margin, 3);
    }
}
