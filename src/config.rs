use crate::zombie::ZombieCriteria;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROFILE: &str = "admin";
pub const DEFAULT_TARGET_GROUP: &str = "toolbox-np-sg-gitrunnerautoscalingdis";
pub const DEFAULT_MIN_AGE_MINUTES: f64 = 15.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub criteria: CriteriaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Named profile from ~/.aws/config
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Overrides the profile's region when set
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaConfig {
    #[serde(default = "default_target_group")]
    pub target_group_name: String,
    #[serde(default = "default_min_age_minutes")]
    pub min_age_minutes: f64,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_target_group() -> String {
    DEFAULT_TARGET_GROUP.to_string()
}

fn default_min_age_minutes() -> f64 {
    DEFAULT_MIN_AGE_MINUTES
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            region: None,
        }
    }
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            target_group_name: default_target_group(),
            min_age_minutes: default_min_age_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: AwsConfig::default(),
            criteria: CriteriaConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .reapctl.toml in current dir, then ~/.config/reapctl/config.toml
            let local = PathBuf::from(".reapctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("reapctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".reapctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                let mut err = format!("Failed to parse config: {}", config_path.display());
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Incorrect value types (min_age_minutes is a number)");
                err
            })?;
            Ok(config)
        } else {
            if path.is_some() {
                tracing::warn!(
                    "Config file not found: {}, using defaults",
                    config_path.display()
                );
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Validated zombie criteria from the `[criteria]` section
    pub fn zombie_criteria(&self) -> crate::error::Result<ZombieCriteria> {
        ZombieCriteria::new(
            self.criteria.target_group_name.clone(),
            self.criteria.min_age_minutes,
        )
    }
}
