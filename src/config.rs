use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tasks_to_complete")]
    pub tasks_to_complete: u32,
    #[serde(default = "default_max_mistakes")]
    pub max_mistakes: u32,
    #[serde(default = "default_anti_trivial_chance")]
    pub anti_trivial_chance: f64,
    #[serde(default = "default_operand_retries")]
    pub operand_retries: u32,
    #[serde(default = "default_question_retries")]
    pub question_retries: u32,
}

fn default_tasks_to_complete() -> u32 {
    10
}
fn default_max_mistakes() -> u32 {
    3
}
fn default_anti_trivial_chance() -> f64 {
    0.5
}
fn default_operand_retries() -> u32 {
    100
}
fn default_question_retries() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_to_complete: default_tasks_to_complete(),
            max_mistakes: default_max_mistakes(),
            anti_trivial_chance: default_anti_trivial_chance(),
            operand_retries: default_operand_retries(),
            question_retries: default_question_retries(),
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Self::from_toml_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kidquiz")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tasks_to_complete == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "tasks_to_complete",
            });
        }
        if self.max_mistakes == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "max_mistakes",
            });
        }
        if !(0.0..=1.0).contains(&self.anti_trivial_chance) {
            return Err(ConfigError::InvalidChance(self.anti_trivial_chance));
        }
        Ok(())
    }
}
