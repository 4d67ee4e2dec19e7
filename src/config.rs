//! Registry configuration.
//!
//! Sources, later overriding earlier:
//! 1. Defaults
//! 2. JSON file (`PIPELINE_REGISTRY_CONFIG`, else the user config dir)
//! 3. Environment variables

use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{self, is_truthy};
use crate::error::{Error, Result};
use crate::table::Contribution;

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Resolve every symbol at bootstrap
    pub eager: bool,
    /// Probe every capability at bootstrap
    pub probe_on_init: bool,
    /// Capabilities forced unavailable
    pub disabled: Vec<String>,
    /// Capabilities forced available
    pub enabled: Vec<String>,
    /// Contributions merged after the built-in catalog
    pub contributions: Vec<Contribution>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            eager: defaults::eager(),
            probe_on_init: defaults::probe_on_init(),
            disabled: Vec::new(),
            enabled: Vec::new(),
            contributions: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from the default file location and the process environment.
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if std::env::var_os(defaults::ENV_CONFIG).is_some() => {
                return Err(Error::Config(format!(
                    "Config file {:?} from {} does not exist",
                    path,
                    defaults::ENV_CONFIG
                )));
            }
            _ => Self::default(),
        };
        Ok(config.with_vars(env_overrides()?))
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::debug!("Loaded registry config from {:?}", path);
        Ok(config)
    }

    /// Parse a JSON config document.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::from)
    }

    /// Apply environment overrides from `(key, value)` pairs.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                defaults::ENV_EAGER => self.eager = is_truthy(value),
                defaults::ENV_PROBE_ON_INIT => self.probe_on_init = is_truthy(value),
                defaults::ENV_DISABLE => self.disabled.extend(split_list(value)),
                defaults::ENV_ENABLE => self.enabled.extend(split_list(value)),
                _ => {}
            }
        }
        self
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(defaults::ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| {
            dir.join(defaults::CONFIG_DIR_NAME)
                .join(defaults::CONFIG_FILE_NAME)
        })
    }
}

/// Read the override variables from the process environment.
fn env_overrides() -> Result<Vec<(&'static str, String)>> {
    let mut vars = Vec::new();
    for key in [
        defaults::ENV_EAGER,
        defaults::ENV_PROBE_ON_INIT,
        defaults::ENV_DISABLE,
        defaults::ENV_ENABLE,
    ] {
        match std::env::var(key) {
            Ok(value) => vars.push((key, value)),
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(value)) => {
                return Err(Error::Config(format!(
                    "{} is not valid UTF-8: {:?}",
                    key, value
                )));
            }
        }
    }
    Ok(vars)
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
