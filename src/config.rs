use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_FACTORY_NAME, DEFAULT_SUFFIX};
use crate::utils::is_js_identifier;

pub const CONFIG_FILE_NAME: &str = ".minerrrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_factory_name")]
    pub factory_name: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Path of the file holding the production factory definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(default = "default_messages_output")]
    pub messages_output: String,
}

fn default_factory_name() -> String {
    DEFAULT_FACTORY_NAME.to_string()
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_messages_output() -> String {
    "errors.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            factory_name: default_factory_name(),
            suffix: default_suffix(),
            replacement: None,
            messages_output: default_messages_output(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `factoryName` or `suffix` is not usable as
    /// JavaScript identifier text.
    pub fn validate(&self) -> Result<()> {
        if !is_js_identifier(&self.factory_name) {
            bail!(
                "Invalid identifier in 'factoryName': \"{}\"",
                self.factory_name
            );
        }

        // The suffix is the tail of an identifier, so it may start with a digit.
        if self.suffix.is_empty() || !is_js_identifier(&format!("_{}", self.suffix)) {
            bail!("Invalid identifier in 'suffix': \"{}\"", self.suffix);
        }

        if self.messages_output.is_empty() {
            bail!("'messagesOutput' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    /// Resolve a path from the config file against its directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
