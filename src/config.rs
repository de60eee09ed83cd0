use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{
    Locale,
    translate::{DEFAULT_ENDPOINT, RequestDelay, TranslatorOptions},
};

pub const CONFIG_FILE_NAME: &str = ".ps-i18nrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_message_keys_dir")]
    pub message_keys_dir: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    #[serde(default = "default_plugin_manifest")]
    pub plugin_manifest: String,
    #[serde(default = "default_languages_file")]
    pub languages_file: String,
    #[serde(default)]
    pub testing_mode: bool,
    #[serde(default)]
    pub request_delay: RequestDelayConfig,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub timestamp_suffix: bool,
    #[serde(default = "default_translate_endpoint")]
    pub translate_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDelayConfig {
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for RequestDelayConfig {
    fn default() -> Self {
        Self {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_message_keys_dir() -> String {
    "src/powerschool/MessageKeys".to_string()
}

fn default_source_locale() -> String {
    "US_en".to_string()
}

fn default_backup_dir() -> String {
    "original_files_backup".to_string()
}

fn default_plugin_manifest() -> String {
    "plugin.xml".to_string()
}

fn default_languages_file() -> String {
    "languages.json".to_string()
}

fn default_min_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    3000
}

fn default_max_retries() -> u32 {
    2
}

fn default_translate_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_keys_dir: default_message_keys_dir(),
            source_locale: default_source_locale(),
            backup_dir: default_backup_dir(),
            plugin_manifest: default_plugin_manifest(),
            languages_file: default_languages_file(),
            testing_mode: false,
            request_delay: RequestDelayConfig::default(),
            max_retries: default_max_retries(),
            timestamp_suffix: false,
            translate_endpoint: default_translate_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the source locale is not `<region>_<language>` or
    /// the request delay range is inverted.
    pub fn validate(&self) -> Result<()> {
        self.source_locale()
            .context("Invalid 'sourceLocale' in config")?;

        if self.request_delay.min_ms > self.request_delay.max_ms {
            bail!(
                "Invalid 'requestDelay': minMs ({}) is greater than maxMs ({})",
                self.request_delay.min_ms,
                self.request_delay.max_ms
            );
        }

        Ok(())
    }

    pub fn source_locale(&self) -> Result<Locale> {
        self.source_locale.parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions {
            testing_mode: self.testing_mode,
            delay: RequestDelay {
                min_ms: self.request_delay.min_ms,
                max_ms: self.request_delay.max_ms,
            },
            max_retries: self.max_retries,
            timestamp_suffix: self.timestamp_suffix,
            ..TranslatorOptions::default()
        }
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
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            path: None,
        }),
    }
}
