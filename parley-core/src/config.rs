use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ParleyError, ParleyResult};
use crate::models::UserId;

/// Value shipped in sample `.env` files; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParleyConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_completion_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_current_user")]
    pub current_user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Terminal width below which only one pane is shown at a time.
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_backend_timeout() -> u64 {
    10
}

fn default_completion_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_assistant_timeout() -> u64 {
    60
}

fn default_current_user() -> UserId {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

fn default_theme() -> String {
    "tokyo-night".to_string()
}

fn default_narrow_width() -> u16 {
    100
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_completion_endpoint(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_assistant_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_user_id: default_current_user(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: String::new(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme(),
            narrow_width: default_narrow_width(),
        }
    }
}

impl AssistantConfig {
    /// The credential, if one is set and is not the sample placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

impl ParleyConfig {
    pub fn load() -> ParleyResult<Self> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> ParleyResult<Self> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PARLEY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut parley_config: ParleyConfig = builder.build()?.try_deserialize()?;
        parley_config.apply_env_overrides(|key| std::env::var(key).ok());
        parley_config.validate()?;

        Ok(parley_config)
    }

    /// Applies the flat variables used by `.env` files. The first variable
    /// found in each list wins.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(k));

        if let Some(url) = first(&["PARLEY_API_BASE_URL", "API_BASE_URL", "VITE_API_BASE_URL"]) {
            self.backend.base_url = url;
        }

        if let Some(key) = first(&[
            "PARLEY_OPENAI_API_KEY",
            "OPENAI_API_KEY",
            "VITE_OPENAI_API_KEY",
        ]) {
            self.assistant.api_key = Some(key);
        }

        if let Some(id) = first(&[
            "PARLEY_CURRENT_USER_ID",
            "CURRENT_USER_ID",
            "VITE_CURRENT_USER_ID",
        ]) {
            match id.trim().parse() {
                Ok(id) => self.session.current_user_id = id,
                Err(_) => tracing::warn!("Ignoring non-numeric current user id '{}'", id),
            }
        }

        if let Some(level) = first(&["PARLEY_LOG_LEVEL", "RUST_LOG"]) {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> ParleyResult<()> {
        if self.backend.base_url.is_empty() {
            return Err(ParleyError::ConfigMissing("backend.base_url".to_string()));
        }

        if !is_http_url(&self.backend.base_url) {
            return Err(ParleyError::ConfigInvalid {
                key: "backend.base_url".to_string(),
                message: "Must start with http:// or https://".to_string(),
            });
        }

        if !is_http_url(&self.assistant.endpoint) {
            return Err(ParleyError::ConfigInvalid {
                key: "assistant.endpoint".to_string(),
                message: "Must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == 0 || self.assistant.timeout_secs == 0 {
            return Err(ParleyError::ConfigInvalid {
                key: "timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.tui.tick_rate_ms == 0 {
            return Err(ParleyError::ConfigInvalid {
                key: "tui.tick_rate_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(ParleyError::ConfigInvalid {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }

    pub fn current_user_id(&self) -> UserId {
        self.session.current_user_id
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    /// Resolved log file: the configured path or `<data dir>/parley/parley.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        if !self.logging.file_path.is_empty() {
            return Some(PathBuf::from(&self.logging.file_path));
        }
        get_data_dir().map(|d| d.join("parley.log"))
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("parley.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parley").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parley").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut env_paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        env_paths.push(cwd.join(".env"));
        env_paths.push(cwd.join(".env.local"));
    }

    if let Some(home) = dirs::home_dir() {
        env_paths.push(home.join(".parley").join(".env"));
    }

    for path in env_paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("parley"))
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("parley"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ParleyConfig::default();

        assert_eq!(config.backend.base_url, "http://localhost:3000/api");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.assistant.api_key.is_none());
        assert_eq!(
            config.assistant.endpoint,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.assistant.model, "gpt-3.5-turbo");
        assert_eq!(config.assistant.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.session.current_user_id, 1);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.tui.tick_rate_ms, 250);
        assert_eq!(config.tui.theme, "tokyo-night");
        assert_eq!(config.tui.narrow_width, 100);
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(ParleyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = ParleyConfig::default();
        config.backend.base_url = String::new();
        assert!(matches!(
            config.validate(),
            Err(ParleyError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_validation_non_http_base_url() {
        let mut config = ParleyConfig::default();
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_tick_rate() {
        let mut config = ParleyConfig::default();
        config.tui.tick_rate_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = ParleyConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "parley_core=debug,reqwest=warn".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_accepts_off() {
        let mut config = ParleyConfig::default();
        config.logging.level = "off".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "OFF".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_prefer_first_alias() {
        let mut config = ParleyConfig::default();
        config.apply_env_overrides(lookup(&[
            ("API_BASE_URL", "http://chat.internal"),
            ("VITE_API_BASE_URL", "http://ignored"),
            ("VITE_OPENAI_API_KEY", "sk-test"),
            ("CURRENT_USER_ID", "42"),
        ]));

        assert_eq!(config.backend.base_url, "http://chat.internal");
        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.current_user_id(), 42);
    }

    #[test]
    fn test_env_override_ignores_bad_user_id() {
        let mut config = ParleyConfig::default();
        config.apply_env_overrides(lookup(&[("CURRENT_USER_ID", "abc")]));
        assert_eq!(config.current_user_id(), 1);
    }

    #[test]
    fn test_usable_api_key() {
        let mut assistant = AssistantConfig::default();
        assert!(assistant.usable_api_key().is_none());

        assistant.api_key = Some(PLACEHOLDER_API_KEY.to_string());
        assert!(assistant.usable_api_key().is_none());

        assistant.api_key = Some("   ".to_string());
        assert!(assistant.usable_api_key().is_none());

        assistant.api_key = Some("sk-live".to_string());
        assert_eq!(assistant.usable_api_key(), Some("sk-live"));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let mut config = ParleyConfig::default();
        config.backend.base_url = "http://localhost:3000/api/".to_string();
        assert_eq!(config.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "http://backend.test/api"

[session]
current_user_id = 7

[tui]
theme = "nord"
"#
        )
        .unwrap();

        let mut config: ParleyConfig = ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        config.apply_env_overrides(|_| None);

        assert_eq!(config.backend.base_url, "http://backend.test/api");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.current_user_id(), 7);
        assert_eq!(config.tui.theme, "nord");
        assert_eq!(config.tui.tick_rate_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_file_prefers_configured_path() {
        let mut config = ParleyConfig::default();
        config.logging.file_path = "/tmp/parley-test.log".to_string();
        assert_eq!(
            config.log_file(),
            Some(PathBuf::from("/tmp/parley-test.log"))
        );
    }
}
