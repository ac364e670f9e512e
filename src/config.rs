use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed, not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// High randomness so stalling replies vary in phrasing.
    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f64,

    #[serde(default = "default_persona_temperature")]
    pub persona_temperature: f64,

    /// Low randomness to keep structured analysis output consistent.
    #[serde(default = "default_analysis_temperature")]
    pub analysis_temperature: f64,

    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,

    /// Per-request HTTP timeout; an unbounded hang would stall the whole
    /// interactive session.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_base_url() -> String {
    GROQ_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_reply_temperature() -> f64 {
    0.9
}

fn default_persona_temperature() -> f64 {
    0.8
}

fn default_analysis_temperature() -> f64 {
    0.3
}

fn default_reply_max_tokens() -> u32 {
    200
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_history_window() -> usize {
    6
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            reply_temperature: default_reply_temperature(),
            persona_temperature: default_persona_temperature(),
            analysis_temperature: default_analysis_temperature(),
            reply_max_tokens: default_reply_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            history_window: default_history_window(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.lurebird/config.toml`, creating it with defaults on first
    /// run. `LUREBIRD_API_KEY` / `GROQ_API_KEY` override the stored key.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        let lurebird_dir = home.join(".lurebird");
        let config_path = lurebird_dir.join("config.toml");

        if !lurebird_dir.exists() {
            fs::create_dir_all(&lurebird_dir)?;
        }

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.config_path = config_path;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("reply_temperature", self.generation.reply_temperature),
            ("persona_temperature", self.generation.persona_temperature),
            ("analysis_temperature", self.generation.analysis_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} {value} outside 0.0-2.0"
                )));
            }
        }
        if self.generation.reply_max_tokens == 0 {
            return Err(ConfigError::Validation("reply_max_tokens must be > 0".into()));
        }
        if self.generation.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be > 0".into(),
            ));
        }
        if self.generation.history_window == 0 {
            return Err(ConfigError::Validation("history_window must be > 0".into()));
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::Validation(format!(
                "base_url {:?} is not an http(s) URL",
                self.base_url
            )));
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("LUREBIRD_API_KEY").or_else(|| var("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.base_url, GROQ_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.generation.reply_temperature, 0.9);
        assert_eq!(config.generation.analysis_temperature, 0.3);
        assert_eq!(config.generation.history_window, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"gsk_test\"\nmodel = \"other-model\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.model, "other-model");
        assert_eq!(config.base_url, GROQ_BASE_URL);
        assert_eq!(config.generation.reply_max_tokens, 200);
    }

    #[test]
    fn nested_generation_table_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[generation]\nreply_temperature = 0.7\nrequest_timeout_secs = 30"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.generation.reply_temperature, 0.7);
        assert_eq!(config.generation.request_timeout_secs, 30);
        assert_eq!(config.generation.persona_temperature, 0.8);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = [unclosed").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = Config::default();
        config.generation.reply_temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = Config::default();
        config.generation.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let mut config = Config::default();
        config.api_key = Some("stored".into());
        config.apply_env(|name| (name == "LUREBIRD_API_KEY").then(|| "from-env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn groq_key_is_fallback_env() {
        let mut config = Config::default();
        config.apply_env(|name| (name == "GROQ_API_KEY").then(|| "gsk_env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("gsk_env"));
    }

    #[test]
    fn missing_env_leaves_key_untouched() {
        let mut config = Config::default();
        config.api_key = Some("stored".into());
        config.apply_env(|_| None);
        assert_eq!(config.api_key.as_deref(), Some("stored"));
    }
}
