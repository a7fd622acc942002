//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_OCR__BINARY`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub ocr: OcrSettings,
    pub extraction: ExtractionSettings,
    pub ranking: RankingSettings,
}

/// External OCR engine location and behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Binary name (looked up on `PATH`) or path; `~` and `$VAR` are expanded.
    pub binary: String,
    pub languages: Vec<String>,
    pub tessdata_dir: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            languages: vec!["eng".to_string()],
            tessdata_dir: None,
            timeout_secs: 60,
        }
    }
}

impl OcrSettings {
    pub fn binary_path(&self) -> PathBuf { expand_path(&self.binary) }

    pub fn tessdata_path(&self) -> Option<PathBuf> { self.tessdata_dir.as_ref().map(expand_path) }

    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Maximum documents extracted at once.
    pub concurrency: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self { Self { concurrency: 4 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopWordPreset {
    #[default]
    English,
    None,
}

/// What scores to assign when every document has the same average similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlatCohortPolicy {
    /// Score is the average similarity itself on the 0-100 scale.
    #[default]
    RawSimilarity,
    /// Every score is 0.
    Zero,
    /// Every score is 50.
    Midpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    pub stop_words: StopWordPreset,
    pub extra_stop_words: Vec<String>,
    /// Tokens with fewer characters are ignored.
    pub min_token_chars: usize,
    pub flat_cohort: FlatCohortPolicy,
    /// Attach the full similarity matrix to ranked results.
    pub include_matrix: bool,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            stop_words: StopWordPreset::English,
            extra_stop_words: Vec::new(),
            min_token_chars: 2,
            flat_cohort: FlatCohortPolicy::RawSimilarity,
            include_matrix: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> crate::Result<()> {
        if self.ocr.binary.trim().is_empty() {
            return Err(Error::InvalidConfig("ocr.binary must not be empty".into()));
        }
        if self.ocr.languages.is_empty() {
            return Err(Error::InvalidConfig("ocr.languages must name at least one language".into()));
        }
        if self.ocr.timeout_secs == 0 {
            return Err(Error::InvalidConfig("ocr.timeout_secs must be positive".into()));
        }
        if self.extraction.concurrency == 0 {
            return Err(Error::InvalidConfig("extraction.concurrency must be positive".into()));
        }
        if self.ranking.min_token_chars == 0 {
            return Err(Error::InvalidConfig("ranking.min_token_chars must be positive".into()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed, validated view of the whole configuration.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to parse settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

