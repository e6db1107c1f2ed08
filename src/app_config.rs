use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use log::warn;
use url::Url;

use crate::errors::AppError;
use crate::field_classifier::SkipSet;
use crate::json_tree::JsonTranslationPolicy;
use crate::locale::LocaleSet;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Content locations and policy
    #[serde(default)]
    pub content: ContentConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where content lives and which locales to generate
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentConfig {
    /// Content root directory
    #[serde(default = "default_content_root")]
    pub root: PathBuf,

    /// Portfolio documents, relative to the root
    #[serde(default = "default_portfolio_dir")]
    pub portfolio_dir: PathBuf,

    /// Blog documents, relative to the root
    #[serde(default = "default_blog_dir")]
    pub blog_dir: PathBuf,

    /// Navigation and site metadata JSON file, relative to the root
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Target locale codes; empty means every supported target
    #[serde(default)]
    pub target_locales: Vec<String>,

    /// Frontmatter keys to copy verbatim in addition to the built-in set
    #[serde(default)]
    pub extra_skip_keys: Vec<String>,

    /// Document file extensions
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Top-level keys of the data file whose subtrees are translated
    #[serde(default = "default_json_roots")]
    pub json_roots: Vec<String>,

    /// Keys inside those subtrees that hold human text
    #[serde(default = "default_json_text_keys")]
    pub json_text_keys: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            portfolio_dir: default_portfolio_dir(),
            blog_dir: default_blog_dir(),
            data_file: default_data_file(),
            target_locales: Vec::new(),
            extra_skip_keys: Vec::new(),
            extensions: default_extensions(),
            json_roots: default_json_roots(),
            json_text_keys: default_json_text_keys(),
        }
    }
}

impl ContentConfig {
    pub fn portfolio_path(&self) -> PathBuf {
        self.root.join(&self.portfolio_dir)
    }

    pub fn blog_path(&self) -> PathBuf {
        self.root.join(&self.blog_dir)
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_file)
    }

    /// Resolved target locales
    pub fn locales(&self) -> Result<LocaleSet> {
        if self.target_locales.is_empty() {
            Ok(LocaleSet::all_targets())
        } else {
            LocaleSet::from_codes(&self.target_locales)
        }
    }

    /// Built-in skip set extended with configured keys
    pub fn skip_set(&self) -> SkipSet {
        SkipSet::default().with_extra(self.extra_skip_keys.iter().cloned())
    }

    /// Allow-list for the data file translator
    pub fn json_policy(&self) -> JsonTranslationPolicy {
        JsonTranslationPolicy::new(self.json_roots.iter().cloned(), self.json_text_keys.iter().cloned())
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }

    // @returns: Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key; the environment variable takes precedence
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds, overriding the common setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: None,
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: None,
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,

    /// Extra translation memory files merged over the built-in phrases
    #[serde(default)]
    pub memory_files: Vec<PathBuf>,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Kept low so repeated runs produce similar output
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Deadline for a single provider call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Trimmed texts shorter than this are never sent to a provider
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            min_text_length: default_min_text_length(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_portfolio_dir() -> PathBuf {
    PathBuf::from("portfolio")
}

fn default_blog_dir() -> PathBuf {
    PathBuf::from("blog")
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/site.json")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string()]
}

fn default_json_roots() -> Vec<String> {
    vec!["navigation".to_string(), "metadata".to_string()]
}

fn default_json_text_keys() -> Vec<String> {
    [
        "label", "title", "description", "subtitle", "tagline", "summary", "text", "heading",
        "cta", "name",
    ]
    .iter()
    .map(|key| key.to_string())
    .collect()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.2
}

fn default_min_text_length() -> usize {
    2
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load the config at `path`, writing a default one there first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file not found at {:?}, creating default config.", path);
            let config = Config::default();
            config.save(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
            return Ok(config);
        }
        Self::load(path).map_err(|e| AppError::Config(format!("{:#}", e)))
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Take the active provider's API key from the environment when set there
    pub fn apply_env_api_key(&mut self) {
        let var = self.translation.provider.api_key_env();
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                self.translation.set_api_key(key.trim());
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.content.locales().context("Invalid target locales")?;

        if self.content.extensions.is_empty() {
            return Err(anyhow!("At least one document extension is required"));
        }

        let temperature = self.translation.common.temperature;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 1.0, got {}", temperature));
        }

        if self.translation.common.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be at least one second"));
        }

        let endpoint = self.translation.get_endpoint();
        if !endpoint.is_empty() {
            Url::parse(&endpoint).with_context(|| format!("Invalid provider endpoint: {}", endpoint))?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content: ContentConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Override the model of the active provider
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.active_provider_config_mut().model = model.into();
    }

    /// Get the API key for the active provider; empty means offline
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.trim().to_string())
            .unwrap_or_default()
    }

    /// Override the API key of the active provider
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.active_provider_config_mut().api_key = api_key.into();
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request deadline, preferring the provider's own setting
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .and_then(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(self.common.timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::OpenAI),
                ProviderConfig::new(TranslationProvider::Anthropic),
            ],
            common: TranslationCommonConfig::default(),
            memory_files: Vec::new(),
        }
    }
}
