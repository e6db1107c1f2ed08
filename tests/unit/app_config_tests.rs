/*!
 * Tests for application configuration functionality
 */

use std::path::Path;

use locapipe::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use locapipe::errors::AppError;
use locapipe::locale::Locale;

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.content.root, Path::new("content"));
    assert_eq!(config.content.portfolio_path(), Path::new("content/portfolio"));
    assert_eq!(config.content.blog_path(), Path::new("content/blog"));
    assert_eq!(config.content.data_path(), Path::new("content/data/site.json"));
    assert_eq!(config.content.extensions, vec!["md", "mdx"]);
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_api_key(), "");
    assert_eq!(config.translation.get_timeout_secs(), 60);
    assert_eq!(config.log_level, LogLevel::Info);

    let locales: Vec<Locale> = config.content.locales().unwrap().iter().collect();
    assert_eq!(locales, vec![Locale::Sv, Locale::De, Locale::Fr]);
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // The base locale is never a target
    config.content.target_locales = vec!["en".to_string()];
    assert!(config.validate().is_err());

    config.content.target_locales = vec!["xx".to_string()];
    assert!(config.validate().is_err());

    config.content.target_locales = vec!["sv".to_string()];
    assert!(config.validate().is_ok());

    config.translation.common.temperature = 1.5;
    assert!(config.validate().is_err());
    config.translation.common.temperature = 0.2;

    config.content.extensions.clear();
    assert!(config.validate().is_err());
    config.content.extensions = vec!["md".to_string()];

    config.translation.available_providers[0].endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_configLoad_withPartialJson_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "locapipe.json",
        r#"{
            "content": { "root": "site", "target_locales": ["de"] },
            "translation": {
                "provider": "anthropic",
                "available_providers": [
                    { "type": "anthropic", "model": "claude-test", "timeout_secs": 5 }
                ]
            },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.content.root, Path::new("site"));
    assert_eq!(config.content.blog_dir, Path::new("blog"));
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.get_model(), "claude-test");
    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.translation.get_timeout_secs(), 5);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.content.locales().unwrap().iter().collect::<Vec<_>>(), vec![Locale::De]);
}

#[test]
fn test_configSave_thenLoad_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("locapipe.json");
    let mut config = Config::default();
    config.content.extra_skip_keys = vec!["venue".to_string()];
    config.translation.set_model("gpt-4o");

    config.save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded.content.extra_skip_keys, vec!["venue"]);
    assert_eq!(loaded.translation.get_model(), "gpt-4o");
    assert!(loaded.content.skip_set().contains("venue"));
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaultConfig() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("locapipe.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.is_file());
    assert_eq!(config.content.root, Path::new("content"));
    assert_eq!(Config::load(&path).unwrap().translation.get_model(), "gpt-4o-mini");
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldReturnConfigError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "locapipe.json", "{ not json").unwrap();

    let error = Config::load_or_create(&path).unwrap_err();

    assert!(matches!(error, AppError::Config(_)));
    assert!(error.to_string().starts_with("Configuration error:"));
}

#[test]
fn test_loadOrCreate_withUnwritablePath_shouldReturnFileError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("missing-dir").join("locapipe.json");

    let error = Config::load_or_create(&path).unwrap_err();

    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_setApiKey_withMissingProviderEntry_shouldCreateIt() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Anthropic;

    config.translation.set_api_key("secret");

    assert_eq!(config.translation.get_api_key(), "secret");
    assert_eq!(config.translation.available_providers.len(), 1);
}

#[test]
fn test_providerConfig_new_shouldUseProviderDefaults() {
    let openai = ProviderConfig::new(TranslationProvider::OpenAI);
    let anthropic = ProviderConfig::new(TranslationProvider::Anthropic);

    assert_eq!(openai.provider_type, "openai");
    assert_eq!(openai.endpoint, "https://api.openai.com/v1");
    assert_eq!(anthropic.provider_type, "anthropic");
    assert_eq!(anthropic.model, "claude-3-5-haiku-latest");
    assert_eq!(TranslationProvider::OpenAI.api_key_env(), "OPENAI_API_KEY");
    assert_eq!(TranslationProvider::Anthropic.api_key_env(), "ANTHROPIC_API_KEY");
}

#[test]
fn test_translationProvider_fromStr_shouldParseNames() {
    assert_eq!("openai".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("Anthropic".parse::<TranslationProvider>().unwrap(), TranslationProvider::Anthropic);
    assert!("ollama".parse::<TranslationProvider>().is_err());
}
