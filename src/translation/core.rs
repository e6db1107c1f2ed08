/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which translates one piece of
 * text at a time. It calls the live provider (if one is configured) exactly
 * once, bounded by a deadline, and degrades to the translation memory on any
 * failure. `translate` never returns an error.
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::locale::Locale;
use crate::providers::anthropic::Anthropic;
use crate::providers::mock::MockProvider;
use crate::providers::openai::OpenAI;
use crate::providers::{Provider, TranslationRequest};
use super::memory::TranslationMemory;
use super::prompts::ContentKind;

/// Shortest trimmed text worth sending to a provider
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 2;

/// Counters for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Texts translated by the live provider
    pub live: usize,
    /// Live calls that failed and fell back to the translation memory
    pub fallbacks: usize,
    /// Texts handled by the translation memory with no live provider configured
    pub offline: usize,
    /// Texts returned unchanged because they were too short or targeted the base locale
    pub skipped: usize,
}

impl TranslationStats {
    pub fn total(&self) -> usize {
        self.live + self.fallbacks + self.offline + self.skipped
    }
}

/// Main translation service for site content
pub struct TranslationService {
    /// Live AI provider, absent when no credentials are configured
    live: Option<Box<dyn Provider>>,

    /// Offline translation memory, the terminal fallback
    fallback: MockProvider,

    /// Sampling temperature passed to the live provider
    temperature: f32,

    /// Default deadline for a live call
    timeout: Duration,

    /// Shortest trimmed text that gets translated
    min_text_length: usize,

    stats: Mutex<TranslationStats>,
}

impl TranslationService {
    /// Create a service using only the given fallback provider
    pub fn offline(fallback: MockProvider) -> Self {
        Self {
            live: None,
            fallback,
            temperature: 0.2,
            timeout: Duration::from_secs(60),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            stats: Mutex::new(TranslationStats::default()),
        }
    }

    /// Create a service that tries `live` first and falls back to `fallback`
    pub fn with_live_provider(live: Box<dyn Provider>, fallback: MockProvider) -> Self {
        Self {
            live: Some(live),
            ..Self::offline(fallback)
        }
    }

    /// Create a translation service from configuration.
    ///
    /// A missing API key is not an error: every call then uses the
    /// translation memory for the whole run.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let mut memory = TranslationMemory::builtin();
        for path in &config.memory_files {
            memory
                .merge_file(path)
                .with_context(|| format!("Failed to load translation memory {:?}", path))?;
        }
        let fallback = MockProvider::new(memory);

        let api_key = config.get_api_key();
        let timeout = Duration::from_secs(config.get_timeout_secs());
        let service = if api_key.is_empty() {
            info!(
                "No API key configured for {}, using the offline translation memory for this run",
                config.provider.display_name()
            );
            Self::offline(fallback)
        } else {
            let live: Box<dyn Provider> = match config.provider {
                ConfigTranslationProvider::OpenAI => Box::new(OpenAI::new(
                    api_key,
                    config.get_endpoint(),
                    config.get_model(),
                    timeout,
                )),
                ConfigTranslationProvider::Anthropic => Box::new(Anthropic::new(
                    api_key,
                    config.get_endpoint(),
                    config.get_model(),
                    timeout,
                )),
            };
            info!(
                "Translating with {} ({})",
                config.provider.display_name(),
                config.get_model()
            );
            Self::with_live_provider(live, fallback)
        };

        Ok(service
            .with_temperature(config.common.temperature)
            .with_timeout(timeout)
            .with_min_text_length(config.common.min_text_length))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// True if a live provider is configured
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> TranslationStats {
        *self.stats.lock()
    }

    /// Translate text with the configured deadline
    pub async fn translate(&self, text: &str, target: Locale, kind: ContentKind) -> String {
        self.translate_within(text, target, kind, self.timeout).await
    }

    /// Translate text to a locale given by code; unsupported codes return the input unchanged
    pub async fn translate_to_code(&self, text: &str, code: &str, kind: ContentKind) -> String {
        match Locale::from_code(code) {
            Ok(target) => self.translate(text, target, kind).await,
            Err(_) => {
                debug!("{}", ProviderError::UnsupportedLocale(code.to_string()));
                self.stats.lock().skipped += 1;
                text.to_string()
            }
        }
    }

    /// Translate text, abandoning the live call after `deadline`
    pub async fn translate_within(
        &self,
        text: &str,
        target: Locale,
        kind: ContentKind,
        deadline: Duration,
    ) -> String {
        if text.trim().chars().count() < self.min_text_length || target.is_base() {
            self.stats.lock().skipped += 1;
            return text.to_string();
        }

        let Some(live) = &self.live else {
            self.stats.lock().offline += 1;
            return self.fallback.translate(text, target);
        };

        let request = TranslationRequest::new(text, target, kind).temperature(self.temperature);
        let result = match tokio::time::timeout(deadline, live.complete(&request)).await {
            Ok(Ok(translated)) if !translated.trim().is_empty() => Ok(translated),
            Ok(Ok(_)) => Err(ProviderError::EmptyResponse),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProviderError::Timeout(deadline.as_millis() as u64)),
        };

        match result {
            Ok(translated) => {
                self.stats.lock().live += 1;
                keep_padding(text, &translated)
            }
            Err(e) => {
                warn!(
                    "{} translation to {} failed for '{}': {}; using translation memory",
                    live.name(),
                    target,
                    truncate_text(text, 40),
                    e
                );
                self.stats.lock().fallbacks += 1;
                self.fallback.translate(text, target)
            }
        }
    }
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::offline(MockProvider::builtin())
    }
}

/// Carry the source's leading and trailing whitespace over to the translation
fn keep_padding(source: &str, translated: &str) -> String {
    let lead = &source[..source.len() - source.trim_start().len()];
    let trail = &source[source.trim_end().len()..];
    format!("{}{}{}", lead, translated.trim(), trail)
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
