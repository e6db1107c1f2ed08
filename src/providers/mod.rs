/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations behind a common trait:
 * - OpenAI: OpenAI chat completions API
 * - Anthropic: Anthropic messages API
 * - Mock: offline translation-memory lookup, the terminal fallback
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::locale::Locale;
use crate::translation::prompts::{self, ContentKind};

/// A single translation call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Target locale
    pub target: Locale,
    /// Frontmatter field or document body
    pub kind: ContentKind,
    /// Sampling temperature for live providers
    pub temperature: f32,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: Locale, kind: ContentKind) -> Self {
        Self {
            text: text.into(),
            target,
            kind,
            temperature: 0.2,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// System prompt for this request's content kind and locale
    pub fn system_prompt(&self) -> String {
        prompts::system_prompt(self.kind, self.target)
    }
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Translate a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError>;
}

/// Remove surrounding whitespace and a wrapping pair of quotes the model added
pub(crate) fn clean_completion(source: &str, completion: &str) -> String {
    let trimmed = completion.trim();
    let source = source.trim();
    for quote in ['"', '\'', '“'] {
        let closing = if quote == '“' { '”' } else { quote };
        if trimmed.len() >= 2
            && trimmed.starts_with(quote)
            && trimmed.ends_with(closing)
            && !source.starts_with(quote)
        {
            let inner = &trimmed[quote.len_utf8()..trimmed.len() - closing.len_utf8()];
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

pub mod anthropic;
pub mod mock;
pub mod openai;
