/*!
 * Offline mock provider backed by the translation memory.
 *
 * Exact-match lookup keyed by the untranslated text. A miss returns the input
 * unchanged. It never fails, which makes it the terminal link of the fallback
 * chain and the only provider used when no credentials are configured.
 */

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::locale::Locale;
use crate::providers::{Provider, TranslationRequest};
use crate::translation::memory::TranslationMemory;

/// Deterministic dictionary provider
#[derive(Debug, Clone)]
pub struct MockProvider {
    memory: Arc<TranslationMemory>,
}

impl MockProvider {
    pub fn new(memory: TranslationMemory) -> Self {
        Self {
            memory: Arc::new(memory),
        }
    }

    /// Mock provider over the built-in phrase tables
    pub fn builtin() -> Self {
        Self::new(TranslationMemory::builtin())
    }

    /// Look up `text`; a miss returns the input unchanged
    pub fn translate(&self, text: &str, target: Locale) -> String {
        self.memory
            .lookup(text, target)
            .unwrap_or(text)
            .to_string()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        Ok(self.translate(&request.text, request.target))
    }
}
