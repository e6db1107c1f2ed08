/*!
 * Translation service for site content using AI providers.
 *
 * This module contains the core functionality for translating content:
 *
 * - `core`: The translation service with live-provider fallback
 * - `memory`: Static translation memory used offline and as fallback
 * - `prompts`: Prompt templates per content kind
 */

// Re-export main types for easier usage
pub use self::core::{TranslationService, TranslationStats};
pub use self::memory::TranslationMemory;
pub use self::prompts::ContentKind;

// Submodules
pub mod core;
pub mod memory;
pub mod prompts;
