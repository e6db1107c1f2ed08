/*!
 * # locapipe - Localized content generation for static sites
 *
 * Generates missing locale variants of a site's Markdown content and JSON data
 * files. English documents are the source of truth; Swedish, German and French
 * copies are written next to them as `<stem>.<locale>.<ext>`.
 *
 * ## Features
 *
 * - Discover portfolio and blog documents, ignoring existing locale variants
 * - Translate frontmatter field by field, leaving structural keys untouched
 * - Translate document bodies in one call per locale
 * - Translate navigation and metadata in JSON data files without changing shape
 * - Live translation through OpenAI or Anthropic with a deadline per call
 * - Deterministic offline fallback from a translation memory
 * - Idempotent: existing variants are never overwritten
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Pipeline stages and the run summary
 * - `discovery`: Content file discovery
 * - `document`: Frontmatter codec and document types
 * - `field_classifier`: Frontmatter translation policy
 * - `file_utils`: File system operations and variant paths
 * - `json_tree`: Structure-preserving JSON translation
 * - `locale`: Supported locales
 * - `translation`: Translation service with fallback:
 *   - `translation::core`: The service and its counters
 *   - `translation::memory`: Static translation memory
 *   - `translation::prompts`: Prompt templates
 * - `providers`: Client implementations for translation providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Offline translation memory provider
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod discovery;
pub mod document;
pub mod errors;
pub mod field_classifier;
pub mod file_utils;
pub mod json_tree;
pub mod locale;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PipelineStage, RunSummary, StageReport};
pub use document::{ContentDocument, DocumentCodec, TranslatedDocument};
pub use errors::{AppError, DocumentError, ProviderError};
pub use field_classifier::{FieldAction, FieldClassifier, SkipSet};
pub use locale::{Locale, LocaleSet};
pub use translation::TranslationService;
