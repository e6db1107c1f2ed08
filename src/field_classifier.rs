/*!
 * Translation policy for frontmatter and data keys.
 *
 * A key is either structural (identifiers, URLs, media, taxonomy, dates,
 * technology names) and copied verbatim, or human text and eligible for
 * translation. The policy is plain data injected at construction time so
 * callers can substitute their own.
 */

use serde_json::Value;
use std::collections::HashSet;

/// Built-in structural keys that are never translated
pub const DEFAULT_SKIP_KEYS: &[&str] = &[
    // identifiers and links
    "id", "slug", "url", "href", "link", "links", "permalink", "canonical",
    // media
    "image", "images", "cover", "coverImage", "thumbnail", "video", "icon", "logo", "media",
    // dates
    "date", "publishedAt", "updatedAt", "createdAt", "year",
    // taxonomy
    "category", "categories", "tag", "tags",
    // technology names
    "technologies", "tech", "techStack", "stack", "languages", "frameworks", "tools",
    // people and project references
    "author", "github", "demo", "repository", "website", "client", "role",
    // rendering switches
    "locale", "lang", "layout", "draft", "featured", "order", "type", "status",
];

/// What to do with the value stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Copy the value verbatim
    Skip,
    /// Translate the value if it is human-readable text
    Translate,
}

/// The fixed set of key names exempt from translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipSet {
    keys: HashSet<String>,
}

impl SkipSet {
    /// Create a skip set from explicit key names
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a copy extended with additional key names
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for SkipSet {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_KEYS.iter().copied())
    }
}

/// Decides per key whether a value is translated or passed through
#[derive(Debug, Clone, Default)]
pub struct FieldClassifier {
    skip_set: SkipSet,
}

impl FieldClassifier {
    pub fn new(skip_set: SkipSet) -> Self {
        Self { skip_set }
    }

    /// Classify a key name; total and side-effect free
    pub fn classify(&self, key: &str) -> FieldAction {
        if self.skip_set.contains(key) {
            FieldAction::Skip
        } else {
            FieldAction::Translate
        }
    }

    /// True only for translatable keys whose value is a non-empty string.
    /// Arrays, numbers, booleans, null and nested objects always pass through.
    pub fn should_translate(&self, key: &str, value: &Value) -> bool {
        match (self.classify(key), value) {
            (FieldAction::Translate, Value::String(text)) => !text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn skip_set(&self) -> &SkipSet {
        &self.skip_set
    }
}
