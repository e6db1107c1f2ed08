use anyhow::{Context, Result};
use log::warn;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::errors::DocumentError;
use crate::file_utils::FileManager;
use crate::locale::Locale;

// @module: Content documents and the frontmatter codec

/// Ordered frontmatter mapping; values are a tagged union of JSON kinds
pub type Frontmatter = Map<String, Value>;

const FENCE: &str = "---";

// @struct: Source-language document as read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    // @field: Where the document was read from
    pub source_path: PathBuf,

    // @field: Always the base locale
    pub locale: Locale,

    // @field: Parsed metadata block
    pub frontmatter: Frontmatter,

    // @field: Free text after the metadata block
    pub body: String,
}

impl ContentDocument {
    /// Build a document from raw file content; malformed frontmatter degrades
    /// to an empty map with the raw text as body
    pub fn from_raw(source_path: impl Into<PathBuf>, raw: &str) -> Self {
        let source_path = source_path.into();
        let (frontmatter, body) = match DocumentCodec::try_parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{:?}: {}; treating frontmatter as empty", source_path, e);
                (Frontmatter::new(), raw.to_string())
            }
        };

        Self {
            source_path,
            locale: Locale::BASE,
            frontmatter,
            body,
        }
    }

    /// Read and parse a document from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = FileManager::read_to_string(&path)?;
        Ok(Self::from_raw(path.as_ref(), &raw))
    }
}

// @struct: Locale variant produced by the generation step
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedDocument {
    pub target_locale: Locale,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl TranslatedDocument {
    /// Render the document in the on-disk format
    pub fn render(&self) -> Result<String> {
        DocumentCodec::serialize(&self.frontmatter, &self.body)
            .with_context(|| format!("Failed to render {} document", self.target_locale))
    }
}

/// Reads and writes the `---` fenced YAML frontmatter format
pub struct DocumentCodec;

impl DocumentCodec {
    /// Parse leniently: a malformed metadata block yields empty frontmatter
    /// and the raw text as body
    pub fn parse(raw: &str) -> (Frontmatter, String) {
        Self::try_parse(raw).unwrap_or_else(|_| (Frontmatter::new(), raw.to_string()))
    }

    /// Parse strictly, reporting malformed metadata blocks
    pub fn try_parse(raw: &str) -> Result<(Frontmatter, String), DocumentError> {
        let Some(after_open) = strip_fence_line(raw) else {
            return Ok((Frontmatter::new(), raw.to_string()));
        };

        let (yaml, rest) = split_at_closing_fence(after_open)
            .ok_or_else(|| DocumentError::Format("missing closing --- fence".to_string()))?;

        let frontmatter = if yaml.trim().is_empty() {
            Frontmatter::new()
        } else {
            match serde_yaml::from_str::<Value>(yaml)? {
                Value::Object(map) => map,
                Value::Null => Frontmatter::new(),
                other => {
                    return Err(DocumentError::Format(format!(
                        "expected a mapping, found {}",
                        value_kind(&other)
                    )));
                }
            }
        };

        // One blank line separates the fence from the body
        let body = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);

        Ok((frontmatter, body.to_string()))
    }

    /// Serialize frontmatter and body; the inverse of `try_parse`
    pub fn serialize(frontmatter: &Frontmatter, body: &str) -> Result<String, DocumentError> {
        let mut out = String::with_capacity(body.len() + 64);
        out.push_str(FENCE);
        out.push('\n');
        if !frontmatter.is_empty() {
            let yaml = serde_yaml::to_string(frontmatter)
                .map_err(|e| DocumentError::Serialize(e.to_string()))?;
            out.push_str(&yaml);
            if !yaml.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push_str(FENCE);
        out.push_str("\n\n");
        out.push_str(body);
        Ok(out)
    }
}

/// Strip an opening fence line, returning the remainder
fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Split at the first line consisting solely of `---`
fn split_at_closing_fence(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    while offset <= text.len() {
        let line_end = text[offset..].find('\n').map(|i| offset + i);
        let line = match line_end {
            Some(end) => &text[offset..end],
            None => &text[offset..],
        };
        if line.trim_end_matches('\r') == FENCE {
            let rest = match line_end {
                Some(end) => &text[end + 1..],
                None => "",
            };
            return Some((&text[..offset], rest));
        }
        match line_end {
            Some(end) => offset = end + 1,
            None => break,
        }
    }
    None
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
