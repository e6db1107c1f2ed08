/*!
 * Prompt templates for content translation.
 *
 * Frontmatter fields get a terse single-value instruction; document bodies get
 * an instruction to keep markup and code verbatim and translate prose only.
 */

use crate::locale::Locale;

/// What kind of content a piece of text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A single metadata field or data-file label
    Frontmatter,
    /// A markdown/MDX document body
    Body,
}

/// System prompt for a single frontmatter field
pub const FRONTMATTER_PROMPT: &str = "You are a professional website translator. Translate the following single field value from {source_language} to {target_language}. Keep it concise and keep the same tone. Do not translate proper names, product names or technical terms. Respond with the translated value only, without quotes, notes or explanations.";

/// System prompt for a document body
pub const BODY_PROMPT: &str = r#"You are a professional website translator. Translate the following document body from {source_language} to {target_language}.

## Keep verbatim
- Markdown syntax (headings, lists, emphasis, links, tables)
- MDX/JSX components, their props and HTML tags
- Code blocks and inline code
- URLs, file paths, image references
- Proper names, product names and technical terms

## Translate
- Prose, headings text, list item text, link text and image alt text

Respond with the translated document only, without any explanations or notes."#;

/// Render the system prompt for a content kind
pub fn system_prompt(kind: ContentKind, target: Locale) -> String {
    let template = match kind {
        ContentKind::Frontmatter => FRONTMATTER_PROMPT,
        ContentKind::Body => BODY_PROMPT,
    };
    template
        .replace("{source_language}", &Locale::BASE.english_name())
        .replace("{target_language}", &target.english_name())
}
