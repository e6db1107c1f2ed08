/*!
 * Tests for the frontmatter codec and document types
 */

use serde_json::{Value, json};

use locapipe::document::{ContentDocument, DocumentCodec, Frontmatter, TranslatedDocument};
use locapipe::errors::DocumentError;
use locapipe::locale::Locale;

use crate::common;

#[test]
fn test_parse_withFrontmatter_shouldSplitMetadataAndBody() {
    let (frontmatter, body) = DocumentCodec::parse(common::PROJECT_DOC);

    assert_eq!(frontmatter["title"], "About Me");
    assert_eq!(frontmatter["year"], "2024");
    assert_eq!(frontmatter["tags"], json!(["rust", "web"]));
    assert_eq!(body, "Home\n");
}

#[test]
fn test_parse_withoutFence_shouldReturnRawBody() {
    let raw = "# Just a heading\n\nSome text.\n";
    let (frontmatter, body) = DocumentCodec::parse(raw);

    assert!(frontmatter.is_empty());
    assert_eq!(body, raw);
}

#[test]
fn test_tryParse_withUnclosedFence_shouldReportFormatError() {
    let raw = "---\ntitle: Broken\n\nNo closing fence";
    let result = DocumentCodec::try_parse(raw);

    assert!(matches!(result, Err(DocumentError::Format(_))));
    // lenient parse degrades to the raw text
    let (frontmatter, body) = DocumentCodec::parse(raw);
    assert!(frontmatter.is_empty());
    assert_eq!(body, raw);
}

#[test]
fn test_serialize_thenParse_shouldPreserveValuesAndOrder() {
    let (frontmatter, body) = DocumentCodec::parse(common::PROJECT_DOC);
    let rendered = DocumentCodec::serialize(&frontmatter, &body).unwrap();
    let (reparsed, reparsed_body) = DocumentCodec::parse(&rendered);

    assert_eq!(reparsed, frontmatter);
    assert_eq!(reparsed_body, body);
    let keys: Vec<&String> = reparsed.keys().collect();
    assert_eq!(keys, vec!["title", "description", "category", "year", "slug", "tags"]);
}

#[test]
fn test_serialize_withNestedValues_shouldKeepTypes() {
    let mut frontmatter = Frontmatter::new();
    frontmatter.insert("title".to_string(), json!("Nested"));
    frontmatter.insert("draft".to_string(), json!(false));
    frontmatter.insert("order".to_string(), json!(3));
    frontmatter.insert("seo".to_string(), json!({"description": "Meta", "noindex": true}));

    let rendered = DocumentCodec::serialize(&frontmatter, "Body").unwrap();
    let (reparsed, body) = DocumentCodec::parse(&rendered);

    assert_eq!(reparsed["draft"], Value::Bool(false));
    assert_eq!(reparsed["order"], 3);
    assert_eq!(reparsed["seo"]["noindex"], true);
    assert_eq!(body, "Body");
}

#[test]
fn test_contentDocument_read_withMalformedYaml_shouldFallBackToRawBody() {
    let temp_dir = common::create_temp_dir().unwrap();
    let raw = "---\ntitle: [unclosed\n---\n\nBody\n";
    let path = common::create_test_file(temp_dir.path(), "broken.md", raw).unwrap();

    let document = ContentDocument::read(&path).unwrap();

    assert_eq!(document.locale, Locale::En);
    assert!(document.frontmatter.is_empty());
    assert_eq!(document.body, raw);
    assert_eq!(document.source_path, path);
}

#[test]
fn test_translatedDocument_render_shouldUseCodecFormat() {
    let mut frontmatter = Frontmatter::new();
    frontmatter.insert("title".to_string(), json!("Om mig"));
    let document = TranslatedDocument {
        target_locale: Locale::Sv,
        frontmatter,
        body: "Hej\n".to_string(),
    };

    assert_eq!(document.render().unwrap(), "---\ntitle: Om mig\n---\n\nHej\n");
}
