/*!
 * Tests for the frontmatter translation policy
 */

use serde_json::json;

use locapipe::field_classifier::{DEFAULT_SKIP_KEYS, FieldAction, FieldClassifier, SkipSet};

#[test]
fn test_classify_withStructuralKeys_shouldSkip() {
    let classifier = FieldClassifier::default();

    for key in ["slug", "date", "category", "year", "tags", "image", "tech", "github"] {
        assert_eq!(classifier.classify(key), FieldAction::Skip, "key {}", key);
    }
}

#[test]
fn test_classify_withHumanTextKeys_shouldTranslate() {
    let classifier = FieldClassifier::default();

    for key in ["title", "description", "excerpt", "summary", "subtitle"] {
        assert_eq!(classifier.classify(key), FieldAction::Translate, "key {}", key);
    }
}

#[test]
fn test_shouldTranslate_withNonStringValues_shouldBeFalse() {
    let classifier = FieldClassifier::default();

    assert!(classifier.should_translate("title", &json!("About Me")));
    assert!(!classifier.should_translate("title", &json!("   ")));
    assert!(!classifier.should_translate("title", &json!(42)));
    assert!(!classifier.should_translate("title", &json!(["a", "b"])));
    assert!(!classifier.should_translate("title", &json!({"nested": "text"})));
    assert!(!classifier.should_translate("category", &json!("tech")));
}

#[test]
fn test_skipSet_withExtraKeys_shouldExtendDefaults() {
    let skip_set = SkipSet::default().with_extra(["subtitle"]);
    let classifier = FieldClassifier::new(skip_set);

    assert_eq!(classifier.classify("subtitle"), FieldAction::Skip);
    assert_eq!(classifier.classify("slug"), FieldAction::Skip);
    assert_eq!(classifier.skip_set().len(), DEFAULT_SKIP_KEYS.len() + 1);
}
