/*!
 * Structure-preserving translation of JSON data files.
 *
 * Only subtrees under allow-listed top-level keys (navigation, metadata) are
 * visited, and inside them only strings held by human-text keys are
 * translated. Everything else, including icon names and hrefs that happen to be
 * strings, is copied verbatim. The output always has the same shape as the
 * input: same key sets in the same order, same array lengths.
 */

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use crate::field_classifier::{FieldAction, FieldClassifier};
use crate::locale::Locale;
use crate::translation::{ContentKind, TranslationService};

/// Which parts of a data file carry human text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTranslationPolicy {
    roots: Vec<String>,
    text_keys: HashSet<String>,
}

impl JsonTranslationPolicy {
    pub fn new<R, K>(roots: R, text_keys: K) -> Self
    where
        R: IntoIterator<Item = String>,
        K: IntoIterator<Item = String>,
    {
        Self {
            roots: roots.into_iter().collect(),
            text_keys: text_keys.into_iter().collect(),
        }
    }

    pub fn is_root(&self, key: &str) -> bool {
        self.roots.iter().any(|root| root == key)
    }

    pub fn is_text_key(&self, key: &str) -> bool {
        self.text_keys.contains(key)
    }
}

impl Default for JsonTranslationPolicy {
    fn default() -> Self {
        Self::new(
            ["navigation", "metadata"].map(String::from),
            [
                "label", "title", "description", "subtitle", "tagline", "summary", "text",
                "heading", "cta", "name",
            ]
            .map(String::from),
        )
    }
}

/// Recursive JSON translator
#[derive(Debug, Clone, Default)]
pub struct JsonTreeTranslator {
    policy: JsonTranslationPolicy,
    classifier: FieldClassifier,
}

impl JsonTreeTranslator {
    pub fn new(policy: JsonTranslationPolicy, classifier: FieldClassifier) -> Self {
        Self { policy, classifier }
    }

    /// Translate a whole data file for one locale
    pub async fn translate_tree(
        &self,
        node: &Value,
        locale: Locale,
        translator: &TranslationService,
    ) -> Value {
        let Value::Object(map) = node else {
            return node.clone();
        };

        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let translated = if self.policy.is_root(key) {
                self.translate_node(value, None, locale, translator).await
            } else {
                value.clone()
            };
            out.insert(key.clone(), translated);
        }
        Value::Object(out)
    }

    /// Translate a value inside an allow-listed subtree.
    /// `owner` is the nearest object key holding this value.
    fn translate_node<'a>(
        &'a self,
        node: &'a Value,
        owner: Option<&'a str>,
        locale: Locale,
        translator: &'a TranslationService,
    ) -> Pin<Box<dyn Future<Output = Value> + 'a>> {
        Box::pin(async move {
            match node {
                Value::Object(map) => {
                    let mut out = Map::with_capacity(map.len());
                    for (key, value) in map {
                        let translated = self.translate_node(value, Some(key.as_str()), locale, translator).await;
                        out.insert(key.clone(), translated);
                    }
                    Value::Object(out)
                }
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.translate_node(item, owner, locale, translator).await);
                    }
                    Value::Array(out)
                }
                Value::String(text) if self.is_eligible(owner, text) => Value::String(
                    translator.translate(text, locale, ContentKind::Frontmatter).await,
                ),
                other => other.clone(),
            }
        })
    }

    fn is_eligible(&self, owner: Option<&str>, text: &str) -> bool {
        match owner {
            Some(key) => {
                self.policy.is_text_key(key)
                    && self.classifier.classify(key) == FieldAction::Translate
                    && !text.trim().is_empty()
            }
            None => false,
        }
    }
}
