/*!
 * Static translation memory used for offline and fallback translation.
 *
 * Lookups are exact matches on the untranslated text. A miss returns `None`;
 * callers return the input unchanged rather than inventing text.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::locale::Locale;

/// Built-in phrases for the site chrome and common headings
const BUILTIN_SV: &[(&str, &str)] = &[
    ("About Me", "Om mig"),
    ("About", "Om"),
    ("Home", "Hem"),
    ("Blog", "Blogg"),
    ("Portfolio", "Portfolio"),
    ("Projects", "Projekt"),
    ("Contact", "Kontakt"),
    ("Contact Me", "Kontakta mig"),
    ("Read more", "Läs mer"),
    ("View project", "Visa projekt"),
    ("Latest posts", "Senaste inläggen"),
    ("Skills", "Färdigheter"),
    ("Experience", "Erfarenhet"),
    ("Education", "Utbildning"),
    ("Get in touch", "Hör av dig"),
    ("Back to blog", "Tillbaka till bloggen"),
];

const BUILTIN_DE: &[(&str, &str)] = &[
    ("About Me", "Über mich"),
    ("About", "Über"),
    ("Home", "Startseite"),
    ("Blog", "Blog"),
    ("Portfolio", "Portfolio"),
    ("Projects", "Projekte"),
    ("Contact", "Kontakt"),
    ("Contact Me", "Kontaktiere mich"),
    ("Read more", "Weiterlesen"),
    ("View project", "Projekt ansehen"),
    ("Latest posts", "Neueste Beiträge"),
    ("Skills", "Fähigkeiten"),
    ("Experience", "Erfahrung"),
    ("Education", "Ausbildung"),
    ("Get in touch", "Kontakt aufnehmen"),
    ("Back to blog", "Zurück zum Blog"),
];

const BUILTIN_FR: &[(&str, &str)] = &[
    ("About Me", "À propos de moi"),
    ("About", "À propos"),
    ("Home", "Accueil"),
    ("Blog", "Blog"),
    ("Portfolio", "Portfolio"),
    ("Projects", "Projets"),
    ("Contact", "Contact"),
    ("Contact Me", "Me contacter"),
    ("Read more", "Lire la suite"),
    ("View project", "Voir le projet"),
    ("Latest posts", "Derniers articles"),
    ("Skills", "Compétences"),
    ("Experience", "Expérience"),
    ("Education", "Formation"),
    ("Get in touch", "Prendre contact"),
    ("Back to blog", "Retour au blog"),
];

/// Mapping `locale -> (source text -> translated text)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationMemory {
    entries: HashMap<Locale, HashMap<String, String>>,
}

impl TranslationMemory {
    /// Empty memory; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Memory preloaded with the built-in phrase tables
    pub fn builtin() -> Self {
        let mut memory = Self::empty();
        for (locale, table) in [
            (Locale::Sv, BUILTIN_SV),
            (Locale::De, BUILTIN_DE),
            (Locale::Fr, BUILTIN_FR),
        ] {
            for (source, translated) in table {
                memory.insert(locale, *source, *translated);
            }
        }
        memory
    }

    pub fn insert(&mut self, locale: Locale, source: impl Into<String>, translated: impl Into<String>) {
        self.entries
            .entry(locale)
            .or_default()
            .insert(source.into(), translated.into());
    }

    /// Exact-match lookup
    pub fn lookup(&self, text: &str, locale: Locale) -> Option<&str> {
        self.entries
            .get(&locale)
            .and_then(|table| table.get(text))
            .map(String::as_str)
    }

    /// Merge entries from a JSON file shaped `{ "<locale>": { "<source>": "<translation>" } }`.
    /// Unknown locales are ignored with a warning. Returns the number of merged entries.
    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let content = FileManager::read_to_string(&path)?;
        let tables: HashMap<String, HashMap<String, String>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translation memory: {:?}", path.as_ref()))?;

        let mut merged = 0;
        for (code, table) in tables {
            let locale = match Locale::from_code(&code) {
                Ok(locale) if !locale.is_base() => locale,
                _ => {
                    warn!(
                        "Ignoring translation memory entries for unsupported locale '{}' in {:?}",
                        code,
                        path.as_ref()
                    );
                    continue;
                }
            };
            for (source, translated) in table {
                self.insert(locale, source, translated);
                merged += 1;
            }
        }

        debug!("Merged {} translation memory entries from {:?}", merged, path.as_ref());
        Ok(merged)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
