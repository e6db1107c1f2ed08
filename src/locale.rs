use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale utilities for the closed set of site languages
///
/// The site is authored in English and published in a small, fixed set of
/// target languages. Codes are ISO 639-1; human-readable names come from
/// `isolang` so prompts can say "Swedish" rather than "sv".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Sv,
    De,
    Fr,
}

impl Locale {
    /// The locale all content is authored in
    pub const BASE: Locale = Locale::En;

    /// Every supported locale, base first
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Sv, Locale::De, Locale::Fr];

    /// ISO 639-1 code used in file names and config
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sv => "sv",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Parse a locale code, case-insensitively
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized = code.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|locale| locale.code() == normalized)
            .ok_or_else(|| anyhow!("Unsupported locale code: {}", code))
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }

    /// English name of the language, e.g. "Swedish"
    pub fn english_name(&self) -> String {
        Language::from_639_1(self.code())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.code().to_string())
    }

    /// Target locales in declaration order
    pub fn targets() -> impl Iterator<Item = Locale> {
        Self::ALL.into_iter().filter(|locale| !locale.is_base())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// The set of target locales a run generates variants for
///
/// Never contains the base locale; order follows `Locale::ALL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
}

impl LocaleSet {
    /// All supported target locales
    pub fn all_targets() -> Self {
        Self {
            locales: Locale::targets().collect(),
        }
    }

    /// Build a set from codes, rejecting unknown codes and the base locale
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let mut locales = Vec::new();
        for code in codes {
            let locale = Locale::from_code(code.as_ref())?;
            if locale.is_base() {
                return Err(anyhow!(
                    "Base locale '{}' cannot be a translation target",
                    locale
                ));
            }
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        locales.sort();
        Ok(Self { locales })
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        Self::all_targets()
    }
}
