/*!
 * Discovery of base-locale content documents.
 *
 * Walks a content root and yields document paths lazily. Files whose stem
 * ends in `.<locale>` are generated variants and are never yielded, which keeps
 * a later run from treating its own output as new source material.
 */

use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::locale::Locale;

/// Default document extensions
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Matches stems like `hello.sv` for every supported locale
pub fn locale_suffix_regex() -> Regex {
    let codes: Vec<&str> = Locale::ALL.iter().map(|locale| locale.code()).collect();
    Regex::new(&format!(r"^.+\.({})$", codes.join("|"))).expect("locale codes are plain ASCII")
}

/// True if the file name denotes a locale variant, e.g. `hello.sv.md`
pub fn is_locale_variant(path: &Path, suffix: &Regex) -> bool {
    path.file_stem()
        .map(|stem| suffix.is_match(&stem.to_string_lossy()))
        .unwrap_or(false)
}

/// Lazy, finite, non-restartable sequence of base-locale document paths
pub struct ContentDiscovery {
    walker: walkdir::IntoIter,
    extensions: Vec<String>,
    locale_suffix: Regex,
}

impl ContentDiscovery {
    /// Walk `root` for documents with the default extensions
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_extensions(root, DEFAULT_EXTENSIONS)
    }

    /// Walk `root` for documents with the given extensions (without dots)
    pub fn with_extensions<P: AsRef<Path>, S: AsRef<str>>(root: P, extensions: &[S]) -> Self {
        let walker = WalkDir::new(root.as_ref())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        Self {
            walker,
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
            locale_suffix: locale_suffix_regex(),
        }
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

impl Iterator for ContentDiscovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    // walkdir skips the unreadable subtree and carries on with siblings
                    warn!("Skipping unreadable path {:?}: {}", e.path(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.has_document_extension(path) {
                continue;
            }
            if is_locale_variant(path, &self.locale_suffix) {
                debug!("Ignoring locale variant {:?}", path);
                continue;
            }

            return Some(entry.into_path());
        }
    }
}
