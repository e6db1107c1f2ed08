use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::locale::Locale;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing it or creating it whole
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Maps a base-locale file to its locale variants on disk
///
/// `content/blog/hello.mdx` + `sv` → `content/blog/hello.sv.mdx`. Existence is
/// checked against the filesystem on every call; nothing is cached, so a
/// variant that failed to write is retried on the next run.
pub struct LocaleVariantResolver;

impl LocaleVariantResolver {
    // @generates: Locale-suffixed sibling path
    pub fn variant_path<P: AsRef<Path>>(base_path: P, locale: Locale) -> PathBuf {
        let base_path = base_path.as_ref();
        let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();

        let mut file_name = stem.to_string();
        file_name.push('.');
        file_name.push_str(locale.code());
        if let Some(ext) = base_path.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }

        base_path.with_file_name(file_name)
    }

    // @checks: Variant already generated
    pub fn variant_exists<P: AsRef<Path>>(base_path: P, locale: Locale) -> bool {
        FileManager::file_exists(Self::variant_path(base_path, locale))
    }
}
