//! Content sources
//!
//! The repository resolves posts through a [`ContentSource`] rather than the
//! filesystem directly, so fallback/ordering/filter logic can be exercised
//! against an in-memory source in tests.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::locale::Locale;

/// A store of raw content keyed by (locale, slug)
pub trait ContentSource: Send + Sync {
    /// Enumerate the slugs available for a locale, in source order.
    /// Empty when the locale has no content of its own.
    fn list_slugs(&self, locale: Locale) -> Vec<String>;

    /// Read the raw text of one item, or None when the locale has no copy
    fn read_raw(&self, slug: &str, locale: Locale) -> Option<String>;
}

/// Filesystem-backed source: one directory per locale, one file per slug
/// (`<root>/<locale>/<slug>.mdx`)
pub struct FsSource {
    root: PathBuf,
}

const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Locate the content file for a slug within one locale directory
    fn file_for(&self, slug: &str, locale: Locale) -> Option<PathBuf> {
        CONTENT_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(locale.as_str()).join(format!("{slug}.{ext}")))
            .find(|p| p.is_file())
    }
}

impl ContentSource for FsSource {
    fn list_slugs(&self, locale: Locale) -> Vec<String> {
        let dir = self.root.join(locale.as_str());
        if !dir.is_dir() {
            // A missing locale directory is not an error
            return Vec::new();
        }

        let mut slugs: Vec<String> = WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path()
                        .extension()
                        .and_then(|x| x.to_str())
                        .map(|x| CONTENT_EXTENSIONS.contains(&x))
                        .unwrap_or(false)
            })
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .collect();

        // Directory enumeration order is platform-dependent; fix it
        slugs.sort();
        slugs.dedup();
        slugs
    }

    fn read_raw(&self, slug: &str, locale: Locale) -> Option<String> {
        let path = self.file_for(slug, locale)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!("Failed to read content file {:?}: {}", path, e);
                None
            }
        }
    }
}
