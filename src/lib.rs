//! plasticluv: content engine for a localized clinic blog
//!
//! Resolves per-locale content files with default-locale fallback and serves
//! list/filter/search/related views, RSS feeds, a sitemap, and the contact
//! form endpoint consumed by page renderers.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod feed;
pub mod locale;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{Author, ContentRepository, FsSource};

/// The site: configuration plus content location
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content root (one directory per locale)
    pub content_dir: std::path::PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build a repository over this site's content directory
    pub fn repository(&self) -> ContentRepository<FsSource> {
        let author = Author {
            name: self.config.author.name.clone(),
            role: self.config.author.role.clone(),
            image: self.config.author.image.clone(),
        };
        ContentRepository::new(FsSource::new(&self.content_dir), author)
    }
}
