//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,

    // Author identity attached to every post
    pub author: AuthorConfig,

    // Contact form
    pub contact: ContactConfig,

    // Server
    pub server: ServerConfig,
}

/// The practitioner behind the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub role: String,
    pub image: Option<String>,
}

/// Contact form throttling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Max submissions per identity per window
    pub rate_limit: u32,
    /// Fixed window length in seconds
    pub rate_window_secs: u64,
}

/// HTTP server defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Plastic Love".to_string(),
            description: "Evidence-based plastic surgery insights from Seoul".to_string(),
            url: "https://plasticluv.com".to_string(),
            content_dir: "content".to_string(),
            author: AuthorConfig::default(),
            contact: ContactConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Dr. Yongwoo Lee".to_string(),
            role: "Board-Certified Plastic Surgeon".to_string(),
            image: Some("/images/dr-lee-avatar.jpg".to_string()),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            rate_limit: 5,
            rate_window_secs: 60 * 60,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Plastic Love");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.contact.rate_limit, 5);
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Clinic Blog
url: https://clinic.example
author:
  name: Dr. Min
contact:
  rate_limit: 2
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Clinic Blog");
        assert_eq!(config.url, "https://clinic.example");
        assert_eq!(config.author.name, "Dr. Min");
        // Unspecified nested fields keep their defaults
        assert_eq!(config.author.role, "Board-Certified Plastic Surgeon");
        assert_eq!(config.contact.rate_limit, 2);
        assert_eq!(config.contact.rate_window_secs, 3600);
    }
}
