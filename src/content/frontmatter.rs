//! Front-matter parsing
//!
//! Content files carry a `---` delimited YAML metadata block followed by the
//! article body. Parsing is best-effort: a field that fails to coerce falls
//! back to its documented default instead of failing the whole file.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Default estimated reading time in minutes
pub const DEFAULT_READ_TIME: u32 = 5;

/// Front-matter data from a content file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub updated: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(rename = "readTime", deserialize_with = "lenient_read_time")]
    pub read_time: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub featured: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            date: None,
            updated: None,
            category: None,
            tags: Vec::new(),
            read_time: DEFAULT_READ_TIME,
            image: None,
            featured: false,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from a content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let rest = trimmed[3..].trim_start_matches(['\n', '\r']);
        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, using defaults: {}", e);
                (FrontMatter::default(), body)
            }
        }
    }
}

/// Coerce a scalar YAML value into a string
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

/// Parse a calendar date from a string in any accepted form, taking only the
/// date part of datetime strings
fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(value_to_string)
        .and_then(|s| parse_date_str(&s)))
}

/// Handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Sequence(seq)) => seq.into_iter().filter_map(value_to_string).collect(),
        Some(v) => value_to_string(v).map(|s| vec![s]).unwrap_or_default(),
        None => Vec::new(),
    })
}

/// Extract the leading integer from free text like "7 minute read"
fn leading_integer(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn lenient_read_time<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let minutes = match value {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32),
        Some(Value::String(s)) => leading_integer(&s),
        _ => None,
    };
    // Read time is always a positive integer
    Ok(match minutes {
        Some(m) if m >= 1 => m,
        _ => DEFAULT_READ_TIME,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim() == "true",
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let content = r#"---
title: Recovery After Blepharoplasty
description: What to expect week by week.
date: 2024-03-01
updated: 2024-04-12
category: Eye Surgery
tags:
  - recovery
  - eyelid
readTime: 8
image: /images/blepharoplasty.jpg
featured: true
---

Swelling peaks around day three.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Recovery After Blepharoplasty"));
        assert_eq!(fm.date, Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(
            fm.updated,
            Some(NaiveDate::from_ymd_opt(2024, 4, 12).unwrap())
        );
        assert_eq!(fm.category.as_deref(), Some("Eye Surgery"));
        assert_eq!(fm.tags, vec!["recovery", "eyelid"]);
        assert_eq!(fm.read_time, 8);
        assert!(fm.featured);
        assert!(body.contains("Swelling peaks"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let content = "---\ntitle: Bare\n---\nBody.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Bare"));
        assert_eq!(fm.read_time, 5);
        assert!(fm.tags.is_empty());
        assert!(!fm.featured);
        assert!(fm.date.is_none());
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_read_time_from_free_text() {
        let content = "---\nreadTime: 7 minute read\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.read_time, 7);
    }

    #[test]
    fn test_read_time_zero_falls_back() {
        let content = "---\nreadTime: 0\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.read_time, 5);
    }

    #[test]
    fn test_read_time_unparseable_falls_back() {
        let content = "---\nreadTime: quick skim\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.read_time, 5);
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntags: botox\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["botox"]);
    }

    #[test]
    fn test_date_with_time_component() {
        let content = "---\ndate: 2024-01-15 10:30:00\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.date, Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    }

    #[test]
    fn test_malformed_date_is_none() {
        let content = "---\ndate: sometime soon\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert!(fm.date.is_none());
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body with no metadata.";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let content = "---\ntitle: Oops\nno closing fence";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_featured_string_true() {
        let content = "---\nfeatured: \"true\"\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content);
        assert!(fm.featured);
    }
}
