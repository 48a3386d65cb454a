//! Post model and metadata projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel date for items whose front-matter carries no usable date.
/// Lands at the end of the newest-first listing.
pub const FALLBACK_DATE: NaiveDate = NaiveDate::MIN;

/// The practitioner identity attached to every post
///
/// Not stored per item; synthesized from site configuration at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A fully-resolved content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable, locale-independent identifier
    pub slug: String,

    /// Display title, locale-specific
    pub title: String,

    /// Short summary, locale-specific
    pub description: String,

    /// Publication date (calendar date, no time component)
    pub date: NaiveDate,

    /// Last revision date; absent means never revised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<NaiveDate>,

    /// Category tag; opaque to the engine, not validated against a taxonomy
    pub category: String,

    /// Free-text labels, insertion order preserved
    pub tags: Vec<String>,

    /// Estimated minutes to read, always >= 1
    #[serde(rename = "readTime")]
    pub read_time: u32,

    /// Cover illustration reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Whether this is the item a locale's homepage highlights
    pub featured: bool,

    /// Full article body in source markup
    pub body: String,

    /// Fixed practitioner identity
    pub author: Author,
}

/// Metadata-only projection of a post, used for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<NaiveDate>,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(rename = "readTime")]
    pub read_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub featured: bool,
}

impl Post {
    /// Project to metadata, dropping body and author
    pub fn meta(&self) -> PostMeta {
        PostMeta {
            slug: self.slug.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            updated: self.updated,
            category: self.category.clone(),
            tags: self.tags.clone(),
            read_time: self.read_time,
            image: self.image.clone(),
            featured: self.featured,
        }
    }
}

impl PostMeta {
    /// Case-insensitive substring match against title, description,
    /// category, or any tag
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
            || self.category.to_lowercase().contains(query_lower)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(query_lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> PostMeta {
        PostMeta {
            slug: "thread-lift-basics".to_string(),
            title: "Thread Lift Basics".to_string(),
            description: "A non-surgical option for mild sagging.".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            updated: None,
            category: "Anti-Aging".to_string(),
            tags: vec!["threads".to_string(), "PDO".to_string()],
            read_time: 6,
            image: None,
            featured: false,
        }
    }

    #[test]
    fn test_matches_query_fields() {
        let meta = sample_meta();
        assert!(meta.matches_query("thread lift"));
        assert!(meta.matches_query("sagging"));
        assert!(meta.matches_query("anti-aging"));
        assert!(meta.matches_query("pdo"));
        assert!(!meta.matches_query("rhinoplasty"));
    }

    #[test]
    fn test_date_serializes_as_plain_date() {
        let meta = sample_meta();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["date"], "2024-05-02");
        assert_eq!(json["readTime"], 6);
        assert!(json.get("updated").is_none());
    }
}
