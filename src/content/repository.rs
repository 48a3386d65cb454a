//! Content repository
//!
//! Translates a locale into an ordered, de-duplicated collection of fully
//! resolved posts, with locale fallback to the default locale and derived
//! views (metadata projection, category filter, related posts, search,
//! featured selection).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::frontmatter::FrontMatter;
use super::post::{Author, Post, PostMeta, FALLBACK_DATE};
use super::source::ContentSource;
use crate::locale::Locale;

/// Maximum number of search results returned
pub const SEARCH_LIMIT: usize = 10;

/// Category value that bypasses the category filter (exact, case-sensitive)
pub const ALL_CATEGORIES: &str = "All";

/// Default number of related posts
pub const RELATED_LIMIT: usize = 3;

/// Content resolution errors surfaced to callers
#[derive(Debug, Error)]
pub enum ContentError {
    /// The slug exists neither in the requested locale nor in the default one
    #[error("no content for slug '{slug}' in locale '{locale}'")]
    NotFound { slug: String, locale: Locale },
}

/// Read path over a [`ContentSource`] with per-locale memoization
///
/// Content is immutable for the life of a deployment, so each locale's
/// resolved list is loaded once and cached. The cache is loaded under the
/// lock, so concurrent first access stays idempotent.
pub struct ContentRepository<S> {
    source: S,
    author: Author,
    cache: Mutex<HashMap<Locale, Arc<Vec<Post>>>>,
}

impl<S: ContentSource> ContentRepository<S> {
    pub fn new(source: S, author: Author) -> Self {
        Self {
            source,
            author,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// All slugs available for a locale, falling back to the default
    /// locale's set when the locale has no content of its own
    pub fn slugs(&self, locale: Locale) -> Vec<String> {
        let own = self.source.list_slugs(locale);
        if !own.is_empty() || locale == Locale::DEFAULT {
            return own;
        }
        self.source.list_slugs(Locale::DEFAULT)
    }

    /// Resolve one post: the locale's own copy first, then the default
    /// locale's copy, else NotFound
    pub fn post(&self, slug: &str, locale: Locale) -> Result<Post, ContentError> {
        let raw = self
            .source
            .read_raw(slug, locale)
            .or_else(|| {
                if locale == Locale::DEFAULT {
                    None
                } else {
                    self.source.read_raw(slug, Locale::DEFAULT)
                }
            })
            .ok_or_else(|| ContentError::NotFound {
                slug: slug.to_string(),
                locale,
            })?;

        Ok(self.parse_post(slug, &raw))
    }

    /// Every post for a locale, newest first
    ///
    /// Date ties keep slug enumeration order (stable sort). Unresolvable
    /// slugs are skipped with a warning; given the fallback guarantee they
    /// should not occur.
    pub fn posts(&self, locale: Locale) -> Arc<Vec<Post>> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(posts) = cache.get(&locale) {
            return Arc::clone(posts);
        }

        let mut posts = Vec::new();
        for slug in self.slugs(locale) {
            match self.post(&slug, locale) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Skipping unresolvable content: {}", e),
            }
        }
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let posts = Arc::new(posts);
        cache.insert(locale, Arc::clone(&posts));
        posts
    }

    /// Metadata projections in `posts` order
    pub fn post_metas(&self, locale: Locale) -> Vec<PostMeta> {
        self.posts(locale).iter().map(Post::meta).collect()
    }

    /// The first featured post, else the freshest post overall, else None
    pub fn featured_post(&self, locale: Locale) -> Option<Post> {
        let posts = self.posts(locale);
        posts
            .iter()
            .find(|p| p.featured)
            .or_else(|| posts.first())
            .cloned()
    }

    /// Metas filtered by exact category match; the "All" sentinel returns
    /// everything unfiltered
    pub fn posts_by_category(&self, category: &str, locale: Locale) -> Vec<PostMeta> {
        let metas = self.post_metas(locale);
        if category == ALL_CATEGORIES {
            return metas;
        }
        metas.into_iter().filter(|m| m.category == category).collect()
    }

    /// Same-category posts excluding the given slug, newest first,
    /// truncated to `limit`
    pub fn related_posts(
        &self,
        slug: &str,
        category: &str,
        locale: Locale,
        limit: usize,
    ) -> Vec<PostMeta> {
        self.post_metas(locale)
            .into_iter()
            .filter(|m| m.slug != slug)
            .filter(|m| m.category == category)
            .take(limit)
            .collect()
    }

    /// Case-insensitive substring search over title, description, category,
    /// and tags; empty query yields nothing; capped at [`SEARCH_LIMIT`]
    pub fn search_posts(&self, query: &str, locale: Locale) -> Vec<PostMeta> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.post_metas(locale)
            .into_iter()
            .filter(|m| m.matches_query(&query))
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// Parse raw content into a post, filling defaults for missing or
    /// malformed fields
    fn parse_post(&self, slug: &str, raw: &str) -> Post {
        let (fm, body) = FrontMatter::parse(raw);

        Post {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_else(|| slug.to_string()),
            description: fm.description.unwrap_or_default(),
            date: fm.date.unwrap_or(FALLBACK_DATE),
            updated: fm.updated,
            category: fm.category.unwrap_or_default(),
            tags: fm.tags,
            read_time: fm.read_time,
            image: fm.image,
            featured: fm.featured,
            body: body.to_string(),
            author: self.author.clone(),
        }
    }
}
