//! JSON/XML API server
//!
//! Exposes the repository's read path to page renderers along with the
//! syndication documents and the contact form endpoint.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::contact::{
    ContactError, ContactSink, FixedWindowLimiter, Inquiry, LogSink, RateLimiter,
};
use crate::content::{ContentError, ContentRepository, FsSource, Post, PostMeta, RELATED_LIMIT};
use crate::locale::Locale;
use crate::Site;

/// Shared server state
pub struct AppState {
    repo: ContentRepository<FsSource>,
    config: crate::config::SiteConfig,
    limiter: Box<dyn RateLimiter>,
    sink: Box<dyn ContactSink>,
}

impl AppState {
    pub fn new(
        site: &Site,
        limiter: Box<dyn RateLimiter>,
        sink: Box<dyn ContactSink>,
    ) -> Self {
        Self {
            repo: site.repository(),
            config: site.config.clone(),
            limiter,
            sink,
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/rss/:lang", get(rss))
        .route("/sitemap.xml", get(sitemap))
        .route("/api/posts/:lang", get(list_posts))
        .route("/api/posts/:lang/:slug", get(get_post))
        .route("/api/featured/:lang", get(featured))
        .route("/api/contact", post(contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let limiter = FixedWindowLimiter::new(
        site.config.contact.rate_limit,
        Duration::from_secs(site.config.contact.rate_window_secs),
    );
    let state = Arc::new(AppState::new(site, Box::new(limiter), Box::new(LogSink)));
    let app = router(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("API server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn parse_locale(lang: &str) -> Result<Locale, Response> {
    lang.parse::<Locale>()
        .map_err(|_| error_json(StatusCode::NOT_FOUND, "Unknown locale"))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    lang: Option<String>,
}

/// Normalized search hit, the only fields the search overlay needs
#[derive(Serialize)]
struct SearchHit {
    slug: String,
    title: String,
    description: String,
    category: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let locale = match params.lang.as_deref() {
        Some(lang) => match parse_locale(lang) {
            Ok(locale) => locale,
            Err(resp) => return resp,
        },
        None => Locale::DEFAULT,
    };

    let hits: Vec<SearchHit> = state
        .repo
        .search_posts(&params.q, locale)
        .into_iter()
        .map(|m| SearchHit {
            slug: m.slug,
            title: m.title,
            description: m.description,
            category: m.category,
        })
        .collect();

    Json(hits).into_response()
}

async fn rss(State(state): State<Arc<AppState>>, Path(lang): Path<String>) -> Response {
    let locale = match parse_locale(&lang) {
        Ok(locale) => locale,
        Err(resp) => return resp,
    };

    let posts = state.repo.posts(locale);
    let feed = crate::feed::render_rss(&state.config, locale, &posts);

    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (
                header::CACHE_CONTROL,
                "s-maxage=3600, stale-while-revalidate",
            ),
        ],
        feed,
    )
        .into_response()
}

async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    let slugs = state.repo.slugs(Locale::DEFAULT);
    let map = crate::feed::render_sitemap(&state.config, &slugs);

    ([(header::CONTENT_TYPE, "application/xml")], map).into_response()
}

#[derive(Deserialize)]
struct ListParams {
    category: Option<String>,
}

async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let locale = match parse_locale(&lang) {
        Ok(locale) => locale,
        Err(resp) => return resp,
    };

    let metas = match params.category {
        Some(category) => state.repo.posts_by_category(&category, locale),
        None => state.repo.post_metas(locale),
    };

    Json(metas).into_response()
}

#[derive(Serialize)]
struct PostWithRelated {
    post: Post,
    related: Vec<PostMeta>,
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((lang, slug)): Path<(String, String)>,
) -> Response {
    let locale = match parse_locale(&lang) {
        Ok(locale) => locale,
        Err(resp) => return resp,
    };

    match state.repo.post(&slug, locale) {
        Ok(post) => {
            let related = state
                .repo
                .related_posts(&post.slug, &post.category, locale, RELATED_LIMIT);
            Json(PostWithRelated { post, related }).into_response()
        }
        Err(e @ ContentError::NotFound { .. }) => {
            error_json(StatusCode::NOT_FOUND, &e.to_string())
        }
    }
}

async fn featured(State(state): State<Arc<AppState>>, Path(lang): Path<String>) -> Response {
    let locale = match parse_locale(&lang) {
        Ok(locale) => locale,
        Err(resp) => return resp,
    };

    match state.repo.featured_post(locale) {
        Some(post) => Json(post).into_response(),
        None => error_json(StatusCode::NOT_FOUND, "No content for locale"),
    }
}

/// Submitter identity for rate limiting: first x-forwarded-for hop,
/// else "unknown"
fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(inquiry): Json<Inquiry>,
) -> Response {
    let identity = client_identity(&headers);
    if !state.limiter.check(&identity) {
        return error_json(
            StatusCode::TOO_MANY_REQUESTS,
            &ContactError::RateLimited.to_string(),
        );
    }

    if let Err(e) = inquiry.validate() {
        return error_json(StatusCode::BAD_REQUEST, &e.to_string());
    }

    match state.sink.deliver(&inquiry) {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => {
            tracing::error!("Contact form delivery error: {}", e);
            error_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process inquiry.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_identity_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_identity(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_identity_fallback() {
        assert_eq!(client_identity(&HeaderMap::new()), "unknown");
    }
}
