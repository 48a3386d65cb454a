//! Content module - models, parsing, sources, and the repository

mod frontmatter;
mod post;
pub mod repository;
pub mod source;

pub use frontmatter::{FrontMatter, DEFAULT_READ_TIME};
pub use post::{Author, Post, PostMeta};
pub use repository::{ContentError, ContentRepository, RELATED_LIMIT, SEARCH_LIMIT};
pub use source::{ContentSource, FsSource};
