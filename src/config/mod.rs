//! Configuration module

mod site;

pub use site::{AuthorConfig, ContactConfig, ServerConfig, SiteConfig};
