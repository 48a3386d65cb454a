//! List site content

use anyhow::Result;

use crate::locale::Locale;
use crate::Site;

/// List site content by type for one locale
pub fn run(site: &Site, locale: Locale, content_type: &str) -> Result<()> {
    let repo = site.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repo.posts(locale);
            println!("Posts in {} ({}):", locale, posts.len());
            for post in posts.iter() {
                let marker = if post.featured { " *" } else { "" };
                println!(
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    marker
                );
            }
        }
        "category" | "categories" => {
            let mut categories: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in repo.posts(locale).iter() {
                *categories.entry(post.category.clone()).or_insert(0) += 1;
            }
            println!("Categories in {} ({}):", locale, categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        "tag" | "tags" => {
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in repo.posts(locale).iter() {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags in {} ({}):", locale, tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        other => {
            println!(
                "Unknown type: {}. Use post, category, or tag.",
                other
            );
        }
    }

    Ok(())
}
