//! Syndication output - per-locale RSS feed and the sitemap

use chrono::NaiveTime;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::locale::Locale;

/// Render the RSS 2.0 feed for one locale
///
/// Items inherit the repository's newest-first ordering.
pub fn render_rss(config: &SiteConfig, locale: Locale, posts: &[Post]) -> String {
    let site = config.url.trim_end_matches('/');

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(
        r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom">"#,
    );
    feed.push_str("\n  <channel>\n");
    feed.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&config.title)
    ));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!("    <link>{}/{}</link>\n", site, locale));
    feed.push_str(&format!("    <language>{}</language>\n", locale));
    feed.push_str(&format!(
        "    <atom:link href=\"{}/api/rss/{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        site, locale
    ));

    for post in posts {
        let link = format!("{}/{}/blog/{}", site, locale, post.slug);
        let pub_date = post
            .date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc2822();

        feed.push_str("    <item>\n");
        feed.push_str(&format!(
            "      <title><![CDATA[{}]]></title>\n",
            post.title
        ));
        feed.push_str(&format!(
            "      <description><![CDATA[{}]]></description>\n",
            post.description
        ));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        feed.push_str(&format!("      <pubDate>{}</pubDate>\n", pub_date));
        feed.push_str(&format!(
            "      <category>{}</category>\n",
            escape_xml(&post.category)
        ));
        feed.push_str(&format!(
            "      <dc:creator>{}</dc:creator>\n",
            escape_xml(&post.author.name)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n</rss>\n");
    feed
}

/// Render the sitemap across all locales
///
/// Home and about pages plus every default-locale slug, each URL carrying
/// hreflang alternates for the full locale set.
pub fn render_sitemap(config: &SiteConfig, slugs: &[String]) -> String {
    let site = config.url.trim_end_matches('/');
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut map = String::new();
    map.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    map.push('\n');
    map.push_str(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#,
    );
    map.push('\n');

    push_urls(&mut map, &today, |l| format!("{}/{}", site, l), "weekly", "1.0");
    push_urls(
        &mut map,
        &today,
        |l| format!("{}/{}/about", site, l),
        "monthly",
        "0.7",
    );
    for slug in slugs {
        push_urls(
            &mut map,
            &today,
            |l| format!("{}/{}/blog/{}", site, l, slug),
            "monthly",
            "0.8",
        );
    }

    map.push_str("</urlset>\n");
    map
}

/// Append one logical page to the sitemap: a `<url>` entry per locale, each
/// carrying alternates for the full locale set
fn push_urls(
    map: &mut String,
    today: &str,
    path_for: impl Fn(Locale) -> String,
    freq: &str,
    priority: &str,
) {
    for locale in Locale::ALL {
        map.push_str("  <url>\n");
        map.push_str(&format!("    <loc>{}</loc>\n", path_for(locale)));
        map.push_str(&format!("    <lastmod>{}</lastmod>\n", today));
        map.push_str(&format!("    <changefreq>{}</changefreq>\n", freq));
        map.push_str(&format!("    <priority>{}</priority>\n", priority));
        for alt in Locale::ALL {
            map.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                alt,
                path_for(alt)
            ));
        }
        map.push_str("  </url>\n");
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Author;
    use chrono::NaiveDate;

    fn post(slug: &str, title: &str, date: NaiveDate) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("About {title}."),
            date,
            updated: None,
            category: "Recovery & Care".to_string(),
            tags: vec![],
            read_time: 5,
            image: None,
            featured: false,
            body: String::new(),
            author: Author {
                name: "Dr. Yongwoo Lee".to_string(),
                role: "Board-Certified Plastic Surgeon".to_string(),
                image: None,
            },
        }
    }

    #[test]
    fn test_rss_structure() {
        let config = SiteConfig::default();
        let posts = vec![
            post("newer", "Newer Post", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            post("older", "Older Post", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        ];
        let feed = render_rss(&config, Locale::Ko, &posts);

        assert!(feed.contains("<language>ko</language>"));
        assert!(feed.contains("https://plasticluv.com/ko/blog/newer"));
        assert!(feed.contains("<![CDATA[Newer Post]]>"));
        assert!(feed.contains("<dc:creator>Dr. Yongwoo Lee</dc:creator>"));
        // Category ampersand is escaped
        assert!(feed.contains("Recovery &amp; Care"));
        // Newest item first
        assert!(feed.find("newer").unwrap() < feed.find("older").unwrap());
    }

    #[test]
    fn test_sitemap_enumerates_slugs_across_locales() {
        let config = SiteConfig::default();
        let slugs = vec!["lift".to_string(), "peel".to_string()];
        let map = render_sitemap(&config, &slugs);

        for locale in Locale::ALL {
            assert!(map.contains(&format!("<loc>https://plasticluv.com/{}</loc>", locale)));
            assert!(map.contains(&format!(
                "<loc>https://plasticluv.com/{}/blog/lift</loc>",
                locale
            )));
        }
        assert!(map.contains("hreflang=\"ar\""));
        assert!(map.contains("/en/about"));
        // 2 fixed pages + 2 slugs, each across 9 locales
        assert_eq!(map.matches("<url>").count(), 4 * Locale::ALL.len());
    }
}
