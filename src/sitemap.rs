//! Sitemap and robots policy generation.
//!
//! Builds the two concrete SEO artifacts the site ships as static files:
//! the multilingual sitemap (languages × pages, each URL carrying the full
//! alternate-link set) and the robots.txt crawler policy. Output is plain
//! text; the caller writes it wherever it needs to go.

use crate::i18n::LocaleRegistry;
use crate::seo::{hreflang_alternates, language_prefix};
use chrono::NaiveDate;

/// A page included in the sitemap, with its crawl hints.
#[derive(Debug, Clone)]
pub struct Page {
    pub path: &'static str,
    pub priority: &'static str,
    pub changefreq: &'static str,
}

/// The fixed marketing page list.
pub const PAGES: &[Page] = &[
    Page { path: "", priority: "1.0", changefreq: "daily" },
    Page { path: "/services", priority: "0.9", changefreq: "weekly" },
    Page { path: "/pricing", priority: "0.8", changefreq: "weekly" },
    Page { path: "/track", priority: "0.7", changefreq: "daily" },
    Page { path: "/contact", priority: "0.6", changefreq: "monthly" },
    Page { path: "/about", priority: "0.5", changefreq: "monthly" },
];

/// Escape the XML entities that may appear in a URL or text node.
fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Generate the multilingual sitemap over the fixed page list.
///
/// See [`generate_sitemap_for`] for the shape of the output.
pub fn generate_sitemap(registry: &LocaleRegistry, base_url: &str, date: NaiveDate) -> String {
    generate_sitemap_for(registry, base_url, PAGES, date)
}

/// Generate a sitemap for an explicit page list.
///
/// Emits one `<url>` per (language, page) pair in allow-list then page
/// order, so the document holds exactly `languages × pages` entries. Every
/// entry carries `lastmod` (the supplied date), the page's crawl hints,
/// and one alternate link per language plus `x-default`. For fixed inputs
/// the output is byte-stable apart from the embedded date.
pub fn generate_sitemap_for(
    registry: &LocaleRegistry,
    base_url: &str,
    pages: &[Page],
    date: NaiveDate,
) -> String {
    let lastmod = date.format("%Y-%m-%d").to_string();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for language in registry.languages() {
        let prefix = language_prefix(language.code);
        for page in pages {
            let loc = format!("{}{}{}", base_url, prefix, page.path);

            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                page.changefreq
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", page.priority));

            for alternate in hreflang_alternates(registry, base_url, page.path) {
                xml.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
                    alternate.hreflang,
                    escape_xml(&alternate.href)
                ));
            }

            xml.push_str("  </url>\n");
        }
    }

    xml.push_str("</urlset>");
    xml
}

/// Generate the robots.txt crawler policy.
pub fn generate_robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         \n\
         # Sitemaps\n\
         Sitemap: {}/sitemap.xml\n\
         \n\
         # Crawl-delay for respectful crawling\n\
         Crawl-delay: 1\n\
         \n\
         # Allow all major search engines\n\
         User-agent: Googlebot\n\
         Allow: /\n\
         \n\
         User-agent: Bingbot\n\
         Allow: /\n\
         \n\
         User-agent: Slurp\n\
         Allow: /\n\
         \n\
         User-agent: DuckDuckBot\n\
         Allow: /\n\
         \n\
         User-agent: Baiduspider\n\
         Allow: /\n\
         \n\
         User-agent: YandexBot\n\
         Allow: /\n\
         \n\
         # Disallow admin and private areas\n\
         Disallow: /admin/\n\
         Disallow: /api/\n\
         Disallow: /*.json$\n\
         Disallow: /temp/\n\
         Disallow: /cache/\n",
        base_url
    )
}
