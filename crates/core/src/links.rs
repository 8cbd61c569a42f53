//! Chapter link discovery on a novel's listing page.
//!
//! The listing page links to every chapter, but also to the site's
//! navigation, other novels and itself. [`collect_links`] keeps only the
//! links that live under the novel's path slug, resolved to absolute URLs,
//! deduplicated in first-seen order. Ordering is left to
//! [`crate::natural::sort_natural`].

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use scraper::Selector;
use url::Url;

use crate::parse::Document;
use crate::{Result, SerialbookError};

static HREF: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Absolute URL of one chapter page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterLink(String);

impl ChapterLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChapterLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChapterLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which links on a listing page belong to the novel.
#[derive(Debug, Clone)]
pub struct LinkScope {
    base_url: String,
    origin: String,
    scheme: String,
    novel_slug: String,
}

impl LinkScope {
    /// Builds the scope for the listing page at `base_url`.
    ///
    /// The site origin used to resolve relative links is taken from
    /// `base_url`.
    pub fn new(base_url: &str, novel_slug: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| SerialbookError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !parsed.has_host() {
            return Err(SerialbookError::InvalidUrl(format!("{base_url}: listing URL must have a host")));
        }

        let novel_slug = novel_slug.trim().to_lowercase();
        if novel_slug.is_empty() {
            return Err(SerialbookError::ConfigError("novel slug must not be empty".to_string()));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            origin: parsed.origin().ascii_serialization(),
            scheme: parsed.scheme().to_string(),
            novel_slug,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolves an `href` value against the site origin.
    ///
    /// `/path` is joined to the origin, `//host/path` takes the listing
    /// page's scheme, anything without a scheme is treated as a path below
    /// the origin root, and absolute URLs pass through untouched.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("//") {
            format!("{}:{}", self.scheme, href)
        } else if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else if Url::parse(href).is_err() {
            format!("{}/{}", self.origin, href)
        } else {
            href.to_string()
        }
    }

    /// Whether an absolute URL is a chapter of this novel.
    pub fn accepts(&self, url: &str) -> bool {
        url.to_lowercase().contains(&self.novel_slug)
            && url.trim_end_matches('/') != self.base_url.trim_end_matches('/')
    }
}

/// Collects the novel's chapter links from a listing page, unsorted.
///
/// Returns an empty list when nothing qualifies; deciding what that means
/// is up to the caller.
pub fn collect_links(html: &str, scope: &LinkScope) -> Vec<ChapterLink> {
    let doc = Document::parse(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.select_compiled(&HREF) {
        let Some(href) = anchor.attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let url = scope.absolutize(href);
        if scope.accepts(&url) && seen.insert(url.clone()) {
            links.push(ChapterLink(url));
        }
    }

    tracing::debug!(count = links.len(), base = %scope.base_url, "collected chapter links");
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.readthedrama.com/novels/shine-on-me";

    fn scope() -> LinkScope {
        LinkScope::new(BASE, "shine-on-me").unwrap()
    }

    fn strings(links: &[ChapterLink]) -> Vec<&str> {
        links.iter().map(ChapterLink::as_str).collect()
    }

    #[test]
    fn test_keeps_only_novel_chapters() {
        let html = r#"
            <nav><a href="/">Home</a><a href="/novels/shine-on-me/">Novel Home</a></nav>
            <ul>
                <li><a href="/novels/shine-on-me/chapter-1">Chapter 1</a></li>
                <li><a href="/novels/shine-on-me/chapter-2">Chapter 2</a></li>
                <li><a href="/novels/other-book/chapter-1">Other</a></li>
                <li><a href="/novels/shine-on-me/chapter-1">Chapter 1 again</a></li>
            </ul>
            <a href="https://www.readthedrama.com/novels/shine-on-me">Self</a>
        "#;

        let links = collect_links(html, &scope());
        assert_eq!(
            strings(&links),
            vec![
                "https://www.readthedrama.com/novels/shine-on-me/chapter-1",
                "https://www.readthedrama.com/novels/shine-on-me/chapter-2",
            ]
        );
    }

    #[test]
    fn test_absolutize_forms() {
        let scope = scope();
        assert_eq!(scope.absolutize("/a/b"), "https://www.readthedrama.com/a/b");
        assert_eq!(scope.absolutize("a/b"), "https://www.readthedrama.com/a/b");
        assert_eq!(scope.absolutize("//cdn.example.com/x"), "https://cdn.example.com/x");
        assert_eq!(scope.absolutize("http://mirror.example.com/x"), "http://mirror.example.com/x");
    }

    #[test]
    fn test_relative_and_absolute_links_are_normalized() {
        let html = r#"
            <a href="novels/shine-on-me/chapter-3">rel</a>
            <a href="https://www.readthedrama.com/novels/Shine-On-Me/chapter-4">abs</a>
        "#;

        let links = collect_links(html, &scope());
        assert_eq!(
            strings(&links),
            vec![
                "https://www.readthedrama.com/novels/shine-on-me/chapter-3",
                "https://www.readthedrama.com/novels/Shine-On-Me/chapter-4",
            ]
        );
    }

    #[test]
    fn test_dedup_is_exact_string_match() {
        let html = r#"
            <a href="/novels/shine-on-me/chapter-1">a</a>
            <a href="/novels/shine-on-me/chapter-1/">b</a>
        "#;

        let links = collect_links(html, &scope());
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_self_link_with_trailing_slash_is_excluded() {
        let html = r#"<a href="/novels/shine-on-me//">self</a>"#;
        assert!(collect_links(html, &scope()).is_empty());
    }

    #[test]
    fn test_empty_and_missing_href_are_ignored() {
        let html = r#"<a href="">x</a><a href="   ">y</a><a>z</a>"#;
        assert!(collect_links(html, &scope()).is_empty());
    }

    #[test]
    fn test_origin_comes_from_base_url() {
        let scope = LinkScope::new("http://127.0.0.1:8080/novels/demo", "demo").unwrap();
        assert_eq!(scope.origin(), "http://127.0.0.1:8080");
        assert_eq!(scope.absolutize("/novels/demo/c-1"), "http://127.0.0.1:8080/novels/demo/c-1");
    }

    #[test]
    fn test_invalid_scope() {
        assert!(matches!(LinkScope::new("not a url", "x"), Err(SerialbookError::InvalidUrl(_))));
        assert!(matches!(LinkScope::new(BASE, "  "), Err(SerialbookError::ConfigError(_))));
    }
}
