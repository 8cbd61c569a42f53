//! Chapter extraction.
//!
//! A chapter page is mostly site template: navigation bars, footers,
//! "next chapter" links and branding, all of which live in the same `<p>`
//! elements as the story text. The [`ChapterExtractor`] picks the title
//! from the first heading, then filters paragraphs through a [`Denylist`]
//! of boilerplate keywords and a minimum length.
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::chapter::{ChapterExtractor, ExtractConfig};
//!
//! let html = r#"
//!     <h1>The Beginning</h1>
//!     <p>The sun rose over the hills.</p>
//!     <p>Next Chapter</p>
//! "#;
//!
//! let extractor = ChapterExtractor::new(ExtractConfig::default()).unwrap();
//! let chapter = extractor.extract(html).unwrap();
//! assert_eq!(chapter.title, "The Beginning");
//! assert_eq!(chapter.paragraphs, vec!["The sun rose over the hills."]);
//! ```

use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::parse::{Document, compile_selector};
use crate::{Result, SerialbookError};

/// Boilerplate found on the default site's chapter template.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "Previous Chapter",
    "Next Chapter",
    "Novel Home",
    "Read Settings",
    "Translated and Edited",
    "OpenNovel",
    "ReadTheDrama",
    "Your source for novels",
    "All Rights Reserved",
    "Privacy Policy",
    "Navigation",
    "Home",
    "All Novels",
    "Request Novel",
];

/// Title used when a page has no usable heading.
pub const FALLBACK_TITLE: &str = "Chapter";

/// One extracted chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// Case-insensitive substring filter for template noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl Denylist {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.trim().is_empty())
            .collect();
        let lowered = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self { keywords, lowered }
    }

    /// Parses a denylist file: one keyword per line, blank lines and lines
    /// starting with `#` are skipped.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SerialbookError::FileNotFound(path.to_path_buf()));
        }
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Appends extra keywords, keeping existing ones.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra = Denylist::new(keywords);
        self.keywords.extend(extra.keywords);
        self.lowered.extend(extra.lowered);
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether `text` contains any keyword, ignoring case.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.lowered.iter().any(|k| text.contains(k.as_str()))
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

/// Configuration for chapter extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Title selectors, tried in order. The first selector whose first match
    /// has non-empty text wins, so an empty `<h1>` falls through to the next
    /// selector.
    pub title_selectors: Vec<String>,
    /// Selector for body paragraphs.
    pub paragraph_selector: String,
    /// Paragraphs containing any of these keywords are dropped.
    pub denylist: Denylist,
    /// Paragraphs shorter than this many characters, once leading and
    /// trailing whitespace is trimmed, are dropped.
    pub min_paragraph_chars: usize,
    /// Title used when no selector matches.
    pub fallback_title: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_selectors: vec!["h1".to_string(), "h2".to_string()],
            paragraph_selector: "p".to_string(),
            denylist: Denylist::default(),
            min_paragraph_chars: 5,
            fallback_title: FALLBACK_TITLE.to_string(),
        }
    }
}

/// Turns chapter pages into [`Chapter`] records.
///
/// Selectors are compiled once up front, so a bad selector is reported
/// before any page is fetched.
#[derive(Debug)]
pub struct ChapterExtractor {
    titles: Vec<Selector>,
    paragraphs: Selector,
    denylist: Denylist,
    min_paragraph_chars: usize,
    fallback_title: String,
}

impl ChapterExtractor {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let titles = config
            .title_selectors
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let paragraphs = compile_selector(&config.paragraph_selector)?;

        Ok(Self {
            titles,
            paragraphs,
            denylist: config.denylist,
            min_paragraph_chars: config.min_paragraph_chars,
            fallback_title: config.fallback_title,
        })
    }

    /// Extracts the chapter from one page.
    ///
    /// Returns `None` when no paragraph survives filtering; such a page
    /// contributes nothing to the book.
    pub fn extract(&self, html: &str) -> Option<Chapter> {
        let doc = Document::parse(html);

        let title = self
            .titles
            .iter()
            .filter_map(|sel| doc.first(sel))
            .map(|el| el.clean_text())
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| self.fallback_title.clone());

        let paragraphs: Vec<String> = doc
            .select_compiled(&self.paragraphs)
            .filter_map(|el| self.keep_paragraph(&el.text()))
            .collect();

        if paragraphs.is_empty() {
            return None;
        }

        Some(Chapter { title, paragraphs })
    }

    /// Returns the paragraph with its whitespace collapsed, or `None` if it
    /// is filtered out. Length is measured on the trimmed raw text.
    fn keep_paragraph(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() < self.min_paragraph_chars {
            return None;
        }

        let text = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
        (!self.denylist.is_boilerplate(&text)).then_some(text)
    }
}
