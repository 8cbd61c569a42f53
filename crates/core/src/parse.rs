//! HTML parsing helpers.
//!
//! Thin wrappers around `scraper` used by the link collector and the chapter
//! extractor: a [`Document`] that can be queried with CSS selectors and an
//! [`Element`] exposing the bits we read (attributes and cleaned text).
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::parse::Document;
//!
//! let html = r#"<h1>Chapter 1</h1><p class="body">  It   begins. </p>"#;
//! let doc = Document::parse(html);
//! let paragraphs = doc.select("p.body").unwrap();
//! assert_eq!(paragraphs[0].clean_text(), "It begins.");
//! ```

use scraper::{Html, Selector};

use crate::{Result, SerialbookError};

/// Compiles a CSS selector, mapping failures to [`SerialbookError::HtmlParseError`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SerialbookError::HtmlParseError(format!("Invalid selector {selector:?}: {e}")))
}

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup is repaired the way browsers do,
    /// so this never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`SerialbookError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Selects elements using an already compiled selector, in document order.
    pub fn select_compiled<'a, 's>(&'a self, selector: &'s Selector) -> impl Iterator<Item = Element<'a>> + 's
    where
        'a: 's,
    {
        self.html.select(selector).map(|element| Element { element })
    }

    /// Gets the first element matching a compiled selector.
    pub fn first(&'_ self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(|element| Element { element })
    }
}

/// A wrapper around scraper's `ElementRef`.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the raw text content of this element (all descendant text nodes).
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with whitespace runs collapsed to a single
    /// space and the ends trimmed.
    pub fn clean_text(&self) -> String {
        self.element.text().flat_map(|t| t.split_whitespace()).collect::<Vec<_>>().join(" ")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head><title>Test Page</title></head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph
                1</p>
            <p class="content">Paragraph <em>2</em></p>
            <a href="/novels/x/chapter-1">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].clean_text(), "Paragraph 1");
        assert_eq!(elements[1].clean_text(), "Paragraph 2");
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("a[href]").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("href"), Some("/novels/x/chapter-1"));
        assert_eq!(elements[0].text(), "Link");
    }

    #[test]
    fn test_first_match() {
        let doc = Document::parse(SAMPLE_HTML);
        let h1 = compile_selector("h1").unwrap();
        let h2 = compile_selector("h2").unwrap();

        assert_eq!(doc.first(&h1).map(|e| e.clean_text()), Some("Heading".to_string()));
        assert!(doc.first(&h2).is_none());
    }

    #[test]
    fn test_select_outlives_selector_string() {
        let doc = Document::parse(SAMPLE_HTML);
        let texts: Vec<String> = {
            let owned = String::from("p.content");
            doc.select(&owned).unwrap().iter().map(|e| e.text()).collect()
        };

        assert_eq!(texts.len(), 2);
        assert!(texts[1].contains("Paragraph"));
    }

    #[test]
    fn test_compiled_selector_borrows_separately() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements: Vec<Element<'_>> = {
            let sel = compile_selector("a[href]").unwrap();
            doc.select_compiled(&sel).collect()
        };

        assert_eq!(elements[0].attr("href"), Some("/novels/x/chapter-1"));
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(SerialbookError::HtmlParseError(_))));
    }
}
