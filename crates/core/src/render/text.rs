//! Plain-text page backend.
//!
//! Pages are separated by a form feed line. Handy for previewing a run and
//! for checking layout without parsing a PDF.

use super::{Align, Block, PageDecorator, PageSink, wrap_text};
use crate::Result;

/// Default line width in columns.
pub const DEFAULT_COLUMNS: usize = 80;

pub struct TextSink {
    pages: Vec<String>,
    columns: usize,
    decorator: Option<PageDecorator>,
}

impl TextSink {
    pub fn new(decorator: Option<PageDecorator>) -> Self {
        Self::with_columns(DEFAULT_COLUMNS, decorator)
    }

    pub fn with_columns(columns: usize, decorator: Option<PageDecorator>) -> Self {
        Self { pages: Vec::new(), columns: columns.max(1), decorator }
    }

    /// Text of each page opened so far.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    fn write(&mut self, block: &Block) {
        let columns = self.columns;
        let Some(page) = self.pages.last_mut() else {
            return;
        };

        match block {
            Block::Text { text, style } => {
                for line in wrap_text(text, columns) {
                    let pad = columns.saturating_sub(line.chars().count());
                    let indent = match style.align {
                        Align::Left => 0,
                        Align::Center => pad / 2,
                        Align::Right => pad,
                    };
                    page.push_str(&" ".repeat(indent));
                    page.push_str(&line);
                    page.push('\n');
                }
            }
            Block::Space(mm) => {
                // Roughly one blank line per 8mm, at least one for any gap.
                let lines = ((mm / 8.0).round() as usize).max(1);
                page.push_str(&"\n".repeat(lines));
            }
        }
    }
}

impl PageSink for TextSink {
    type Output = String;

    fn add_page(&mut self) -> Result<()> {
        self.pages.push(String::new());
        let number = self.pages.len();
        let decoration = self.decorator.as_ref().map(|d| d(number)).unwrap_or_default();
        for block in &decoration {
            self.write(block);
        }
        Ok(())
    }

    fn push(&mut self, block: &Block) -> Result<()> {
        if self.pages.is_empty() {
            self.add_page()?;
        }
        self.write(block);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(self) -> Result<String> {
        Ok(self.pages.join("\u{c}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FontStyle, TextStyle, running_header};

    #[test]
    fn test_alignment() {
        let mut sink = TextSink::with_columns(10, None);
        let style = TextStyle::new(12.0, FontStyle::Regular, 8.0);

        sink.push(&Block::text("abcd", style.align(Align::Right))).unwrap();
        sink.push(&Block::text("ab", style.align(Align::Center))).unwrap();

        assert_eq!(sink.pages()[0], "      abcd\n    ab\n");
    }

    #[test]
    fn test_push_opens_first_page() {
        let mut sink = TextSink::new(None);
        sink.push(&Block::Space(5.0)).unwrap();
        assert_eq!(sink.page_count(), 1);
    }

    #[test]
    fn test_decorator_runs_per_page() {
        let mut sink = TextSink::new(Some(running_header("Book")));
        sink.add_page().unwrap();
        sink.add_page().unwrap();

        assert!(!sink.pages()[0].contains("Book"));
        assert!(sink.pages()[1].contains("Book"));

        let text = sink.finish().unwrap();
        assert_eq!(text.matches('\u{c}').count(), 1);
    }
}
