//! Book rendering.
//!
//! The [`BookRenderer`] lays out a title page and one section per chapter as
//! a stream of [`Block`]s pushed into a [`PageSink`]. Sinks own the physical
//! concerns (wrapping, page breaks, fonts) and call a [`PageDecorator`] for
//! every page they open, which is how the running header is drawn.
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::chapter::Chapter;
//! use serialbook_core::render::{BookRenderer, PageSink, RenderConfig, TextSink, TitlePage, running_header};
//!
//! let renderer = BookRenderer::new(RenderConfig::default());
//! let mut sink = TextSink::new(Some(running_header("My Novel")));
//!
//! renderer.title_page(&mut sink, &TitlePage::new("MY NOVEL", Some("Collected"))).unwrap();
//! let chapter = Chapter { title: "Start".into(), paragraphs: vec!["Once upon a time.".into()] };
//! renderer.chapter(&mut sink, 1, &chapter).unwrap();
//!
//! let text = sink.finish().unwrap();
//! assert!(text.contains("CHAPTER 1"));
//! ```

#[cfg(feature = "pdf")]
pub mod pdf;
pub mod text;

#[cfg(feature = "pdf")]
pub use pdf::{PageLayout, PdfSink};
pub use text::TextSink;

use crate::Result;
use crate::chapter::Chapter;

/// Font face within the document's single family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Visual style of a text block. Sizes are in points, `line_height` in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub font: FontStyle,
    /// RGB, 0-255 per channel.
    pub color: [u8; 3],
    pub align: Align,
    pub line_height: f32,
}

impl TextStyle {
    pub const fn new(size: f32, font: FontStyle, line_height: f32) -> Self {
        Self { size, font, color: [0, 0, 0], align: Align::Left, line_height }
    }

    pub const fn color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// One unit of page content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Text, wrapped by the sink to the page width.
    Text { text: String, style: TextStyle },
    /// Vertical gap in mm.
    Space(f32),
}

impl Block {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Text { text: text.into(), style }
    }
}

/// Per-page decoration callback. Receives the 1-based page number and
/// returns the blocks drawn at the top of that page.
pub type PageDecorator = Box<dyn Fn(usize) -> Vec<Block> + Send>;

/// Running header: the book title in small grey italics, right-aligned,
/// on every page but the first.
pub fn running_header(text: impl Into<String>) -> PageDecorator {
    let text = text.into();
    let style = TextStyle::new(8.0, FontStyle::Italic, 10.0).color([150, 150, 150]).align(Align::Right);

    Box::new(move |page| {
        if page > 1 { vec![Block::text(text.clone(), style), Block::Space(5.0)] } else { Vec::new() }
    })
}

/// Builder interface the renderer emits pages through.
pub trait PageSink {
    /// The finished artifact.
    type Output: AsRef<[u8]>;

    /// Starts a new page and draws its decoration.
    fn add_page(&mut self) -> Result<()>;

    /// Appends a block to the current page, breaking onto new pages as
    /// needed. Opens the first page if none exists yet.
    fn push(&mut self, block: &Block) -> Result<()>;

    /// Number of pages opened so far.
    fn page_count(&self) -> usize;

    /// Consumes the sink and produces the artifact bytes.
    fn finish(self) -> Result<Self::Output>;
}

/// Content of the book's title page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePage {
    pub title: String,
    pub subtitle: Option<String>,
}

impl TitlePage {
    pub fn new(title: impl Into<String>, subtitle: Option<&str>) -> Self {
        Self { title: title.into(), subtitle: subtitle.map(str::to_string) }
    }
}

/// Layout of the title page and chapter sections.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Label printed above each chapter title, followed by the chapter number.
    pub chapter_label: String,
    /// Gap before the title on the title page (mm).
    pub title_offset: f32,
    pub book_title_style: TextStyle,
    pub book_subtitle_style: TextStyle,
    pub label_style: TextStyle,
    pub title_style: TextStyle,
    pub body_style: TextStyle,
    /// Gap between the chapter title and the body (mm).
    pub title_gap: f32,
    /// Gap after each paragraph (mm).
    pub paragraph_gap: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chapter_label: "CHAPTER".to_string(),
            title_offset: 80.0,
            book_title_style: TextStyle::new(30.0, FontStyle::Bold, 15.0).align(Align::Center),
            book_subtitle_style: TextStyle::new(16.0, FontStyle::Italic, 10.0).align(Align::Center),
            label_style: TextStyle::new(12.0, FontStyle::Bold, 10.0).color([100, 100, 100]),
            title_style: TextStyle::new(20.0, FontStyle::Bold, 12.0),
            body_style: TextStyle::new(12.0, FontStyle::Regular, 8.0),
            title_gap: 5.0,
            paragraph_gap: 3.0,
        }
    }
}

/// Lays out a book through a [`PageSink`].
#[derive(Debug, Clone, Default)]
pub struct BookRenderer {
    config: RenderConfig,
}

impl BookRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Renders the title page on a fresh page.
    pub fn title_page<S: PageSink>(&self, sink: &mut S, page: &TitlePage) -> Result<()> {
        sink.add_page()?;
        sink.push(&Block::Space(self.config.title_offset))?;
        sink.push(&Block::text(&page.title, self.config.book_title_style))?;
        if let Some(subtitle) = &page.subtitle {
            sink.push(&Block::text(subtitle, self.config.book_subtitle_style))?;
        }
        Ok(())
    }

    /// Renders one chapter starting on a fresh page. `number` is the
    /// chapter's position in the sorted chapter list.
    pub fn chapter<S: PageSink>(&self, sink: &mut S, number: usize, chapter: &Chapter) -> Result<()> {
        sink.add_page()?;
        sink.push(&Block::text(self.chapter_label(number), self.config.label_style))?;
        sink.push(&Block::text(&chapter.title, self.config.title_style))?;
        sink.push(&Block::Space(self.config.title_gap))?;

        for paragraph in &chapter.paragraphs {
            sink.push(&Block::text(paragraph, self.config.body_style))?;
            sink.push(&Block::Space(self.config.paragraph_gap))?;
        }
        Ok(())
    }

    pub fn chapter_label(&self, number: usize) -> String {
        format!("{} {}", self.config.chapter_label, number)
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_length = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_length > 0 {
                lines.push(std::mem::take(&mut current_line));
                current_length = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word_len = word.len();

        if current_length == 0 {
            current_line.extend(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_line.push(' ');
            current_line.extend(word);
            current_length += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.extend(word);
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}
