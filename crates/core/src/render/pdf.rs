//! PDF page backend on top of `printpdf`.
//!
//! Uses the builtin Helvetica family, so no font files are needed. Builtin
//! fonts only cover Latin-1; anything outside it is dropped from the text.
//! Line wrapping works from an estimated average glyph width.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfPageIndex, Rgb,
};

use super::{Align, Block, FontStyle, PageDecorator, PageSink, TextStyle, wrap_text};
use crate::{Result, SerialbookError};

const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Distance from the bottom edge at which content breaks to a new page.
    pub bottom_margin: f32,
}

impl Default for PageLayout {
    /// A4 with 10mm margins and a 15mm page-break margin.
    fn default() -> Self {
        Self { width: 210.0, height: 297.0, margin: 10.0, bottom_margin: 15.0 }
    }
}

impl PageLayout {
    fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

pub struct PdfSink {
    doc: PdfDocumentReference,
    fonts: Fonts,
    layout: PageLayout,
    decorator: Option<PageDecorator>,
    /// Page created together with the document, not yet handed out.
    initial: Option<(PdfPageIndex, PdfLayerIndex)>,
    current: Option<(PdfPageIndex, PdfLayerIndex)>,
    pages: usize,
    /// Distance of the write position from the top edge.
    cursor: f32,
}

impl PdfSink {
    pub fn new(title: &str, layout: PageLayout, decorator: Option<PageDecorator>) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(layout.width), Mm(layout.height), "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_error)?,
            italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(render_error)?,
        };

        Ok(Self {
            doc,
            fonts,
            layout,
            decorator,
            initial: Some((page, layer)),
            current: None,
            pages: 0,
            cursor: layout.margin,
        })
    }

    fn columns(&self, style: &TextStyle) -> usize {
        let glyph = style.size * PT_TO_MM * AVG_GLYPH_WIDTH;
        (self.layout.text_width() / glyph).floor().max(1.0) as usize
    }

    fn write_line(&mut self, line: &str, style: &TextStyle) -> Result<()> {
        if self.cursor + style.line_height > self.layout.height - self.layout.bottom_margin {
            self.add_page()?;
        }
        let Some((page, layer)) = self.current else {
            return Ok(());
        };

        let estimated = line.chars().count() as f32 * style.size * PT_TO_MM * AVG_GLYPH_WIDTH;
        let slack = (self.layout.text_width() - estimated).max(0.0);
        let x = self.layout.margin
            + match style.align {
                Align::Left => 0.0,
                Align::Center => slack / 2.0,
                Align::Right => slack,
            };
        // Baseline sits a little below the vertical centre of the line box.
        let baseline = self.cursor + style.line_height / 2.0 + style.size * PT_TO_MM * 0.35;

        let layer = self.doc.get_page(page).get_layer(layer);
        let [r, g, b] = style.color;
        layer.set_fill_color(Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        )));
        layer.use_text(line, style.size, Mm(x), Mm(self.layout.height - baseline), self.fonts.get(style.font));

        self.cursor += style.line_height;
        Ok(())
    }
}

impl PageSink for PdfSink {
    type Output = Vec<u8>;

    fn add_page(&mut self) -> Result<()> {
        let handles = match self.initial.take() {
            Some(handles) => handles,
            None => self.doc.add_page(Mm(self.layout.width), Mm(self.layout.height), "Layer 1"),
        };
        self.current = Some(handles);
        self.pages += 1;
        self.cursor = self.layout.margin;

        let decoration = self.decorator.as_ref().map(|d| d(self.pages)).unwrap_or_default();
        for block in &decoration {
            self.push(block)?;
        }
        Ok(())
    }

    fn push(&mut self, block: &Block) -> Result<()> {
        if self.current.is_none() {
            self.add_page()?;
        }

        match block {
            Block::Text { text, style } => {
                let text = to_latin1(text);
                for line in wrap_text(&text, self.columns(style)) {
                    self.write_line(&line, style)?;
                }
            }
            Block::Space(mm) => self.cursor += mm,
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut buffer = BufWriter::new(Vec::new());
        self.doc.save(&mut buffer).map_err(render_error)?;
        buffer.into_inner().map_err(render_error)
    }
}

fn render_error(err: impl std::fmt::Display) -> SerialbookError {
    SerialbookError::RenderError(err.to_string())
}

/// Drops characters the builtin fonts cannot encode.
pub fn to_latin1(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) <= 0xFF).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::Chapter;
    use crate::render::{BookRenderer, TitlePage, running_header};

    #[test]
    fn test_latin1_filter() {
        assert_eq!(to_latin1("Café – “quoted” 星"), "Café  quoted ");
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let mut sink = PdfSink::new("Test Book", PageLayout::default(), Some(running_header("Test Book"))).unwrap();
        let renderer = BookRenderer::default();

        renderer.title_page(&mut sink, &TitlePage::new("TEST BOOK", None)).unwrap();
        let chapter = Chapter { title: "One".to_string(), paragraphs: vec!["A short paragraph.".to_string()] };
        renderer.chapter(&mut sink, 1, &chapter).unwrap();
        assert_eq!(sink.page_count(), 2);

        let bytes = sink.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_chapter_breaks_pages() {
        let mut sink = PdfSink::new("Long", PageLayout::default(), None).unwrap();
        let renderer = BookRenderer::default();
        let paragraph = "word ".repeat(200);
        let chapter = Chapter { title: "Long".to_string(), paragraphs: vec![paragraph; 20] };

        renderer.chapter(&mut sink, 1, &chapter).unwrap();
        assert!(sink.page_count() > 1);
    }
}
