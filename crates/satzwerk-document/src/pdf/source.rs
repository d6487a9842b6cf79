// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-level views over a loaded PDF: paint events in content order, a
// word-segmentation view, and full-page rasterization.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use pdfium_render::prelude::*;
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::{RasterConfig, Word};
use tracing::{debug, instrument, warn};

use crate::extract::{ImagePaint, PaintEvent, TextPaint};

/// Bind to the pdfium dynamic library.
///
/// Searches the current directory first, then the system library paths.
pub fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|err| {
            SatzwerkError::Pdf(format!(
                "failed to load the pdfium library (install libpdfium or place it next to the binary): {err:?}"
            ))
        })?;
    Ok(Pdfium::new(bindings))
}

/// A loaded document exposing the page views the extractors consume.
///
/// Holds the parsed document for the duration of one processing call; the
/// handle is released when the source is dropped.
pub struct PdfSource<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfSource<'a> {
    // -- Construction ---------------------------------------------------------

    /// Load a document from raw bytes.
    ///
    /// Empty input is rejected here, before any parsing begins.
    #[instrument(skip_all, fields(data_len = data.len()))]
    pub fn from_bytes(pdfium: &'a Pdfium, data: &'a [u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(SatzwerkError::EmptyInput);
        }

        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|err| SatzwerkError::Pdf(format!("failed to open document: {err}")))?;

        debug!(pages = document.pages().len(), "Document loaded");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    // -- Page views -----------------------------------------------------------

    /// Replay one page's objects as paint events, in content-stream order.
    ///
    /// Text objects yield [`TextPaint`] with the resolved font family (empty
    /// when unresolved — never a failure) and the baseline bounding
    /// rectangle. Image objects yield [`ImagePaint`] whose payload is empty
    /// when sample retrieval fails, leaving the skip decision to the
    /// extractor. `index` is 0-based.
    #[instrument(skip(self), fields(index))]
    pub fn page_events(&self, index: u32) -> Result<Vec<PaintEvent>> {
        let page = self.page(index)?;
        let mut events = Vec::new();

        for object in page.objects().iter() {
            if let Some(text_object) = object.as_text_object() {
                let bounds = text_object.bounds().map_err(|err| {
                    SatzwerkError::PageUnprocessable {
                        page: index + 1,
                        reason: format!("unreadable text object bounds: {err}"),
                    }
                })?;
                let rect = bounds.to_rect();

                events.push(PaintEvent::Text(TextPaint {
                    text: text_object.text(),
                    font_name: text_object.font().family(),
                    font_size: text_object.unscaled_font_size().value,
                    x: rect.left.value,
                    y: rect.bottom.value,
                    width: rect.width().value,
                    height: rect.height().value,
                }));
            } else if let Some(image_object) = object.as_image_object() {
                let data = match image_object.get_raw_image() {
                    Ok(raw) => encode_png(&raw).unwrap_or_default(),
                    Err(err) => {
                        warn!(page = index + 1, %err, "embedded image sample retrieval failed");
                        Vec::new()
                    }
                };
                events.push(PaintEvent::Image(ImagePaint { data }));
            }
            // Path and shading objects carry no extractable content.
        }

        debug!(
            page = index + 1,
            event_count = events.len(),
            "Page events replayed"
        );
        Ok(events)
    }

    /// The word-segmentation view of one page: character runs split on
    /// whitespace, each with its left edge and top edge. `index` is 0-based.
    #[instrument(skip(self), fields(index))]
    pub fn page_words(&self, index: u32) -> Result<Vec<Word>> {
        let page = self.page(index)?;
        let text_page = page.text().map_err(|err| SatzwerkError::PageUnprocessable {
            page: index + 1,
            reason: format!("text view unavailable: {err}"),
        })?;

        let mut accumulator = WordAccumulator::default();
        for ch in text_page.chars().iter() {
            let Some(c) = ch.unicode_char() else {
                continue;
            };
            if c.is_whitespace() {
                accumulator.flush();
                continue;
            }
            let glyph_bounds = ch
                .loose_bounds()
                .ok()
                .map(|b| (b.left.value, b.top.value));
            accumulator.push(c, glyph_bounds);
        }
        accumulator.flush();

        let words = accumulator.into_words();
        debug!(page = index + 1, word_count = words.len(), "Page words segmented");
        Ok(words)
    }

    /// Render one full page to a bitmap at the configured resolution.
    /// `index` is 0-based.
    #[instrument(skip(self, config), fields(index, dpi = config.dpi))]
    pub fn rasterize_page(&self, index: u32, config: &RasterConfig) -> Result<DynamicImage> {
        let page = self.page(index)?;
        let render_config = PdfRenderConfig::new().scale_page_by_factor(config.scale_factor());

        let bitmap = page.render_with_config(&render_config).map_err(|err| {
            SatzwerkError::PageUnprocessable {
                page: index + 1,
                reason: format!("rasterization failed: {err}"),
            }
        })?;

        Ok(bitmap.as_image())
    }

    // -- Helpers --------------------------------------------------------------

    fn page(&self, index: u32) -> Result<PdfPage<'_>> {
        let count = self.page_count();
        if index >= count {
            return Err(SatzwerkError::Pdf(format!(
                "page index {index} out of range (document has {count} pages)"
            )));
        }
        self.document
            .pages()
            .get(index as u16)
            .map_err(|err| SatzwerkError::PageUnprocessable {
                page: index + 1,
                reason: format!("page handle unavailable: {err}"),
            })
    }
}

/// Encode a decoded image as PNG, or `None` (with a warning) on failure.
fn encode_png(image: &DynamicImage) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    match image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png) {
        Ok(()) => Some(bytes),
        Err(err) => {
            warn!(%err, "embedded image could not be PNG-encoded");
            None
        }
    }
}

/// Builds words from a character stream, tracking each word's left edge
/// (minimum glyph x) and top edge (maximum glyph top).
#[derive(Debug, Default)]
struct WordAccumulator {
    words: Vec<Word>,
    current: String,
    left: Option<f32>,
    top: Option<f32>,
}

impl WordAccumulator {
    fn push(&mut self, c: char, glyph_bounds: Option<(f32, f32)>) {
        if let Some((glyph_left, glyph_top)) = glyph_bounds {
            self.left = Some(self.left.map_or(glyph_left, |l| l.min(glyph_left)));
            self.top = Some(self.top.map_or(glyph_top, |t| t.max(glyph_top)));
        }
        self.current.push(c);
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.words.push(Word {
            text: std::mem::take(&mut self.current),
            x: self.left.take().unwrap_or(0.0),
            y: self.top.take().unwrap_or(0.0),
        });
    }

    fn into_words(self) -> Vec<Word> {
        self.words
    }
}
