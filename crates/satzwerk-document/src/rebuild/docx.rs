// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX builder — rebuilds a styled wordprocessing document from a
// `DocumentContent` tree using the `docx-rs` serializer.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Pic, Run};
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::{DocumentContent, ExtractedImage, ImageExtent, RebuildConfig, TextChunk};
use tracing::{debug, info, instrument};

/// Wordprocessing run sizes are half-points, so a 12pt chunk becomes 24.
const HALF_POINTS_PER_POINT: f32 = 2.0;

/// Rebuilds a paginated, styled DOCX from extracted content.
///
/// One paragraph per chunk (a single styled run), one inline-image paragraph
/// per image, one explicit page break between consecutive pages and none
/// after the last. Within a page, images always follow all text chunks —
/// they are not interleaved by vertical position, a known reconstruction
/// fidelity limitation.
pub struct DocxBuilder {
    config: RebuildConfig,
}

impl DocxBuilder {
    pub fn new(config: RebuildConfig) -> Self {
        Self { config }
    }

    /// Build with the default inline-image display extent.
    pub fn with_defaults() -> Self {
        Self::new(RebuildConfig::default())
    }

    /// Serialize the content tree into DOCX bytes.
    ///
    /// The input is validated before any assembly: page numbering must be
    /// contiguous from 1 and every image payload must be a decodable raster.
    /// The input tree is never mutated; each call produces a fresh artifact.
    ///
    /// # Errors
    ///
    /// [`SatzwerkError::InvalidContent`] for malformed input,
    /// [`SatzwerkError::DocumentBuild`] if archive serialization fails.
    #[instrument(skip_all, fields(page_count = content.pages.len()))]
    pub fn build(&self, content: &DocumentContent) -> Result<Vec<u8>> {
        content.validate()?;

        let docx = self.assemble(content)?;

        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).map_err(|err| {
            SatzwerkError::DocumentBuild(format!("failed to serialize document archive: {err}"))
        })?;

        let bytes = cursor.into_inner();
        info!(
            page_count = content.pages.len(),
            output_bytes = bytes.len(),
            "Document rebuilt"
        );
        Ok(bytes)
    }

    /// Assemble the paragraph sequence for the whole document.
    fn assemble(&self, content: &DocumentContent) -> Result<Docx> {
        let mut docx = Docx::new();
        let page_count = content.pages.len();

        for (index, page) in content.pages.iter().enumerate() {
            for chunk in &page.chunks {
                docx = docx.add_paragraph(chunk_paragraph(chunk));
            }

            for (image_index, image) in page.images.iter().enumerate() {
                let paragraph =
                    image_paragraph(image, self.config.image_extent).map_err(|err| {
                        SatzwerkError::InvalidContent(format!(
                            "page {} image {}: {err}",
                            page.page_number,
                            image_index + 1
                        ))
                    })?;
                docx = docx.add_paragraph(paragraph);
            }

            // Explicit break between pages; the final page ends the document.
            if index + 1 < page_count {
                docx = docx.add_paragraph(page_break_paragraph());
            }

            debug!(
                page = page.page_number,
                chunks = page.chunks.len(),
                images = page.images.len(),
                "Page assembled"
            );
        }

        Ok(docx)
    }
}

/// One paragraph holding the chunk's text as a single styled run.
fn chunk_paragraph(chunk: &TextChunk) -> Paragraph {
    let mut run = Run::new()
        .add_text(chunk.text.as_str())
        .size(half_point_size(chunk.font_size));

    if chunk.is_bold {
        run = run.bold();
    }
    if chunk.is_italic {
        run = run.italic();
    }

    Paragraph::new().add_run(run)
}

/// One paragraph holding an inline picture at the fixed display extent.
fn image_paragraph(image: &ExtractedImage, extent: ImageExtent) -> std::result::Result<Paragraph, String> {
    // Reject undecodable payloads before handing them to the serializer, so
    // malformed reconstruction input fails with a field-specific message
    // instead of corrupting the archive.
    image::load_from_memory(&image.data)
        .map_err(|err| format!("image payload is not a decodable raster: {err}"))?;

    let pic = Pic::new(&image.data).size(extent.cx, extent.cy);
    Ok(Paragraph::new().add_run(Run::new().add_image(pic)))
}

/// A paragraph containing only an explicit page break.
fn page_break_paragraph() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

/// Convert a point size to the document format's half-point unit.
fn half_point_size(font_size: f32) -> usize {
    (font_size * HALF_POINTS_PER_POINT).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use satzwerk_core::PageContent;

    fn chunk(text: &str, font_size: f32, bold: bool, italic: bool) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            font_size,
            font_name: "Test".to_string(),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: font_size,
            is_bold: bold,
            is_italic: italic,
        }
    }

    fn png_image(width: u32, height: u32) -> ExtractedImage {
        let bitmap = RgbImage::from_pixel(width, height, Rgb([10u8, 20, 30]));
        let mut data = Vec::new();
        image::DynamicImage::ImageRgb8(bitmap)
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
            .expect("in-memory encode");
        ExtractedImage {
            data,
            width,
            height,
        }
    }

    /// Render the document part XML for inspection.
    fn document_xml(content: &DocumentContent) -> String {
        let docx = DocxBuilder::with_defaults()
            .assemble(content)
            .expect("assemble");
        String::from_utf8(docx.build().document).expect("utf-8 document part")
    }

    /// The round-trip scenario: one page, one bold 12pt chunk, one image —
    /// one styled paragraph at 24 half-points, one inline image paragraph,
    /// no trailing page break.
    #[test]
    fn single_page_round_trip() {
        let content = DocumentContent {
            pages: vec![PageContent {
                page_number: 1,
                chunks: vec![chunk("Hello", 12.0, true, false)],
                images: vec![png_image(4, 4)],
            }],
        };

        let xml = document_xml(&content);
        assert!(xml.contains("Hello"));
        assert!(xml.contains("w:val=\"24\""), "12pt must encode as 24 half-points");
        assert!(xml.contains("<w:b "), "bold flag must be emitted");
        assert!(xml.contains("w:drawing"), "inline image must be emitted");
        assert!(!xml.contains("w:type=\"page\""), "single page has no page break");
    }

    /// Three pages produce exactly two page-break directives.
    #[test]
    fn page_breaks_between_pages_only() {
        let content = DocumentContent {
            pages: (1..=3)
                .map(|n| PageContent {
                    page_number: n,
                    chunks: vec![chunk(&format!("page {n}"), 10.0, false, false)],
                    images: Vec::new(),
                })
                .collect(),
        };

        let xml = document_xml(&content);
        assert_eq!(xml.matches("w:type=\"page\"").count(), 2);
    }

    #[test]
    fn italic_flag_is_emitted() {
        let content = DocumentContent {
            pages: vec![PageContent {
                page_number: 1,
                chunks: vec![chunk("slanted", 9.5, false, true)],
                images: Vec::new(),
            }],
        };

        let xml = document_xml(&content);
        assert!(xml.contains("<w:i "));
        // 9.5pt rounds to 19 half-points.
        assert!(xml.contains("w:val=\"19\""));
    }

    /// The builder serializes a full artifact (a ZIP archive) and leaves the
    /// input untouched.
    #[test]
    fn build_produces_archive_bytes() {
        let content = DocumentContent {
            pages: vec![PageContent {
                page_number: 1,
                chunks: vec![chunk("x", 11.0, false, false)],
                images: Vec::new(),
            }],
        };
        let before = content.clone();

        let bytes = DocxBuilder::with_defaults().build(&content).unwrap();
        // ZIP local-file-header signature.
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(content, before);
    }

    /// Malformed image payloads are rejected with the page and image named,
    /// before any artifact is produced.
    #[test]
    fn rejects_undecodable_image_payload() {
        let content = DocumentContent {
            pages: vec![PageContent {
                page_number: 1,
                chunks: Vec::new(),
                images: vec![ExtractedImage {
                    data: vec![0x00, 0x01, 0x02],
                    width: 0,
                    height: 0,
                }],
            }],
        };

        let err = DocxBuilder::with_defaults().build(&content).unwrap_err();
        assert!(matches!(err, SatzwerkError::InvalidContent(_)));
        assert!(err.to_string().contains("page 1 image 1"));
    }

    /// Page-numbering violations fail before assembly.
    #[test]
    fn rejects_bad_page_numbering() {
        let content = DocumentContent {
            pages: vec![PageContent::empty(2)],
        };
        let err = DocxBuilder::with_defaults().build(&content).unwrap_err();
        assert!(matches!(err, SatzwerkError::InvalidContent(_)));
    }

    /// An empty content tree is valid and produces an empty document.
    #[test]
    fn empty_document_is_allowed() {
        let content = DocumentContent { pages: Vec::new() };
        let bytes = DocxBuilder::with_defaults().build(&content).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn half_point_conversion_rounds() {
        assert_eq!(half_point_size(12.0), 24);
        assert_eq!(half_point_size(10.25), 21);
        assert_eq!(half_point_size(0.0), 0);
    }
}
