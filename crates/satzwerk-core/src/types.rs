// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content model for layout-aware extraction and reconstruction.
//
// Wire names follow the JSON exchanged at the request boundary: a page
// serializes as `{"page": 1, "textChunks": [...], "images": [...]}` and image
// pixel data travels as standard base64 under the `base64` key.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SatzwerkError};

/// A single contiguous run of text produced by one text-paint event.
///
/// `x`/`y` are the baseline bounding-box origin in page coordinate space
/// (bottom-left origin, y increasing upward). Chunks are immutable once
/// built and keep the encounter order of the source content stream — they
/// are never re-sorted into reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChunk {
    pub text: String,
    pub font_size: f32,
    /// Resolved font name; empty when the source font could not be resolved.
    pub font_name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_bold: bool,
    pub is_italic: bool,
}

/// An embedded raster image decoded from a page, re-encoded as PNG.
///
/// `width`/`height` are the decoded bitmap's pixel dimensions, independent of
/// the image's placement size on the page. `data` is never empty: sources
/// that fail to decode produce no record at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// PNG bytes; serialized as standard base64.
    #[serde(rename = "base64", with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A word with its left/top page coordinates.
///
/// Coarser granularity than [`TextChunk`]; consumed only by the table
/// reconstructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    /// Left edge of the word's bounding box.
    pub x: f32,
    /// Top edge of the word's bounding box.
    pub y: f32,
}

/// Extracted content of a single page: text chunks and images, each in
/// content-stream encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-based page number.
    #[serde(rename = "page")]
    pub page_number: u32,
    #[serde(rename = "textChunks")]
    pub chunks: Vec<TextChunk>,
    pub images: Vec<ExtractedImage>,
}

impl PageContent {
    /// An empty page with the given number.
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            chunks: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// The full content tree of a document: pages in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub pages: Vec<PageContent>,
}

impl DocumentContent {
    /// Parse a serialized content tree, failing fast on malformed input.
    ///
    /// Both serde errors (missing or mistyped fields, with the offending
    /// field named in the message) and page-numbering violations surface as
    /// [`SatzwerkError::InvalidContent`] before any reconstruction begins.
    pub fn from_json(json: &str) -> Result<Self> {
        let content: Self = serde_json::from_str(json)
            .map_err(|err| SatzwerkError::InvalidContent(err.to_string()))?;
        content.validate()?;
        Ok(content)
    }

    /// Check the page-numbering invariant: numbers strictly increase from 1
    /// with no gaps. An empty page list is valid.
    pub fn validate(&self) -> Result<()> {
        for (index, page) in self.pages.iter().enumerate() {
            let expected = index as u32 + 1;
            if page.page_number != expected {
                return Err(SatzwerkError::InvalidContent(format!(
                    "page numbers must increase from 1 without gaps: expected {expected}, found {}",
                    page.page_number
                )));
            }
        }
        Ok(())
    }
}

/// The outcome of extracting one page.
///
/// A page that the content-stream processor cannot replay is recorded as
/// `Failed` rather than silently yielding an empty page — an empty page and
/// an unprocessable page must stay distinguishable.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum PageOutcome {
    #[serde(rename = "ok")]
    Ok {
        #[serde(flatten)]
        content: PageContent,
    },
    #[serde(rename = "failed")]
    Failed { page: u32, reason: String },
}

impl PageOutcome {
    /// 1-based number of the page this outcome describes.
    pub fn page_number(&self) -> u32 {
        match self {
            Self::Ok { content } => content.page_number,
            Self::Failed { page, .. } => *page,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The extracted content, if the page succeeded.
    pub fn content(&self) -> Option<&PageContent> {
        match self {
            Self::Ok { content } => Some(content),
            Self::Failed { .. } => None,
        }
    }
}

/// Per-page extraction results for a whole document, in page order.
///
/// Callers choose the failure policy: inspect outcomes individually, or use
/// [`DocumentExtraction::into_content`] to require every page.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentExtraction {
    pub pages: Vec<PageOutcome>,
}

impl DocumentExtraction {
    pub fn has_failures(&self) -> bool {
        self.pages.iter().any(PageOutcome::is_failed)
    }

    /// Convert into a [`DocumentContent`], failing on the first page that
    /// could not be processed.
    pub fn into_content(self) -> Result<DocumentContent> {
        let mut pages = Vec::with_capacity(self.pages.len());
        for outcome in self.pages {
            match outcome {
                PageOutcome::Ok { content } => pages.push(content),
                PageOutcome::Failed { page, reason } => {
                    return Err(SatzwerkError::PageUnprocessable { page, reason });
                }
            }
        }
        Ok(DocumentContent { pages })
    }
}

/// A ragged grid of row-ordered, column-ordered cell strings.
///
/// Rows are a visual approximation derived from glyph positions, not a
/// relational model; adjacent rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Recognized text for one rasterized page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    /// 1-based page number.
    pub page: u32,
    pub text: String,
}

/// Serde adapter encoding byte vectors as standard base64 strings.
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

// -- Tests --------------------------------------------------------------------
