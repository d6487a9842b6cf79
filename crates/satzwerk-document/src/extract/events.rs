// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paint events — the consumption contract between the external content-stream
// processor and the extractors. A page's drawing instructions are replayed as
// a plain ordered sequence of these values; the extractors fold over the
// sequence instead of registering stateful listener objects against the
// parser, so accumulation stays explicit and testable without a parser.

/// One drawing instruction replayed from a page's content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintEvent {
    /// A run of text painted with a single font and size.
    Text(TextPaint),
    /// An embedded raster image painted onto the page.
    Image(ImagePaint),
}

/// Payload of a text-paint event.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    pub text: String,
    /// Resolved font name; empty when the source font could not be resolved.
    /// An unresolvable font never fails the page.
    pub font_name: String,
    /// Font size in points, before any page transform.
    pub font_size: f32,
    /// Baseline bounding rectangle in page space (bottom-left origin, y up).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Payload of an image-paint event.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePaint {
    /// Encoded bytes of the embedded image, in whatever container format the
    /// source carries. Empty when sample retrieval failed — the extractor
    /// skips such events rather than recording a placeholder.
    pub data: Vec<u8>,
}

impl TextPaint {
    /// Convenience constructor for positional call sites and tests.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            font_size,
            x,
            y,
            width,
            height,
        }
    }
}
