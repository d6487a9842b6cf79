// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content chunk extractor — one text-paint event in, one chunk out.

use satzwerk_core::TextChunk;

use crate::extract::events::PaintEvent;
use crate::extract::style::infer_style;

/// Fold a page's event sequence into its text chunks.
///
/// A single forward pass: every text-paint event yields exactly one
/// [`TextChunk`] with style flags inferred from the event's font name.
/// Events are never dropped or reordered — the output keeps content-stream
/// encounter order, which is not guaranteed to be reading order.
pub fn collect_chunks(events: &[PaintEvent]) -> Vec<TextChunk> {
    events
        .iter()
        .filter_map(|event| match event {
            PaintEvent::Text(paint) => {
                let style = infer_style(&paint.font_name);
                Some(TextChunk {
                    text: paint.text.clone(),
                    font_size: paint.font_size,
                    font_name: paint.font_name.clone(),
                    x: paint.x,
                    y: paint.y,
                    width: paint.width,
                    height: paint.height,
                    is_bold: style.bold,
                    is_italic: style.italic,
                })
            }
            PaintEvent::Image(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::events::{ImagePaint, TextPaint};

    fn text_event(text: &str, font: &str, y: f32) -> PaintEvent {
        PaintEvent::Text(TextPaint::new(text, font, 11.0, 72.0, y, 100.0, 11.0))
    }

    /// Chunks come out in encounter order, even when that is not reading
    /// order (here the second event sits above the first on the page).
    #[test]
    fn encounter_order_is_preserved() {
        let events = vec![
            text_event("footer", "Times", 40.0),
            text_event("heading", "Times", 780.0),
            text_event("body", "Times", 400.0),
        ];

        let chunks = collect_chunks(&events);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["footer", "heading", "body"]);
    }

    /// Re-running extraction over the same events yields an identical chunk
    /// sequence.
    #[test]
    fn extraction_is_deterministic() {
        let events = vec![
            text_event("a", "Helvetica", 700.0),
            text_event("b", "Helvetica-Oblique", 680.0),
        ];

        assert_eq!(collect_chunks(&events), collect_chunks(&events));
    }

    #[test]
    fn style_flags_follow_font_name() {
        let events = vec![
            text_event("strong", "Arial-BoldMT", 700.0),
            text_event("slanted", "Arial-ItalicMT", 680.0),
        ];

        let chunks = collect_chunks(&events);
        assert!(chunks[0].is_bold && !chunks[0].is_italic);
        assert!(!chunks[1].is_bold && chunks[1].is_italic);
    }

    /// An unresolved font arrives as the empty-string sentinel and produces
    /// an unstyled chunk rather than a failure.
    #[test]
    fn sentinel_font_name_is_carried_through() {
        let chunks = collect_chunks(&[text_event("orphan", "", 100.0)]);
        assert_eq!(chunks[0].font_name, "");
        assert!(!chunks[0].is_bold);
        assert!(!chunks[0].is_italic);
    }

    /// Image events are invisible to the chunk extractor.
    #[test]
    fn image_events_are_filtered_out() {
        let events = vec![
            text_event("before", "Times", 500.0),
            PaintEvent::Image(ImagePaint { data: vec![1, 2, 3] }),
            text_event("after", "Times", 480.0),
        ];

        let chunks = collect_chunks(&events);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "after");
    }
}
