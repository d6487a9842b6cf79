// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout extraction — pure reducers over a page's paint-event sequence, plus
// the geometric table reconstructor. Nothing in this module touches a parser;
// the `pdf` module adapts an actual document into these inputs.

pub mod chunks;
pub mod events;
pub mod images;
pub mod style;
pub mod table;

pub use chunks::collect_chunks;
pub use events::{ImagePaint, PaintEvent, TextPaint};
pub use images::collect_images;
pub use style::{TextStyle, infer_style};
pub use table::reconstruct_rows;

use satzwerk_core::PageContent;
use tracing::debug;

/// Reduce one page's event sequence to its extracted content.
///
/// Chunk and image extraction consume the same sequence independently (each
/// filtered to its event kind); both preserve encounter order. The input is
/// read-only and the call has no other effect, so processing the same events
/// twice yields equal results.
pub fn process_events(page_number: u32, events: &[PaintEvent]) -> PageContent {
    let chunks = collect_chunks(events);
    let images = collect_images(events);

    debug!(
        page_number,
        chunk_count = chunks.len(),
        image_count = images.len(),
        "Page events processed"
    );

    PageContent {
        page_number,
        chunks,
        images,
    }
}
