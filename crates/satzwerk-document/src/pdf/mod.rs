// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF collaborator adapter — binds libpdfium via `pdfium-render` and exposes
// the three page views the engine consumes: paint events, word records, and
// full-page rasters. Only this module talks to the parser; everything in
// `extract` stays parser-free.

pub mod extractor;
pub mod source;

pub use extractor::PdfExtractor;
pub use source::{PdfSource, bind_pdfium};

// Re-exported so callers can hold the binding without naming the crate.
pub use pdfium_render::prelude::Pdfium;
