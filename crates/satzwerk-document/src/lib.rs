// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-document — layout extraction and reconstruction engine.
//
// Provides the pure extraction reducers (paint events → chunks and images,
// words → table rows), the PDF collaborator adapter (`pdfium` feature), the
// DOCX rebuilder, and the scan/OCR path (`ocr` feature for the engine).

pub mod extract;
pub mod rebuild;
pub mod scan;

#[cfg(feature = "pdfium")]
pub mod pdf;

// Re-export the primary entry points so callers can use
// `satzwerk_document::DocxBuilder` etc.
pub use extract::{collect_chunks, collect_images, infer_style, process_events, reconstruct_rows};
pub use rebuild::DocxBuilder;
pub use scan::ScanPreprocessor;

#[cfg(feature = "pdfium")]
pub use pdf::{PdfExtractor, PdfSource, bind_pdfium};

#[cfg(feature = "ocr")]
pub use scan::ocr::OcrEngine;
