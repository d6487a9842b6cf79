// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-document extraction drivers over a `PdfSource`.

use image::DynamicImage;
use pdfium_render::prelude::Pdfium;
use satzwerk_core::error::Result;
use satzwerk_core::{
    DocumentContent, DocumentExtraction, PageOutcome, RasterConfig, RowClusterConfig, TableGrid,
};
use tracing::{info, instrument, warn};

use crate::extract::{process_events, reconstruct_rows};
use crate::pdf::source::PdfSource;

/// Drives extraction across all pages of one document.
///
/// Pages are processed strictly in order, each to completion before the
/// next. Every call operates over its own loaded document and builds its own
/// output tree; nothing is shared or cached across invocations.
pub struct PdfExtractor<'a> {
    source: PdfSource<'a>,
}

impl<'a> PdfExtractor<'a> {
    /// Open a document for extraction. Rejects empty input up front.
    pub fn from_bytes(pdfium: &'a Pdfium, data: &'a [u8]) -> Result<Self> {
        Ok(Self {
            source: PdfSource::from_bytes(pdfium, data)?,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.source.page_count()
    }

    /// Borrow the underlying source for direct page-view access.
    pub fn source(&self) -> &PdfSource<'a> {
        &self.source
    }

    /// Extract chunks and images for every page, as per-page outcomes.
    ///
    /// A page whose events cannot be replayed becomes a `Failed` entry with
    /// its reason — never a silently empty page — and does not stop the
    /// remaining pages.
    #[instrument(skip(self), fields(page_count = self.page_count()))]
    pub fn extract(&self) -> DocumentExtraction {
        let mut pages = Vec::with_capacity(self.page_count() as usize);

        for index in 0..self.page_count() {
            let page_number = index + 1;
            match self.source.page_events(index) {
                Ok(events) => pages.push(PageOutcome::Ok {
                    content: process_events(page_number, &events),
                }),
                Err(err) => {
                    warn!(page = page_number, %err, "page could not be processed");
                    pages.push(PageOutcome::Failed {
                        page: page_number,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let extraction = DocumentExtraction { pages };
        info!(
            page_count = extraction.pages.len(),
            failed = extraction.pages.iter().filter(|p| p.is_failed()).count(),
            "Document extracted"
        );
        extraction
    }

    /// Extract a complete content tree, failing on the first unprocessable
    /// page.
    pub fn extract_content(&self) -> Result<DocumentContent> {
        self.extract().into_content()
    }

    /// Reconstruct table rows for every page via the word-segmentation view.
    ///
    /// This path is independent of [`extract`](Self::extract): it consumes
    /// words, not paint events. An unprocessable page raises a page-scoped
    /// error.
    #[instrument(skip(self, config), fields(page_count = self.page_count()))]
    pub fn extract_tables(&self, config: &RowClusterConfig) -> Result<Vec<TableGrid>> {
        let mut grids = Vec::with_capacity(self.page_count() as usize);
        for index in 0..self.page_count() {
            let words = self.source.page_words(index)?;
            grids.push(reconstruct_rows(&words, config));
        }
        Ok(grids)
    }

    /// Rasterize every page in order, for the recognition path.
    #[instrument(skip(self, config), fields(page_count = self.page_count(), dpi = config.dpi))]
    pub fn rasterize(&self, config: &RasterConfig) -> Result<Vec<DynamicImage>> {
        let mut pages = Vec::with_capacity(self.page_count() as usize);
        for index in 0..self.page_count() {
            pages.push(self.source.rasterize_page(index, config)?);
        }
        Ok(pages)
    }
}
