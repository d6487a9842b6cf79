// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan preprocessing — grayscale conversion and binarization of rasterized
// pages ahead of recognition, using the `image` and `imageproc` crates.

use image::DynamicImage;
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use satzwerk_core::error::{Result, SatzwerkError};
use tracing::{debug, info, instrument};

/// Fixed binarization threshold for the default OCR pipeline. Brightness
/// above this becomes white, everything else black.
pub const OCR_BINARY_THRESHOLD: u8 = 140;

/// Prepares a rasterized page image for text recognition.
///
/// All operations are non-destructive: each method consumes `self` and
/// returns a new preprocessor wrapping the transformed image, enabling
/// method chaining:
///
/// ```ignore
/// let prepared = ScanPreprocessor::from_dynamic(page)
///     .grayscale()
///     .binarize(OCR_BINARY_THRESHOLD)
///     .into_dynamic();
/// ```
pub struct ScanPreprocessor {
    /// The current working image.
    image: DynamicImage,
}

impl ScanPreprocessor {
    // -- Construction ---------------------------------------------------------

    /// Create a preprocessor from raw encoded bytes (PNG, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data).map_err(|err| {
            SatzwerkError::Image(format!("failed to decode page image: {err}"))
        })?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Page image decoded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded image.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Convert the image to grayscale (luma).
    pub fn grayscale(self) -> Self {
        Self {
            image: self.image.grayscale(),
        }
    }

    /// Binarize with a fixed brightness threshold: pixels brighter than
    /// `cutoff` become white, the rest black.
    #[instrument(skip(self), fields(cutoff))]
    pub fn binarize(self, cutoff: u8) -> Self {
        let gray = self.image.to_luma8();
        let binary = threshold(&gray, cutoff, ThresholdType::Binary);
        Self {
            image: DynamicImage::ImageLuma8(binary),
        }
    }

    /// Binarize with a threshold computed from the image histogram via
    /// Otsu's method. Suited to scans whose lighting varies between pages.
    #[instrument(skip(self))]
    pub fn binarize_otsu(self) -> Self {
        let gray = self.image.to_luma8();
        let level = otsu_level(&gray);
        debug!(level, "Otsu threshold computed");
        let binary = threshold(&gray, level, ThresholdType::Binary);
        Self {
            image: DynamicImage::ImageLuma8(binary),
        }
    }

    /// Run the recommended recognition pipeline: grayscale conversion
    /// followed by fixed-threshold binarization at
    /// [`OCR_BINARY_THRESHOLD`].
    #[instrument(skip(self))]
    pub fn prepare_for_ocr(self) -> Self {
        info!("Running OCR preprocessing pipeline");
        self.grayscale().binarize(OCR_BINARY_THRESHOLD)
    }
}
