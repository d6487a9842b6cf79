// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration. Each knob the heuristics depend on lives here as a
// named value with a documented default, rather than as an inline constant.

use serde::{Deserialize, Serialize};

/// Tuning for the row-clustering heuristic of the table reconstructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowClusterConfig {
    /// Bucket width in page-coordinate units for vertical clustering. Words
    /// whose y-coordinates round to the same multiple of this tolerance are
    /// treated as one visual row. Must be positive.
    pub row_tolerance: f32,
}

impl Default for RowClusterConfig {
    fn default() -> Self {
        Self { row_tolerance: 5.0 }
    }
}

/// Fixed display extent of an inline image placeholder, in EMU
/// (914 400 EMU per inch — the OOXML drawing unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExtent {
    pub cx: u32,
    pub cy: u32,
}

/// Settings for the document rebuilder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildConfig {
    /// Display extent for every inline image. Reconstructed images are
    /// placed at this constant size; their native pixel dimensions are kept
    /// in the content model but do not drive layout.
    pub image_extent: ImageExtent,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            image_extent: ImageExtent {
                cx: 990_000,
                cy: 792_000,
            },
        }
    }
}

/// Settings for full-page rasterization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Render resolution in dots per inch. The default is deliberately high
    /// so that small print survives rasterization for OCR.
    pub dpi: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { dpi: 500.0 }
    }
}

impl RasterConfig {
    /// Scale factor relative to the PDF's native 72-points-per-inch space.
    pub fn scale_factor(&self) -> f32 {
        self.dpi / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_is_five_units() {
        assert_eq!(RowClusterConfig::default().row_tolerance, 5.0);
    }

    #[test]
    fn default_image_extent() {
        let config = RebuildConfig::default();
        assert_eq!(config.image_extent.cx, 990_000);
        assert_eq!(config.image_extent.cy, 792_000);
    }

    #[test]
    fn raster_scale_factor() {
        let config = RasterConfig { dpi: 144.0 };
        assert!((config.scale_factor() - 2.0).abs() < f32::EPSILON);
    }
}
