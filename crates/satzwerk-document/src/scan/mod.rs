// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterized-page processing for the OCR extraction path: image
// preprocessing (always available) and the recognition engine wrapper
// (behind the `ocr` feature gate).

pub mod enhance;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use enhance::ScanPreprocessor;

#[cfg(feature = "ocr")]
pub use ocr::{OcrConfig, OcrEngine};

/// Collapse whitespace runs that contain a line break into a single `\n`
/// and trim the result.
///
/// Recognition output tends to pad line breaks with stray spaces and emit
/// blank lines between text blocks; downstream consumers want one clean
/// newline per break.
pub fn normalize_whitespace(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_padded_line_breaks() {
        assert_eq!(normalize_whitespace("alpha  \n   beta"), "alpha\nbeta");
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(
            normalize_whitespace("alpha\n\n\nbeta\n  \ngamma"),
            "alpha\nbeta\ngamma"
        );
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(normalize_whitespace("\n  alpha beta \n"), "alpha beta");
    }

    /// Interior spaces within a line are untouched.
    #[test]
    fn preserves_interword_spacing() {
        assert_eq!(normalize_whitespace("col1   col2"), "col1   col2");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n \n "), "");
    }
}
