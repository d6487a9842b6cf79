// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine wrapper for the recognition extraction path.
//
// Wraps the `ocrs` crate, a pure-Rust OCR engine backed by neural network
// models executed via `rten`. Only available with the `ocr` feature:
//
// ```toml
// satzwerk-document = { path = "crates/satzwerk-document", features = ["ocr"] }
// ```
//
// The engine requires two ONNX model files — `text-detection.rten` and
// `text-recognition.rten` — downloadable from the ocrs-models releases, or
// obtained automatically by running `ocrs-cli` once (models land in
// `$XDG_CACHE_HOME/ocrs`, typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::OcrPage;
use tracing::{debug, info, instrument};

use crate::scan::normalize_whitespace;

/// Well-known filenames for the detection and recognition models.
const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Default directory for cached OCR model files, per the XDG Base Directory
/// specification: `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Configuration for constructing an [`OcrEngine`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Point the config at a directory containing both model files.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist before attempting to load them.
    pub fn validate(&self) -> Result<()> {
        for path in [&self.detection_model_path, &self.recognition_model_path] {
            if !path.exists() {
                return Err(SatzwerkError::Ocr(format!(
                    "OCR model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Text recognition over rasterized pages.
///
/// Model loading is the expensive step — construct the engine once and call
/// [`recognize_page`](Self::recognize_page) per page. The `ocrs` and `rten`
/// crates must be compiled in release mode; debug builds are 10-100x slower.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    /// Load the models named by `config` and initialise the engine.
    ///
    /// # Errors
    ///
    /// [`SatzwerkError::Ocr`] if model files are missing or corrupt.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
        recognition = %config.recognition_model_path.display(),
    ))]
    pub fn new(config: OcrConfig) -> Result<Self> {
        config.validate()?;

        info!("Loading OCR models");
        let detection_model = Model::load_file(&config.detection_model_path).map_err(|err| {
            SatzwerkError::Ocr(format!(
                "failed to load detection model from {}: {err}",
                config.detection_model_path.display()
            ))
        })?;
        let recognition_model =
            Model::load_file(&config.recognition_model_path).map_err(|err| {
                SatzwerkError::Ocr(format!(
                    "failed to load recognition model from {}: {err}",
                    config.recognition_model_path.display()
                ))
            })?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| SatzwerkError::Ocr(format!("failed to initialise OCR engine: {err}")))?;

        info!("OCR engine initialised");
        Ok(Self { engine })
    }

    /// Construct with models from the default cache directory.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OcrConfig::default())
    }

    /// Recognize all text on one rasterized page.
    ///
    /// The input is converted to RGB8 internally. The recognized text is
    /// whitespace-normalized: padded line breaks collapse to single
    /// newlines and the result is trimmed.
    #[instrument(skip_all, fields(width = page.width(), height = page.height()))]
    pub fn recognize_page(&self, page: &DynamicImage) -> Result<String> {
        let rgb = page.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            SatzwerkError::Ocr(format!(
                "failed to create image source ({width}x{height}): {err}"
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| SatzwerkError::Ocr(format!("OCR preprocessing failed: {err}")))?;

        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| SatzwerkError::Ocr(format!("OCR recognition failed: {err}")))?;

        let normalized = normalize_whitespace(&text);
        debug!(
            line_count = normalized.lines().count(),
            char_count = normalized.len(),
            "Page recognized"
        );
        Ok(normalized)
    }

    /// Recognize a sequence of rasterized pages, producing one [`OcrPage`]
    /// per input in order, numbered from 1.
    #[instrument(skip_all, fields(page_count = pages.len()))]
    pub fn recognize_document(&self, pages: &[DynamicImage]) -> Result<Vec<OcrPage>> {
        let mut results = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let page_number = index as u32 + 1;
            let text = self.recognize_page(page).map_err(|err| {
                SatzwerkError::PageUnprocessable {
                    page: page_number,
                    reason: err.to_string(),
                }
            })?;
            results.push(OcrPage {
                page: page_number,
                text,
            });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_dir_names_both_models() {
        let config = OcrConfig::from_dir("/tmp/models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/tmp/models/text-detection.rten")
        );
        assert_eq!(
            config.recognition_model_path,
            PathBuf::from("/tmp/models/text-recognition.rten")
        );
    }

    #[test]
    fn validate_reports_missing_models() {
        let config = OcrConfig::from_dir("/nonexistent/ocr-models");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SatzwerkError::Ocr(_)));
    }
}
