// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Satzwerk.

use thiserror::Error;

/// Top-level error type for all Satzwerk operations.
#[derive(Debug, Error)]
pub enum SatzwerkError {
    // -- Input errors --
    #[error("no document data provided")]
    EmptyInput,

    #[error("invalid content payload: {0}")]
    InvalidContent(String),

    // -- Extraction errors --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("page {page} could not be processed: {reason}")]
    PageUnprocessable { page: u32, reason: String },

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    // -- Reconstruction errors --
    #[error("document build failed: {0}")]
    DocumentBuild(String),

    // -- I/O and serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SatzwerkError>;
