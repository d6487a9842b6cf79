// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk — extract layout-aware content from PDFs, reconstruct table rows,
// and rebuild styled DOCX documents from extracted content.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use satzwerk_core::{DocumentContent, RebuildConfig, RowClusterConfig};
use satzwerk_document::DocxBuilder;
use satzwerk_document::pdf::{PdfExtractor, bind_pdfium};
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "satzwerk",
    version,
    about = "Layout-aware document content extraction and styled reconstruction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract positioned text chunks and embedded images from a PDF
    Extract {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Write the JSON result to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Reconstruct table rows from word positions, one grid per page
    Tables {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Vertical clustering tolerance in page units
        #[arg(long, value_name = "UNITS")]
        tolerance: Option<f32>,

        /// Write the JSON result to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Rebuild a styled DOCX from an extracted content tree (JSON)
    Rebuild {
        /// Path to the content JSON (as produced by `extract`)
        content_file: PathBuf,

        /// Path of the DOCX file to write
        #[arg(short, long, value_name = "FILE", default_value = "rebuilt.docx")]
        output: PathBuf,
    },
    /// Rasterize pages and recognize their text with the OCR engine
    #[cfg(feature = "ocr")]
    Ocr {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Render resolution in DPI
        #[arg(long, value_name = "DPI")]
        dpi: Option<f32>,

        /// Directory containing the .rten model files
        #[arg(long, value_name = "DIR")]
        model_dir: Option<PathBuf>,

        /// Skip the binarization preprocessing pass
        #[arg(long)]
        no_preprocess: bool,

        /// Write the JSON result to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    tracing::debug!("satzwerk starting");

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { input_file, out } => extract(&input_file, out.as_deref()),
        Commands::Tables {
            input_file,
            tolerance,
            out,
        } => tables(&input_file, tolerance, out.as_deref()),
        Commands::Rebuild {
            content_file,
            output,
        } => rebuild(&content_file, &output),
        #[cfg(feature = "ocr")]
        Commands::Ocr {
            input_file,
            dpi,
            model_dir,
            no_preprocess,
            out,
        } => ocr(&input_file, dpi, model_dir.as_deref(), no_preprocess, out.as_deref()),
    }
}

fn extract(input: &std::path::Path, out: Option<&std::path::Path>) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let pdfium = bind_pdfium()?;
    let extractor = PdfExtractor::from_bytes(&pdfium, &data)?;

    let extraction = extractor.extract();
    if extraction.has_failures() {
        eprintln!("warning: some pages could not be processed (see the per-page status)");
    }
    let rendered = serde_json::to_string_pretty(&extraction)?;
    emit(&rendered, out)
}

fn tables(
    input: &std::path::Path,
    tolerance: Option<f32>,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let pdfium = bind_pdfium()?;
    let extractor = PdfExtractor::from_bytes(&pdfium, &data)?;

    let mut config = RowClusterConfig::default();
    if let Some(tolerance) = tolerance {
        config.row_tolerance = tolerance;
    }

    let grids = extractor.extract_tables(&config)?;
    let pages: Vec<_> = grids
        .iter()
        .enumerate()
        .map(|(index, grid)| json!({ "page": index + 1, "tableRows": grid.rows }))
        .collect();

    let rendered = serde_json::to_string_pretty(&json!({ "pages": pages }))?;
    emit(&rendered, out)
}

fn rebuild(content_file: &std::path::Path, output: &std::path::Path) -> Result<()> {
    let json = fs::read_to_string(content_file)
        .with_context(|| format!("cannot read {}", content_file.display()))?;
    let content = DocumentContent::from_json(&json)?;

    let bytes = DocxBuilder::new(RebuildConfig::default()).build(&content)?;
    fs::write(output, bytes).with_context(|| format!("cannot write {}", output.display()))?;

    eprintln!("wrote {}", output.display());
    Ok(())
}

#[cfg(feature = "ocr")]
fn ocr(
    input: &std::path::Path,
    dpi: Option<f32>,
    model_dir: Option<&std::path::Path>,
    no_preprocess: bool,
    out: Option<&std::path::Path>,
) -> Result<()> {
    use satzwerk_core::RasterConfig;
    use satzwerk_document::ScanPreprocessor;
    use satzwerk_document::scan::ocr::{OcrConfig, OcrEngine};

    let data = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let pdfium = bind_pdfium()?;
    let extractor = PdfExtractor::from_bytes(&pdfium, &data)?;

    let mut raster_config = RasterConfig::default();
    if let Some(dpi) = dpi {
        raster_config.dpi = dpi;
    }

    let engine = match model_dir {
        Some(dir) => OcrEngine::new(OcrConfig::from_dir(dir))?,
        None => OcrEngine::with_defaults()?,
    };

    let rasters = extractor.rasterize(&raster_config)?;
    let prepared: Vec<_> = rasters
        .into_iter()
        .map(|page| {
            if no_preprocess {
                page
            } else {
                ScanPreprocessor::from_dynamic(page)
                    .prepare_for_ocr()
                    .into_dynamic()
            }
        })
        .collect();

    let pages = engine.recognize_document(&prepared)?;
    let rendered = serde_json::to_string_pretty(&json!({ "pages": pages }))?;
    emit(&rendered, out)
}

fn emit(rendered: &str, out: Option<&std::path::Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `rebuild` reads a content tree from disk and writes a DOCX archive.
    #[test]
    fn rebuild_writes_docx_file() {
        let dir = tempfile::tempdir().unwrap();
        let content_path = dir.path().join("content.json");
        let output_path = dir.path().join("out.docx");

        let content = r#"{
            "pages": [{
                "page": 1,
                "textChunks": [{
                    "text": "Hello",
                    "fontSize": 12.0,
                    "fontName": "Arial-Bold",
                    "x": 0.0, "y": 0.0, "width": 30.0, "height": 12.0,
                    "isBold": true,
                    "isItalic": false
                }],
                "images": []
            }]
        }"#;
        fs::write(&content_path, content).unwrap();

        rebuild(&content_path, &output_path).unwrap();

        let bytes = fs::read(&output_path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    /// Malformed content is rejected before anything is written.
    #[test]
    fn rebuild_rejects_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let content_path = dir.path().join("content.json");
        let output_path = dir.path().join("out.docx");

        fs::write(&content_path, r#"{"pages": [{"page": 1}]}"#).unwrap();

        assert!(rebuild(&content_path, &output_path).is_err());
        assert!(!output_path.exists());
    }
}
