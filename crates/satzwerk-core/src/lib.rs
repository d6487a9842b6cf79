// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Satzwerk — content model, error, and configuration types shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ImageExtent, RasterConfig, RebuildConfig, RowClusterConfig};
pub use error::SatzwerkError;
pub use types::*;
