// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document reconstruction — content tree in, styled document artifact out.

pub mod docx;

pub use docx::DocxBuilder;
