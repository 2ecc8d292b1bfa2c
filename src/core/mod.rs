//! # Core Application Logic
//!
//! This module contains Navscan's business logic. It knows nothing about
//! any specific front-end: the CLI (or any other presentation layer) calls
//! [`analyzer::SiteAnalyzer::analyze`] and renders whatever comes back.
//!
//! ## Modules
//!
//! - [`types`]: The `AnalysisResult` data model and caller-side status
//! - [`analyzer`]: Prompt composition and result assembly
//! - [`normalize`]: Recovery of structure from untrusted model output
//! - [`config`]: Layered settings (defaults → file → env → CLI)

pub mod analyzer;
pub mod config;
pub mod normalize;
pub mod types;
