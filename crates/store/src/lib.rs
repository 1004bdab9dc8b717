//! Store - PDF export, settings, and artifact storage
//!
//! This crate serializes laid-out documentation to PDF, manages export
//! settings, talks to the session, document and artifact collaborators,
//! and runs the project export pipeline.

mod artifact;
mod error;
mod export;
mod repository;
mod settings;
pub mod pdf;

pub use artifact::*;
pub use error::*;
pub use export::*;
pub use repository::*;
pub use settings::*;

// Re-export the render entry points most callers need
pub use pdf::{render_manual, render_sections, PdfError, PdfExportOptions, RenderedPdf};
