//! Core library for immigration form intake.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract with a lopdf fallback)
//! - Form-type detection over known immigration form codes
//! - Rule-based recovery of labeled, hierarchical form fields from
//!   converted document text
//! - Serializable field models and pipeline configuration

pub mod error;
pub mod form;
pub mod models;
pub mod pdf;

pub use error::{FormintError, PdfError, Result};
pub use form::{ExtractionResult, FieldExtraction, FormParser, FormType};
pub use models::config::FormintConfig;
pub use models::field::{
    Field, FieldType, FormExtract, HierarchyEntry, HierarchyMap, SourceType,
};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
