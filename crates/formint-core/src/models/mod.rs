//! Data models for form field extraction.

pub mod config;
pub mod field;

pub use config::FormintConfig;
pub use field::{
    ExtractionMetadata, Field, FieldType, FormExtract, HierarchyEntry, HierarchyMap, SourceType,
};
