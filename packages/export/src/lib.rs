//! # Docsmith Export
//!
//! Renders composed node trees to XML and owns the export boundary.
//!
//! Two documents come out of every export: a literal-value XML document for
//! direct use/download, and a template-mode document with the same
//! structure whose leaves are named placeholders, reusable as a document
//! template elsewhere. Nothing is persisted; outputs are handed back to
//! the caller.

pub mod exporter;
pub mod serializer;

pub use exporter::{ExportError, ExportOutput, Exporter};
pub use serializer::{serialize, ExportOptions, SerializeMode};
