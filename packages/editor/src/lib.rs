//! # Docsmith Editor
//!
//! Editing engine for the document model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Seed the predefined model                │
//! │  - Apply mutations with validation          │
//! │  - Integrate provider suggestions           │
//! │  - Recalculate amounts and totals           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ composer: model → node tree                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ export: node tree → XML (literal/template)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Model is source of truth**: composed trees and markup are derived
//!    views, re-computed in full on every export
//! 2. **Validated mutations**: structural constraints checked before any
//!    state changes; rejected mutations change nothing
//! 3. **Moves are no-op safe**: an invalid reorder returns the unchanged
//!    order instead of failing
//! 4. **Suggestions are atomic**: a payload either parses (possibly via
//!    salvage) and applies, or nothing changes

mod document;
mod mutations;
mod payload;
mod suggestions;
mod totals;

pub use document::Document;
pub use mutations::{Mutation, MutationError};
pub use payload::{parse_suggestion_payload, SuggestError};
pub use suggestions::{apply_suggestions, SuggestionMap};
pub use totals::recalculate;

// Re-export the downstream pipeline types editors typically hand state to
pub use docsmith_composer::{Composer, DocNode};
