//! # Docsmith Composer
//!
//! Composes the ordered document model into an output node tree.
//!
//! ## Purpose
//!
//! The composer walks the page's order scopes top-down (groups → sections
//! and tables → fields, columns, rows), resolving each field through the
//! value precedence chain and reconciling dual column-key spellings, and
//! emits a `DocNode` tree the export serializer renders in literal or
//! template mode.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Composition is fully deterministic and read-only.**
//!
//! For any (Page, EntityStore, OrderModel, live snapshot), `compose()` MUST
//! produce an identical node tree on every invocation:
//!
//! - Every emission walks an explicit ordered list — order lists first,
//!   insertion order as the fallback; no map iteration order ever leaks
//!   into output
//! - Node attributes are ordered, so serialized markup is byte-identical
//! - No time/random/environment dependence
//! - No mutation of any input; rapid repeated composition is safe and each
//!   run is an independent full result
//!
//! ## Recovery Boundaries
//!
//! Dangling order references are filtered and logged, never raised. A scope
//! with no order and no entities composes to an empty, well-formed element.
//! The only composition error is an order list naming the same id twice,
//! which indicates corrupted external state and surfaces at the export
//! boundary.

pub mod capture;
pub mod composer;
pub mod node;
pub mod normalize;
pub mod resolve;

#[cfg(test)]
mod tests_compose;

#[cfg(test)]
mod tests_isolation;

pub use capture::{snapshot, CaptureSource, NullCapture, StaticCapture};
pub use composer::{ComposeError, ComposeResult, Composer};
pub use node::DocNode;
pub use normalize::{AliasPair, KeyNormalizer};
pub use resolve::resolve;
