//! Manifest comparison.
//!
//! Compares the current-run manifest against the reference manifest and
//! produces a structured, deterministic diff.
//!
//! ## Entry point
//!
//! ```ignore
//! use morte_core::diff::{compare, render_human_summary};
//!
//! let diff = compare(&current, &reference);
//! if !diff.is_reproducible() {
//!     eprintln!("{}", render_human_summary(&diff));
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: entries follow the iteration order of the current manifest.
//! - **Current-driven**: only paths present in the current manifest are
//!   inspected. A path recorded only in the reference (an output the latest
//!   run did not produce) is never reported.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare;
pub use human_summary::render_human_summary;
pub use model::{DiffEntry, DiffReason, ManifestDiff};
