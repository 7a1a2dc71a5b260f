//! # pathshift-core
//!
//! The path-redirection engine behind the pathshift preload layer: the
//! ordered mapping table, the whole-segment prefix matcher, the bounded
//! fail-open rewriter and the static catalog of intercepted operations.
//!
//! Everything here operates on byte slices rather than `str` so that
//! non-UTF-8 paths are rewritten exactly as the kernel would see them.
//! The crate contains no `unsafe` and no FFI; the `pathshift-preload`
//! cdylib wraps these primitives behind the interposed C entry points.

pub mod ops;
pub mod rewrite;
pub mod table;

pub use ops::{OpDesc, Shape, OPERATIONS};
pub use rewrite::{path_prefix_matches, rewrite_into, RewriteOutcome};
pub use table::{MappingEntry, MappingTable, ParseError};
