//! Interposed operation entry points, grouped by family.
//!
//! Fixed-arity and two-path shims are generated by the `intercept!` and
//! `intercept_two_path!` macros; the open and exec families have their
//! variadic front ends in `src/c/varargs.c` and the corresponding
//! implementations here.

pub mod dir;
pub mod exec;
pub mod fts;
pub mod misc;
pub mod open;
pub mod path_ops;
pub mod stat;
