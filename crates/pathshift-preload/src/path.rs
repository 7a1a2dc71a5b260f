//! Call-local path rewriting.

use libc::c_char;
use pathshift_core::rewrite::{rewrite_into, RewriteOutcome};
use std::ffi::CStr;

/// Capacity of a rewritten path, NUL byte included.
pub const PATH_CAP: usize = 4096;

/// A possibly rewritten path argument.
///
/// The value owns its storage, so the rewriter needs no hidden
/// thread-local scratch buffer; it lives on the shim's stack for exactly
/// the duration of the forwarded call and is never aliased past it.
pub enum MappedPath {
    /// Forwarded untouched: no table match, NULL path, engine not yet
    /// initialized, or fail-open after an oversized rewrite.
    Passthrough(*const c_char),
    /// The rewritten, NUL-terminated path.
    Mapped { buf: [u8; PATH_CAP], len: usize },
}

impl MappedPath {
    /// Rewrite `path` through the active mapping table. `op` names the
    /// interposed operation for diagnostics only.
    pub unsafe fn map(op: &'static str, path: *const c_char) -> Self {
        if path.is_null() {
            return MappedPath::Passthrough(path);
        }
        // Calls arriving from other constructors before ours has run pass
        // through unmodified.
        let state = match crate::state::ShimState::get() {
            Some(state) => state,
            None => return MappedPath::Passthrough(path),
        };

        let bytes = CStr::from_ptr(path).to_bytes();
        crate::state::log_call(op, bytes);

        let mut buf = [0u8; PATH_CAP];
        match rewrite_into(&state.table, bytes, &mut buf[..PATH_CAP - 1]) {
            RewriteOutcome::Unmapped => MappedPath::Passthrough(path),
            RewriteOutcome::Overflow => {
                crate::state::log_too_long(op, bytes);
                MappedPath::Passthrough(path)
            }
            RewriteOutcome::Mapped { len } => {
                buf[len] = 0;
                crate::state::log_mapped(op, bytes, &buf[..len]);
                MappedPath::Mapped { buf, len }
            }
        }
    }

    /// Pointer to hand to the original operation.
    pub fn as_ptr(&self) -> *const c_char {
        match self {
            MappedPath::Passthrough(p) => *p,
            MappedPath::Mapped { buf, .. } => buf.as_ptr() as *const c_char,
        }
    }

    /// The rewritten bytes, if a rewrite happened.
    pub fn rewritten(&self) -> Option<&[u8]> {
        match self {
            MappedPath::Passthrough(_) => None,
            MappedPath::Mapped { buf, len } => Some(&buf[..*len]),
        }
    }
}
