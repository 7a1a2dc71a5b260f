//! Process-wide engine state and stderr diagnostics.
//!
//! The mapping table is built exactly once, in the library constructor,
//! and released exactly once, in the destructor; between the two it is
//! read-only and needs no synchronization. Diagnostics are written to
//! stderr with `libc::write` from fixed stack buffers: no heap, no locks,
//! safe inside an arbitrary interposed process.

use libc::c_void;
use pathshift_core::ops::OPERATIONS;
use pathshift_core::table::{MappingTable, ParseError};
use std::ffi::CStr;
use std::fmt::Write as _;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

/// Exit status for a malformed mapping configuration. The process stops
/// before the first interception: a half-understood table would corrupt
/// every later path decision.
pub const EXIT_BAD_CONFIG: libc::c_int = 255;

static SHIM_STATE: AtomicPtr<ShimState> = AtomicPtr::new(ptr::null_mut());
/// `PATHSHIFT_QUIET`: suppress informational lines. Errors still print.
static QUIET: AtomicBool = AtomicBool::new(false);
/// `PATHSHIFT_DEBUG`: trace every intercepted call.
static DEBUG: AtomicBool = AtomicBool::new(false);

/// Where the active table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Builtin,
    Environment,
}

pub struct ShimState {
    pub table: MappingTable,
    pub source: Source,
}

impl ShimState {
    /// The active state, or `None` before the constructor has run.
    pub fn get() -> Option<&'static Self> {
        let p = SHIM_STATE.load(Ordering::Acquire);
        if p.is_null() {
            None
        } else {
            Some(unsafe { &*p })
        }
    }
}

/// Runs from `.init_array`, exactly once, before any application code.
pub unsafe fn init() {
    if !libc::getenv(c"PATHSHIFT_QUIET".as_ptr()).is_null() {
        QUIET.store(true, Ordering::Relaxed);
    }
    if !libc::getenv(c"PATHSHIFT_DEBUG".as_ptr()).is_null() {
        DEBUG.store(true, Ordering::Relaxed);
    }

    let raw = libc::getenv(c"PATHSHIFT_MAP".as_ptr());
    let config = if raw.is_null() {
        None
    } else {
        Some(CStr::from_ptr(raw).to_bytes())
    };
    let source = match config {
        Some(bytes) if !bytes.is_empty() => Source::Environment,
        _ => Source::Builtin,
    };

    let table = match MappingTable::from_config(config) {
        Ok(table) => table,
        Err(err) => {
            log_config_error(&err);
            libc::exit(EXIT_BAD_CONFIG);
        }
    };

    for (idx, entry) in table.entries().iter().enumerate() {
        log_table_entry(idx, entry.virtual_prefix(), entry.real_prefix());
    }
    log_ready(table.len(), source);

    let state = Box::new(ShimState { table, source });
    SHIM_STATE.store(Box::into_raw(state), Ordering::Release);
}

/// Runs from `.fini_array` at process exit; drops the table. The builtin
/// string constants it may have been built from are static and stay put.
pub unsafe fn teardown() {
    let p = SHIM_STATE.swap(ptr::null_mut(), Ordering::AcqRel);
    if !p.is_null() {
        drop(Box::from_raw(p));
    }
}

// --- Diagnostics ---

/// Room for two full paths plus decoration.
const LOG_BUF: usize = 2 * crate::path::PATH_CAP + 64;

fn emit(msg: &[u8]) {
    unsafe {
        libc::write(2, msg.as_ptr() as *const c_void, msg.len());
    }
}

/// Per-call trace, `PATHSHIFT_DEBUG` only.
pub(crate) fn log_call(op: &str, path: &[u8]) {
    if !DEBUG.load(Ordering::Relaxed) {
        return;
    }
    let mut buf = [0u8; LOG_BUF];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let _ = write!(w, "[pathshift] {}('", op);
    w.write_bytes(path);
    let _ = w.write_str("')\n");
    emit(w.as_bytes());
}

/// One line per successful rewrite, suppressible with `PATHSHIFT_QUIET`.
pub(crate) fn log_mapped(op: &str, from: &[u8], to: &[u8]) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    let mut buf = [0u8; LOG_BUF];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let _ = write!(w, "[pathshift] {}: '", op);
    w.write_bytes(from);
    let _ = w.write_str("' => '");
    w.write_bytes(to);
    let _ = w.write_str("'\n");
    emit(w.as_bytes());
}

/// Oversized rewrite: always printed, the call proceeds with the original
/// path (fail-open).
pub(crate) fn log_too_long(op: &str, path: &[u8]) {
    let mut buf = [0u8; LOG_BUF];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let _ = write!(w, "[pathshift] ERROR {}: rewritten path too long, keeping '", op);
    w.write_bytes(path);
    let _ = w.write_str("'\n");
    emit(w.as_bytes());
}

fn log_table_entry(idx: usize, virt: &[u8], real: &[u8]) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    let mut buf = [0u8; LOG_BUF];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let _ = write!(w, "[pathshift] map[{}]: '", idx);
    w.write_bytes(virt);
    let _ = w.write_str("' => '");
    w.write_bytes(real);
    let _ = w.write_str("'\n");
    emit(w.as_bytes());
}

fn log_ready(entries: usize, source: Source) {
    if !DEBUG.load(Ordering::Relaxed) {
        return;
    }
    let mut buf = [0u8; 128];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let origin = match source {
        Source::Builtin => "builtin",
        Source::Environment => "PATHSHIFT_MAP",
    };
    let _ = writeln!(
        w,
        "[pathshift] {} mapping(s) from {}, {} operations interposed",
        entries,
        origin,
        OPERATIONS.len()
    );
    emit(w.as_bytes());
}

fn log_config_error(err: &ParseError) {
    let mut buf = [0u8; 256];
    let mut w = crate::macros::StackWriter::new(&mut buf);
    let _ = writeln!(w, "[pathshift] ERROR: {}; refusing to start", err);
    emit(w.as_bytes());
}
