//! # pathshift-preload
//!
//! LD_PRELOAD shim that transparently redirects filesystem path arguments:
//! any path under a configured virtual prefix is silently serviced from
//! the corresponding real prefix, with no change to the calling program.
//!
//! The mapping comes from `PATHSHIFT_MAP` (`virt1:real1:virt2:real2:...`)
//! or a compiled-in default. Every interposed entry point rewrites its
//! path argument(s) into a call-local buffer and forwards all remaining
//! arguments unchanged to the original implementation, resolved once per
//! operation via `dlsym(RTLD_NEXT)`. Return values and errno pass through
//! untouched; values read back from `readlink`-style calls are not
//! translated in reverse.
//!
//! Linux/glibc only: the interposed surface includes glibc-versioned
//! symbols (`__xstat`), 64-bit variants and `fts_open`.

// Unsafe C ABI entry points everywhere; per-function safety docs add nothing
#![allow(clippy::missing_safety_doc)]

// Macros must be defined before modules that use them
#[macro_use]
pub mod macros;

pub mod path;
pub mod reals;
pub mod state;
pub mod syscalls;

/// Constructor: builds the mapping table before any application code runs.
/// The loader guarantees exactly one execution, before `main`.
#[link_section = ".init_array"]
#[used]
pub static PATHSHIFT_INIT: unsafe extern "C" fn() = {
    unsafe extern "C" fn init() {
        crate::state::init();
    }
    init
};

/// Destructor: releases the mapping table at process exit.
#[link_section = ".fini_array"]
#[used]
pub static PATHSHIFT_FINI: unsafe extern "C" fn() = {
    unsafe extern "C" fn fini() {
        crate::state::teardown();
    }
    fini
};
