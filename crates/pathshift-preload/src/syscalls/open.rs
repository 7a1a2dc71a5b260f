//! open-family entry points.
//!
//! open/open64/openat/openat64 are variadic: the mode argument exists
//! only when the flags request file creation. The exported symbols live
//! in the C bridge (`src/c/varargs.c`), which reads the mode under
//! `__OPEN_NEEDS_MODE` and calls the implementations here with a
//! `has_mode` discriminant. The original is then invoked through a
//! C-variadic function pointer, so the mode is passed along only when it
//! was actually present.

use crate::path::MappedPath;
use libc::{c_char, c_int, c_uint, mode_t, FILE};

type VariadicOpen = unsafe extern "C" fn(*const c_char, c_int, ...) -> c_int;
type VariadicOpenat = unsafe extern "C" fn(c_int, *const c_char, c_int, ...) -> c_int;

/// Archive members are only linked in when something references them, and
/// the bridge's exported symbols are never called from Rust. This keeps
/// the bridge object (and with it all seven variadic entry points) in the
/// final library.
#[used]
static FORCE_BRIDGE_LINK: VariadicOpen = {
    extern "C" {
        fn open(path: *const c_char, flags: c_int, ...) -> c_int;
    }
    open
};

#[no_mangle]
pub unsafe extern "C" fn pathshift_open(
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
    has_mode: c_int,
) -> c_int {
    let mapped = MappedPath::map("open", path);
    let real = real_fn!(open, VariadicOpen);
    if has_mode != 0 {
        real(mapped.as_ptr(), flags, mode as c_uint)
    } else {
        real(mapped.as_ptr(), flags)
    }
}

#[no_mangle]
pub unsafe extern "C" fn pathshift_open64(
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
    has_mode: c_int,
) -> c_int {
    let mapped = MappedPath::map("open64", path);
    let real = real_fn!(open64, VariadicOpen);
    if has_mode != 0 {
        real(mapped.as_ptr(), flags, mode as c_uint)
    } else {
        real(mapped.as_ptr(), flags)
    }
}

#[no_mangle]
pub unsafe extern "C" fn pathshift_openat(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
    has_mode: c_int,
) -> c_int {
    let mapped = MappedPath::map("openat", path);
    let real = real_fn!(openat, VariadicOpenat);
    if has_mode != 0 {
        real(dirfd, mapped.as_ptr(), flags, mode as c_uint)
    } else {
        real(dirfd, mapped.as_ptr(), flags)
    }
}

#[no_mangle]
pub unsafe extern "C" fn pathshift_openat64(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
    has_mode: c_int,
) -> c_int {
    let mapped = MappedPath::map("openat64", path);
    let real = real_fn!(openat64, VariadicOpenat);
    if has_mode != 0 {
        real(dirfd, mapped.as_ptr(), flags, mode as c_uint)
    } else {
        real(dirfd, mapped.as_ptr(), flags)
    }
}

intercept! {
    fn creat(PATH, mode: mode_t) -> c_int;
    fn creat64(PATH, mode: mode_t) -> c_int;
    fn fopen(PATH, mode: *const c_char) -> *mut FILE;
    fn fopen64(PATH, mode: *const c_char) -> *mut FILE;
    fn freopen(PATH, mode: *const c_char, stream: *mut FILE) -> *mut FILE;
    fn freopen64(PATH, mode: *const c_char, stream: *mut FILE) -> *mut FILE;
}
