//! Tree-traversal entry points: fts_open and the ftw/nftw family.

use crate::path::MappedPath;
use libc::{c_char, c_int, c_void};
use std::ffi::CString;

/// fts_open comparison callback; FTSENT stays opaque here.
pub type FtsCompar = Option<unsafe extern "C" fn(*mut c_void, *mut c_void) -> c_int>;
pub type FtwFn = Option<unsafe extern "C" fn(*const c_char, *const libc::stat, c_int) -> c_int>;
pub type Ftw64Fn = Option<unsafe extern "C" fn(*const c_char, *const libc::stat64, c_int) -> c_int>;
pub type NftwFn =
    Option<unsafe extern "C" fn(*const c_char, *const libc::stat, c_int, *mut c_void) -> c_int>;
pub type Nftw64Fn =
    Option<unsafe extern "C" fn(*const c_char, *const libc::stat64, c_int, *mut c_void) -> c_int>;

type FtsOpenFn = unsafe extern "C" fn(*const *mut c_char, c_int, FtsCompar) -> *mut c_void;

/// Rewrites every element of the NULL-terminated path vector and forwards
/// a parallel vector. Unchanged elements keep their original pointers;
/// rewritten ones are copied to owned storage that is released on every
/// exit path once the call returns. fts(3) copies the paths it needs, so
/// the storage does not have to outlive the call.
#[no_mangle]
pub unsafe extern "C" fn fts_open(
    path_argv: *const *mut c_char,
    options: c_int,
    compar: FtsCompar,
) -> *mut c_void {
    let real = real_fn!(fts_open, FtsOpenFn);
    if path_argv.is_null() {
        return real(path_argv, options, compar);
    }

    let mut count = 0usize;
    while !(*path_argv.add(count)).is_null() {
        count += 1;
    }

    // CString buffers stay put while the vec grows, so the raw pointers
    // pushed into `forwarded` remain valid.
    let mut storage: Vec<CString> = Vec::new();
    let mut forwarded: Vec<*mut c_char> = Vec::with_capacity(count + 1);
    for i in 0..count {
        let original = *path_argv.add(i);
        match MappedPath::map("fts_open", original).rewritten() {
            Some(bytes) => match CString::new(bytes) {
                Ok(owned) => {
                    forwarded.push(owned.as_ptr() as *mut c_char);
                    storage.push(owned);
                }
                Err(_) => forwarded.push(original),
            },
            None => forwarded.push(original),
        }
    }
    forwarded.push(std::ptr::null_mut());

    real(forwarded.as_ptr(), options, compar)
}

intercept! {
    /// Only the root path is rewritten; the paths reported to the callback
    /// are whatever the original traversal produces.
    fn ftw(PATH, handler: FtwFn, nopenfd: c_int) -> c_int;
    fn ftw64(PATH, handler: Ftw64Fn, nopenfd: c_int) -> c_int;
    fn nftw(PATH, handler: NftwFn, nopenfd: c_int, flags: c_int) -> c_int;
    fn nftw64(PATH, handler: Nftw64Fn, nopenfd: c_int, flags: c_int) -> c_int;
}
