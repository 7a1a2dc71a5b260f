//! Resolution cache for original operations.
//!
//! Each interposed entry point keeps one `RealSymbol` static; the address
//! of the real implementation is looked up with `dlsym(RTLD_NEXT)` on
//! first use and reused for the remainder of the process. The cache is
//! never invalidated.

use libc::{c_char, c_void};
use std::sync::atomic::{AtomicPtr, Ordering};

/// Lazily resolved address of an original libc entry point.
pub struct RealSymbol {
    ptr: AtomicPtr<c_void>,
    name: &'static str,
}

impl RealSymbol {
    /// `name` must carry its NUL terminator, e.g. `"open\0"`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            ptr: AtomicPtr::new(std::ptr::null_mut()),
            name,
        }
    }

    /// Resolve on first use, then return the cached address. Concurrent
    /// first uses both resolve the same symbol and publish the same
    /// pointer, so no lock is needed; the Release store makes the value
    /// visible to other threads immediately.
    pub unsafe fn get(&self) -> *mut c_void {
        let p = self.ptr.load(Ordering::Acquire);
        if !p.is_null() {
            return p;
        }
        let f = libc::dlsym(libc::RTLD_NEXT, self.name.as_ptr() as *const c_char);
        self.ptr.store(f, Ordering::Release);
        f
    }
}
