//! Namespace entry points: rename, link, symlink, unlink, readlink.

use libc::{c_char, c_int, c_uint, size_t, ssize_t};

intercept_two_path! {
    fn rename(PATH, PATH) -> c_int;
    fn renameat(oldfd: c_int, PATH, newfd: c_int, PATH) -> c_int;
    fn renameat2(oldfd: c_int, PATH, newfd: c_int, PATH, flags: c_uint) -> c_int;
    fn link(PATH, PATH) -> c_int;
    fn linkat(oldfd: c_int, PATH, newfd: c_int, PATH, flags: c_int) -> c_int;
    /// The link target is rewritten as well as the link path. The stored
    /// target is whatever the rewrite produced; readlink results are never
    /// translated back.
    fn symlink(PATH, PATH) -> c_int;
    fn symlinkat(PATH, newdirfd: c_int, PATH) -> c_int;
}

intercept! {
    fn unlink(PATH) -> c_int;
    fn unlinkat(dirfd: c_int, PATH, flags: c_int) -> c_int;
    fn remove(PATH) -> c_int;
    fn readlink(PATH, buf: *mut c_char, bufsiz: size_t) -> ssize_t;
    fn readlinkat(dirfd: c_int, PATH, buf: *mut c_char, bufsiz: size_t) -> ssize_t;
}
