//! stat-family entry points.

use libc::c_int;

intercept! {
    fn stat(PATH, buf: *mut libc::stat) -> c_int;
    fn stat64(PATH, buf: *mut libc::stat64) -> c_int;
    fn lstat(PATH, buf: *mut libc::stat) -> c_int;
    fn lstat64(PATH, buf: *mut libc::stat64) -> c_int;
    fn fstatat(dirfd: c_int, PATH, buf: *mut libc::stat, flags: c_int) -> c_int;
    fn fstatat64(dirfd: c_int, PATH, buf: *mut libc::stat64, flags: c_int) -> c_int;
    /// glibc before 2.33 routes stat() through the versioned __xstat
    /// symbols, so both families have to be covered.
    fn __xstat(ver: c_int, PATH, buf: *mut libc::stat) -> c_int;
    fn __xstat64(ver: c_int, PATH, buf: *mut libc::stat64) -> c_int;
    fn __lxstat(ver: c_int, PATH, buf: *mut libc::stat) -> c_int;
    fn __lxstat64(ver: c_int, PATH, buf: *mut libc::stat64) -> c_int;
    fn __fxstatat(ver: c_int, dirfd: c_int, PATH, buf: *mut libc::stat, flags: c_int) -> c_int;
    fn __fxstatat64(ver: c_int, dirfd: c_int, PATH, buf: *mut libc::stat64, flags: c_int) -> c_int;
    fn statfs(PATH, buf: *mut libc::statfs) -> c_int;
    fn statfs64(PATH, buf: *mut libc::statfs64) -> c_int;
    fn statvfs(PATH, buf: *mut libc::statvfs) -> c_int;
    fn statvfs64(PATH, buf: *mut libc::statvfs64) -> c_int;
    fn access(PATH, mode: c_int) -> c_int;
    fn faccessat(dirfd: c_int, PATH, mode: c_int, flags: c_int) -> c_int;
}
