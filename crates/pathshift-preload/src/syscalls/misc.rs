//! Attribute, timestamp and node entry points.

use libc::{c_int, dev_t, gid_t, mode_t, off64_t, off_t, uid_t};

intercept! {
    fn chmod(PATH, mode: mode_t) -> c_int;
    fn fchmodat(dirfd: c_int, PATH, mode: mode_t, flags: c_int) -> c_int;
    fn chown(PATH, owner: uid_t, group: gid_t) -> c_int;
    fn lchown(PATH, owner: uid_t, group: gid_t) -> c_int;
    fn fchownat(dirfd: c_int, PATH, owner: uid_t, group: gid_t, flags: c_int) -> c_int;
    fn truncate(PATH, length: off_t) -> c_int;
    fn truncate64(PATH, length: off64_t) -> c_int;
    fn utime(PATH, times: *const libc::utimbuf) -> c_int;
    fn utimes(PATH, times: *const libc::timeval) -> c_int;
    fn utimensat(dirfd: c_int, PATH, times: *const libc::timespec, flags: c_int) -> c_int;
    fn futimesat(dirfd: c_int, PATH, times: *const libc::timeval) -> c_int;
    fn mkfifo(PATH, mode: mode_t) -> c_int;
    fn mkfifoat(dirfd: c_int, PATH, mode: mode_t) -> c_int;
    fn mknod(PATH, mode: mode_t, dev: dev_t) -> c_int;
    fn mknodat(dirfd: c_int, PATH, mode: mode_t, dev: dev_t) -> c_int;
}
