//! Directory entry points.

use libc::{c_int, mode_t, DIR};

intercept! {
    fn opendir(PATH) -> *mut DIR;
    fn mkdir(PATH, mode: mode_t) -> c_int;
    fn mkdirat(dirfd: c_int, PATH, mode: mode_t) -> c_int;
    fn rmdir(PATH) -> c_int;
    fn chdir(PATH) -> c_int;
}
