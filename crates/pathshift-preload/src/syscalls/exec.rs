//! exec-family entry points.
//!
//! The list-style variants (execl/execlp/execle) are reconstructed in the
//! C bridge: the trailing argument list is counted, materialized into a
//! heap argv and delegated to the array-taking siblings through the
//! `pathshift_exec*` exports below. The bridge frees the argv after the
//! delegated call returns, which is only reached when the exec failed; a
//! successful exec never returns.

use crate::path::MappedPath;
use libc::{c_char, c_int};

type ExecArrayFn = unsafe extern "C" fn(*const c_char, *const *mut c_char) -> c_int;
type ExecEnvFn =
    unsafe extern "C" fn(*const c_char, *const *mut c_char, *const *mut c_char) -> c_int;

unsafe fn execv_impl(path: *const c_char, argv: *const *mut c_char) -> c_int {
    let mapped = MappedPath::map("execv", path);
    let real = real_fn!(execv, ExecArrayFn);
    real(mapped.as_ptr(), argv)
}

unsafe fn execvp_impl(file: *const c_char, argv: *const *mut c_char) -> c_int {
    let mapped = MappedPath::map("execvp", file);
    let real = real_fn!(execvp, ExecArrayFn);
    real(mapped.as_ptr(), argv)
}

unsafe fn execve_impl(
    path: *const c_char,
    argv: *const *mut c_char,
    envp: *const *mut c_char,
) -> c_int {
    let mapped = MappedPath::map("execve", path);
    let real = real_fn!(execve, ExecEnvFn);
    real(mapped.as_ptr(), argv, envp)
}

#[no_mangle]
pub unsafe extern "C" fn execv(path: *const c_char, argv: *const *mut c_char) -> c_int {
    execv_impl(path, argv)
}

#[no_mangle]
pub unsafe extern "C" fn execvp(file: *const c_char, argv: *const *mut c_char) -> c_int {
    execvp_impl(file, argv)
}

#[no_mangle]
pub unsafe extern "C" fn execve(
    path: *const c_char,
    argv: *const *mut c_char,
    envp: *const *mut c_char,
) -> c_int {
    execve_impl(path, argv, envp)
}

#[no_mangle]
pub unsafe extern "C" fn execvpe(
    file: *const c_char,
    argv: *const *mut c_char,
    envp: *const *mut c_char,
) -> c_int {
    let mapped = MappedPath::map("execvpe", file);
    let real = real_fn!(execvpe, ExecEnvFn);
    real(mapped.as_ptr(), argv, envp)
}

// Delegation targets for the C bridge. Unambiguous names: the bridge must
// reach these implementations, not whatever `execv` resolves to in the
// host process's symbol order.

#[no_mangle]
pub unsafe extern "C" fn pathshift_execv(path: *const c_char, argv: *const *mut c_char) -> c_int {
    execv_impl(path, argv)
}

#[no_mangle]
pub unsafe extern "C" fn pathshift_execvp(file: *const c_char, argv: *const *mut c_char) -> c_int {
    execvp_impl(file, argv)
}

#[no_mangle]
pub unsafe extern "C" fn pathshift_execve(
    path: *const c_char,
    argv: *const *mut c_char,
    envp: *const *mut c_char,
) -> c_int {
    execve_impl(path, argv, envp)
}
