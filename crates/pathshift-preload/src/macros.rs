/// Resolve the original implementation of `$name` once per process and
/// return it as a callable of type `$t`.
///
/// The resolved address is cached in a per-operation static; two threads
/// racing the first use both resolve the same symbol, so the duplicate
/// `dlsym` is harmless and the cache can never hold a torn value.
#[macro_export]
macro_rules! real_fn {
    ($name:ident, $t:ty) => {{
        static REAL: $crate::reals::RealSymbol =
            $crate::reals::RealSymbol::new(concat!(stringify!($name), "\0"));
        std::mem::transmute::<*mut libc::c_void, $t>(REAL.get())
    }};
}

/// Generate exported shims for fixed-arity operations with one path
/// argument. The `PATH` marker may sit in argument position 0, 1 or 2;
/// all other arguments are forwarded unchanged, by position.
#[macro_export]
macro_rules! intercept {
    () => {};
    ($(#[$meta:meta])* fn $name:ident(PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name(path: *const libc::c_char $(, $arg: $ty)*) -> $ret {
            let mapped = $crate::path::MappedPath::map(stringify!($name), path);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn(*const libc::c_char $(, $ty)*) -> $ret
            );
            real(mapped.as_ptr() $(, $arg)*)
        }
        $crate::intercept! { $($rest)* }
    };
    ($(#[$meta:meta])* fn $name:ident($pre1:ident : $prety1:ty, PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name($pre1: $prety1, path: *const libc::c_char $(, $arg: $ty)*) -> $ret {
            let mapped = $crate::path::MappedPath::map(stringify!($name), path);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn($prety1, *const libc::c_char $(, $ty)*) -> $ret
            );
            real($pre1, mapped.as_ptr() $(, $arg)*)
        }
        $crate::intercept! { $($rest)* }
    };
    ($(#[$meta:meta])* fn $name:ident($pre1:ident : $prety1:ty, $pre2:ident : $prety2:ty, PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name($pre1: $prety1, $pre2: $prety2, path: *const libc::c_char $(, $arg: $ty)*) -> $ret {
            let mapped = $crate::path::MappedPath::map(stringify!($name), path);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn($prety1, $prety2, *const libc::c_char $(, $ty)*) -> $ret
            );
            real($pre1, $pre2, mapped.as_ptr() $(, $arg)*)
        }
        $crate::intercept! { $($rest)* }
    };
}

/// Generate exported shims for operations carrying two independently
/// rewritten path arguments (rename-, link- and symlink-style). Each path
/// goes through its own buffer; neither rewrite can see the other.
#[macro_export]
macro_rules! intercept_two_path {
    () => {};
    // both paths lead the argument list (rename, link, symlink)
    ($(#[$meta:meta])* fn $name:ident(PATH, PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name(
            oldpath: *const libc::c_char,
            newpath: *const libc::c_char
            $(, $arg: $ty)*
        ) -> $ret {
            let mapped_old = $crate::path::MappedPath::map(stringify!($name), oldpath);
            let mapped_new = $crate::path::MappedPath::map(stringify!($name), newpath);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn(*const libc::c_char, *const libc::c_char $(, $ty)*) -> $ret
            );
            real(mapped_old.as_ptr(), mapped_new.as_ptr() $(, $arg)*)
        }
        $crate::intercept_two_path! { $($rest)* }
    };
    // each path is preceded by a directory descriptor (renameat, linkat)
    ($(#[$meta:meta])* fn $name:ident($fd1:ident : $fdty1:ty, PATH, $fd2:ident : $fdty2:ty, PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name(
            $fd1: $fdty1,
            oldpath: *const libc::c_char,
            $fd2: $fdty2,
            newpath: *const libc::c_char
            $(, $arg: $ty)*
        ) -> $ret {
            let mapped_old = $crate::path::MappedPath::map(stringify!($name), oldpath);
            let mapped_new = $crate::path::MappedPath::map(stringify!($name), newpath);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn($fdty1, *const libc::c_char, $fdty2, *const libc::c_char $(, $ty)*) -> $ret
            );
            real($fd1, mapped_old.as_ptr(), $fd2, mapped_new.as_ptr() $(, $arg)*)
        }
        $crate::intercept_two_path! { $($rest)* }
    };
    // target first, then a directory descriptor and the link path (symlinkat)
    ($(#[$meta:meta])* fn $name:ident(PATH, $fd1:ident : $fdty1:ty, PATH $(, $arg:ident : $ty:ty)*) -> $ret:ty; $($rest:tt)*) => {
        $(#[$meta])*
        #[no_mangle]
        pub unsafe extern "C" fn $name(
            oldpath: *const libc::c_char,
            $fd1: $fdty1,
            newpath: *const libc::c_char
            $(, $arg: $ty)*
        ) -> $ret {
            let mapped_old = $crate::path::MappedPath::map(stringify!($name), oldpath);
            let mapped_new = $crate::path::MappedPath::map(stringify!($name), newpath);
            let real = $crate::real_fn!(
                $name,
                unsafe extern "C" fn(*const libc::c_char, $fdty1, *const libc::c_char $(, $ty)*) -> $ret
            );
            real(mapped_old.as_ptr(), $fd1, mapped_new.as_ptr() $(, $arg)*)
        }
        $crate::intercept_two_path! { $($rest)* }
    };
}

/// Fixed-buffer `fmt::Write` sink for diagnostics; output past the buffer
/// end is truncated rather than allocated.
pub struct StackWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StackWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Append raw bytes; paths are not guaranteed to be UTF-8.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let remaining = self.buf.len() - self.pos;
        let to_copy = std::cmp::min(bytes.len(), remaining);
        self.buf[self.pos..self.pos + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.pos += to_copy;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl<'a> std::fmt::Write for StackWriter<'a> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
