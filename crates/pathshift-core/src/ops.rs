//! Operation dispatch catalog.
//!
//! One static descriptor per intercepted operation. The preload layer's
//! exported shims fall into five signature shapes; the catalog records,
//! for each symbol, its fixed arity, which argument positions carry
//! paths, whether a conditional mode argument exists, and which original
//! operation the rewritten arguments are forwarded to. The catalog is
//! declared once and shared read-only across the process.

/// Signature shape of an intercepted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Fixed arity with one path argument.
    Fixed,
    /// Fixed arguments plus a trailing mode argument that exists only when
    /// the flags argument requests file creation.
    VariadicMode,
    /// Two independently rewritten path arguments.
    TwoPath,
    /// A NULL-terminated array of paths, each rewritten into its own
    /// buffer and released after the call.
    PathArray,
    /// A NULL-terminated variadic list, rebuilt into an array and
    /// forwarded to the array-taking sibling operation.
    VariadicList,
}

/// Static description of one intercepted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpDesc {
    /// Exported symbol name. Also the name the original implementation is
    /// resolved under for every shape except [`Shape::VariadicList`].
    pub name: &'static str,
    /// Number of fixed arguments (any variadic tail excluded).
    pub arity: u8,
    /// Zero-based position of the (first) path argument.
    pub path_arg: u8,
    /// Position of the second path argument for [`Shape::TwoPath`].
    pub second_path_arg: Option<u8>,
    /// Whether a mode argument is consumed when the flags request creation.
    pub has_mode: bool,
    pub shape: Shape,
    /// Operation the rewritten arguments are forwarded to.
    pub forwards_to: &'static str,
}

impl OpDesc {
    pub const fn fixed(name: &'static str, arity: u8, path_arg: u8) -> Self {
        Self {
            name,
            arity,
            path_arg,
            second_path_arg: None,
            has_mode: false,
            shape: Shape::Fixed,
            forwards_to: name,
        }
    }

    pub const fn with_mode(name: &'static str, arity: u8, path_arg: u8) -> Self {
        Self {
            name,
            arity,
            path_arg,
            second_path_arg: None,
            has_mode: true,
            shape: Shape::VariadicMode,
            forwards_to: name,
        }
    }

    pub const fn two_path(name: &'static str, arity: u8, first: u8, second: u8) -> Self {
        Self {
            name,
            arity,
            path_arg: first,
            second_path_arg: Some(second),
            has_mode: false,
            shape: Shape::TwoPath,
            forwards_to: name,
        }
    }

    pub const fn path_array(name: &'static str, arity: u8) -> Self {
        Self {
            name,
            arity,
            path_arg: 0,
            second_path_arg: None,
            has_mode: false,
            shape: Shape::PathArray,
            forwards_to: name,
        }
    }

    pub const fn variadic_list(name: &'static str, arity: u8, sibling: &'static str) -> Self {
        Self {
            name,
            arity,
            path_arg: 0,
            second_path_arg: None,
            has_mode: false,
            shape: Shape::VariadicList,
            forwards_to: sibling,
        }
    }
}

/// Every operation the preload layer interposes, grouped by family.
/// Arities count fixed arguments only; the variadic tails of the open and
/// exec families are handled by their shapes.
pub static OPERATIONS: &[OpDesc] = &[
    // open family
    OpDesc::with_mode("open", 2, 0),
    OpDesc::with_mode("open64", 2, 0),
    OpDesc::with_mode("openat", 3, 1),
    OpDesc::with_mode("openat64", 3, 1),
    OpDesc::fixed("creat", 2, 0),
    OpDesc::fixed("creat64", 2, 0),
    OpDesc::fixed("fopen", 2, 0),
    OpDesc::fixed("fopen64", 2, 0),
    OpDesc::fixed("freopen", 3, 0),
    OpDesc::fixed("freopen64", 3, 0),
    // stat family
    OpDesc::fixed("stat", 2, 0),
    OpDesc::fixed("stat64", 2, 0),
    OpDesc::fixed("lstat", 2, 0),
    OpDesc::fixed("lstat64", 2, 0),
    OpDesc::fixed("fstatat", 4, 1),
    OpDesc::fixed("fstatat64", 4, 1),
    OpDesc::fixed("__xstat", 3, 1),
    OpDesc::fixed("__xstat64", 3, 1),
    OpDesc::fixed("__lxstat", 3, 1),
    OpDesc::fixed("__lxstat64", 3, 1),
    OpDesc::fixed("__fxstatat", 5, 2),
    OpDesc::fixed("__fxstatat64", 5, 2),
    OpDesc::fixed("statfs", 2, 0),
    OpDesc::fixed("statfs64", 2, 0),
    OpDesc::fixed("statvfs", 2, 0),
    OpDesc::fixed("statvfs64", 2, 0),
    OpDesc::fixed("access", 2, 0),
    OpDesc::fixed("faccessat", 4, 1),
    // directories
    OpDesc::fixed("opendir", 1, 0),
    OpDesc::fixed("mkdir", 2, 0),
    OpDesc::fixed("mkdirat", 3, 1),
    OpDesc::fixed("rmdir", 1, 0),
    OpDesc::fixed("chdir", 1, 0),
    // namespace
    OpDesc::two_path("rename", 2, 0, 1),
    OpDesc::two_path("renameat", 4, 1, 3),
    OpDesc::two_path("renameat2", 5, 1, 3),
    OpDesc::two_path("link", 2, 0, 1),
    OpDesc::two_path("linkat", 5, 1, 3),
    OpDesc::two_path("symlink", 2, 0, 1),
    OpDesc::two_path("symlinkat", 3, 0, 2),
    OpDesc::fixed("unlink", 1, 0),
    OpDesc::fixed("unlinkat", 3, 1),
    OpDesc::fixed("remove", 1, 0),
    OpDesc::fixed("readlink", 3, 0),
    OpDesc::fixed("readlinkat", 4, 1),
    // attributes, timestamps, nodes
    OpDesc::fixed("chmod", 2, 0),
    OpDesc::fixed("fchmodat", 4, 1),
    OpDesc::fixed("chown", 3, 0),
    OpDesc::fixed("lchown", 3, 0),
    OpDesc::fixed("fchownat", 5, 1),
    OpDesc::fixed("truncate", 2, 0),
    OpDesc::fixed("truncate64", 2, 0),
    OpDesc::fixed("utime", 2, 0),
    OpDesc::fixed("utimes", 2, 0),
    OpDesc::fixed("utimensat", 4, 1),
    OpDesc::fixed("futimesat", 3, 1),
    OpDesc::fixed("mkfifo", 2, 0),
    OpDesc::fixed("mkfifoat", 3, 1),
    OpDesc::fixed("mknod", 3, 0),
    OpDesc::fixed("mknodat", 4, 1),
    // exec family
    OpDesc::fixed("execv", 2, 0),
    OpDesc::fixed("execvp", 2, 0),
    OpDesc::fixed("execvpe", 3, 0),
    OpDesc::fixed("execve", 3, 0),
    OpDesc::variadic_list("execl", 2, "execv"),
    OpDesc::variadic_list("execlp", 2, "execvp"),
    OpDesc::variadic_list("execle", 2, "execve"),
    // tree traversal
    OpDesc::path_array("fts_open", 3),
    OpDesc::fixed("ftw", 3, 0),
    OpDesc::fixed("ftw64", 3, 0),
    OpDesc::fixed("nftw", 4, 0),
    OpDesc::fixed("nftw64", 4, 0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn find(name: &str) -> Option<&'static OpDesc> {
        OPERATIONS.iter().find(|op| op.name == name)
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
    }

    #[test]
    fn path_positions_are_within_arity() {
        for op in OPERATIONS {
            assert!(op.path_arg < op.arity, "{}", op.name);
            if let Some(second) = op.second_path_arg {
                assert!(second < op.arity, "{}", op.name);
                assert!(second > op.path_arg, "{}", op.name);
            }
        }
    }

    #[test]
    fn second_paths_appear_exactly_on_two_path_ops() {
        for op in OPERATIONS {
            assert_eq!(
                op.second_path_arg.is_some(),
                op.shape == Shape::TwoPath,
                "{}",
                op.name
            );
        }
    }

    #[test]
    fn mode_flag_appears_exactly_on_variadic_mode_ops() {
        for op in OPERATIONS {
            assert_eq!(op.has_mode, op.shape == Shape::VariadicMode, "{}", op.name);
        }
    }

    #[test]
    fn only_list_ops_forward_to_a_sibling() {
        for op in OPERATIONS {
            if op.shape == Shape::VariadicList {
                assert_ne!(op.forwards_to, op.name, "{}", op.name);
                let sibling = find(op.forwards_to)
                    .unwrap_or_else(|| panic!("{} forwards to unknown {}", op.name, op.forwards_to));
                assert_eq!(sibling.shape, Shape::Fixed, "{}", op.name);
            } else {
                assert_eq!(op.forwards_to, op.name, "{}", op.name);
            }
        }
    }

    #[test]
    fn exec_list_siblings_are_the_array_variants() {
        assert_eq!(find("execl").unwrap().forwards_to, "execv");
        assert_eq!(find("execlp").unwrap().forwards_to, "execvp");
        assert_eq!(find("execle").unwrap().forwards_to, "execve");
    }

    #[test]
    fn shape_population_matches_the_surface() {
        let count = |shape: Shape| OPERATIONS.iter().filter(|op| op.shape == shape).count();
        assert_eq!(count(Shape::VariadicMode), 4);
        assert_eq!(count(Shape::TwoPath), 7);
        assert_eq!(count(Shape::PathArray), 1);
        assert_eq!(count(Shape::VariadicList), 3);
        assert_eq!(count(Shape::Fixed), OPERATIONS.len() - 15);
        assert_eq!(OPERATIONS.len(), 72);
    }
}
