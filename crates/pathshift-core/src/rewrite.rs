//! Prefix matching and path rewriting.
//!
//! The rewriter never touches the mapping table and never keeps a
//! reference to the output buffer past the call; callers own all storage.

use crate::table::MappingTable;

/// Outcome of a rewrite attempt against a bounded output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// No table entry matched; the caller keeps the original path.
    Unmapped,
    /// The path was rewritten; `len` bytes of the output are valid.
    Mapped { len: usize },
    /// An entry matched but the result would not fit in the output buffer;
    /// the caller falls back to the original path (fail-open).
    Overflow,
}

/// Length of `path` ignoring trailing `'/'` characters, so that `"/a/b/"`
/// and `"/a/b"` denote the same prefix. Without this, a prefix written
/// with a trailing slash would never match the directory itself, e.g. in
/// `opendir`.
pub fn effective_len(path: &[u8]) -> usize {
    let mut len = path.len();
    while len > 0 && path[len - 1] == b'/' {
        len -= 1;
    }
    len
}

/// Whole-segment prefix test: `path` must start with `prefix` (trailing
/// slashes ignored) and the byte after the match must be `'/'` or the end
/// of the path. `"/example/dir"` therefore matches `"/example/dir/file"`
/// but not `"/example/dirty"`.
pub fn path_prefix_matches(prefix: &[u8], path: &[u8]) -> bool {
    let plen = effective_len(prefix);
    if path.len() < plen || path[..plen] != prefix[..plen] {
        return false;
    }
    path.len() == plen || path[plen] == b'/'
}

/// Rewrite `path` through the first matching table entry into `out`.
///
/// Entries are tried in declaration order and the first match wins, even
/// when a later entry would match a longer prefix. The caller reserves the
/// NUL byte itself: pass `&mut buf[..CAP - 1]` so that a result of exactly
/// `CAP - 1` bytes can still be terminated in `buf`.
pub fn rewrite_into(table: &MappingTable, path: &[u8], out: &mut [u8]) -> RewriteOutcome {
    for entry in table.entries() {
        let virt = entry.virtual_prefix();
        if !path_prefix_matches(virt, path) {
            continue;
        }

        let real = entry.real_prefix();
        let rlen = effective_len(real);
        let rest = &path[effective_len(virt)..];
        let new_len = rlen + rest.len();
        if new_len > out.len() {
            return RewriteOutcome::Overflow;
        }

        out[..rlen].copy_from_slice(&real[..rlen]);
        out[rlen..new_len].copy_from_slice(rest);
        return RewriteOutcome::Mapped { len: new_len };
    }
    RewriteOutcome::Unmapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> MappingTable {
        let config: Vec<u8> = pairs
            .iter()
            .flat_map(|(virt, real)| [virt.as_bytes(), real.as_bytes()])
            .collect::<Vec<_>>()
            .join(&b":"[..]);
        MappingTable::parse(&config).unwrap()
    }

    fn rewrite(table: &MappingTable, path: &[u8]) -> RewriteOutcome {
        let mut buf = [0u8; 4096];
        rewrite_into(table, path, &mut buf[..4095])
    }

    fn rewritten(table: &MappingTable, path: &[u8]) -> Vec<u8> {
        let mut buf = [0u8; 4096];
        match rewrite_into(table, path, &mut buf[..4095]) {
            RewriteOutcome::Mapped { len } => buf[..len].to_vec(),
            other => panic!("expected a rewrite for {:?}, got {:?}", path, other),
        }
    }

    #[test]
    fn effective_len_strips_trailing_slashes() {
        assert_eq!(effective_len(b"/a/b"), 4);
        assert_eq!(effective_len(b"/a/b/"), 4);
        assert_eq!(effective_len(b"/a/b///"), 4);
        assert_eq!(effective_len(b"/"), 0);
        assert_eq!(effective_len(b""), 0);
    }

    #[test]
    fn prefix_matches_whole_segments_only() {
        assert!(path_prefix_matches(b"/example/dir/", b"/example/dir/"));
        assert!(path_prefix_matches(b"/example/dir/", b"/example/dir"));
        assert!(path_prefix_matches(b"/example/dir", b"/example/dir"));
        assert!(path_prefix_matches(b"/example/dir", b"/example/dir/"));
        assert!(path_prefix_matches(b"/example/dir", b"/example/dir/file"));

        assert!(!path_prefix_matches(b"/example/dir", b"/example/dirt"));
        assert!(!path_prefix_matches(b"/example/dir", b"/example/dirty"));
        assert!(!path_prefix_matches(b"/example/dir", b"/example/dirty/"));
        assert!(!path_prefix_matches(b"/example/dir", b"/example/dirty/file"));
    }

    #[test]
    fn root_prefix_matches_every_absolute_path() {
        assert!(path_prefix_matches(b"/", b"/"));
        assert!(path_prefix_matches(b"/", b"/e"));
        assert!(path_prefix_matches(b"/", b"/example"));
        assert!(path_prefix_matches(b"/e", b"/e"));
        assert!(!path_prefix_matches(b"/e", b"/example"));
    }

    #[test]
    fn unmatched_path_is_identity() {
        let t = table(&[("/etc/app", "/home/user/.etc/app")]);
        assert_eq!(rewrite(&t, b"/etc/other/config.ini"), RewriteOutcome::Unmapped);
        assert_eq!(rewrite(&t, b"/etc/apple"), RewriteOutcome::Unmapped);
        assert_eq!(rewrite(&t, b"relative/path"), RewriteOutcome::Unmapped);
    }

    #[test]
    fn matching_path_is_rewritten() {
        let t = table(&[("/etc/app", "/home/user/.etc/app")]);
        assert_eq!(
            rewritten(&t, b"/etc/app/config.ini"),
            b"/home/user/.etc/app/config.ini"
        );
        assert_eq!(rewritten(&t, b"/etc/app"), b"/home/user/.etc/app");
    }

    #[test]
    fn trailing_slashes_on_prefixes_do_not_change_the_result() {
        let slashed = table(&[("/etc/app/", "/home/user/.etc/app/")]);
        assert_eq!(
            rewritten(&slashed, b"/etc/app/config.ini"),
            b"/home/user/.etc/app/config.ini"
        );
        assert_eq!(rewritten(&slashed, b"/etc/app"), b"/home/user/.etc/app");
    }

    #[test]
    fn oversized_rewrite_fails_open() {
        let t = table(&[("/etc/app", "/home/user/.etc/app")]);
        let mut buf = [0u8; 10];
        assert_eq!(
            rewrite_into(&t, b"/etc/app/config.ini", &mut buf[..9]),
            RewriteOutcome::Overflow
        );
    }

    #[test]
    fn exact_fit_still_rewrites() {
        let t = table(&[("/a", "/bb")]);
        // "/bb/c" is five bytes; a five-byte window is enough.
        let mut buf = [0u8; 6];
        assert_eq!(
            rewrite_into(&t, b"/a/c", &mut buf[..5]),
            RewriteOutcome::Mapped { len: 5 }
        );
        assert_eq!(&buf[..5], b"/bb/c");
    }

    #[test]
    fn first_match_wins_over_longer_prefixes() {
        let t = table(&[("/etc", "/first"), ("/etc/app", "/second")]);
        assert_eq!(rewritten(&t, b"/etc/app/x"), b"/first/app/x");
    }

    #[test]
    fn root_prefix_relocates_everything() {
        let t = table(&[("/", "/newroot")]);
        assert_eq!(rewritten(&t, b"/etc/passwd"), b"/newroot/etc/passwd");
        assert_eq!(rewritten(&t, b"/"), b"/newroot/");
    }

    #[test]
    fn shrinking_rewrites_work() {
        let t = table(&[("/very/long/virtual/prefix", "/p")]);
        assert_eq!(rewritten(&t, b"/very/long/virtual/prefix/f"), b"/p/f");
    }

    #[test]
    fn table_is_untouched_by_rewrites() {
        let t = table(&[("/etc/app", "/home/user/.etc/app")]);
        let before = t.clone();
        let _ = rewrite(&t, b"/etc/app/config.ini");
        let _ = rewrite(&t, b"/unrelated");
        assert_eq!(t, before);
    }
}
