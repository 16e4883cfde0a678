//! String and path helpers for globs and URL paths.
//!
//! Content paths here are always `/`-separated, whatever the host platform,
//! because they end up in globs and URLs rather than on the file system.

/// Remove `prefix` from the start of `s` once, if present.
pub fn rm_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}

/// Remove `suffix` from the end of `s` once, if present.
pub fn rm_suffix<'a>(s: &'a str, suffix: &str) -> &'a str {
    s.strip_suffix(suffix).unwrap_or(s)
}

/// Strip a single leading and trailing `/` from a collection path.
///
/// `"/events/"` → `"events"`, `"news"` → `"news"`.
pub fn bare_path(path: &str) -> &str {
    rm_prefix(rm_suffix(path, "/"), "/")
}

/// Number of path segments in the content directory.
///
/// A trailing slash does not count as an extra segment:
/// `"content"` → 1, `"build/content-md/"` → 2.
pub fn content_dir_depth(dir: &str) -> usize {
    rm_suffix(dir, "/").split('/').count()
}

/// Drop the first `depth` segments of `path`.
///
/// A leading `/` on the input is ignored when counting. With `leading_slash`
/// the remainder is returned as an absolute URL path, otherwise as a relative
/// one. Trailing slashes are kept.
///
/// ```ignore
/// strip_path_prefix("/content/docs/foo/", 1, true)  // → "/docs/foo/"
/// strip_path_prefix("content/docs", 1, false)        // → "docs"
/// strip_path_prefix("content", 1, false)             // → ""
/// ```
pub fn strip_path_prefix(path: &str, depth: usize, leading_slash: bool) -> String {
    let rest = rm_prefix(path, "/")
        .split('/')
        .skip(depth)
        .collect::<Vec<_>>()
        .join("/");

    if leading_slash {
        format!("/{rest}")
    } else {
        rest
    }
}

/// Join two `/`-separated path fragments, collapsing the separator between them.
///
/// Empty and `.` fragments are skipped so `join_path("content", "")` stays
/// `"content"`.
pub fn join_path(base: &str, rest: &str) -> String {
    let head = base.trim_end_matches('/');
    let tail = rest.trim_start_matches('/');

    let tail: Vec<&str> = tail
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();

    match (head.is_empty(), tail.is_empty()) {
        (_, true) => head.to_owned(),
        (true, false) => tail.join("/"),
        (false, false) => format!("{head}/{}", tail.join("/")),
    }
}
