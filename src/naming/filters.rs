use regex::Regex;

fn disallowed_path_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(^|/)\.\.(/|$)").expect("invalid parent traversal regex"),
                Regex::new(r"\\").expect("invalid backslash regex"),
                Regex::new(r"\x00").expect("invalid nul byte regex"),
                Regex::new(r"^[A-Za-z]:").expect("invalid drive prefix regex"),
                Regex::new(r"^/").expect("invalid absolute path regex"),
            ]
        })
        .as_slice()
}

/// Determine whether a decoded request path stays inside the content root.
///
/// Parent directory segments, backslashes, NUL bytes, drive prefixes and absolute paths are
/// rejected.
pub fn is_allowed_path(decoded_path: &str) -> bool {
    !disallowed_path_patterns()
        .iter()
        .any(|pattern| pattern.is_match(decoded_path))
}

/// Predicate deciding whether a decoded request path may be looked up at all.
pub trait PathGuard {
    /// Returns `true` when the path may be passed on to the file store.
    fn is_allowed(&self, decoded_path: &str) -> bool;
}

/// Guard backed by [`is_allowed_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPathGuard;

impl PathGuard for DefaultPathGuard {
    fn is_allowed(&self, decoded_path: &str) -> bool {
        is_allowed_path(decoded_path)
    }
}

impl<F> PathGuard for F
where
    F: Fn(&str) -> bool,
{
    fn is_allowed(&self, decoded_path: &str) -> bool {
        self(decoded_path)
    }
}
