use once_cell::sync::Lazy;
use regex::Regex;

static FQCN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*$")
        .expect("FQCN pattern is valid")
});

/// Check whether a string is a well-formed FQCN: exactly three dot-separated
/// identifier segments (`namespace.collection.module`).
///
/// Advisory only — a badly formed value in a mapping table produces a warning
/// at load time, never an error.
pub fn is_valid_fqcn(candidate: &str) -> bool {
    FQCN_PATTERN.is_match(candidate)
}
