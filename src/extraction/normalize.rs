use regex::Regex;
use std::sync::LazyLock;

/// Browser whitespace: ASCII tab/LF/VT/FF/CR/space, the Unicode space
/// separators, line/paragraph separators and U+FEFF. U+0085 is not included.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .expect("whitespace pattern is valid")
});

/// Collapse every run of whitespace (newlines and tabs included) into a single
/// space and trim both ends.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw, " ")
        .trim_matches(' ')
        .to_string()
}
