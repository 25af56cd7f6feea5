//! Token classification.
//!
//! Every scan in the engine asks the same two questions of a token: is it a
//! flag-like switch (`-v`, `--out`, `---typo`), and is it the `--`
//! end-of-options terminator. Anything else is a plain value.

/// Returns `true` if `token` looks like a flag or option switch.
///
/// A flag starts with one or more `-` followed by an ASCII word character
/// (`[A-Za-z0-9_]`) and does not parse as a number, so `-v`, `--out` and
/// `---key` are flags while `-99`, `-4.5` and `-1e3` are values.
pub fn is_flag(token: &str) -> bool {
    let body = token.trim_start_matches('-');
    body.len() < token.len()
        && body.chars().next().is_some_and(is_word_char)
        && !is_numeric(token)
}

/// Returns `true` if `token` is the `--` end-of-options terminator.
///
/// Surrounding whitespace is ignored.
pub fn is_terminator(token: &str) -> bool {
    token.trim() == "--"
}

/// Returns `true` if `token` reads as a signed decimal number.
///
/// Accepts one optional leading `-`, then either `Infinity` or a decimal
/// literal with optional fraction and exponent. Hex, underscores and doubled
/// signs are rejected.
pub fn is_numeric(token: &str) -> bool {
    let s = token.trim();
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }
    let Some(first) = unsigned.chars().next() else {
        return false;
    };
    (first.is_ascii_digit() || first == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && unsigned.parse::<f64>().is_ok()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
