//! Surrounding-quote normalization for option values.
//!
//! Shells usually strip quotes before a program sees its arguments, but
//! values arriving through `--key="..."` or from callers that build argv by
//! hand often keep them. Only matching outer pairs are removed; nothing is
//! unescaped.

/// Strip matching surrounding quote pairs from `value`, layer by layer.
///
/// A layer is stripped when the value starts with `'` or `"` and ends with
/// the same character. Stripping stops at the first layer whose outer
/// characters differ, so `"a'` is returned as is. Interior backslashes and
/// escape sequences are left untouched.
///
/// ```
/// use cli_reap_core::quote::normalize_quotes;
///
/// assert_eq!(normalize_quotes(r#""quoted value""#), "quoted value");
/// assert_eq!(normalize_quotes(r#"'""silly""'"#), "silly");
/// assert_eq!(normalize_quotes(r#""mismatch'"#), r#""mismatch'"#);
/// ```
#[must_use]
pub fn normalize_quotes(value: &str) -> &str {
    let mut body = value;
    loop {
        let bytes = body.as_bytes();
        let Some(&open) = bytes.first() else {
            return body;
        };
        if !matches!(open, b'\'' | b'"') || bytes.len() < 2 || bytes[bytes.len() - 1] != open {
            return body;
        }
        // Both ends are ASCII quote bytes, so these are char boundaries.
        body = &body[1..body.len() - 1];
    }
}
