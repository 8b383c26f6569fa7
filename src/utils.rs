//! Common utility functions shared across the codebase.

/// Checks if the text is a valid JavaScript identifier name.
///
/// Accepts ASCII letters, digits, `$` and `_`, plus any Unicode alphabetic
/// character. The first character may not be a digit. Reserved words are
/// not rejected.
///
/// # Examples
///
/// ```
/// use minerr::utils::is_js_identifier;
///
/// assert!(is_js_identifier("minErr"));
/// assert!(is_js_identifier("$MinErr"));
/// assert!(is_js_identifier("_err2"));
/// assert!(is_js_identifier("ошибка"));
/// assert!(!is_js_identifier(""));
/// assert!(!is_js_identifier("2fast"));
/// assert!(!is_js_identifier("min-err"));
/// ```
pub fn is_js_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(|c| is_identifier_start(c) || c.is_numeric())
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}
