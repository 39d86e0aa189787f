//! UTF-8-safe string truncation utilities
//!
//! Result previews, snippets and titles come straight from scraped pages and
//! are cut to a fixed number of characters for display. Slicing by bytes
//! would panic on multi-byte characters, so everything here works on
//! character boundaries.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// # Examples
/// ```
/// # use kodegen_tools_footprint::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Truncate to `max_chars` characters and append `…` when anything was cut
///
/// # Examples
/// ```
/// # use kodegen_tools_footprint::utils::string_utils::truncate_with_ellipsis;
/// assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc…");
/// assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
/// ```
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let truncated = safe_truncate_chars(s, max_chars);
    if truncated.len() < s.len() {
        format!("{truncated}…")
    } else {
        truncated.to_string()
    }
}
