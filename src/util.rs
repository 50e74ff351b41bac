//! Small string helpers shared across the resolver.

/// Split `s` at the first occurrence of the ASCII byte `delimiter`.
///
/// The delimiter itself is dropped. When it does not occur the whole input
/// is returned as the head and the tail is empty.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(split_on_first("color:red", b':'), ("color", "red"));
/// assert_eq!(split_on_first("red", b':'), ("red", ""));
/// ```
pub fn split_on_first(s: &str, delimiter: u8) -> (&str, &str) {
    debug_assert!(delimiter.is_ascii());
    match memchr::memchr(delimiter, s.as_bytes()) {
        // ASCII delimiter: both slice points land on char boundaries
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

/// Apply a leading `-` from the class name to a resolved value.
///
/// - already negative values flip back to positive
/// - `var()` and `calc()` values are wrapped as `calc(<value> * -1)`
/// - zero stays zero
/// - anything else gets a `-` prefix
pub fn maybe_add_negative(value: &str, negative: bool) -> String {
    if !negative {
        return value.to_string();
    }

    if let Some(positive) = value.strip_prefix('-') {
        return positive.to_string();
    }

    if value.starts_with("var(") || value.starts_with("calc(") {
        return format!("calc({value} * -1)");
    }

    if value.trim_start_matches('0').is_empty() {
        return value.to_string();
    }

    format!("-{value}")
}
