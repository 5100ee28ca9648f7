//! Character-class helpers shared by the formatters.
//!
//! All offsets are byte offsets into the same `&str` and always fall on char
//! boundaries.

/// Unicode word character: alphanumeric or underscore.
pub(crate) fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The character ending right before `offset`, if any.
pub(crate) fn char_before(text: &str, offset: usize) -> Option<char> {
    text[..offset].chars().next_back()
}

/// The character starting at `offset`, if any.
pub(crate) fn char_at(text: &str, offset: usize) -> Option<char> {
    text[offset..].chars().next()
}

/// Number of consecutive backslashes ending right before `offset`.
pub(crate) fn backslashes_before(text: &str, offset: usize) -> usize {
    text[..offset]
        .bytes()
        .rev()
        .take_while(|&b| b == b'\\')
        .count()
}
