//! Character-bounded text helpers.

/// Return the prefix of `text` holding at most `max_chars` Unicode scalar values.
///
/// The cut always lands on a `char` boundary, so the result is valid UTF-8 even
/// when the limit falls inside a multi-byte sequence.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
