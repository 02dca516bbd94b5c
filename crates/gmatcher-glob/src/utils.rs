//! Pattern syntax helpers shared by the compiler, matcher and trees

/// Whether `b` is one of the glob operator bytes `[]{}*?`
#[inline]
pub fn is_wildcard_byte(b: u8) -> bool {
    matches!(b, b'[' | b']' | b'{' | b'}' | b'*' | b'?')
}

/// Offset of the first wildcard byte in `s`
#[inline]
pub fn index_wildcard(s: &str) -> Option<usize> {
    s.bytes().position(is_wildcard_byte)
}

/// Offset of the last wildcard byte in `s`
#[inline]
pub fn index_last_wildcard(s: &str) -> Option<usize> {
    s.bytes().rposition(is_wildcard_byte)
}

/// Whether `s` contains any wildcard byte
#[inline]
pub fn has_wildcard(s: &str) -> bool {
    index_wildcard(s).is_some()
}

/// Number of wildcard constructs that open in `s` (`[`, `{`, `*`, `?`).
///
/// Used as a capacity hint when compiling.
pub fn wildcard_count(s: &str) -> usize {
    s.bytes()
        .filter(|b| matches!(b, b'[' | b'{' | b'*' | b'?'))
        .count()
}

/// Byte offset after skipping `n` code points, or `None` if `s` is shorter
#[inline]
pub fn skip_runes(s: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    match s.char_indices().nth(n) {
        Some((at, _)) => Some(at),
        None if s.chars().count() == n => Some(s.len()),
        None => None,
    }
}

/// Width in bytes of the first code point of `s` (1 for an empty string)
#[inline]
pub fn first_rune_len(s: &str) -> usize {
    s.chars().next().map_or(1, char::len_utf8)
}

/// Append literal text in canonical form, wrapping wildcard bytes in a class
/// so the canonical pattern reads back as the same literal.
pub fn write_literal(out: &mut String, text: &str) {
    if !has_wildcard(text) {
        out.push_str(text);
        return;
    }
    for c in text.chars() {
        if c.is_ascii() && is_wildcard_byte(c as u8) {
            out.push('[');
            out.push(c);
            out.push(']');
        } else {
            out.push(c);
        }
    }
}
