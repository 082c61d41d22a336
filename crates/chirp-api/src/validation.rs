/// Whitespace as the registration and message rules count it: Unicode
/// whitespace minus the no-break spaces (U+00A0, U+2007, U+202F) and NEL
/// (U+0085), plus the ASCII separators U+001C..=U+001F.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{001C}'..='\u{001F}' => true,
        '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}

/// Empty, or nothing but whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(is_blank_char)
}
