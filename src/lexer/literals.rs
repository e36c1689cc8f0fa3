//! Escape sequences shared by character and string literals.

/// Maps the character following a backslash to the character it denotes.
pub fn escape_value(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'f' => Some('\u{0c}'),
        'b' => Some('\u{08}'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        _ => None,
    }
}

/// Decodes the escapes in a literal body.
///
/// Bodies handed out by the lexer only ever contain valid escapes, so an
/// unknown sequence is kept as written.
pub fn unescape(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek().copied().and_then(escape_value) {
            Some(decoded) => {
                result.push(decoded);
                chars.next();
            }
            None => result.push(ch),
        }
    }

    result
}
