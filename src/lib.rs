#![allow(clippy::module_inception)]

pub mod errors;
pub mod lexer;
pub mod macros;

/// A location in the source: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line holding `position` (a byte offset into `content`).
///
/// Returns the 1-based line number, the line text including its terminator and
/// the byte offset of `position` within that line. An offset equal to the
/// source length resolves to the end of the last line.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, String, usize)> {
    if position > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return Some((line_number, line.to_string(), position - start));
        }

        last = Some((line_number, line, start));
        start = end;
        line_number += 1;
    }

    // Only the end of input is left; it belongs to an unterminated last line
    // or to the empty line after a trailing newline.
    match last {
        Some((number, line, line_start)) if !line.ends_with('\n') => {
            Some((number, line.to_string(), position - line_start))
        }
        _ => Some((line_number, String::new(), 0)),
    }
}
