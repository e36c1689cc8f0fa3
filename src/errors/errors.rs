use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{get_line_at_position, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    file: Rc<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, file: Rc<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            file,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedCharLiteral { .. } => "UnterminatedCharLiteral",
            ErrorImpl::UnterminatedStringLiteral { .. } => "UnterminatedStringLiteral",
            ErrorImpl::InvalidEscapeSequence { .. } => "InvalidEscapeSequence",
            ErrorImpl::MalformedFloatLiteral { .. } => "MalformedFloatLiteral",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedCharLiteral { found } if found == "''" => ErrorTip::Suggestion(
                String::from("A character literal cannot be empty, write `' '` for a space"),
            ),
            ErrorImpl::UnterminatedCharLiteral { .. } => ErrorTip::Suggestion(String::from(
                "A character literal holds exactly one character, use a string for more",
            )),
            ErrorImpl::UnterminatedStringLiteral { .. } => ErrorTip::Suggestion(String::from(
                "Close the string with `\"` before the end of the line",
            )),
            ErrorImpl::InvalidEscapeSequence { found } => ErrorTip::Suggestion(format!(
                "Unknown escape `{}`, expected one of \\n \\t \\r \\f \\b \\\\ \\' \\\"",
                found
            )),
            ErrorImpl::MalformedFloatLiteral { found } => ErrorTip::Suggestion(format!(
                "Add digits after the decimal point, e.g. `{}0`",
                found
            )),
            ErrorImpl::UnexpectedCharacter { found } if found == "!" => {
                ErrorTip::Suggestion(String::from("Use `not` for negation, `!` only appears in `!=`"))
            }
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
        }
    }

    /// Renders the error against the source it was raised for.
    ///
    /// ```text
    /// Error: UnexpectedCharacter
    /// -> main.asl
    ///   |
    /// 2 | x = @;
    ///   | ----^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let mut out = String::new();

        if let ErrorTip::None = self.get_tip() {
            out.push_str(&format!("Error: {}\n", self.get_error_name()));
        } else {
            out.push_str(&format!("Error: {} ({})\n", self.get_error_name(), self.get_tip()));
        }
        out.push_str(&format!("-> {}\n", self.file));

        let Some((line, line_text, line_pos)) = get_line_at_position(source, self.position.offset)
        else {
            out.push_str(&format!("{}\n", self));
            return out;
        };

        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        out.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        let arrows = line_text[removed_whitespace.min(line_pos)..line_pos].chars().count() + 1;
        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

        out
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {}: {}, found '{}'",
            self.position.line,
            self.position.column,
            self.internal_error,
            self.internal_error.found()
        )
    }
}

impl std::error::Error for Error {}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();

    (&string[start..], start)
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unterminated character literal")]
    UnterminatedCharLiteral { found: String },
    #[error("unterminated string literal")]
    UnterminatedStringLiteral { found: String },
    #[error("invalid escape sequence")]
    InvalidEscapeSequence { found: String },
    #[error("malformed float literal, missing fractional digits")]
    MalformedFloatLiteral { found: String },
    #[error("unexpected character")]
    UnexpectedCharacter { found: String },
}

impl ErrorImpl {
    /// The offending source text.
    pub fn found(&self) -> &str {
        match self {
            ErrorImpl::UnterminatedCharLiteral { found }
            | ErrorImpl::UnterminatedStringLiteral { found }
            | ErrorImpl::InvalidEscapeSequence { found }
            | ErrorImpl::MalformedFloatLiteral { found }
            | ErrorImpl::UnexpectedCharacter { found } => found,
        }
    }
}
