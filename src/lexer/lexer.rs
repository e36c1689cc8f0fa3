use std::rc::Rc;

use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::{literals::escape_value, tokens::{Token, TokenKind, RESERVED_LOOKUP}};

type Unterminated = fn(String) -> ErrorImpl;

#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: Option<String>) -> Lexer<'src> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
            finished: false,
        }
    }

    pub fn cursor_position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Produces the token at the cursor and moves past it.
    ///
    /// Once the input is exhausted every call yields `EOF`. On error the cursor
    /// is left on the first character of the rejected token.
    pub fn next_token(&mut self) -> Result<Token<'src>, Error> {
        let start = self.cursor_position();

        match self.scan(start) {
            Ok(kind) => Ok(MK_TOKEN!(
                kind,
                self.slice(start.offset, self.pos),
                Span { start, end: self.cursor_position() }
            )),
            Err(error) => {
                self.rewind(start);
                Err(error)
            }
        }
    }

    /// Steps over one character without producing a token.
    pub fn skip_char(&mut self) {
        self.bump_char();
    }

    fn scan(&mut self, start: Position) -> Result<TokenKind, Error> {
        let Some(c) = self.peek() else {
            return Ok(TokenKind::EOF);
        };

        let kind = match c {
            b'(' => self.single(TokenKind::OpenParen),
            b')' => self.single(TokenKind::CloseParen),
            b'[' => self.single(TokenKind::OpenBracket),
            b']' => self.single(TokenKind::CloseBracket),
            b':' => self.single(TokenKind::Colon),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Dash),
            b'*' => self.single(TokenKind::Star),
            b'%' => self.single(TokenKind::Percent),

            b'=' => self.with_equals(TokenKind::Equals, TokenKind::Assignment),
            b'>' => self.with_equals(TokenKind::GreaterEquals, TokenKind::Greater),
            b'<' => self.with_equals(TokenKind::LessEquals, TokenKind::Less),
            b'!' => {
                if self.peek_at(1) != Some(b'=') {
                    return Err(self.error(
                        ErrorImpl::UnexpectedCharacter { found: String::from("!") },
                        start,
                    ));
                }
                self.bump_n(2);
                TokenKind::NotEquals
            }

            b'/' => {
                if self.peek_at(1) == Some(b'/') {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.bump();
                    }
                    TokenKind::Comment
                } else {
                    self.single(TokenKind::Slash)
                }
            }

            b' ' | b'\t' | b'\r' | b'\n' => {
                while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                    self.bump();
                }
                TokenKind::Whitespace
            }

            b'a'..=b'z' | b'A'..=b'Z' => self.word(),
            b'0'..=b'9' => self.number(start)?,
            b'\'' => self.char_literal(start)?,
            b'"' => self.string_literal(start)?,

            _ => {
                let found = self.current_char().map(String::from).unwrap_or_default();
                return Err(self.error(ErrorImpl::UnexpectedCharacter { found }, start));
            }
        };

        Ok(kind)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn with_equals(&mut self, paired: TokenKind, alone: TokenKind) -> TokenKind {
        if self.peek_at(1) == Some(b'=') {
            self.bump_n(2);
            paired
        } else {
            self.bump();
            alone
        }
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.bump();
        }

        RESERVED_LOOKUP
            .get(self.slice(start, self.pos))
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    fn number(&mut self, start: Position) -> Result<TokenKind, Error> {
        self.digits();

        if self.peek() != Some(b'.') {
            return Ok(TokenKind::IntVal);
        }
        self.bump();

        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            let found = self.slice(start.offset, self.pos).to_string();
            return Err(self.error(ErrorImpl::MalformedFloatLiteral { found }, start));
        }
        self.digits();

        Ok(TokenKind::FloatVal)
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.bump();
        }
    }

    fn char_literal(&mut self, start: Position) -> Result<TokenKind, Error> {
        let unterminated: Unterminated = |found| ErrorImpl::UnterminatedCharLiteral { found };
        self.bump();

        match self.peek() {
            None => {
                let found = self.slice(start.offset, self.pos).to_string();
                return Err(self.error(unterminated(found), start));
            }
            Some(b'\'') => {
                self.bump();
                let found = self.slice(start.offset, self.pos).to_string();
                return Err(self.error(unterminated(found), start));
            }
            Some(b'\\') => self.escape(start, b'\'', unterminated)?,
            Some(_) => self.bump_char(),
        }

        if self.peek() != Some(b'\'') {
            let found = self.literal_text(start.offset, b'\'');
            return Err(self.error(unterminated(found), start));
        }
        self.bump();

        Ok(TokenKind::CharVal)
    }

    fn string_literal(&mut self, start: Position) -> Result<TokenKind, Error> {
        let unterminated: Unterminated = |found| ErrorImpl::UnterminatedStringLiteral { found };
        self.bump();

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    let found = self.literal_text(start.offset, b'"');
                    return Err(self.error(unterminated(found), start));
                }
                Some(b'"') => {
                    self.bump();
                    return Ok(TokenKind::StringVal);
                }
                Some(b'\\') => self.escape(start, b'"', unterminated)?,
                // Multi-byte characters never contain ASCII bytes, so stepping
                // byte by byte cannot split a quote or backslash.
                Some(_) => self.bump(),
            }
        }
    }

    fn escape(&mut self, start: Position, quote: u8, unterminated: Unterminated) -> Result<(), Error> {
        let escape_start = self.cursor_position();
        self.bump();

        match self.current_char() {
            None | Some('\n' | '\r') => {
                let found = self.literal_text(start.offset, quote);
                Err(self.error(unterminated(found), start))
            }
            Some(c) if escape_value(c).is_some() => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(
                ErrorImpl::InvalidEscapeSequence { found: format!("\\{}", c) },
                escape_start,
            )),
        }
    }

    /// The literal starting at `from`, up to its closing quote or the end of the line.
    fn literal_text(&self, from: usize, quote: u8) -> String {
        let rest = &self.source.as_bytes()[self.pos..];
        let len = match rest.iter().position(|b| *b == quote || *b == b'\n') {
            Some(i) if rest[i] == quote => i + 1,
            Some(i) => i,
            None => rest.len(),
        };

        self.slice(from, self.pos + len).trim_end_matches('\r').to_string()
    }

    fn error(&self, error_impl: ErrorImpl, at: Position) -> Error {
        trace!(line = at.line, column = at.column, error = %error_impl, found = error_impl.found(), "lexical error");
        Error::new(error_impl, at, Rc::clone(&self.file))
    }

    fn slice(&self, from: usize, to: usize) -> &'src str {
        let source: &'src str = self.source;
        &source[from..to]
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + n).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        let Some(b) = self.peek() else {
            return;
        };

        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if b & 0xC0 != 0x80 {
            // Continuation bytes belong to the column of their lead byte.
            self.column += 1;
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn bump_char(&mut self) {
        let width = self.current_char().map_or(0, char::len_utf8);
        self.bump_n(width);
    }

    fn rewind(&mut self, to: Position) {
        self.pos = to.offset;
        self.line = to.line;
        self.column = to.column;
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, Error>;

    /// Yields every token up to and including `EOF`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if !matches!(&result, Ok(token) if token.kind != TokenKind::EOF) {
            self.finished = true;
        }

        Some(result)
    }
}

/// Every token of `source`, hidden ones included, ending with `EOF`.
/// Stops at the first lexical error.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token<'_>>, Error> {
    let tokens = Lexer::new(source, file).collect::<Result<Vec<_>, _>>()?;

    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(tokens)
}

/// The stream handed to the parser: default-channel tokens ending with `EOF`.
pub fn tokenize_visible(source: &str, file: Option<String>) -> Result<Vec<Token<'_>>, Error> {
    let tokens = tokenize(source, file)?
        .into_iter()
        .filter(|token| !token.is_hidden())
        .collect::<Vec<_>>();

    debug!(tokens = tokens.len(), "filtered hidden tokens");
    Ok(tokens)
}

/// Scans the whole input, recording each error and resuming one character
/// past the point where it was raised.
pub fn tokenize_recovering(source: &str, file: Option<String>) -> (Vec<Token<'_>>, Vec<Error>) {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];
    let mut errors = vec![];

    loop {
        match lex.next_token() {
            Ok(token) => {
                let is_eof = token.kind == TokenKind::EOF;
                tokens.push(token);
                if is_eof {
                    break;
                }
            }
            Err(error) => {
                errors.push(error);
                lex.skip_char();
            }
        }
    }

    debug!(tokens = tokens.len(), errors = errors.len(), "tokenized source with recovery");
    (tokens, errors)
}
