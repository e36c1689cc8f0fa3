use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{lexer::literals::unescape, Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("of", TokenKind::Of);
        map.insert("and", TokenKind::And);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("var", TokenKind::Var);
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("float", TokenKind::Float);
        map.insert("char", TokenKind::Char);
        map.insert("array", TokenKind::Array);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("endif", TokenKind::EndIf);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("endwhile", TokenKind::EndWhile);
        map.insert("func", TokenKind::Func);
        map.insert("endfunc", TokenKind::EndFunc);
        map.insert("return", TokenKind::Return);
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map.insert("true", TokenKind::BoolVal);
        map.insert("false", TokenKind::BoolVal);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,

    // Literals
    IntVal,
    BoolVal,
    FloatVal,
    CharVal,
    StringVal,

    // Hidden
    Comment,
    Whitespace,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    Semicolon,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=
    Greater,
    GreaterEquals,
    LessEquals,
    Less,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    // Reserved
    Of,
    And,
    Not,
    Or,
    Var,
    Int,
    Bool,
    Float,
    Char,
    Array,
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    Func,
    EndFunc,
    Return,
    Read,
    Write,
}

impl TokenKind {
    /// The fixed source text of punctuation, operators and reserved words.
    /// Kinds whose text varies (literals, identifiers, hidden tokens) have none.
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::Less => "<",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Of => "of",
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Var => "var",
            TokenKind::Int => "int",
            TokenKind::Bool => "bool",
            TokenKind::Float => "float",
            TokenKind::Char => "char",
            TokenKind::Array => "array",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::EndIf => "endif",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::EndWhile => "endwhile",
            TokenKind::Func => "func",
            TokenKind::EndFunc => "endfunc",
            TokenKind::Return => "return",
            TokenKind::Read => "read",
            TokenKind::Write => "write",
            _ => return None,
        };

        Some(text)
    }

    pub fn is_keyword(&self) -> bool {
        self.spelling()
            .is_some_and(|text| text.as_bytes()[0].is_ascii_alphabetic())
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntVal
                | TokenKind::BoolVal
                | TokenKind::FloatVal
                | TokenKind::CharVal
                | TokenKind::StringVal
        )
    }

    pub fn channel(&self) -> Channel {
        match self {
            TokenKind::Comment | TokenKind::Whitespace => Channel::Hidden,
            _ => Channel::Default,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Whether a token is handed to the parser or only kept for source fidelity.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Channel {
    Default,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
    pub channel: Channel,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::IntVal
            | TokenKind::BoolVal
            | TokenKind::FloatVal
            | TokenKind::CharVal
            | TokenKind::StringVal => write!(f, "{} ({})", self.kind, self.lexeme),
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl<'src> Token<'src> {
    pub fn position(&self) -> Position {
        self.span.start
    }

    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }

    /// Text between the quotes of a character or string literal, escapes untouched.
    pub fn literal_body(&self) -> Option<&'src str> {
        let lexeme = self.lexeme;
        match self.kind {
            TokenKind::CharVal | TokenKind::StringVal => Some(&lexeme[1..lexeme.len() - 1]),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<char> {
        if self.kind != TokenKind::CharVal {
            return None;
        }

        self.literal_body()
            .and_then(|body| unescape(body).chars().next())
    }

    pub fn string_value(&self) -> Option<String> {
        if self.kind != TokenKind::StringVal {
            return None;
        }

        self.literal_body().map(unescape)
    }

    pub fn bool_value(&self) -> Option<bool> {
        match (self.kind, self.lexeme) {
            (TokenKind::BoolVal, "true") => Some(true),
            (TokenKind::BoolVal, "false") => Some(false),
            _ => None,
        }
    }
}
