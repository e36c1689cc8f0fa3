//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance on the channel its kind belongs to

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The matched source slice
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntVal, &source[0..2], span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {{
        let kind = $kind;
        Token {
            kind,
            lexeme: $lexeme,
            span: $span,
            channel: kind.channel(),
        }
    }};
}
