//! Logos-based lexer for the schedule notation.
//!
//! A schedule is written as operations separated by whitespace, possibly
//! spread over several lines. The lexer only splits the input; each word
//! is parsed into an operation by [`crate::parser`].
//!
//! # Example input
//!
//! ```text
//! r2(x) r1(y) w3(x) w2(x) r3(y) w3(y) w2(y)
//! w2(z) a2 r1(z) w1(z) c1 w3(z) c3
//! ```

use core::ops::Range;

/// All token kinds produced by the notation lexer.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::logos::Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One written operation such as `r2(x)` or `c1`, well-formed or not.
    #[regex(r"[^ \t\r\n]+")]
    Word,

    /// A newline (`\n` or `\r\n`).
    #[regex(r"\r?\n")]
    Newline,

    /// Spaces or tabs.
    #[regex(r"[ \t]+")]
    Whitespace,
}

/// A single token with its kind and the byte-offset span in the source.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range `start..end` into the original input string.
    pub span: Range<usize>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Return the source text for this token given the original input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Tokenize `input` and return all valid tokens.
///
/// Tokens that the lexer cannot recognise (a lone `\r`) are silently
/// skipped.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|kind| Token { kind, span }))
        .collect()
}

/// Tokenize `input` and return tokens paired with their source text slices.
#[must_use]
pub fn tokenize_with_text(input: &str) -> Vec<(Token, &str)> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|kind| {
                let text = &input[span.clone()];
                (Token { kind, span }, text)
            })
        })
        .collect()
}
