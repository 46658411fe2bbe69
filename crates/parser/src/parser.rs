//! Winnow-based parser for the schedule notation.
//!
//! Grammar:
//! ```text
//! schedule    = (WHITESPACE | NEWLINE)* (operation (WHITESPACE | NEWLINE)+)* operation?
//! operation   = access | termination
//! access      = ("r" | "w") transaction "(" variable ")"
//! termination = ("a" | "c") transaction
//! transaction = INTEGER
//! variable    = IDENT
//! ```
//!
//! Words are split by the [lexer](crate::lexer); the grammar above is
//! applied to each word on its own and must consume all of it.

use txsched_core::{Operation, Schedule};
use winnow::ascii::dec_uint;
use winnow::combinator::{alt, cut_err, delimited};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};
use winnow::ModalResult;

use crate::lexer::{tokenize, TokenKind};

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A malformed operation, with its location in the input.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// The offending word as written.
    pub token: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse whitespace-separated operations into a schedule, keeping their
/// order.
///
/// # Errors
///
/// Returns a [`ParseError`] for the first word that is not an operation.
/// Nothing of the schedule is returned in that case.
pub fn parse_schedule(input: &str) -> Result<Schedule<String>, ParseError> {
    tokenize(input)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Word)
        .map(|token| parse_word(input, token.text(input), token.span.start))
        .collect()
}

/// Parse a single operation such as `w3(x)` or `c1`.
///
/// # Errors
///
/// Returns a [`ParseError`] when `input` is not exactly one operation.
pub fn parse_operation(input: &str) -> Result<Operation<String>, ParseError> {
    parse_word(input, input, 0)
}

fn parse_word(input: &str, word: &str, start: usize) -> Result<Operation<String>, ParseError> {
    operation.parse(word).map_err(|e| {
        let (line, column) = offset_to_line_col(input, start + e.offset());
        ParseError {
            message: format!(
                "malformed operation `{word}`, expected r<t>(<o>), w<t>(<o>), a<t> or c<t>"
            ),
            token: word.to_string(),
            line,
            column,
        }
    })
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let prefix = input.get(..offset).unwrap_or(input);
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// Parse a transaction id.
fn transaction(input: &mut &str) -> ModalResult<u64> {
    dec_uint.parse_next(input)
}

/// Parse an object name: one or more alphanumeric characters (or `_`).
fn variable(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

// ---------------------------------------------------------------------------
// Operation parsers
// ---------------------------------------------------------------------------

/// `("r" | "w") transaction "(" variable ")"`
///
/// Committed once the action letter matched, so errors point into the
/// operand instead of back at the letter.
fn access(input: &mut &str) -> ModalResult<Operation<String>> {
    let action = one_of(['r', 'w']).parse_next(input)?;
    let (transaction, variable) =
        cut_err((transaction, delimited(literal("("), variable, literal(")"))))
            .parse_next(input)?;
    Ok(if action == 'r' {
        Operation::read(transaction, variable)
    } else {
        Operation::write(transaction, variable)
    })
}

/// `("a" | "c") transaction`
fn termination(input: &mut &str) -> ModalResult<Operation<String>> {
    let action = one_of(['a', 'c']).parse_next(input)?;
    let transaction = cut_err(transaction).parse_next(input)?;
    Ok(if action == 'a' {
        Operation::abort(transaction)
    } else {
        Operation::commit(transaction)
    })
}

fn operation(input: &mut &str) -> ModalResult<Operation<String>> {
    alt((access, termination)).parse_next(input)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn r(t: u64, var: &str) -> Operation<String> {
        Operation::read(t, var.to_string())
    }
    fn w(t: u64, var: &str) -> Operation<String> {
        Operation::write(t, var.to_string())
    }

    // -----------------------------------------------------------------------
    // Happy-path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_running_example() {
        let input = "r2(x) r1(y) w3(x) w2(x) r3(y) w3(y) w2(y) w2(z) a2 r1(z) w1(z) c1 w3(z) c3";
        let schedule = parse_schedule(input).expect("should parse");
        assert_eq!(schedule.len(), 14);
        assert_eq!(schedule[0], r(2, "x"));
        assert_eq!(schedule[8], Operation::abort(2));
        assert_eq!(schedule[11], Operation::commit(1));
        assert_eq!(schedule[13], Operation::commit(3));
    }

    #[test]
    fn test_multi_line_and_extra_whitespace() {
        let input = "  w1(x)\t r2(x)\n\nc2\r\n  a1  \n";
        let schedule = parse_schedule(input).expect("should parse");
        assert_eq!(
            schedule,
            vec![w(1, "x"), r(2, "x"), Operation::commit(2), Operation::abort(1)]
        );
    }

    #[test]
    fn test_long_names() {
        let schedule = parse_schedule("w12(account_7) c12").expect("should parse");
        assert_eq!(schedule, vec![w(12, "account_7"), Operation::commit(12)]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_schedule(""), Ok(vec![]));
        assert_eq!(parse_schedule(" \n\t"), Ok(vec![]));
    }

    #[test]
    fn test_parse_operation() {
        assert_eq!(parse_operation("r3(y)"), Ok(r(3, "y")));
        assert_eq!(parse_operation("a7"), Ok(Operation::abort(7)));
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_rejects_malformed_words() {
        for word in ["x1", "r(x)", "r1", "r1()", "w1(x", "c", "c1(x)", "r1(x)y", "a-1"] {
            let err = parse_schedule(word).expect_err(word);
            assert_eq!(err.token, word);
            assert_eq!(err.line, 1);
        }
    }

    #[test]
    fn test_parse_error_has_line_column() {
        let input = "r1(x) c1\nw2(y) q2 c2\n";
        let err = parse_schedule(input).expect_err("should fail");
        assert_eq!(err.token, "q2");
        assert_eq!((err.line, err.column), (2, 7));
    }

    #[test]
    fn test_parse_error_points_inside_word() {
        let err = parse_schedule("r1(x) w2(y").expect_err("should fail");
        assert_eq!(err.token, "w2(y");
        // Missing `)` after the last character.
        assert_eq!((err.line, err.column), (1, 11));
    }

    #[test]
    fn test_parse_error_display() {
        let err = parse_schedule("r1(x) oops").expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.starts_with("parse error at line 1, column 7: malformed operation `oops`"),
            "unexpected display: {msg}"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_error_json() {
        let err = parse_schedule("r1(x)\nq1").expect_err("should fail");
        let json = serde_json::to_value(&err).expect("serializable");
        assert_eq!(json["token"], "q1");
        assert_eq!(json["line"], 2);
        assert_eq!(json["column"], 1);
    }

    #[test]
    fn test_offset_to_line_col_first_line() {
        assert_eq!(offset_to_line_col("hello\nworld\n", 0), (1, 1));
    }

    #[test]
    fn test_offset_to_line_col_second_line() {
        // "hello\n" is 6 bytes; offset 6 is start of second line.
        assert_eq!(offset_to_line_col("hello\nworld\n", 6), (2, 1));
    }
}
