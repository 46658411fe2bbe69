//! Notation parser for transaction schedules.
//!
//! Turns `r2(x) w1(y) a2 c1` into a [`Schedule<String>`], one operation per
//! whitespace-separated word, in input order.

pub mod lexer;
pub mod parser;

use txsched_core::{Operation, Schedule};

pub use lexer::{tokenize, tokenize_with_text, Token, TokenKind};
pub use parser::{parse_operation, parse_schedule, ParseError};

/// Input accepted wherever a schedule is expected: raw notation, which is
/// parsed on the way in, or operations that are already structured.
pub trait IntoSchedule {
    /// # Errors
    ///
    /// Returns a [`ParseError`] when raw notation is malformed.
    fn into_schedule(self) -> Result<Schedule<String>, ParseError>;
}

impl IntoSchedule for &str {
    fn into_schedule(self) -> Result<Schedule<String>, ParseError> {
        parse_schedule(self)
    }
}

impl IntoSchedule for &String {
    fn into_schedule(self) -> Result<Schedule<String>, ParseError> {
        parse_schedule(self)
    }
}

impl IntoSchedule for Schedule<String> {
    fn into_schedule(self) -> Result<Schedule<String>, ParseError> {
        Ok(self)
    }
}

impl IntoSchedule for &[Operation<String>] {
    fn into_schedule(self) -> Result<Schedule<String>, ParseError> {
        Ok(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_and_structured_input_agree() {
        let parsed = "w1(x) c1".into_schedule().expect("should parse");
        let structured = vec![Operation::write(1, "x".to_string()), Operation::commit(1)];

        assert_eq!(parsed, structured);
        assert_eq!(structured.as_slice().into_schedule(), Ok(parsed.clone()));
        assert_eq!(structured.into_schedule(), Ok(parsed));
    }

    #[test]
    fn test_formatting_round_trips() {
        let input = "r2(x)\n  w10(acct)\ta2   c10";
        let schedule = parse_schedule(input).expect("should parse");
        let formatted = txsched_core::schedule::display::format_schedule(&schedule);

        assert_eq!(formatted, "r2(x) w10(acct) a2 c10");
        assert_eq!(parse_schedule(&formatted), Ok(schedule));
    }

    #[test]
    fn test_malformed_notation_yields_no_schedule() {
        let input = String::from("w1(x) c1 z");
        let err = (&input).into_schedule().expect_err("should fail");
        assert_eq!(err.token, "z");
    }
}
