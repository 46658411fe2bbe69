use alloc::string::String;
use core::fmt::{Display, Write};

use super::types::Operation;

/// Format a schedule in the compact notation, one space between operations.
///
/// The output parses back into the same schedule.
#[must_use]
pub fn format_schedule<Variable>(schedule: &[Operation<Variable>]) -> String
where
    Variable: Display,
{
    let mut output = String::new();
    for (i, op) in schedule.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        let _ = write!(output, "{op}");
    }
    output
}
