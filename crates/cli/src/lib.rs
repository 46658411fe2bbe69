//! txsched CLI -- classify and lock-schedule transaction schedules.

use std::path::PathBuf;
use std::{fmt, fs, io};

use clap::{Args, Parser, Subcommand, ValueEnum};
use txsched_core::{Recoverability, Schedule};
use txsched_parser::{IntoSchedule, ParseError};

#[derive(Debug, Parser)]
#[command(
    name = "txsched",
    about = "Recoverability analysis and two-phase locking for transaction schedules"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decide whether a schedule is ST, ACA or RC
    Classify(ClassifyArgs),
    /// List which transaction every read observes
    ReadsFrom(InputArgs),
    /// List conflicting operation pairs of committed transactions
    Conflicts(InputArgs),
    /// Print the conflict graph in DOT format
    Graph(InputArgs),
    /// Print a serial order of the transactions, if one respects all conflicts
    Serialize(InputArgs),
    /// Run the schedule through conservative two-phase locking
    C2pl(InputArgs),
    /// Run the schedule through strict two-phase locking
    S2pl(S2plArgs),
    /// Print the schedule in normalised notation
    Fmt(InputArgs),
    /// Print the JSON Schema of a schedule to stdout
    Schema,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Schedule in notation, e.g. "w1(x) r2(x) c1 c2"
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub schedule: Option<String>,
    /// Read the schedule from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Print the reasoning behind each result
    #[arg(long)]
    pub verbose: bool,
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Check a single class instead of walking ST, ACA, RC in order
    #[arg(long)]
    pub level: Option<Level>,
}

#[derive(Debug, Args)]
pub struct S2plArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Hold read locks until termination as well (SS2PL)
    #[arg(long)]
    pub strong: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    St,
    Aca,
    Rc,
}

impl From<Level> for Recoverability {
    fn from(level: Level) -> Self {
        match level {
            Level::St => Self::Strict,
            Level::Aca => Self::AvoidsCascadingAborts,
            Level::Rc => Self::Recoverable,
        }
    }
}

/// Why a schedule could not be loaded.
#[derive(Debug)]
pub enum InputError {
    Read { path: PathBuf, source: io::Error },
    Parse(ParseError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<ParseError> for InputError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl InputArgs {
    /// Load the schedule from the positional argument or `--file`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when the file cannot be read or the
    /// notation is malformed.
    pub fn read_schedule(&self) -> Result<Schedule<String>, InputError> {
        let text = match (&self.schedule, &self.file) {
            (Some(notation), _) => notation.clone(),
            (None, Some(path)) => fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.clone(),
                source,
            })?,
            (None, None) => String::new(),
        };
        text.as_str().into_schedule().map_err(InputError::from)
    }
}
