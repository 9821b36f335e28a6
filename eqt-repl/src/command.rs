//! Commands typed at the prompt.

use eqt_attrs::ErrorKind;
use eqt_error::{Error, ErrorKind};
use levenshtein::levenshtein;
use std::ops::Range;

/// The names of every command, as typed at the prompt.
pub const COMMANDS: [&str; 8] = ["move", "drop", "click", "steps", "toggle", "load", "help", "quit"];

/// A command typed at the prompt. Blocks are numbered from 1, left to right, skipping the equals
/// sign.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Drag a block across the equals sign.
    Move(usize),

    /// Drag a block and drop it at a column of the printed equation.
    Drop(usize, f64),

    /// Click a block: resolve an operator, or expand a product such as `2x`.
    Click(usize),

    /// Print the steps taken so far.
    Steps,

    /// Check or uncheck a step.
    Toggle(u32),

    /// Start over with a new equation.
    Load(String),

    Help,
    Quit,
}

/// The command name is not one of [`COMMANDS`].
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", self.name),
    labels = ["this command"],
    help = match &self.suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion),
        None => "type `help` to list the commands".to_string(),
    },
)]
pub struct UnknownCommand {
    pub name: String,
    pub suggestion: Option<&'static str>,
}

/// The command needs an argument that was not given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` needs {}", self.command, self.expected),
    labels = ["after this"],
)]
pub struct MissingArgument {
    pub command: &'static str,
    pub expected: &'static str,
}

/// An argument could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid argument",
    labels = [format!("expected {}", self.expected)],
)]
pub struct InvalidArgument {
    pub expected: &'static str,
}

/// The block number does not name a block of the current equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no block {}", self.number),
    labels = [format!("the equation has {} blocks", self.count)],
)]
pub struct NoSuchBlock {
    pub number: usize,
    pub count: usize,
}

/// The step number does not name a recorded step.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no step {}", self.id),
    labels = ["this step"],
    help = "type `steps` to list the steps",
)]
pub struct NoSuchStep {
    pub id: u32,
}

/// A word of the command line, with its byte range.
#[derive(Debug, Clone)]
pub struct Word<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Word<'a> {
    /// Parses the word as a number.
    fn parse<T: std::str::FromStr>(&self, expected: &'static str) -> Result<T, Error> {
        self.text.parse()
            .map_err(|_| Error::new(vec![self.span.clone()], InvalidArgument { expected }))
    }
}

/// Splits the line into whitespace-separated words.
fn words(line: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some(i),
            (Some(s), true) => {
                words.push(Word { text: &line[s..i], span: s..i });
                start = None;
            },
            _ => {},
        }
    }
    words
}

/// Returns the command whose name is closest to the given name, if any is close enough.
fn suggest(name: &str) -> Option<&'static str> {
    COMMANDS.iter()
        .map(|command| (levenshtein(command, name), *command))
        .filter(|(distance, _)| *distance < 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, command)| command)
}

impl Command {
    /// Parses a command line. The line must not be blank.
    pub fn parse(line: &str) -> Result<Self, Error> {
        let words = words(line);
        let Some(name) = words.first() else {
            return Err(Error::new(vec![0..line.len()], UnknownCommand {
                name: String::new(),
                suggestion: Some("help"),
            }));
        };
        let args = &words[1..];

        // the argument at the given position, or an error pointing at the last word typed
        let arg = |index: usize, command: &'static str, expected: &'static str| {
            args.get(index).ok_or_else(|| {
                let last = words.last().map_or(name.span.clone(), |word| word.span.clone());
                Error::new(vec![last], MissingArgument { command, expected })
            })
        };

        match name.text {
            "move" | "m" => Ok(Self::Move(arg(0, "move", "a block number")?.parse("a block number")?)),
            "drop" | "d" => Ok(Self::Drop(
                arg(0, "drop", "a block number")?.parse("a block number")?,
                arg(1, "drop", "a column to drop the block at")?.parse("a column")?,
            )),
            "click" | "c" => Ok(Self::Click(arg(0, "click", "a block number")?.parse("a block number")?)),
            "steps" | "s" => Ok(Self::Steps),
            "toggle" | "t" => Ok(Self::Toggle(arg(0, "toggle", "a step number")?.parse("a step number")?)),
            "load" | "l" => {
                let equation = line[name.span.end..].trim();
                if equation.is_empty() {
                    return Err(Error::new(vec![name.span.clone()], MissingArgument {
                        command: "load",
                        expected: "an equation",
                    }));
                }
                Ok(Self::Load(equation.to_string()))
            },
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(Error::new(vec![name.span.clone()], UnknownCommand {
                name: other.to_string(),
                suggestion: suggest(other),
            })),
        }
    }
}
