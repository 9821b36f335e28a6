mod command;
mod error;

use clap::Parser;
use command::{Command, NoSuchBlock, NoSuchStep, COMMANDS};
use eqt_engine::{Click, EngineOptionsBuilder, Gesture, Session, Side, Term};
use eqt_error::Error as SpannedError;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Solve a linear equation by moving blocks across the equals sign and combining them.
#[derive(Parser)]
#[command(name = "eqt")]
struct Args {
    /// The equation to solve.
    #[arg(default_value = "2x + 3 = 5")]
    equation: String,

    /// Compute the reciprocal of a moved fraction (`3/4` becomes `4/3`) instead of writing
    /// `1/3/4`.
    #[arg(long)]
    strict_fractions: bool,

    /// Take the operator in front of a moved block into account, so that a subtracted block is
    /// added to the other side.
    #[arg(long)]
    strict_operators: bool,

    /// The maximum number of decimal places shown in a result.
    #[arg(long, default_value_t = 6)]
    precision: usize,
}

/// Lays out the block numbers under the printed equation. Each number starts in its block's
/// column; a number that would run into the one before it goes on a later row.
fn label_rows(session: &Session) -> Vec<String> {
    let state = session.state();
    let mut rows: Vec<String> = Vec::new();
    for (n, term) in blocks(session).into_iter().enumerate() {
        let Some(span) = state.span_of(term.side, term.id) else {
            continue;
        };
        let index = match rows.iter().position(|row| row.is_empty() || row.len() < span.start) {
            Some(index) => index,
            None => {
                rows.push(String::new());
                rows.len() - 1
            },
        };

        let row = &mut rows[index];
        while row.len() < span.start {
            row.push(' ');
        }
        row.push_str(&(n + 1).to_string());
    }
    rows
}

/// Prints the equation with each block's number below it.
fn print_board(session: &Session) {
    println!("  {}", session.render());
    for row in label_rows(session) {
        println!("  {}", row);
    }
    if session.is_solved() {
        println!("solved!");
    }
}

/// Prints the steps taken so far.
fn print_steps(session: &Session) {
    for step in session.steps() {
        let mark = if step.completed { 'x' } else { ' ' };
        println!("  {:>2}. [{}] {}", step.id, mark, step.description);
    }
}

fn print_help() {
    println!("commands: {}", COMMANDS.join(", "));
    println!("  move <block>           drag a block across the equals sign");
    println!("  drop <block> <column>  drag a block and drop it at a column of the equation");
    println!("  click <block>          resolve an operator, or expand a product like 2x");
    println!("  steps                  list the steps taken so far");
    println!("  toggle <step>          check or uncheck a step");
    println!("  load <equation>        start over with a new equation");
}

/// Returns every block of the equation, in the order they are numbered.
fn blocks(session: &Session) -> Vec<&Term> {
    let state = session.state();
    state.left().iter().chain(state.right()).collect()
}

/// Returns the block with the given number.
fn block(session: &Session, number: usize, line: &str) -> Result<Term, Error> {
    let blocks = blocks(session);
    number.checked_sub(1)
        .and_then(|index| blocks.get(index))
        .map(|term| (*term).clone())
        .ok_or_else(|| Error::Command(
            SpannedError::new(vec![0..line.len()], NoSuchBlock { number, count: blocks.len() }),
            line.to_string(),
        ))
}

/// Runs one command line. Returns true if the session should end.
fn execute(line: &str, session: &mut Session) -> Result<bool, Error> {
    let command = Command::parse(line).map_err(|err| Error::Command(err, line.to_string()))?;
    debug!(?command, "running command");

    let rendered = session.render();
    let engine = |err: SpannedError| Error::Engine(err, rendered.clone());

    let applied = match command {
        Command::Move(n) => {
            let term = block(session, n, line)?;
            session.drag(&Gesture::for_term(&term, true)).map_err(engine)?
        },
        Command::Drop(n, column) => {
            let term = block(session, n, line)?;
            // the middle of the `=` in `left = right`
            let equals = session.state().side_span(Side::Left).end as f64 + 1.5;
            session.drag(&Gesture::from_drop(&term, column, &equals)).map_err(engine)?
        },
        Command::Click(n) => {
            let term = block(session, n, line)?;
            session.click(&Click::on(&term)).map_err(engine)?
        },
        Command::Steps => {
            print_steps(session);
            return Ok(false);
        },
        Command::Toggle(id) => {
            if session.toggle_step(id).is_none() {
                return Err(Error::Command(
                    SpannedError::new(vec![0..line.len()], NoSuchStep { id }),
                    line.to_string(),
                ));
            }
            print_steps(session);
            return Ok(false);
        },
        Command::Load(equation) => {
            session.load(&equation).map_err(|errs| Error::Parse(errs, equation.clone()))?;
            print_board(session);
            return Ok(false);
        },
        Command::Help => {
            print_help();
            return Ok(false);
        },
        Command::Quit => return Ok(true),
    };

    if applied.changed {
        print_board(session);
    } else {
        println!("nothing changed");
    }
    Ok(false)
}

/// Runs each line of a non-interactive input as a command.
fn run_lines(input: impl BufRead, session: &mut Session) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match execute(&line, session) {
            Ok(true) => break,
            Ok(false) => (),
            Err(err) => err.report_to_stderr(),
        }
    }
    Ok(())
}

/// Runs the interactive prompt.
fn run_prompt(session: &mut Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;

        match execute(&input, session) {
            Ok(true) => return Ok(()),
            Ok(false) => (),
            Err(err) => err.report_to_stderr(),
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("EQT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let options = EngineOptionsBuilder::new()
        .strict_fraction_inverse(args.strict_fractions)
        .strict_operator_inverse(args.strict_operators)
        .decimal_precision(args.precision)
        .build();

    let mut session = match Session::with_options(&args.equation, options) {
        Ok(session) => session,
        Err(errs) => {
            Error::Parse(errs, args.equation).report_to_stderr();
            std::process::exit(1);
        },
    };

    print_board(&session);
    let result = if io::stdin().is_terminal() {
        print_help();
        run_prompt(&mut session).map_err(|err| err.to_string())
    } else {
        run_lines(io::stdin().lock(), &mut session).map_err(|err| err.to_string())
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
