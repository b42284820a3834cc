//! `jsonspan`: print every top-level JSON value found in the input, one per
//! line.
//!
//! Input may be JSON Lines, pretty-printed documents, values wrapped in an
//! outer array, or any mix of these.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jsonspan::{EndOfStream, JsonSplitter, SplitError, SplitterOptions};
use log::{LevelFilter, debug, error};

mod input;
mod render;

use input::Inputs;
use render::Render;

/// What to do with a value still open when the input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnEof {
    /// Drop it silently.
    Discard,
    /// Print whatever was buffered.
    Emit,
    /// Fail with a non-zero exit code.
    Error,
}

impl From<OnEof> for EndOfStream {
    fn from(value: OnEof) -> Self {
        match value {
            OnEof::Discard => EndOfStream::Discard,
            OnEof::Emit => EndOfStream::Emit,
            OnEof::Error => EndOfStream::Error,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "jsonspan", version)]
#[command(about = "Print every top-level JSON value found in the input, one per line")]
struct Cli {
    /// Input files; `-` or nothing reads standard input. `.gz` files are
    /// decompressed.
    files: Vec<PathBuf>,

    /// Handling of a value left open at end of input
    #[arg(long, value_enum, default_value_t = OnEof::Discard)]
    on_eof: OnEof,

    /// Drop values that are not valid JSON
    #[arg(long)]
    valid_only: bool,

    /// Re-serialize values on a single line (drops invalid values)
    #[arg(long)]
    compact: bool,

    /// Print string values as their decoded text
    #[arg(long)]
    unwrap_strings: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> SplitterOptions {
        SplitterOptions {
            end_of_stream: self.on_eof.into(),
            ..SplitterOptions::default()
        }
    }

    fn render(&self) -> Render {
        Render {
            valid_only: self.valid_only,
            compact: self.compact,
            unwrap_strings: self.unwrap_strings,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let render = cli.render();
    let options = cli.options();
    let splitter = JsonSplitter::new(Inputs::new(cli.files), options);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut printed = 0u64;

    for span in splitter {
        let span = match span {
            Ok(span) => span,
            Err(SplitError::Source(err)) => return Err(err).context("reading input"),
            Err(SplitError::Unterminated(err)) => return Err(err.into()),
        };
        if let Some(text) = render.apply(&span) {
            writeln!(out, "{text}")?;
            printed += 1;
        }
    }
    out.flush()?;
    debug!("printed {printed} values");
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|err| err.kind() == io::ErrorKind::BrokenPipe)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
