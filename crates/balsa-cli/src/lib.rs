pub mod args;
pub mod check;
pub mod config;
pub mod parse;
pub mod report;
pub mod terminal;
pub mod tracing;

use std::cell::Cell;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;
use ecow::EcoString;
use once_cell::sync::Lazy;

use crate::args::CliArguments;

/// A result type with a string error message.
pub type StrResult<T> = Result<T, EcoString>;

/// Ensure a failure exit code.
pub fn set_failed() {
    EXIT.with(|cell| cell.set(ExitCode::FAILURE));
}

thread_local! {
    /// The CLI's exit code.
    pub static EXIT: Cell<ExitCode> = const { Cell::new(ExitCode::SUCCESS) };
}

/// The parsed commandline arguments.
pub static ARGS: Lazy<CliArguments> = Lazy::new(CliArguments::parse);

/// Print an application-level error (independent from a source file).
pub fn print_error(msg: &str) -> io::Result<()> {
    let styles = term::Styles::default();

    let mut output = terminal::out();
    output.set_color(&styles.header_error)?;
    write!(output, "error")?;

    output.reset()?;
    writeln!(output, ": {msg}")
}
