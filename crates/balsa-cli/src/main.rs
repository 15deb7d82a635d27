use std::process::ExitCode;

use balsa_cli::args::Command;
use balsa_cli::{ARGS, EXIT, StrResult, print_error, set_failed};

/// Entry point.
fn main() -> ExitCode {
    balsa_cli::tracing::setup_tracing(&ARGS);

    let res = dispatch();

    if let Err(msg) = res {
        set_failed();
        print_error(&msg).expect("failed to print error");
    }

    EXIT.with(|cell| cell.get())
}

/// Execute the requested command.
fn dispatch() -> StrResult<()> {
    let config = balsa_cli::config::load(ARGS.config.as_deref())?;

    match &ARGS.command {
        Command::Parse(command) => balsa_cli::parse::parse(command, config)?,
        Command::Check(command) => balsa_cli::check::check(command, config)?,
    }

    Ok(())
}
