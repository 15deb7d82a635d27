use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::builder::{TypedValueParser, ValueParser};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// The Balsa front end.
#[derive(Debug, Clone, Parser)]
#[clap(name = "balsa", version, author)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Sets the level of logging verbosity:
    /// -v = info, -vv = debug, -vvv = trace
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Path to a TOML file with parser limits
    #[clap(long, env = "BALSA_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
#[command()]
pub enum Command {
    /// Parses source files and reports their diagnostics
    #[command(visible_alias = "p")]
    Parse(ParseCommand),

    /// Checks many source files in parallel and summarizes the result
    #[command(visible_alias = "c")]
    Check(CheckCommand),
}

/// Parses source files and reports their diagnostics
#[derive(Debug, Clone, Parser)]
pub struct ParseCommand {
    /// Shared arguments.
    #[clap(flatten)]
    pub common: SharedArgs,

    /// Prints the syntax tree of each file
    #[arg(long)]
    pub tree: bool,

    /// Prints the tokens of each file
    #[arg(long)]
    pub tokens: bool,
}

/// Checks many source files in parallel and summarizes the result
#[derive(Debug, Clone, Parser)]
pub struct CheckCommand {
    /// Shared arguments.
    #[clap(flatten)]
    pub common: SharedArgs,

    /// Only prints the summary
    #[arg(long, short)]
    pub quiet: bool,
}

/// Common arguments of parse and check.
#[derive(Debug, Clone, Args)]
pub struct SharedArgs {
    /// Paths to input files. Use `-` to read from stdin
    #[clap(value_parser = input_value_parser(), required = true)]
    pub inputs: Vec<Input>,

    /// In which format to emit diagnostics
    #[clap(
        long,
        default_value_t = DiagnosticFormat::Human,
        value_parser = clap::value_parser!(DiagnosticFormat)
    )]
    pub diagnostic_format: DiagnosticFormat,
}

/// An input that is either stdin or a real path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Input {
    /// Source code from stdin.
    Stdin,
    /// A path to a source file.
    Path(PathBuf),
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.pad("<stdin>"),
            Input::Path(path) => path.display().fmt(f),
        }
    }
}

/// The clap value parser used by `SharedArgs.inputs`.
fn input_value_parser() -> impl Into<ValueParser> {
    clap::builder::OsStringValueParser::new().try_map(|value| {
        if value.is_empty() {
            Err(clap::Error::new(clap::error::ErrorKind::InvalidValue))
        } else if value == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::Path(value.into()))
        }
    })
}

/// Which format to use for diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum)]
pub enum DiagnosticFormat {
    Human,
    Short,
}

impl Display for DiagnosticFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_arguments_are_consistent() {
        CliArguments::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let args = CliArguments::parse_from([
            "balsa",
            "-vv",
            "parse",
            "--tree",
            "--diagnostic-format",
            "short",
            "main.bal",
            "-",
        ]);
        assert_eq!(args.verbosity, 2);
        let Command::Parse(command) = args.command else { panic!("expected parse") };
        assert!(command.tree);
        assert!(!command.tokens);
        assert_eq!(command.common.diagnostic_format, DiagnosticFormat::Short);
        assert_eq!(
            command.common.inputs,
            [Input::Path("main.bal".into()), Input::Stdin]
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = CliArguments::try_parse_from(["balsa", "check", ""]);
        assert!(result.is_err());
        let args = CliArguments::try_parse_from(["balsa", "c", "-"]).unwrap();
        let Command::Check(command) = args.command else { panic!("expected check") };
        assert_eq!(command.common.inputs, [Input::Stdin]);
    }
}
