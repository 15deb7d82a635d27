use std::io::Write;

use balsa_syntax::ParseConfig;
use codespan_reporting::term::termcolor::{Color, ColorSpec, WriteColor};
use ecow::eco_format;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::args::CheckCommand;
use crate::report::{Counts, SourceFile, SourceFiles, print_diagnostics};
use crate::{StrResult, set_failed, terminal};

/// Execute a check command.
pub fn check(command: &CheckCommand, config: ParseConfig) -> StrResult<()> {
    let files = command
        .common
        .inputs
        .par_iter()
        .map(|input| SourceFile::load(input, config))
        .collect::<StrResult<Vec<_>>>()?;
    let files = SourceFiles(files);

    let counts = if command.quiet {
        Counts::of(&files)
    } else {
        print_diagnostics(&files, command.common.diagnostic_format)
            .map_err(|err| eco_format!("failed to print diagnostics ({err})"))?
    };

    if counts.errors > 0 {
        set_failed();
    }

    print_summary(files.0.len(), counts)
        .map_err(|err| eco_format!("failed to print summary ({err})"))
}

/// Print how many files were checked and what was found.
fn print_summary(checked: usize, counts: Counts) -> std::io::Result<()> {
    let mut out = terminal::out();
    let color = if counts.errors > 0 { Color::Red } else { Color::Green };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "checked")?;
    out.reset()?;
    writeln!(
        out,
        " {checked} {} ({} {}, {} {})",
        plural(checked, "file", "files"),
        counts.errors,
        plural(counts.errors, "error", "errors"),
        counts.warnings,
        plural(counts.warnings, "warning", "warnings"),
    )
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
