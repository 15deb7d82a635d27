use std::io::{self, Write};

use balsa_syntax::{ParseConfig, Source, lex};
use ecow::eco_format;

use crate::args::ParseCommand;
use crate::report::{SourceFile, SourceFiles, print_diagnostics};
use crate::{StrResult, set_failed};

/// Execute a parse command.
pub fn parse(command: &ParseCommand, config: ParseConfig) -> StrResult<()> {
    let files = command
        .common
        .inputs
        .iter()
        .map(|input| SourceFile::load(input, config))
        .collect::<StrResult<Vec<_>>>()?;

    let mut out = io::stdout().lock();
    for file in &files {
        dump(&mut out, command, &file.source)
            .map_err(|err| eco_format!("failed to write output ({err})"))?;
    }

    let files = SourceFiles(files);
    let counts = print_diagnostics(&files, command.common.diagnostic_format)
        .map_err(|err| eco_format!("failed to print diagnostics ({err})"))?;
    if counts.errors > 0 {
        set_failed();
    }

    Ok(())
}

/// Write the requested dumps of a file.
fn dump(out: &mut impl Write, command: &ParseCommand, source: &Source) -> io::Result<()> {
    if command.tokens {
        let mut cursor = 0;
        for token in lex(source.text()) {
            let range = token.text_range(cursor);
            writeln!(out, "{range:?} {:?} {:?}", token.kind(), token.text())?;
            cursor += token.width();
        }
    }

    if command.tree {
        writeln!(out, "{:#?}", source.root())?;
    }

    Ok(())
}
