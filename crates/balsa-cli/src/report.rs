use std::io::Read;
use std::ops::Range;

use balsa_syntax::{ParseConfig, Severity, Source};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::term;
use ecow::eco_format;

use crate::StrResult;
use crate::args::{DiagnosticFormat, Input};
use crate::terminal;

type CodespanResult<T> = Result<T, CodespanError>;
type CodespanError = codespan_reporting::files::Error;

/// A parsed input file.
pub struct SourceFile {
    /// How to refer to the file in messages.
    pub name: String,
    /// The file's text and syntax tree.
    pub source: Source,
}

impl SourceFile {
    /// Read and parse an input.
    pub fn load(input: &Input, config: ParseConfig) -> StrResult<Self> {
        let text = match input {
            Input::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|err| eco_format!("failed to read from stdin ({err})"))?;
                text
            }
            Input::Path(path) => std::fs::read_to_string(path)
                .map_err(|err| eco_format!("failed to read {} ({err})", path.display()))?,
        };

        let source = Source::with_config(text, config);
        tracing::debug!(input = %input, lines = source.len_lines(), "parsed");
        Ok(Self { name: input.to_string(), source })
    }
}

/// A collection of parsed files that diagnostics can point into.
pub struct SourceFiles(pub Vec<SourceFile>);

/// How many diagnostics of each severity were printed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Counts {
    pub errors: usize,
    pub warnings: usize,
}

impl Counts {
    /// Count the diagnostics of all files without printing them.
    pub fn of(files: &SourceFiles) -> Self {
        let mut counts = Self::default();
        for file in &files.0 {
            for (_, diagnostic) in file.source.root().diagnostics() {
                counts.add(diagnostic.severity);
            }
        }
        counts
    }

    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
    }
}

/// Print the diagnostics of all files to the terminal.
pub fn print_diagnostics(
    files: &SourceFiles,
    diagnostic_format: DiagnosticFormat,
) -> CodespanResult<Counts> {
    let mut config = term::Config { tab_width: 2, ..Default::default() };
    if diagnostic_format == DiagnosticFormat::Short {
        config.display_style = term::DisplayStyle::Short;
    }

    let mut counts = Counts::default();
    for (id, file) in files.0.iter().enumerate() {
        for (range, diagnostic) in file.source.root().diagnostics() {
            counts.add(diagnostic.severity);
            let diag = match diagnostic.severity {
                Severity::Error => Diagnostic::error(),
                Severity::Warning => Diagnostic::warning(),
            }
            .with_message(diagnostic.message())
            .with_labels(vec![Label::primary(id, range)]);

            term::emit(&mut terminal::out(), &config, files, &diag)?;
        }
    }

    Ok(counts)
}

impl SourceFiles {
    fn lookup(&self, id: usize) -> CodespanResult<&Source> {
        self.0.get(id).map(|file| &file.source).ok_or(CodespanError::FileMissing)
    }
}

impl<'a> codespan_reporting::files::Files<'a> for SourceFiles {
    type FileId = usize;
    type Name = &'a str;
    type Source = &'a str;

    fn name(&'a self, id: usize) -> CodespanResult<Self::Name> {
        self.0.get(id).map(|file| file.name.as_str()).ok_or(CodespanError::FileMissing)
    }

    fn source(&'a self, id: usize) -> CodespanResult<Self::Source> {
        Ok(self.lookup(id)?.text())
    }

    fn line_index(&'a self, id: usize, given: usize) -> CodespanResult<usize> {
        let source = self.lookup(id)?;
        source
            .byte_to_line(given)
            .ok_or_else(|| CodespanError::IndexTooLarge { given, max: source.len_bytes() })
    }

    fn line_range(&'a self, id: usize, given: usize) -> CodespanResult<Range<usize>> {
        let source = self.lookup(id)?;
        source
            .line_to_range(given)
            .ok_or_else(|| CodespanError::LineTooLarge { given, max: source.len_lines() })
    }

    fn column_number(&'a self, id: usize, _: usize, given: usize) -> CodespanResult<usize> {
        let source = self.lookup(id)?;
        source.byte_to_column(given).map(|column| column + 1).ok_or_else(|| {
            let max = source.len_bytes();
            if given <= max {
                CodespanError::InvalidCharBoundary { given }
            } else {
                CodespanError::IndexTooLarge { given, max }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use codespan_reporting::files::Files;

    use super::*;

    fn files(text: &str) -> SourceFiles {
        SourceFiles(vec![SourceFile { name: "main.bal".into(), source: Source::new(text) }])
    }

    #[test]
    fn test_locations() {
        let files = files("int a = 1;\nint b = 2;\n");
        assert_eq!(files.name(0).unwrap(), "main.bal");
        assert_eq!(files.line_index(0, 12).unwrap(), 1);
        assert_eq!(files.line_range(0, 1).unwrap(), 11..22);
        assert_eq!(files.column_number(0, 1, 15).unwrap(), 5);
        assert!(files.line_index(0, 100).is_err());
        assert!(files.source(1).is_err());
    }

    #[test]
    fn test_counts() {
        let files = files("function f() returns");
        assert_eq!(Counts::of(&files), Counts { errors: 2, warnings: 0 });
    }
}
