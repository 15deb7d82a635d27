use std::fmt::{self, Debug, Display, Formatter};

use ecow::{EcoString, EcoVec, eco_format};

use crate::SyntaxKind;

/// A diagnostic attached to a token or node of the syntax tree.
///
/// Diagnostics are plain data: the lexer and parser never fail, they record
/// what went wrong and keep going.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SyntaxDiagnostic {
    /// What went wrong.
    pub code: DiagnosticCode,
    /// How bad it is.
    pub severity: Severity,
    /// Arguments substituted into the code's message.
    pub args: EcoVec<EcoString>,
}

impl SyntaxDiagnostic {
    /// Create an error without arguments.
    pub fn error(code: DiagnosticCode) -> Self {
        Self { code, severity: Severity::Error, args: EcoVec::new() }
    }

    /// Add an argument for the message template.
    pub fn with_arg(mut self, arg: impl Into<EcoString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The rendered message.
    pub fn message(&self) -> EcoString {
        let arg = |i: usize| self.args.get(i).map(EcoString::as_str).unwrap_or("");
        match self.code {
            DiagnosticCode::Missing(kind) => eco_format!("missing {}", kind.name()),
            DiagnosticCode::MissingTypeDesc => "missing type descriptor".into(),
            DiagnosticCode::MissingExpression => "missing expression".into(),
            DiagnosticCode::MissingMatchPattern => "missing match pattern".into(),
            DiagnosticCode::MissingClosingQuote => "missing closing quote".into(),
            DiagnosticCode::InvalidToken => eco_format!("invalid token '{}'", arg(0)),
            DiagnosticCode::LeadingZeros => "leading zeros in numeric literals".into(),
            DiagnosticCode::MissingDigitAfterExponent => {
                "missing digit after exponent indicator".into()
            }
            DiagnosticCode::MissingHexDigitAfterDot => {
                "missing hex digit after dot".into()
            }
            DiagnosticCode::InvalidEscape => {
                eco_format!("invalid escape sequence '{}'", arg(0))
            }
            DiagnosticCode::InvalidNumericEscape => {
                eco_format!("invalid numeric escape sequence '{}'", arg(0))
            }
            DiagnosticCode::NestingTooDeep => "maximum nesting depth reached".into(),
            DiagnosticCode::ImportAfterDecl => {
                "imports must come before other declarations".into()
            }
            DiagnosticCode::InvalidExpressionStatement => {
                "expression is not allowed as a statement".into()
            }
        }
    }
}

impl Debug for SyntaxDiagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.severity, self.message())
    }
}

impl Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// The kind of a diagnostic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DiagnosticCode {
    /// A required token was absent and has been synthesized.
    Missing(SyntaxKind),
    /// A required type descriptor was absent.
    MissingTypeDesc,
    /// A required expression was absent.
    MissingExpression,
    /// A match clause had no pattern.
    MissingMatchPattern,
    /// A string literal ran into the end of its line.
    MissingClosingQuote,
    /// Source text was skipped.
    InvalidToken,
    /// A decimal literal started with `0`.
    LeadingZeros,
    /// An exponent indicator was not followed by a digit.
    MissingDigitAfterExponent,
    /// A hexadecimal dot was not followed by a hex digit.
    MissingHexDigitAfterDot,
    /// An unknown escape sequence in a string.
    InvalidEscape,
    /// A malformed `\u{...}` escape sequence.
    InvalidNumericEscape,
    /// Constructs were nested deeper than the parser allows.
    NestingTooDeep,
    /// An import declaration followed another declaration.
    ImportAfterDecl,
    /// An expression that has no effect was used as a statement.
    InvalidExpressionStatement,
}

/// How severe a diagnostic is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Severity {
    /// The source is not valid.
    Error,
    /// The source is valid but suspicious.
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let missing = SyntaxDiagnostic::error(DiagnosticCode::Missing(SyntaxKind::OpenBrace));
        assert_eq!(missing.message(), "missing open brace");
        let invalid = SyntaxDiagnostic::error(DiagnosticCode::InvalidToken).with_arg("$$");
        assert_eq!(invalid.message(), "invalid token '$$'");
        assert_eq!(
            SyntaxDiagnostic::error(DiagnosticCode::MissingTypeDesc).to_string(),
            "missing type descriptor",
        );
    }
}
