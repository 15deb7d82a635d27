//! Lexer, error-tolerant parser and syntax tree for Balsa.
//!
//! Parsing never fails: malformed input yields a complete tree in which
//! missing tokens stand in for what was expected and skipped text is kept as
//! trivia, with diagnostics attached to the nodes they concern.

mod diag;
mod grammar;
mod kind;
mod lexer;
mod node;
mod parser;
mod recovery;
mod red;
mod reparser;
mod set;
mod source;

pub use self::diag::{DiagnosticCode, Severity, SyntaxDiagnostic};
pub use self::grammar::{Ctx, Rule};
pub use self::kind::SyntaxKind;
pub use self::lexer::{
    LexMode, LexState, Lexer, is_id_continue, is_id_start, is_ident, is_newline, lex,
};
pub use self::node::{Minutia, SyntaxNode, Tokens};
pub use self::parser::{
    ParseConfig, parse, parse_expression, parse_statement, parse_type_desc, parse_with,
};
pub use self::recovery::{Continuation, Fix, Link, Recovery, Solution, cons, prepend};
pub use self::red::{RedChildren, RedNode};
pub use self::reparser::{reparse, reparse_with};
pub use self::set::SyntaxSet;
pub use self::source::Source;
