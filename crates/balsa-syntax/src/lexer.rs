use ecow::{EcoVec, eco_vec};
use unicode_ident::{is_xid_continue, is_xid_start};
use unscanny::Scanner;

use crate::{DiagnosticCode, Minutia, SyntaxDiagnostic, SyntaxKind, SyntaxNode};

/// Splits source text into tokens with attached trivia.
///
/// Never fails: malformed input produces tokens with diagnostics, and
/// unrecognizable characters end up as `Invalid` trivia of the next token.
#[derive(Clone)]
pub struct Lexer<'s> {
    /// The scanner: contains the underlying string and location as a "cursor".
    s: Scanner<'s>,
    /// The stack of modes. The bottom is always [`LexMode::Default`].
    modes: EcoVec<LexMode>,
    /// Diagnostics for the token being lexed.
    diagnostics: EcoVec<SyntaxDiagnostic>,
}

/// What kind of tokens to emit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LexMode {
    /// Normal code.
    Default,
    /// Module paths and versions of an import declaration. Numbers are
    /// integers only.
    Import,
    /// The text of a template between backticks. Whitespace is content, so
    /// no trivia is collected.
    Template,
    /// Normal code inside `${ }` until the unbalanced `}`.
    Interpolation,
    /// A braced construct inside an interpolation.
    InterpolationBracedContent,
}

/// A snapshot of the lexer that can be restored later.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LexState {
    cursor: usize,
    modes: EcoVec<LexMode>,
}

impl LexState {
    /// The byte offset at which lexing resumes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The mode stack at the snapshot, bottom first.
    pub fn modes(&self) -> &[LexMode] {
        &self.modes
    }
}

impl<'s> Lexer<'s> {
    /// Create a new lexer in the default mode.
    pub fn new(text: &'s str) -> Self {
        Self {
            s: Scanner::new(text),
            modes: eco_vec![LexMode::Default],
            diagnostics: EcoVec::new(),
        }
    }

    /// Get the current lexing mode.
    pub fn mode(&self) -> LexMode {
        self.modes.last().copied().unwrap_or(LexMode::Default)
    }

    /// The whole mode stack, bottom first.
    pub fn modes(&self) -> &[LexMode] {
        &self.modes
    }

    /// Enter a new lexing mode.
    pub fn push_mode(&mut self, mode: LexMode) {
        self.modes.push(mode);
    }

    /// Leave the current lexing mode. The default mode is never left.
    pub fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    /// The index in the string at which the last token ends and next token
    /// will start.
    pub fn cursor(&self) -> usize {
        self.s.cursor()
    }

    /// Jump to the given index in the string.
    pub fn jump(&mut self, index: usize) {
        self.s.jump(index);
    }

    /// Skip over text that is covered by reused nodes.
    pub fn skip(&mut self, width: usize) {
        self.s.jump(self.s.cursor() + width);
    }

    /// Take a snapshot of the cursor and the mode stack.
    pub fn state(&self) -> LexState {
        LexState { cursor: self.s.cursor(), modes: self.modes.clone() }
    }

    /// Return to a snapshot.
    pub fn restore(&mut self, state: LexState) {
        self.s.jump(state.cursor);
        self.modes = state.modes;
    }
}

impl Lexer<'_> {
    /// Record a diagnostic for the current token.
    fn error(&mut self, code: DiagnosticCode) {
        self.diagnostics.push(SyntaxDiagnostic::error(code));
    }

    /// Record a diagnostic with the given text as argument.
    fn error_at(&mut self, code: DiagnosticCode, start: usize, end: usize) {
        let arg = self.s.get(start..end);
        self.diagnostics.push(SyntaxDiagnostic::error(code).with_arg(arg));
    }

    /// Build the token that started at `start`.
    fn finish(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        leading: EcoVec<Minutia>,
        trailing: bool,
    ) -> SyntaxNode {
        let text = self.s.from(start);
        let trailing = if trailing { self.trivia(false) } else { EcoVec::new() };
        let diagnostics = std::mem::take(&mut self.diagnostics);
        SyntaxNode::lexed(kind, text, leading, trailing, diagnostics)
    }
}

/// Shared methods with all [`LexMode`]s.
impl Lexer<'_> {
    /// Return the next token in our text. Returns [`SyntaxKind::Eof`] tokens
    /// at the end, again and again.
    pub fn next(&mut self) -> SyntaxNode {
        if self.mode() == LexMode::Template {
            return self.template();
        }

        let mut leading = self.trivia(true);
        loop {
            let start = self.s.cursor();
            match self.mode() {
                LexMode::Interpolation if self.s.at('}') => {
                    self.s.eat();
                    self.pop_mode();
                    return self.finish(SyntaxKind::CloseBrace, start, leading, false);
                }
                LexMode::Interpolation | LexMode::InterpolationBracedContent
                    if self.s.at('{') =>
                {
                    self.push_mode(LexMode::InterpolationBracedContent);
                }
                LexMode::InterpolationBracedContent if self.s.at(['}', '`']) => {
                    self.pop_mode();
                }
                _ => {}
            }

            let Some(c) = self.s.eat() else {
                return self.finish(SyntaxKind::Eof, start, leading, false);
            };

            match self.code(start, c) {
                Some(SyntaxKind::DocString) => {
                    return self.finish(SyntaxKind::DocString, start, leading, false);
                }
                Some(SyntaxKind::Backtick) => {
                    // Whatever follows the opening backtick is template text.
                    return self.finish(SyntaxKind::Backtick, start, leading, false);
                }
                Some(kind) => return self.finish(kind, start, leading, true),
                None => {
                    leading.push(self.invalid(start));
                    leading.extend(self.trivia(true));
                }
            }
        }
    }

    /// Collect whitespace, line breaks and comments.
    ///
    /// Trailing trivia ends after the first line break, so the indentation
    /// of the next line belongs to the next token.
    fn trivia(&mut self, leading: bool) -> EcoVec<Minutia> {
        let mut trivia = EcoVec::new();
        loop {
            let start = self.s.cursor();
            if !self.s.eat_while(is_space).is_empty() {
                trivia.push(Minutia::Whitespace(self.s.from(start).into()));
            } else if self.s.eat_newline() {
                trivia.push(Minutia::EndOfLine(self.s.from(start).into()));
                if !leading {
                    break;
                }
            } else if self.s.eat_if("//") {
                self.s.eat_until(is_newline);
                trivia.push(Minutia::Comment(self.s.from(start).into()));
            } else {
                break;
            }
        }
        trivia
    }

    /// Consume a run of characters that cannot start a token.
    fn invalid(&mut self, start: usize) -> Minutia {
        self.s.eat_until(|c: char| {
            is_space(c)
                || is_newline(c)
                || matches!(c, ';' | '{' | '}' | '[' | ']' | '(' | ')')
        });
        SyntaxNode::token(SyntaxKind::Invalid, self.s.from(start)).into_invalid()
    }
}

/// Templates.
impl Lexer<'_> {
    fn template(&mut self) -> SyntaxNode {
        let start = self.s.cursor();
        if self.s.done() {
            return self.finish(SyntaxKind::Eof, start, EcoVec::new(), false);
        }

        if self.s.eat_if('`') {
            self.pop_mode();
            return self.finish(SyntaxKind::Backtick, start, EcoVec::new(), true);
        }

        if self.s.eat_if("${") {
            self.push_mode(LexMode::Interpolation);
            return self.finish(SyntaxKind::InterpolationStart, start, EcoVec::new(), true);
        }

        loop {
            self.s.eat_until(['`', '$']);
            if self.s.done() || self.s.at('`') || self.s.at("${") {
                break;
            }
            self.s.eat();
        }

        self.finish(SyntaxKind::TemplateString, start, EcoVec::new(), false)
    }
}

/// Code.
impl Lexer<'_> {
    /// Lex a token that starts with `c`. Returns `None` for characters that
    /// cannot start a token.
    fn code(&mut self, start: usize, c: char) -> Option<SyntaxKind> {
        Some(match c {
            ':' => SyntaxKind::Colon,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '(' => SyntaxKind::OpenParen,
            ')' => SyntaxKind::CloseParen,
            '[' => SyntaxKind::OpenBracket,
            ']' => SyntaxKind::CloseBracket,
            '{' if self.s.eat_if('|') => SyntaxKind::OpenBracePipe,
            '{' => SyntaxKind::OpenBrace,
            '}' => SyntaxKind::CloseBrace,
            '.' => self.dot(start),

            '|' if self.s.eat_if('}') => SyntaxKind::CloseBracePipe,
            '|' if self.s.eat_if('|') => SyntaxKind::LogicalOr,
            '|' => SyntaxKind::Pipe,
            '?' if self.s.at('.') && self.s.scout(1) != Some('.') => {
                self.s.eat();
                SyntaxKind::OptionalChaining
            }
            '?' if self.s.eat_if(':') => SyntaxKind::Elvis,
            '?' => SyntaxKind::QuestionMark,

            '=' if self.s.eat_if("==") => SyntaxKind::EqEqEq,
            '=' if self.s.eat_if('=') => SyntaxKind::EqEq,
            '=' if self.s.eat_if('>') => SyntaxKind::RightDoubleArrow,
            '=' => SyntaxKind::Assign,
            '-' if self.s.eat_if(">>") => SyntaxKind::SyncSend,
            '-' if self.s.eat_if('>') => SyntaxKind::RightArrow,
            '-' => SyntaxKind::Minus,
            '<' if self.s.eat_if('=') => SyntaxKind::LtEq,
            '<' if self.s.eat_if('-') => SyntaxKind::LeftArrow,
            '<' if self.s.eat_if('<') => SyntaxKind::DoubleLt,
            '<' => SyntaxKind::Lt,
            '>' => self.gt(),
            '!' if self.s.eat_if("==") => SyntaxKind::NotEqEq,
            '!' if self.s.eat_if('=') => SyntaxKind::NotEq,
            '!' => SyntaxKind::Exclamation,
            '&' if self.s.eat_if('&') => SyntaxKind::LogicalAnd,
            '&' => SyntaxKind::BitAnd,
            '+' => SyntaxKind::Plus,
            '*' => SyntaxKind::Asterisk,
            '/' => self.slash(),
            '%' => SyntaxKind::Percent,
            '^' => SyntaxKind::BitXor,
            '~' => SyntaxKind::Negation,
            '@' => SyntaxKind::At,

            '"' => self.string(),
            '#' => self.doc_string(),
            '`' => {
                self.push_mode(LexMode::Template);
                SyntaxKind::Backtick
            }
            '\'' => self.quoted_ident(),
            '0'..='9' => self.number(start, c),
            c if is_id_start(c) => self.ident(start),

            _ => return None,
        })
    }

    /// `>=`, or the operator part of `>>=` and `>>>=`. Shifts are composed
    /// from single `>` tokens by the parser.
    fn gt(&mut self) -> SyntaxKind {
        if self.s.eat_if('=') {
            SyntaxKind::GtEq
        } else if self.s.at(">>=") {
            self.s.eat_if(">>");
            SyntaxKind::TripleGt
        } else if self.s.at(">=") {
            self.s.eat_if('>');
            SyntaxKind::DoubleGt
        } else {
            SyntaxKind::Gt
        }
    }

    fn dot(&mut self, start: usize) -> SyntaxKind {
        if self.s.eat_if("..") {
            SyntaxKind::Ellipsis
        } else if self.s.eat_if(".<") {
            SyntaxKind::DoubleDotLt
        } else if self.s.eat_if('<') {
            SyntaxKind::DotLt
        } else if self.s.eat_if('@') {
            SyntaxKind::AnnotChaining
        } else if self.mode() != LexMode::Import && self.s.at(char::is_ascii_digit) {
            self.decimal_float(start)
        } else {
            SyntaxKind::Dot
        }
    }

    /// `/`, or the start of an XML step: `/*` and `/**/<`.
    fn slash(&mut self) -> SyntaxKind {
        if self.mode() == LexMode::Import || !self.s.eat_if('*') {
            SyntaxKind::Slash
        } else if self.s.eat_if("*/<") {
            SyntaxKind::DoubleSlashDoubleAsteriskLt
        } else {
            SyntaxKind::SlashAsterisk
        }
    }

    fn ident(&mut self, start: usize) -> SyntaxKind {
        self.s.eat_while(is_id_continue);
        SyntaxKind::keyword(self.s.from(start)).unwrap_or(SyntaxKind::Ident)
    }

    /// An identifier with a leading `'`, which may contain escapes and is
    /// never a keyword.
    fn quoted_ident(&mut self) -> SyntaxKind {
        loop {
            self.s.eat_while(is_id_continue);
            if !self.s.at('\\') {
                break;
            }
            match self.s.scout(1) {
                Some('u') if self.s.scout(2) == Some('{') => self.numeric_escape(),
                Some(c) if !c.is_ascii_alphabetic() && !is_newline(c) && c != '\t' => {
                    self.s.eat();
                    self.s.eat();
                }
                _ => break,
            }
        }
        SyntaxKind::Ident
    }

    fn number(&mut self, start: usize, c: char) -> SyntaxKind {
        if c == '0' && self.s.eat_if(['x', 'X']) {
            return self.hex();
        }

        self.s.eat_while(char::is_ascii_digit);
        if c == '0' && self.s.cursor() - start > 1 {
            self.error(DiagnosticCode::LeadingZeros);
        }

        if self.mode() != LexMode::Import
            && self.s.at(['.', 'e', 'E', 'f', 'F', 'd', 'D'])
            && self.s.scout(1) != Some('.')
        {
            return self.decimal_float(start);
        }

        SyntaxKind::Int
    }

    fn decimal_float(&mut self, start: usize) -> SyntaxKind {
        if !self.s.from(start).ends_with('.') {
            self.s.eat_if('.');
        }
        self.s.eat_while(char::is_ascii_digit);
        if self.s.at(['e', 'E']) {
            return self.exponent(false);
        }
        self.s.eat_if(['f', 'F', 'd', 'D']);
        SyntaxKind::Float
    }

    fn exponent(&mut self, hex: bool) -> SyntaxKind {
        self.s.eat();
        self.s.eat_if(['+', '-']);
        if !self.s.at(char::is_ascii_digit) {
            self.error(DiagnosticCode::MissingDigitAfterExponent);
        }
        self.s.eat_while(char::is_ascii_digit);
        if hex {
            return SyntaxKind::HexFloat;
        }
        self.s.eat_if(['f', 'F', 'd', 'D']);
        SyntaxKind::Float
    }

    fn hex(&mut self) -> SyntaxKind {
        if self.s.at('.') && !self.s.scout(1).is_some_and(|c| c.is_ascii_hexdigit()) {
            self.error(DiagnosticCode::MissingHexDigitAfterDot);
        }

        self.s.eat_while(|c: char| c.is_ascii_hexdigit());
        if self.s.eat_if('.') {
            self.s.eat_while(|c: char| c.is_ascii_hexdigit());
            if self.s.at(['p', 'P']) {
                return self.exponent(true);
            }
            return SyntaxKind::HexFloat;
        }

        if self.s.at(['p', 'P']) {
            return self.exponent(true);
        }

        SyntaxKind::HexInt
    }

    /// A string literal. Ends before a line break when the closing quote is
    /// missing, so lexing resumes on the next line.
    fn string(&mut self) -> SyntaxKind {
        loop {
            match self.s.peek() {
                None | Some('\n' | '\r') => {
                    self.error(DiagnosticCode::MissingClosingQuote);
                    break;
                }
                Some('"') => {
                    self.s.eat();
                    break;
                }
                Some('\\') => self.escape(),
                Some(_) => {
                    self.s.eat();
                }
            }
        }
        SyntaxKind::String
    }

    fn escape(&mut self) {
        let start = self.s.cursor();
        match self.s.scout(1) {
            Some('n' | 't' | 'r' | '\\' | '"') => {
                self.s.eat();
                self.s.eat();
            }
            Some('u') if self.s.scout(2) == Some('{') => self.numeric_escape(),
            Some('u') => {
                self.s.eat();
                self.s.eat();
                self.error_at(DiagnosticCode::InvalidNumericEscape, start, self.s.cursor());
            }
            next => {
                let end = start + 1 + next.map_or(0, char::len_utf8);
                self.error_at(DiagnosticCode::InvalidEscape, start, end);
                self.s.eat();
            }
        }
    }

    /// `\u{` HexDigit+ `}`
    fn numeric_escape(&mut self) {
        let start = self.s.cursor();
        self.s.eat_if("\\u{");
        if self.s.eat_while(|c: char| c.is_ascii_hexdigit()).is_empty()
            || !self.s.eat_if('}')
        {
            self.error_at(DiagnosticCode::InvalidNumericEscape, start, self.s.cursor());
        }
    }

    /// A documentation string: `#` lines, continued by following lines that
    /// start with `#` after optional indentation. Includes the final line
    /// break.
    fn doc_string(&mut self) -> SyntaxKind {
        loop {
            self.s.eat_until(is_newline);
            if !self.s.eat_newline() {
                break;
            }
            let rest = self.s.after();
            let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            if !rest[indent..].starts_with('#') {
                break;
            }
            self.s.jump(self.s.cursor() + indent);
        }
        SyntaxKind::DocString
    }
}

/// Lex a whole text into tokens, including the final end of file token.
pub fn lex(text: &str) -> Vec<SyntaxNode> {
    let mut lexer = Lexer::new(text);
    let mut tokens = vec![];
    loop {
        let token = lexer.next();
        let done = token.kind() == SyntaxKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

trait ScannerExt {
    fn eat_newline(&mut self) -> bool;
}

impl ScannerExt for Scanner<'_> {
    fn eat_newline(&mut self) -> bool {
        let ate = self.eat_if(is_newline);
        if ate && self.before().ends_with('\r') {
            self.eat_if('\n');
        }
        ate
    }
}

/// Whether a character is whitespace trivia.
#[inline]
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C')
}

/// Whether a character ends a line.
#[inline]
pub fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Whether a string is a valid unquoted identifier.
#[inline]
pub fn is_ident(string: &str) -> bool {
    let mut chars = string.chars();
    chars.next().is_some_and(|c| is_id_start(c) && chars.all(is_id_continue))
        && SyntaxKind::keyword(string).is_none()
}

/// Whether a character can start an identifier.
#[inline]
pub fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && is_xid_start(c))
}

/// Whether a character can continue an identifier.
#[inline]
pub fn is_id_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (!c.is_ascii() && is_xid_continue(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use SyntaxKind::*;

    #[track_caller]
    fn test(text: &str, expected: &[SyntaxKind]) {
        let tokens = lex(text);
        let kinds: Vec<_> = tokens.iter().map(SyntaxNode::kind).collect();
        assert_eq!(kinds.last(), Some(&Eof));
        assert_eq!(&kinds[..kinds.len() - 1], expected);
        let joined: std::string::String =
            tokens.iter().map(|token| token.full_text().to_string()).collect();
        assert_eq!(joined, text);
    }

    #[track_caller]
    fn messages(text: &str) -> Vec<std::string::String> {
        lex(text)
            .iter()
            .flat_map(|token| {
                token
                    .diagnostics()
                    .into_iter()
                    .map(|(_, diag)| diag.message().to_string())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_lex_operators() {
        test("{| |} || | ?. ?: ?", &[
            OpenBracePipe, CloseBracePipe, LogicalOr, Pipe, OptionalChaining, Elvis,
            QuestionMark,
        ]);
        test("= == === =>", &[Assign, EqEq, EqEqEq, RightDoubleArrow]);
        test("- -> ->> <= <- << <", &[
            Minus, RightArrow, SyncSend, LtEq, LeftArrow, DoubleLt, Lt,
        ]);
        test("! != !== & && ^ ~ @", &[
            Exclamation, NotEq, NotEqEq, BitAnd, LogicalAnd, BitXor, Negation, At,
        ]);
        test("... ..< .@ .", &[Ellipsis, DoubleDotLt, AnnotChaining, Dot]);
        test("a?..b", &[Ident, QuestionMark, Dot, Dot, Ident]);
    }

    #[test]
    fn test_lex_xml_navigation() {
        test("x.<a> x/* x/**/<a> x/<a>", &[
            Ident, DotLt, Ident, Gt, Ident, SlashAsterisk, Ident,
            DoubleSlashDoubleAsteriskLt, Ident, Gt, Ident, Slash, Lt, Ident, Gt,
        ]);
        test("a/**b", &[Ident, SlashAsterisk, Asterisk, Ident]);
        test("a / b", &[Ident, Slash, Ident]);
        test("a // b", &[Ident]);
    }

    #[test]
    fn test_lex_greater_than() {
        test(">= > >", &[GtEq, Gt, Gt]);
        test("a >> b", &[Ident, Gt, Gt, Ident]);
        test("a >>= b", &[Ident, DoubleGt, Assign, Ident]);
        test("a >>>= b", &[Ident, TripleGt, Assign, Ident]);
        test("a >>> b", &[Ident, Gt, Gt, Gt, Ident]);
    }

    #[test]
    fn test_lex_keywords_and_idents() {
        test("function foo returns 'if _x ünï", &[
            FunctionKw, Ident, ReturnsKw, Ident, Ident, Ident,
        ]);
        assert!(is_ident("foo1"));
        assert!(!is_ident("while"));
        assert!(!is_ident("1foo"));
    }

    #[test]
    fn test_lex_numbers() {
        test("0 12 0x1F 0x1.8p3 1.5 .5 1e10 2f 3.0d 1e-3", &[
            Int, Int, HexInt, HexFloat, Float, Float, Float, Float, Float, Float,
        ]);
        test("1...2 1..<2", &[Int, Ellipsis, Int, Int, DoubleDotLt, Int]);
        assert_eq!(messages("012"), ["leading zeros in numeric literals"]);
        assert_eq!(messages("1e+"), ["missing digit after exponent indicator"]);
        assert_eq!(messages("0x.g"), ["missing hex digit after dot"]);
    }

    #[test]
    fn test_lex_strings() {
        test(r#""a\n\"b" "\u{1F600}""#, &[String, String]);
        assert_eq!(messages(r#""a\qb""#), ["invalid escape sequence '\\q'"]);
        assert_eq!(messages(r#""\u{zz}""#), ["invalid numeric escape sequence '\\u{'"]);
        assert!(messages(r#""ok\t""#).is_empty());
    }

    #[test]
    fn test_lex_unterminated_string_resumes_next_line() {
        let tokens = lex("string s = \"abc;\nint y = 1;");
        let kinds: Vec<_> = tokens.iter().map(SyntaxNode::kind).collect();
        assert_eq!(kinds, [
            StringKw, Ident, Assign, String, IntKw, Ident, Assign, Int, Semicolon, Eof,
        ]);
        assert_eq!(tokens[3].text(), "\"abc;");
        assert_eq!(tokens[3].trailing(), [Minutia::EndOfLine("\n".into())]);
        assert_eq!(messages("\"abc"), ["missing closing quote"]);
    }

    #[test]
    fn test_lex_trivia() {
        let tokens = lex("  a // note\n  b");
        assert_eq!(tokens[0].leading(), [Minutia::Whitespace("  ".into())]);
        assert_eq!(tokens[0].trailing(), [
            Minutia::Whitespace(" ".into()),
            Minutia::Comment("// note".into()),
            Minutia::EndOfLine("\n".into()),
        ]);
        assert_eq!(tokens[1].leading(), [Minutia::Whitespace("  ".into())]);
        test("a\r\n\r\nb", &[Ident, Ident]);
    }

    #[test]
    fn test_lex_doc_strings() {
        let tokens = lex("# one\n  # two\nfunction");
        assert_eq!(tokens[0].kind(), DocString);
        assert_eq!(tokens[0].text(), "# one\n  # two\n");
        assert!(tokens[0].trailing().is_empty());
        assert_eq!(tokens[1].kind(), FunctionKw);
    }

    #[test]
    fn test_lex_invalid_characters() {
        let tokens = lex("a $$ b");
        assert_eq!(tokens.len(), 3);
        let Minutia::Invalid(node) = &tokens[1].leading()[0] else {
            panic!("expected invalid minutia")
        };
        assert_eq!(node.text(), "$$");
        assert_eq!(messages("a $$ b"), ["invalid token '$$'"]);
        test("$(x)", &[OpenParen, Ident, CloseParen]);
    }

    #[test]
    fn test_lex_templates() {
        test("string `a ${ x + {y: 1}.y } b`;", &[
            StringKw, Backtick, TemplateString, InterpolationStart, Ident, Plus,
            OpenBrace, Ident, Colon, Int, CloseBrace, Dot, Ident, CloseBrace,
            TemplateString, Backtick, Semicolon,
        ]);
        test("`$a ${`in`}`", &[
            Backtick, TemplateString, InterpolationStart, Backtick, TemplateString,
            Backtick, CloseBrace, Backtick,
        ]);
        test("` x", &[Backtick, TemplateString]);
    }

    #[test]
    fn test_lex_import_mode() {
        let mut lexer = Lexer::new("1.2.3 .5");
        lexer.push_mode(LexMode::Import);
        let kinds: Vec<_> = std::iter::from_fn(|| {
            let token = lexer.next();
            (token.kind() != Eof).then(|| token.kind())
        })
        .collect();
        assert_eq!(kinds, [Int, Dot, Int, Dot, Int, Dot, Int]);
    }

    #[test]
    fn test_lex_state_restore() {
        let mut lexer = Lexer::new("`a` b");
        let state = lexer.state();
        assert_eq!(lexer.next().kind(), Backtick);
        assert_eq!(lexer.mode(), LexMode::Template);
        lexer.restore(state);
        assert_eq!(lexer.mode(), LexMode::Default);
        assert_eq!(lexer.next().kind(), Backtick);
    }
}
