use std::ops::Range;

use balsa_syntax::{
    Ctx, Fix, ParseConfig, Recovery, SyntaxKind, SyntaxNode, lex, parse, parse_with,
    prepend, reparse,
};

/// Pieces that random inputs are glued together from.
const PIECES: &[&str] = &[
    "function", "f", "(", ")", "{", "}", "[", "]", "int", "string", "x", "=", ";", ",",
    "returns", "if", "else", "while", "foreach", "in", "return", "import", "/", ".",
    ":", "1", "0x1F", "2.5e", "\"str", "\"ok\"", "`tpl ${", "`", "//c\n", " ", "\n",
    "\t", "+", ">>", ">", "<", "?", "|", "&", "record", "{|", "|}", "object", "type",
    "public", "const", "enum", "@a", "'", "#", "\\", "é", "\r\n", "map", "<string>",
    "check", "new", "is", "typeof", "...", "=>", "readonly", "let", "match", "var",
    "_", "service", "on", "remote", ".<", "/*", "/**/<",
];

/// A small deterministic generator for reproducible inputs.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize
    }

    fn text(&mut self, pieces: usize) -> String {
        (0..pieces).map(|_| PIECES[self.next() % PIECES.len()]).collect()
    }

    /// A random range on character boundaries.
    fn range(&mut self, text: &str) -> Range<usize> {
        let bounds: Vec<usize> =
            (0..=text.len()).filter(|&i| text.is_char_boundary(i)).collect();
        let a = bounds[self.next() % bounds.len()];
        let b = bounds[self.next() % bounds.len()];
        a.min(b)..a.max(b)
    }
}

fn inputs() -> impl Iterator<Item = String> {
    let mut rng = Rng(0x5eed);
    (0..300).map(move |i| rng.text(1 + i % 60))
}

#[test]
fn test_parse_is_total_and_lossless() {
    for text in inputs() {
        let root = parse(&text);
        assert_eq!(root.kind(), SyntaxKind::CompilationUnit);
        assert_eq!(root.full_text(), text);
        assert_eq!(root.width(), text.len());
    }
}

#[test]
fn test_lexing_is_lossless() {
    for text in inputs() {
        let tokens = lex(&text);
        let joined: String = tokens.iter().map(|token| token.full_text().to_string()).collect();
        assert_eq!(joined, text);
        assert_eq!(tokens.last().map(SyntaxNode::kind), Some(SyntaxKind::Eof));
    }
}

#[test]
fn test_parse_of_printed_tree_is_identical() {
    for text in inputs() {
        let root = parse(&text);
        assert_eq!(parse(&root.full_text()), root);
    }
}

#[test]
fn test_reparse_matches_fresh_parse() {
    let mut rng = Rng(42);
    for text in inputs().take(120) {
        let range = rng.range(&text);
        let pieces = rng.next() % 4;
        let with = rng.text(pieces);
        let mut edited = text.clone();
        edited.replace_range(range.clone(), &with);

        let mut root = parse(&text);
        let reparsed = reparse(&mut root, &edited, range, with.len());
        assert_eq!(root.full_text(), edited);
        assert_eq!(root, parse(&edited), "{text:?} became {edited:?}");
        assert!(reparsed.start <= reparsed.end && reparsed.end <= edited.len());
    }
}

#[test]
fn test_unchanged_children_share_nodes() {
    let root = parse("int a = 1;\nint b = 2;\n");
    let children: Vec<_> = root.children().cloned().collect();
    assert!(root.modify_with(children).ptr_eq(&root));

    let members = root.child(1).unwrap();
    let mut children: Vec<_> = members.children().cloned().collect();
    children.pop();
    let modified = members.modify_with(children);
    assert!(!modified.ptr_eq(members));
    assert!(modified.child(0).unwrap().ptr_eq(members.child(0).unwrap()));

    let broken = parse("int x = ;");
    let decl = broken.child(1).and_then(|members| members.child(0)).unwrap();
    let diagnostics = decl.own_diagnostics().iter().cloned().collect();
    assert!(decl.with_diagnostics(diagnostics).ptr_eq(decl));
    let token = decl.tokens().next().unwrap();
    assert!(token.with_leading(token.leading().iter().cloned().collect()).ptr_eq(token));
}

#[test]
fn test_recovery_stays_within_its_limit() {
    let tokens = [
        SyntaxKind::Comma,
        SyntaxKind::Dot,
        SyntaxKind::CloseParen,
        SyntaxKind::Int,
        SyntaxKind::Comma,
        SyntaxKind::Semicolon,
        SyntaxKind::CloseBrace,
        SyntaxKind::Eof,
    ];
    let rest = prepend(&[Ctx::Stmts, Ctx::CloseBrace, Ctx::ModuleMembers, Ctx::EndOfFile], &None);
    for limit in 1..=8 {
        let recovery = Recovery::new(&tokens, limit);
        for ctx in [Ctx::Expression, Ctx::Semicolon, Ctx::TypeDesc] {
            let solution = recovery.solve(ctx, &rest);
            assert!(solution.lookahead <= limit, "{ctx:?} looked too far");
            assert!(solution.matches <= limit);
            if let Fix::Insert { kind, .. } = solution.fix {
                assert_ne!(kind, SyntaxKind::Eof);
            }
        }
    }
}

#[test]
fn test_small_lookahead_still_terminates() {
    let config = ParseConfig { lookahead_limit: 1, max_depth: 8 };
    for text in inputs().take(100) {
        let root = parse_with(&text, config);
        assert_eq!(root.full_text(), text);
    }
}
