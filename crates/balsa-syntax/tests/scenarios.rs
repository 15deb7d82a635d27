use balsa_syntax::{ParseConfig, Source, SyntaxKind, SyntaxNode, parse, parse_with};

#[track_caller]
fn messages(node: &SyntaxNode) -> Vec<String> {
    node.diagnostics()
        .into_iter()
        .map(|(_, diag)| diag.message().to_string())
        .collect()
}

#[track_caller]
fn member(root: &SyntaxNode, index: usize) -> &SyntaxNode {
    root.child(1).and_then(|members| members.child(index)).unwrap()
}

#[test]
fn test_function_without_return_type_and_body() {
    let text = "function f() returns";
    let root = parse(text);
    assert_eq!(messages(&root), ["missing type descriptor", "missing open brace"]);
    assert_eq!(root.full_text(), text);

    // Both diagnostics sit at the end of the text.
    for (range, _) in root.diagnostics() {
        assert_eq!(range, text.len()..text.len());
    }

    // The closing brace of the synthesized body is missing without a report
    // of its own.
    let body = member(&root, 0).cast_first(SyntaxKind::FunctionBodyBlock).unwrap();
    let close = body.tokens().last().unwrap();
    assert_eq!(close.kind(), SyntaxKind::CloseBrace);
    assert!(close.is_missing());
    assert!(close.own_diagnostics().is_empty());
}

#[test]
fn test_variable_without_initializer() {
    let root = parse("int x = ;");
    assert_eq!(messages(&root), ["missing expression"]);
    let decl = member(&root, 0);
    assert_eq!(decl.kind(), SyntaxKind::ModuleVarDecl);
    assert!(decl.tokens().any(|token| token.kind() == SyntaxKind::Semicolon
        && !token.is_missing()));
}

#[test]
fn test_if_without_parens_is_clean() {
    let root = parse("function main() {\n    if x { }\n}\n");
    assert!(messages(&root).is_empty(), "{:?}", messages(&root));
    assert!(!root.erroneous());
}

#[test]
fn test_edit_reuses_untouched_declarations() {
    let text = "\
import ballerina/io;

function first() {
    io:println(\"one\");
}

function second() {
    int n = 10;
}

function third() {
    io:println(\"three\");
}
";
    let mut source = Source::new(text);
    let old = source.root().clone();
    let at = text.find("10").unwrap();
    source.edit(at..at + 2, "20");

    let new = source.root();
    assert_eq!(new, &parse(source.text()));
    let import = |root: &SyntaxNode| root.child(0).and_then(|imports| imports.child(0)).cloned();
    assert!(import(new).unwrap().ptr_eq(&import(&old).unwrap()));
    assert!(member(new, 0).ptr_eq(member(&old, 0)));
    assert!(!member(new, 1).ptr_eq(member(&old, 1)));
    assert!(member(new, 2).ptr_eq(member(&old, 2)));
}

#[test]
fn test_unterminated_string_stops_at_line_end() {
    let text = "string s = \"open;\nint y = 2;\n";
    let root = parse(text);
    let messages = messages(&root);
    assert_eq!(messages.first().map(String::as_str), Some("missing closing quote"));
    assert!(!messages.iter().any(|message| message.contains("invalid token")));

    let second = member(&root, 1);
    assert_eq!(second.kind(), SyntaxKind::ModuleVarDecl);
    assert!(!second.erroneous());
    assert_eq!(root.full_text(), text);
}

#[test]
fn test_deep_nesting_is_reported_once() {
    let config = ParseConfig { max_depth: 32, ..ParseConfig::default() };
    let text = format!("int x = {}1{};", "[".repeat(100), "]".repeat(100));
    let root = parse_with(&text, config);
    assert_eq!(messages(&root), ["maximum nesting depth reached"]);
    assert_eq!(root.full_text(), text);
}
