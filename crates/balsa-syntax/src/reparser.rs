use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::parser::parse_reusing;
use crate::set::{SyntaxSet, syntax_set};
use crate::{ParseConfig, SyntaxNode};

/// Kinds of nodes that the parser may take over from a previous parse.
const REUSABLE: SyntaxSet = syntax_set!(
    ImportDecl,
    FunctionDefinition,
    TypeDefinition,
    ModuleVarDecl,
    ConstantDecl,
    ListenerDecl,
    EnumDecl,
    ServiceDecl,
    FunctionBodyBlock,
    ExternalFunctionBody,
    ExpressionFunctionBody,
    LocalVarDecl,
    Assignment,
    CompoundAssignment,
    CallStatement,
    IfElse,
    While,
    Foreach,
    Lock,
    Return,
    Break,
    Continue,
    Panic,
    Fail,
    MatchStatement,
    Block,
);

/// Refresh the given syntax tree with as little parsing as possible.
///
/// Takes the new text, the range in the old text that was replaced and the
/// length of the replacement and returns the range in the new text that was
/// ultimately reparsed.
///
/// The high-level API for this function is
/// [`Source::edit`](crate::Source::edit).
pub fn reparse(
    root: &mut SyntaxNode,
    text: &str,
    replaced: Range<usize>,
    replacement_len: usize,
) -> Range<usize> {
    reparse_with(root, text, replaced, replacement_len, ParseConfig::default())
}

/// Like [`reparse`], but with custom parser limits. They must be the same
/// limits the old tree was parsed with.
#[tracing::instrument(skip(root, text, config))]
pub fn reparse_with(
    root: &mut SyntaxNode,
    text: &str,
    replaced: Range<usize>,
    replacement_len: usize,
    config: ParseConfig,
) -> Range<usize> {
    let reuse = Reuse::collect(root, &replaced, replacement_len, config.lookahead_limit);
    tracing::debug!(candidates = reuse.candidates, "collected reusable nodes");
    let new = parse_reusing(text, config, reuse);
    let range = reparsed_range(root, &new, text.len());
    *root = new;
    range
}

/// Nodes of a previous parse, keyed by their offset in the new text.
pub(crate) struct Reuse {
    nodes: FxHashMap<usize, Vec<SyntaxNode>>,
    candidates: usize,
}

impl Reuse {
    /// Collect the nodes of the old tree that cannot have been affected by
    /// the edit.
    ///
    /// A node is safe when it lies entirely before the edit with enough
    /// tokens in between that no lookahead from inside it could have seen the
    /// edited text, or when it starts after the edit.
    fn collect(
        root: &SyntaxNode,
        replaced: &Range<usize>,
        replacement_len: usize,
        limit: usize,
    ) -> Self {
        let mut ends = vec![];
        let mut cursor = 0;
        for token in root.tokens().filter(|token| !token.is_missing()) {
            cursor += token.width();
            ends.push(cursor);
        }

        let mut collector = Collector {
            replaced,
            replacement_len,
            limit,
            ends: &ends,
            nodes: FxHashMap::default(),
            candidates: 0,
        };
        collector.visit(root, 0);
        Self { nodes: collector.nodes, candidates: collector.candidates }
    }

    /// Take a node of one of the given kinds that started at the offset.
    pub(crate) fn take(&mut self, offset: usize, kinds: SyntaxSet) -> Option<SyntaxNode> {
        let nodes = self.nodes.get_mut(&offset)?;
        let index = nodes.iter().position(|node| kinds.contains(node.kind()))?;
        Some(nodes.swap_remove(index))
    }
}

struct Collector<'a> {
    replaced: &'a Range<usize>,
    replacement_len: usize,
    limit: usize,
    /// The end offsets of all tokens of the old tree.
    ends: &'a [usize],
    nodes: FxHashMap<usize, Vec<SyntaxNode>>,
    candidates: usize,
}

impl Collector<'_> {
    fn visit(&mut self, node: &SyntaxNode, offset: usize) {
        let end = offset + node.width();
        if REUSABLE.contains(node.kind()) && !node.erroneous() {
            let at = if self.before_edit(end) {
                Some(offset)
            } else if offset > self.replaced.end {
                Some(offset + self.replacement_len - self.replaced.len())
            } else {
                None
            };

            if let Some(at) = at {
                self.nodes.entry(at).or_default().push(node.clone());
                self.candidates += 1;
                return;
            }
        }

        // Nodes around the edit may still contain reusable nodes.
        let mut cursor = offset;
        for child in node.children() {
            self.visit(child, cursor);
            cursor += child.width();
        }
    }

    /// Whether a node ending at `end` is followed by more than the
    /// lookahead limit of tokens before the edit starts.
    fn before_edit(&self, end: usize) -> bool {
        let next = self.ends.partition_point(|&e| e <= end);
        self.ends
            .get(next + self.limit)
            .is_some_and(|&margin| margin < self.replaced.start)
    }
}

/// The range in the new text between the top-level members that were taken
/// over unchanged at its start and at its end.
fn reparsed_range(old: &SyntaxNode, new: &SyntaxNode, len: usize) -> Range<usize> {
    let members = |root: &SyntaxNode| {
        let base = root.child(0).map_or(0, SyntaxNode::width);
        let mut offset = base;
        root.child(1)
            .into_iter()
            .flat_map(SyntaxNode::children)
            .map(|member| {
                let start = offset;
                offset += member.width();
                (start, member.clone())
            })
            .collect::<Vec<_>>()
    };

    let old = members(old);
    let new = members(new);
    let same = |(_, a): &(usize, SyntaxNode), (_, b): &(usize, SyntaxNode)| a.ptr_eq(b);

    let prefix = old.iter().zip(&new).take_while(|(a, b)| same(a, b)).count();
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(new.len() - prefix)
        .take_while(|(a, b)| same(a, b))
        .count();

    let start = match prefix {
        0 => 0,
        n => new[n - 1].0 + new[n - 1].1.width(),
    };
    let end = match suffix {
        0 => len,
        n => new[new.len() - n].0,
    };
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SyntaxKind, parse};

    #[track_caller]
    fn test(prev: &str, range: Range<usize>, with: &str) -> (SyntaxNode, SyntaxNode) {
        let mut source = prev.to_string();
        source.replace_range(range.clone(), with);

        let old = parse(prev);
        let mut root = old.clone();
        let reparsed = reparse(&mut root, &source, range, with.len());
        let fresh = parse(&source);
        assert_eq!(root, fresh, "reparse of {source:?} differs from a fresh parse");
        assert_eq!(root.full_text(), source);
        assert!(reparsed.end <= source.len());
        (old, root)
    }

    #[track_caller]
    fn member(root: &SyntaxNode, index: usize) -> &SyntaxNode {
        root.child(1).and_then(|members| members.child(index)).unwrap()
    }

    const FUNCTIONS: &str = "\
function a() {
    int x = 1;
}

function b() {
    int y = 2;
    int z = 3;
}

function c() {
    return;
}
";

    #[test]
    fn test_reparse_reuses_untouched_declarations() {
        let at = FUNCTIONS.find("3;").unwrap();
        let (old, new) = test(FUNCTIONS, at..at + 1, "30");
        assert!(member(&new, 0).ptr_eq(member(&old, 0)));
        assert!(!member(&new, 1).ptr_eq(member(&old, 1)));
        assert!(member(&new, 2).ptr_eq(member(&old, 2)));
    }

    #[test]
    fn test_reparse_reuses_statements() {
        let text = "function f() {\n    foo(1, 2, 3);\n    int a = x + y + 1;\n    bar();\n}\n";
        let at = text.find("1;").unwrap();
        let (old, new) = test(text, at..at + 1, "2");
        let stmts = |root: &SyntaxNode| {
            let body = member(root, 0).cast_first(SyntaxKind::FunctionBodyBlock).unwrap();
            body.child(1).unwrap().clone()
        };
        let (old, new) = (stmts(&old), stmts(&new));
        assert!(new.child(0).unwrap().ptr_eq(old.child(0).unwrap()));
        assert!(!new.child(1).unwrap().ptr_eq(old.child(1).unwrap()));
        assert!(new.child(2).unwrap().ptr_eq(old.child(2).unwrap()));
    }

    #[test]
    fn test_reparse_reuses_services_and_matches() {
        let text = "\
service hello on ep {
    remote function ping() { }
}

function f(int v) {
    match v {
        1 | 2 => { }
    }
    int y = a + b + c + 2;
}
";
        let at = text.find("2;").unwrap();
        let (old, new) = test(text, at..at + 1, "3");
        assert_eq!(member(&new, 0).kind(), SyntaxKind::ServiceDecl);
        assert!(member(&new, 0).ptr_eq(member(&old, 0)));
        assert!(!member(&new, 1).ptr_eq(member(&old, 1)));

        let stmts = |root: &SyntaxNode| {
            let body = member(root, 1).cast_first(SyntaxKind::FunctionBodyBlock).unwrap();
            body.child(1).unwrap().clone()
        };
        let (old, new) = (stmts(&old), stmts(&new));
        assert_eq!(new.child(0).unwrap().kind(), SyntaxKind::MatchStatement);
        assert!(new.child(0).unwrap().ptr_eq(old.child(0).unwrap()));
    }

    #[test]
    fn test_reparse_matches_fresh_parse() {
        test(FUNCTIONS, 0..0, "import a;\n");
        test(FUNCTIONS, 0..8, "");
        test(FUNCTIONS, 15..15, "}");
        test(FUNCTIONS, 30..31, "{");
        test(FUNCTIONS, 33..33, "`");
        test(FUNCTIONS, 33..33, "\"");
        test(FUNCTIONS, 40..60, "");
        test(FUNCTIONS, FUNCTIONS.len()..FUNCTIONS.len(), "int q = 5;");
        test("int x = 1;\nint y = 2;\n", 11..11, "import b;\n");
        test("import a;\nint y = 2;\n", 0..9, "");
        test("function f() { match x { 1 => { } } }", 27..27, "| 2 ");
        test("function f() { x = y.<a>; }", 22..23, "b|*");
        test("service on ep { }\nint z = 1;\n", 8..8, "s ");
    }

    #[test]
    fn test_reparsed_range() {
        let mut root = parse(FUNCTIONS);
        let at = FUNCTIONS.find("2;").unwrap();
        let mut source = FUNCTIONS.to_string();
        source.replace_range(at..at + 1, "4");
        let range = reparse(&mut root, &source, at..at + 1, 1);
        let b = FUNCTIONS.find("function b").unwrap();
        let c = FUNCTIONS.find("function c").unwrap();
        assert_eq!(range, b - 1..c - 1);
    }
}
