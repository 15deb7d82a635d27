use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Range;
use std::sync::Arc;

use ecow::{EcoString, EcoVec};

use crate::{DiagnosticCode, SyntaxDiagnostic, SyntaxKind};

/// A node in the green syntax tree.
///
/// Green nodes know nothing about their position or parent. They are cheap to
/// clone and freely shared between trees, which is what makes incremental
/// reparsing possible. Use a [`RedNode`](crate::RedNode) for positioned
/// navigation.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SyntaxNode(Repr);

/// The two internal representations.
#[derive(Clone, Eq, PartialEq, Hash)]
enum Repr {
    /// A token with its trivia.
    Token(Arc<TokenNode>),
    /// An inner node.
    Inner(Arc<InnerNode>),
}

impl SyntaxNode {
    /// Create a new token without trivia.
    pub fn token(kind: SyntaxKind, text: impl Into<EcoString>) -> Self {
        Self::from_token(TokenNode {
            kind,
            text: text.into(),
            leading: EcoVec::new(),
            trailing: EcoVec::new(),
            diagnostics: EcoVec::new(),
            missing: false,
            width: 0,
            erroneous: false,
        })
    }

    /// Create a zero-width token standing in for one the source omitted.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self::from_token(TokenNode {
            kind,
            text: EcoString::new(),
            leading: EcoVec::new(),
            trailing: EcoVec::new(),
            diagnostics: EcoVec::new(),
            missing: true,
            width: 0,
            erroneous: false,
        })
    }

    /// Create a new inner node with children.
    pub fn inner(kind: SyntaxKind, children: Vec<SyntaxNode>) -> Self {
        Self(Repr::Inner(Arc::new(InnerNode::new(kind, children, EcoVec::new()))))
    }

    /// Create a new list node.
    pub fn list(children: Vec<SyntaxNode>) -> Self {
        Self::inner(SyntaxKind::List, children)
    }

    /// Create a token as the lexer produces it.
    pub(crate) fn lexed(
        kind: SyntaxKind,
        text: &str,
        leading: EcoVec<Minutia>,
        trailing: EcoVec<Minutia>,
        diagnostics: EcoVec<SyntaxDiagnostic>,
    ) -> Self {
        Self::from_token(TokenNode {
            kind,
            text: text.into(),
            leading,
            trailing,
            diagnostics,
            missing: false,
            width: 0,
            erroneous: false,
        })
    }

    fn from_token(mut token: TokenNode) -> Self {
        token.measure();
        Self(Repr::Token(Arc::new(token)))
    }

    /// The type of the node.
    pub fn kind(&self) -> SyntaxKind {
        match &self.0 {
            Repr::Token(token) => token.kind,
            Repr::Inner(inner) => inner.kind,
        }
    }

    /// The byte length of the node in the source text, including trivia.
    pub fn width(&self) -> usize {
        match &self.0 {
            Repr::Token(token) => token.width,
            Repr::Inner(inner) => inner.width,
        }
    }

    /// Whether the node covers no text at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// The token's own text, without trivia. Empty for inner nodes.
    pub fn text(&self) -> &str {
        match &self.0 {
            Repr::Token(token) => &token.text,
            Repr::Inner(_) => "",
        }
    }

    /// The exact source text of the node, trivia included.
    pub fn full_text(&self) -> EcoString {
        let mut text = EcoString::new();
        self.write_text(&mut text);
        text
    }

    fn write_text(&self, out: &mut EcoString) {
        match &self.0 {
            Repr::Token(token) => {
                token.leading.iter().for_each(|minutia| minutia.write_text(out));
                out.push_str(&token.text);
                token.trailing.iter().for_each(|minutia| minutia.write_text(out));
            }
            Repr::Inner(inner) => {
                inner.children.iter().for_each(|child| child.write_text(out));
            }
        }
    }

    /// The node's children.
    pub fn children(&self) -> std::slice::Iter<'_, SyntaxNode> {
        match &self.0 {
            Repr::Token(_) => [].iter(),
            Repr::Inner(inner) => inner.children.iter(),
        }
    }

    /// The child at the given index.
    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        match &self.0 {
            Repr::Token(_) => None,
            Repr::Inner(inner) => inner.children.get(index),
        }
    }

    /// The first child of the given kind.
    pub fn cast_first(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Whether this is a token.
    pub fn is_token(&self) -> bool {
        matches!(self.0, Repr::Token(_))
    }

    /// Whether this is a zero-width token synthesized during recovery.
    pub fn is_missing(&self) -> bool {
        match &self.0 {
            Repr::Token(token) => token.missing,
            Repr::Inner(_) => false,
        }
    }

    /// Whether this is a list node.
    pub fn is_list(&self) -> bool {
        self.kind() == SyntaxKind::List
    }

    /// Whether the node or anything below it, trivia included, carries a
    /// diagnostic.
    pub fn erroneous(&self) -> bool {
        match &self.0 {
            Repr::Token(token) => token.erroneous,
            Repr::Inner(inner) => inner.erroneous,
        }
    }

    /// The number of nodes in the whole subtree, including this node.
    pub fn descendants(&self) -> usize {
        match &self.0 {
            Repr::Token(_) => 1,
            Repr::Inner(inner) => inner.descendants,
        }
    }

    /// The trivia before a token. Empty for inner nodes.
    pub fn leading(&self) -> &[Minutia] {
        match &self.0 {
            Repr::Token(token) => &token.leading,
            Repr::Inner(_) => &[],
        }
    }

    /// The trivia after a token. Empty for inner nodes.
    pub fn trailing(&self) -> &[Minutia] {
        match &self.0 {
            Repr::Token(token) => &token.trailing,
            Repr::Inner(_) => &[],
        }
    }

    /// The diagnostics attached directly to this node.
    pub fn own_diagnostics(&self) -> &[SyntaxDiagnostic] {
        match &self.0 {
            Repr::Token(token) => &token.diagnostics,
            Repr::Inner(inner) => &inner.diagnostics,
        }
    }

    /// All diagnostics in the subtree with their ranges relative to the
    /// start of this node, in source order.
    ///
    /// Token diagnostics cover the token's text, node diagnostics the node's
    /// text without its outer trivia.
    pub fn diagnostics(&self) -> Vec<(Range<usize>, &SyntaxDiagnostic)> {
        let mut out = vec![];
        if self.erroneous() {
            self.collect_diagnostics(0, &mut out);
        }
        out
    }

    fn collect_diagnostics<'a>(
        &'a self,
        offset: usize,
        out: &mut Vec<(Range<usize>, &'a SyntaxDiagnostic)>,
    ) {
        match &self.0 {
            Repr::Token(token) => {
                let mut cursor = offset;
                for minutia in &token.leading {
                    minutia.collect_diagnostics(cursor, out);
                    cursor += minutia.len();
                }
                let range = cursor..cursor + token.text.len();
                out.extend(token.diagnostics.iter().map(|diag| (range.clone(), diag)));
                cursor = range.end;
                for minutia in &token.trailing {
                    minutia.collect_diagnostics(cursor, out);
                    cursor += minutia.len();
                }
            }
            Repr::Inner(inner) => {
                if !inner.diagnostics.is_empty() {
                    let range = self.text_range(offset);
                    out.extend(inner.diagnostics.iter().map(|diag| (range.clone(), diag)));
                }
                let mut cursor = offset;
                for child in &inner.children {
                    if child.erroneous() {
                        child.collect_diagnostics(cursor, out);
                    }
                    cursor += child.width();
                }
            }
        }
    }

    /// The range of the node's text when it starts at `offset`, without the
    /// leading trivia of its first token and the trailing trivia of its last.
    pub fn text_range(&self, offset: usize) -> Range<usize> {
        let start = offset + self.leading_width();
        let end = (offset + self.width() - self.trailing_width()).max(start);
        start..end
    }

    /// The width of the leading trivia of the first token.
    pub fn leading_width(&self) -> usize {
        self.first_token()
            .map_or(0, |token| token.leading().iter().map(Minutia::len).sum())
    }

    /// The width of the trailing trivia of the last token.
    pub fn trailing_width(&self) -> usize {
        self.last_token()
            .map_or(0, |token| token.trailing().iter().map(Minutia::len).sum())
    }

    /// Whether the two nodes are backed by the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Token(a), Repr::Token(b)) => Arc::ptr_eq(a, b),
            (Repr::Inner(a), Repr::Inner(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Iterate over all tokens of the subtree in source order, missing
    /// tokens included.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { stack: vec![std::slice::from_ref(self).iter()] }
    }

    /// The leftmost token of the subtree.
    pub fn first_token(&self) -> Option<&SyntaxNode> {
        match &self.0 {
            Repr::Token(_) => Some(self),
            Repr::Inner(inner) => inner.children.iter().find_map(Self::first_token),
        }
    }

    /// The rightmost token of the subtree.
    pub fn last_token(&self) -> Option<&SyntaxNode> {
        match &self.0 {
            Repr::Token(_) => Some(self),
            Repr::Inner(inner) => inner.children.iter().rev().find_map(Self::last_token),
        }
    }
}

/// Construction of modified copies.
impl SyntaxNode {
    /// A copy of this inner node with different children.
    ///
    /// Returns the same node when the children are unchanged, so that
    /// [`ptr_eq`](Self::ptr_eq) keeps holding. Tokens are returned as is.
    pub fn modify_with(&self, children: Vec<SyntaxNode>) -> Self {
        match &self.0 {
            Repr::Inner(inner) if inner.children != children => Self(Repr::Inner(
                Arc::new(InnerNode::new(inner.kind, children, inner.diagnostics.clone())),
            )),
            _ => self.clone(),
        }
    }

    /// A copy of this node with different diagnostics of its own.
    ///
    /// Returns the same node when the diagnostics are unchanged.
    pub fn with_diagnostics(&self, diagnostics: EcoVec<SyntaxDiagnostic>) -> Self {
        if self.own_diagnostics() == diagnostics.as_slice() {
            return self.clone();
        }
        match &self.0 {
            Repr::Token(token) => {
                Self::from_token(TokenNode { diagnostics, ..TokenNode::clone(token) })
            }
            Repr::Inner(inner) => Self(Repr::Inner(Arc::new(InnerNode::new(
                inner.kind,
                inner.children.clone(),
                diagnostics,
            )))),
        }
    }

    /// A copy of this node with one more diagnostic of its own.
    pub fn with_diagnostic(&self, diagnostic: SyntaxDiagnostic) -> Self {
        let mut diagnostics: EcoVec<_> = self.own_diagnostics().iter().cloned().collect();
        diagnostics.push(diagnostic);
        self.with_diagnostics(diagnostics)
    }

    /// A copy of this token with different leading trivia. Inner nodes are
    /// returned as is.
    pub fn with_leading(&self, leading: EcoVec<Minutia>) -> Self {
        match &self.0 {
            Repr::Token(token) if token.leading != leading => {
                Self::from_token(TokenNode { leading, ..TokenNode::clone(token) })
            }
            _ => self.clone(),
        }
    }

    /// A copy of this token with different trailing trivia. Inner nodes are
    /// returned as is.
    pub fn with_trailing(&self, trailing: EcoVec<Minutia>) -> Self {
        match &self.0 {
            Repr::Token(token) if token.trailing != trailing => {
                Self::from_token(TokenNode { trailing, ..TokenNode::clone(token) })
            }
            _ => self.clone(),
        }
    }

    /// Turn this token into a skipped fragment: an `Invalid` minutia that
    /// carries an invalid token diagnostic.
    pub fn into_invalid(self) -> Minutia {
        let diag = SyntaxDiagnostic::error(DiagnosticCode::InvalidToken)
            .with_arg(self.text());
        Minutia::Invalid(self.with_diagnostic(diag))
    }
}

impl Debug for SyntaxNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.0 {
            Repr::Token(token) => token.fmt(f),
            Repr::Inner(inner) => inner.fmt(f),
        }
    }
}

impl Display for SyntaxNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}

/// A token with its trivia.
#[derive(Clone, Eq, PartialEq, Hash)]
struct TokenNode {
    /// What kind of token this is.
    kind: SyntaxKind,
    /// The token's text, without trivia.
    text: EcoString,
    /// Trivia before the token.
    leading: EcoVec<Minutia>,
    /// Trivia after the token, up to and including the first line break.
    trailing: EcoVec<Minutia>,
    /// Diagnostics attached to the token.
    diagnostics: EcoVec<SyntaxDiagnostic>,
    /// Whether the token was synthesized during recovery.
    missing: bool,
    /// The cached byte length, trivia included.
    width: usize,
    /// Whether the token or its trivia carry diagnostics.
    erroneous: bool,
}

impl TokenNode {
    /// Recompute the cached width and error flag.
    fn measure(&mut self) {
        let trivia = self.leading.iter().chain(&self.trailing);
        self.width = self.text.len() + trivia.clone().map(Minutia::len).sum::<usize>();
        self.erroneous =
            !self.diagnostics.is_empty() || trivia.clone().any(Minutia::erroneous);
    }
}

impl Debug for TokenNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.missing {
            write!(f, "{:?}: 0 (missing)", self.kind)
        } else {
            write!(f, "{:?}: {} {:?}", self.kind, self.width, self.text)
        }
    }
}

/// An inner node in the green syntax tree.
#[derive(Clone, Eq, PartialEq, Hash)]
struct InnerNode {
    /// What kind of node this is.
    kind: SyntaxKind,
    /// The cached byte length of the node in the source.
    width: usize,
    /// The number of nodes in the whole subtree, including this node.
    descendants: usize,
    /// Whether this node or anything below it carries diagnostics.
    erroneous: bool,
    /// This node's children, losslessly make up this node.
    children: Vec<SyntaxNode>,
    /// Diagnostics attached to the node itself.
    diagnostics: EcoVec<SyntaxDiagnostic>,
}

impl InnerNode {
    /// Create a new inner node with the given kind and children.
    fn new(
        kind: SyntaxKind,
        children: Vec<SyntaxNode>,
        diagnostics: EcoVec<SyntaxDiagnostic>,
    ) -> Self {
        let mut width = 0;
        let mut descendants = 1;
        let mut erroneous = !diagnostics.is_empty();

        for child in &children {
            width += child.width();
            descendants += child.descendants();
            erroneous |= child.erroneous();
        }

        Self { kind, width, descendants, erroneous, children, diagnostics }
    }
}

impl Debug for InnerNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.width)?;
        if !self.children.is_empty() {
            f.write_str(" ")?;
            f.debug_list().entries(&self.children).finish()?;
        }
        Ok(())
    }
}

/// A piece of trivia attached to a token.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Minutia {
    /// Spaces, tabs and form feeds.
    Whitespace(EcoString),
    /// A single line break.
    EndOfLine(EcoString),
    /// A line comment, without its line break.
    Comment(EcoString),
    /// A fragment the lexer or parser skipped.
    Invalid(SyntaxNode),
}

impl Minutia {
    /// The kind of the minutia.
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Whitespace(_) => SyntaxKind::Whitespace,
            Self::EndOfLine(_) => SyntaxKind::EndOfLine,
            Self::Comment(_) => SyntaxKind::Comment,
            Self::Invalid(_) => SyntaxKind::Invalid,
        }
    }

    /// The byte length of the minutia.
    pub fn len(&self) -> usize {
        match self {
            Self::Whitespace(text) | Self::EndOfLine(text) | Self::Comment(text) => {
                text.len()
            }
            Self::Invalid(node) => node.width(),
        }
    }

    /// Whether the minutia covers no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the minutia carries diagnostics.
    pub fn erroneous(&self) -> bool {
        matches!(self, Self::Invalid(node) if node.erroneous())
    }

    fn write_text(&self, out: &mut EcoString) {
        match self {
            Self::Whitespace(text) | Self::EndOfLine(text) | Self::Comment(text) => {
                out.push_str(text)
            }
            Self::Invalid(node) => node.write_text(out),
        }
    }

    fn collect_diagnostics<'a>(
        &'a self,
        offset: usize,
        out: &mut Vec<(Range<usize>, &'a SyntaxDiagnostic)>,
    ) {
        if let Self::Invalid(node) = self
            && node.erroneous()
        {
            node.collect_diagnostics(offset, out);
        }
    }
}

/// An iterator over the tokens of a subtree.
pub struct Tokens<'a> {
    stack: Vec<std::slice::Iter<'a, SyntaxNode>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(node) if node.is_token() => return Some(node),
                Some(node) => self.stack.push(node.children()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecow::eco_vec;

    fn ident(name: &str) -> SyntaxNode {
        SyntaxNode::token(SyntaxKind::Ident, name)
            .with_trailing(eco_vec![Minutia::Whitespace(" ".into())])
    }

    #[test]
    fn test_width_and_text() {
        let semi = SyntaxNode::token(SyntaxKind::Semicolon, ";")
            .with_leading(eco_vec![Minutia::Comment("// c".into())])
            .with_trailing(eco_vec![Minutia::EndOfLine("\n".into())]);
        let node = SyntaxNode::inner(SyntaxKind::Break, vec![ident("break"), semi]);
        assert_eq!(node.width(), 12);
        assert_eq!(node.full_text(), "break // c;\n");
        assert_eq!(node.text_range(0), 0..11);
        assert_eq!(node.descendants(), 3);
        assert_eq!(node.tokens().count(), 2);
        assert!(!node.erroneous());
    }

    #[test]
    fn test_modify_with_returns_same_node() {
        let a = ident("a");
        let node = SyntaxNode::list(vec![a.clone()]);
        assert!(node.modify_with(vec![a.clone()]).ptr_eq(&node));
        assert!(node.with_diagnostics(EcoVec::new()).ptr_eq(&node));
        assert!(a.with_leading(EcoVec::new()).ptr_eq(&a));

        let changed = node.modify_with(vec![a.clone(), ident("b")]);
        assert!(!changed.ptr_eq(&node));
        assert_eq!(changed.width(), 4);
    }

    #[test]
    fn test_diagnostics_are_positioned() {
        let missing = SyntaxNode::missing(SyntaxKind::Semicolon).with_diagnostic(
            SyntaxDiagnostic::error(DiagnosticCode::Missing(SyntaxKind::Semicolon)),
        );
        let skipped = SyntaxNode::token(SyntaxKind::Invalid, "$").into_invalid();
        let b = ident("b").with_leading(eco_vec![skipped]);
        let node = SyntaxNode::list(vec![ident("a"), missing, b]);
        let diags: Vec<_> = node
            .diagnostics()
            .into_iter()
            .map(|(range, diag)| (range, diag.message()))
            .collect();
        assert_eq!(
            diags,
            [
                (2..2, EcoString::from("missing semicolon")),
                (2..3, EcoString::from("invalid token '$'")),
            ]
        );
        assert!(node.erroneous());
        assert_eq!(node.full_text(), "a $b ");
    }
}
