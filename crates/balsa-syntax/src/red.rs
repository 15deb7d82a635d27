use std::cell::OnceCell;
use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, Range};
use std::rc::{Rc, Weak};

use crate::{SyntaxKind, SyntaxNode};

/// A positioned view over a green node.
///
/// Knows its exact offset in the file and provides access to its children,
/// parent and siblings. Children are created on first access and memoized, so
/// asking for the same child twice yields the same facade.
///
/// Parent links are non-owning: a facade only reaches its parent while some
/// ancestor facade, usually the root, is still alive.
///
/// **Note that all sibling and leaf accessors skip over missing tokens!**
#[derive(Clone)]
pub struct RedNode<'a>(Rc<RedInner<'a>>);

struct RedInner<'a> {
    /// The underlying green node.
    green: &'a SyntaxNode,
    /// The facade of the parent node.
    parent: Weak<RedInner<'a>>,
    /// The index of this node in its parent's children.
    index: usize,
    /// This node's byte offset in the source file.
    offset: usize,
    /// The lazily created child facades with their offsets.
    children: OnceCell<Box<[(usize, OnceCell<RedNode<'a>>)]>>,
}

impl<'a> RedNode<'a> {
    /// Start a new traversal at a root node.
    pub fn new(root: &'a SyntaxNode) -> Self {
        Self::with(root, Weak::new(), 0, 0)
    }

    fn with(
        green: &'a SyntaxNode,
        parent: Weak<RedInner<'a>>,
        index: usize,
        offset: usize,
    ) -> Self {
        Self(Rc::new(RedInner { green, parent, index, offset, children: OnceCell::new() }))
    }

    /// Get the underlying green node.
    pub fn green(&self) -> &'a SyntaxNode {
        self.0.green
    }

    /// The index of this node in its parent's children list.
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// The absolute byte offset of this node in the source file.
    pub fn offset(&self) -> usize {
        self.0.offset
    }

    /// The byte range of this node in the source file, trivia included.
    pub fn range(&self) -> Range<usize> {
        self.offset()..self.offset() + self.green().width()
    }

    /// The byte range of this node's text, without its outer trivia.
    pub fn text_range(&self) -> Range<usize> {
        self.green().text_range(self.offset())
    }

    /// Whether two facades are the same memoized object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn slots(&self) -> &[(usize, OnceCell<RedNode<'a>>)] {
        self.0.children.get_or_init(|| {
            let mut offset = self.offset();
            self.green()
                .children()
                .map(|child| {
                    let start = offset;
                    offset += child.width();
                    (start, OnceCell::new())
                })
                .collect()
        })
    }

    /// The child at the given index.
    pub fn child(&self, index: usize) -> Option<RedNode<'a>> {
        let green = self.green().child(index)?;
        let (offset, cell) = self.slots().get(index)?;
        Some(
            cell.get_or_init(|| {
                RedNode::with(green, Rc::downgrade(&self.0), index, *offset)
            })
            .clone(),
        )
    }

    /// An iterator over this node's children.
    pub fn children(&self) -> RedChildren<'a> {
        RedChildren { parent: self.clone(), front: 0, back: self.green().children().len() }
    }

    /// The first descendant of the given kind, in preorder.
    pub fn find(&self, kind: SyntaxKind) -> Option<RedNode<'a>> {
        if self.kind() == kind {
            return Some(self.clone());
        }
        self.children().find_map(|child| child.find(kind))
    }

    /// This node's ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = RedNode<'a>> + use<'a> {
        std::iter::successors(self.parent(), RedNode::parent)
    }
}

/// Access to parents and siblings.
impl<'a> RedNode<'a> {
    /// Get this node's parent.
    pub fn parent(&self) -> Option<RedNode<'a>> {
        self.0.parent.upgrade().map(RedNode)
    }

    /// Get the kind of this node's parent.
    pub fn parent_kind(&self) -> Option<SyntaxKind> {
        Some(self.parent()?.kind())
    }

    /// Get the first previous sibling that is not a missing token.
    pub fn prev_sibling(&self) -> Option<RedNode<'a>> {
        let parent = self.parent()?;
        (0..self.index())
            .rev()
            .filter_map(|i| parent.child(i))
            .find(|node| !node.is_missing())
    }

    /// Get the next sibling that is not a missing token.
    pub fn next_sibling(&self) -> Option<RedNode<'a>> {
        let parent = self.parent()?;
        let count = parent.green().children().len();
        (self.index() + 1..count)
            .filter_map(|i| parent.child(i))
            .find(|node| !node.is_missing())
    }
}

/// Access to leaves.
impl<'a> RedNode<'a> {
    /// Whether this node is a token that is actually present in the source.
    fn is_leaf(&self) -> bool {
        self.is_token() && !self.is_missing()
    }

    /// Find the leftmost contained leaf.
    pub fn leftmost_leaf(&self) -> Option<RedNode<'a>> {
        if self.is_leaf() {
            return Some(self.clone());
        }
        self.children().find_map(|child| child.leftmost_leaf())
    }

    /// Find the rightmost contained leaf.
    pub fn rightmost_leaf(&self) -> Option<RedNode<'a>> {
        if self.is_leaf() {
            return Some(self.clone());
        }
        self.children().rev().find_map(|child| child.rightmost_leaf())
    }

    /// Get the rightmost leaf before this node.
    pub fn prev_leaf(&self) -> Option<RedNode<'a>> {
        let mut node = self.clone();
        while let Some(prev) = node.prev_sibling() {
            if let Some(leaf) = prev.rightmost_leaf() {
                return Some(leaf);
            }
            node = prev;
        }
        self.parent()?.prev_leaf()
    }

    /// Get the leftmost leaf after this node.
    pub fn next_leaf(&self) -> Option<RedNode<'a>> {
        let mut node = self.clone();
        while let Some(next) = node.next_sibling() {
            if let Some(leaf) = next.leftmost_leaf() {
                return Some(leaf);
            }
            node = next;
        }
        self.parent()?.next_leaf()
    }

    /// Get the leaf whose range, trivia included, contains the byte offset.
    ///
    /// At the very end of the text this is the last leaf.
    pub fn leaf_at(&self, cursor: usize) -> Option<RedNode<'a>> {
        if self.is_leaf() {
            return self.range().contains(&cursor).then(|| self.clone());
        }

        for child in self.children() {
            let range = child.range();
            if range.start <= cursor && cursor < range.end {
                return child.leaf_at(cursor);
            }
        }

        if cursor == self.range().end { self.rightmost_leaf() } else { None }
    }
}

impl Deref for RedNode<'_> {
    type Target = SyntaxNode;

    /// Dereference to a green node. Note that this shortens the lifetime, so
    /// you may need to use [`green()`](Self::green) instead in some
    /// situations.
    fn deref(&self) -> &Self::Target {
        self.green()
    }
}

impl Debug for RedNode<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

/// An iterator over the children of a red node.
pub struct RedChildren<'a> {
    parent: RedNode<'a>,
    front: usize,
    back: usize,
}

impl<'a> Iterator for RedChildren<'a> {
    type Item = RedNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let child = self.parent.child(self.front);
        self.front += 1;
        child
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for RedChildren<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.parent.child(self.back)
    }
}

impl ExactSizeIterator for RedChildren<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_red_node_offsets() {
        let root = parse("int x = 1;\nint y = 2;\n");
        let red = RedNode::new(&root);
        let members = red.child(1).unwrap();
        let second = members.child(1).unwrap();
        assert_eq!(second.kind(), SyntaxKind::ModuleVarDecl);
        assert_eq!(second.offset(), 11);
        assert_eq!(second.text_range(), 11..21);
        for (i, child) in red.children().enumerate() {
            let expected: usize = root.children().take(i).map(SyntaxNode::width).sum();
            assert_eq!(child.offset(), expected);
        }
    }

    #[test]
    fn test_red_node_memoized() {
        let root = parse("function f() { return 1; }");
        let red = RedNode::new(&root);
        let a = red.child(1).unwrap().child(0).unwrap();
        let b = red.child(1).unwrap().child(0).unwrap();
        assert!(a.ptr_eq(&b));
        assert!(a.parent().unwrap().parent().unwrap().ptr_eq(&red));
    }

    #[test]
    fn test_red_node_leaves() {
        let root = parse("int x = 1;");
        let red = RedNode::new(&root);

        let leaf = red.leaf_at(4).unwrap();
        assert_eq!(leaf.text(), "x");
        assert_eq!(leaf.text_range(), 4..5);

        let prev = leaf.prev_leaf().unwrap();
        assert_eq!(prev.text(), "int");
        assert_eq!(prev.offset(), 0);

        let next = leaf.next_leaf().unwrap();
        assert_eq!(next.text(), "=");
        assert_eq!(next.next_leaf().unwrap().text(), "1");

        let decl = red.find(SyntaxKind::ModuleVarDecl).unwrap();
        assert_eq!(decl.leftmost_leaf().unwrap().text(), "int");
        assert_eq!(decl.rightmost_leaf().unwrap().text(), ";");
        assert_eq!(leaf.ancestors().last().unwrap().kind(), SyntaxKind::CompilationUnit);
    }

    #[test]
    fn test_red_node_skips_missing_tokens() {
        let root = parse("int x = 1");
        let red = RedNode::new(&root);
        let one = red.leaf_at(8).unwrap();
        assert_eq!(one.text(), "1");
        assert_eq!(one.next_leaf().unwrap().kind(), SyntaxKind::Eof);
    }
}
