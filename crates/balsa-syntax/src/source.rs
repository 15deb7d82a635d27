//! Source file management.

use std::fmt::{self, Debug, Formatter};
use std::ops::Range;

use unscanny::Scanner;

use crate::reparser::reparse_with;
use crate::{ParseConfig, RedNode, SyntaxNode, is_newline, parse_with};

/// A source file with its syntax tree.
///
/// All line and column indices start at zero, just like byte indices. Only for
/// user-facing display, you should add 1 to them.
#[derive(Clone)]
pub struct Source {
    text: String,
    lines: Vec<usize>,
    root: SyntaxNode,
    config: ParseConfig,
}

impl Source {
    /// Create a new source file.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_config(text, ParseConfig::default())
    }

    /// Create a new source file that is parsed with custom limits.
    pub fn with_config(text: impl Into<String>, config: ParseConfig) -> Self {
        let text = text.into();
        let root = parse_with(&text, config);
        Self { lines: lines(&text), text, root, config }
    }

    /// The root of the file's syntax tree.
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// A positioned view of the syntax tree.
    pub fn red(&self) -> RedNode<'_> {
        RedNode::new(&self.root)
    }

    /// The whole source as a string slice.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Slice out the part of the source code enclosed by the range.
    pub fn get(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }

    /// The limits the file is parsed with.
    pub fn config(&self) -> ParseConfig {
        self.config
    }

    /// Fully replace the source text.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.lines = lines(&self.text);
        self.root = parse_with(&self.text, self.config);
    }

    /// Edit the source file by replacing the given range.
    ///
    /// Returns the range in the new source that was ultimately reparsed.
    ///
    /// # Panics
    ///
    /// If the `replace` range is out of bounds or not on character
    /// boundaries.
    #[track_caller]
    pub fn edit(&mut self, replace: Range<usize>, with: &str) -> Range<usize> {
        let start_byte = replace.start;
        let line = self.byte_to_line(start_byte).unwrap_or(0);
        self.text.replace_range(replace.clone(), with);

        // Remove invalidated line starts.
        self.lines.truncate(line + 1);

        // Handle adjoining of \r and \n.
        if self.text[..start_byte].ends_with('\r') && with.starts_with('\n') {
            self.lines.pop();
        }

        // Recalculate the line starts after the edit.
        self.lines.extend(lines_from(start_byte, &self.text[start_byte..]));

        reparse_with(&mut self.root, &self.text, replace, with.len(), self.config)
    }

    /// Get the length of the file in UTF-8 encoded bytes.
    pub fn len_bytes(&self) -> usize {
        self.text.len()
    }

    /// Get the length of the file in lines.
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Return the index of the line that contains the given byte index.
    pub fn byte_to_line(&self, byte_idx: usize) -> Option<usize> {
        (byte_idx <= self.text.len()).then(|| match self.lines.binary_search(&byte_idx) {
            Ok(i) => i,
            Err(i) => i - 1,
        })
    }

    /// Return the index of the column at the byte index.
    ///
    /// The column is defined as the number of characters in the line before
    /// the byte index.
    pub fn byte_to_column(&self, byte_idx: usize) -> Option<usize> {
        let line = self.byte_to_line(byte_idx)?;
        let start = self.line_to_byte(line)?;
        let head = self.get(start..byte_idx)?;
        Some(head.chars().count())
    }

    /// Return the byte position at which the given line starts.
    pub fn line_to_byte(&self, line_idx: usize) -> Option<usize> {
        self.lines.get(line_idx).copied()
    }

    /// Return the range which encloses the given line.
    pub fn line_to_range(&self, line_idx: usize) -> Option<Range<usize>> {
        let start = self.line_to_byte(line_idx)?;
        let end = self.line_to_byte(line_idx + 1).unwrap_or(self.text.len());
        Some(start..end)
    }

    /// Return the byte index of the given (line, column) pair.
    pub fn line_column_to_byte(&self, line_idx: usize, column_idx: usize) -> Option<usize> {
        let range = self.line_to_range(line_idx)?;
        let line = self.get(range.clone())?;
        let mut chars = line.chars();
        for _ in 0..column_idx {
            chars.next();
        }
        Some(range.start + (line.len() - chars.as_str().len()))
    }
}

impl Debug for Source {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Source({} bytes, {} lines)", self.len_bytes(), self.len_lines())
    }
}

impl AsRef<str> for Source {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Create a line vector.
fn lines(text: &str) -> Vec<usize> {
    std::iter::once(0).chain(lines_from(0, text)).collect()
}

/// Compute a line iterator from an offset.
fn lines_from(byte_offset: usize, text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut s = Scanner::new(text);
    std::iter::from_fn(move || {
        s.eat_until(is_newline);
        if s.done() {
            return None;
        }

        if s.eat() == Some('\r') {
            s.eat_if('\n');
        }

        Some(byte_offset + s.cursor())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SyntaxKind, parse};

    const TEST: &str = "int ä;\tb\nstring s = \"💛\";\r\nx\ry";

    #[test]
    fn test_line_starts() {
        let source = Source::new(TEST);
        assert_eq!(source.lines, [0, 10, 30, 32]);
        assert_eq!(source.len_lines(), 4);
        assert_eq!(source.len_bytes(), 33);
    }

    #[test]
    fn test_byte_to_line_and_column() {
        let source = Source::new(TEST);
        assert_eq!(source.byte_to_line(0), Some(0));
        assert_eq!(source.byte_to_line(9), Some(0));
        assert_eq!(source.byte_to_line(10), Some(1));
        assert_eq!(source.byte_to_line(29), Some(1));
        assert_eq!(source.byte_to_line(30), Some(2));
        assert_eq!(source.byte_to_line(33), Some(3));
        assert_eq!(source.byte_to_line(34), None);

        assert_eq!(source.byte_to_column(6), Some(5));
        assert_eq!(source.byte_to_column(10), Some(0));
        assert_eq!(source.byte_to_column(26), Some(13));
        assert_eq!(source.byte_to_column(23), None);
    }

    #[test]
    fn test_line_ranges() {
        let source = Source::new(TEST);
        assert_eq!(source.line_to_range(0), Some(0..10));
        assert_eq!(source.line_to_range(1), Some(10..30));
        assert_eq!(source.line_to_range(3), Some(32..33));
        assert_eq!(source.line_to_range(4), None);
        assert_eq!(source.line_column_to_byte(1, 13), Some(26));
        assert_eq!(source.get(10..16), Some("string"));
    }

    #[test]
    fn test_source_file_edit() {
        #[track_caller]
        fn test(prev: &str, range: Range<usize>, with: &str, after: &str) {
            let reference = Source::new(after);

            let mut edited = Source::new(prev);
            edited.edit(range.clone(), with);
            assert_eq!(edited.text, reference.text);
            assert_eq!(edited.lines, reference.lines);
            assert_eq!(edited.root, reference.root);
        }

        // Inserting at the start.
        test("int a;\n", 0..0, "int b;\n", "int b;\nint a;\n");
        test("\nint a;", 0..0, "x\r", "x\r\nint a;");

        // Replacing across lines.
        test(TEST, 7..26, "❌", "int ä;❌\";\r\nx\ry");

        // Appending.
        test("a\nb", 3..3, "c", "a\nbc");
        test("a\nb\n", 4..4, "\n", "a\nb\n\n");

        // Appending with adjoining \r and \n.
        test("a\nb\r", 4..4, "\nc", "a\nb\r\nc");

        // Removing everything.
        test(TEST, 0..33, "", "");
    }

    #[test]
    fn test_source_file_edit_reuses_declarations() {
        let text = "int a = 1;\nint b = 2;\nint c = 3;\nint d = 4;\n";
        let mut source = Source::new(text);
        let old = source.root().clone();
        let at = text.find("3;").unwrap();
        source.edit(at..at + 1, "33");
        assert_eq!(source.root(), &parse(source.text()));

        let old = old.child(1).unwrap().clone();
        let new = source.root().child(1).unwrap().clone();
        assert_eq!(new.kind(), SyntaxKind::List);
        assert!(new.child(0).unwrap().ptr_eq(old.child(0).unwrap()));
        assert!(new.child(3).unwrap().ptr_eq(old.child(3).unwrap()));
    }
}
