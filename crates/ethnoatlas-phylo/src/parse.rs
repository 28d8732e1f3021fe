//! Newick text reader.
//!
//! Recursive-descent over a character cursor. Square-bracket comments
//! (e.g. the `[&R]` rooting marker some exporters prepend) are skipped
//! wherever whitespace is allowed. Labels may be bare or single-quoted
//! with `''` as the escape for an embedded quote.

use crate::error::NewickError;
use crate::tree::{NewickNode, NewickTree};

impl NewickTree {
    /// Parse newick text into a tree.
    ///
    /// The input must contain exactly one tree terminated by `;`. Anything
    /// other than trailing whitespace or comments after the terminator is
    /// an error.
    pub fn parse(text: &str) -> Result<Self, NewickError> {
        let mut scanner = Scanner::new(text);
        scanner.skip_trivia()?;
        if scanner.peek().is_none() {
            return Err(NewickError::Empty);
        }
        let root = parse_subtree(&mut scanner)?;
        scanner.skip_trivia()?;
        match scanner.bump() {
            Some(';') => {}
            other => {
                return Err(scanner.syntax(format!(
                    "expected ';', found {}",
                    describe(other)
                )));
            }
        }
        scanner.skip_trivia()?;
        if let Some(extra) = scanner.peek() {
            return Err(scanner.syntax(format!("unexpected '{extra}' after tree terminator")));
        }
        Ok(Self { root })
    }
}

/// Character cursor with lookahead over the input text.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos = self.pos.checked_add(1).unwrap_or(self.pos);
        }
        c
    }

    /// Skip whitespace and `[...]` comments. Unterminated comments are a
    /// syntax error.
    fn skip_trivia(&mut self) -> Result<(), NewickError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('[') => {
                    self.bump();
                    loop {
                        match self.bump() {
                            Some(']') => break,
                            Some(_) => {}
                            None => {
                                return Err(self.syntax(String::from("unterminated comment")));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn syntax(&self, message: String) -> NewickError {
        NewickError::Syntax {
            position: self.pos,
            message,
        }
    }
}

fn describe(c: Option<char>) -> String {
    c.map_or_else(
        || String::from("end of input"),
        |c| format!("'{c}'"),
    )
}

/// Parse one subtree: either a parenthesized child list or a bare label,
/// both followed by an optional label and an optional `:length`.
fn parse_subtree(scanner: &mut Scanner) -> Result<NewickNode, NewickError> {
    scanner.skip_trivia()?;
    let children = if scanner.peek() == Some('(') {
        scanner.bump();
        let mut children = vec![parse_subtree(scanner)?];
        loop {
            scanner.skip_trivia()?;
            match scanner.bump() {
                Some(',') => children.push(parse_subtree(scanner)?),
                Some(')') => break,
                other => {
                    return Err(scanner.syntax(format!(
                        "expected ',' or ')', found {}",
                        describe(other)
                    )));
                }
            }
        }
        children
    } else {
        Vec::new()
    };

    scanner.skip_trivia()?;
    let name = parse_label(scanner)?;
    scanner.skip_trivia()?;
    let length = if scanner.peek() == Some(':') {
        scanner.bump();
        Some(parse_length(scanner)?)
    } else {
        None
    };
    Ok(NewickNode::new(name, length, children))
}

/// Read an optional node label, quoted or bare. Returns `None` when the
/// next character starts another token.
fn parse_label(scanner: &mut Scanner) -> Result<Option<String>, NewickError> {
    if scanner.peek() == Some('\'') {
        scanner.bump();
        let mut label = String::new();
        loop {
            match scanner.bump() {
                Some('\'') => {
                    // Doubled quote is an escaped quote inside the label.
                    if scanner.peek() == Some('\'') {
                        scanner.bump();
                        label.push('\'');
                    } else {
                        return Ok(Some(label));
                    }
                }
                Some(c) => label.push(c),
                None => {
                    return Err(scanner.syntax(String::from("unterminated quoted label")));
                }
            }
        }
    }

    let mut label = String::new();
    while let Some(c) = scanner.peek() {
        if c.is_whitespace() || matches!(c, '(' | ')' | ',' | ':' | ';' | '[') {
            break;
        }
        label.push(c);
        scanner.bump();
    }
    if label.is_empty() {
        Ok(None)
    } else {
        Ok(Some(label))
    }
}

/// Read a branch length after `:`.
fn parse_length(scanner: &mut Scanner) -> Result<f64, NewickError> {
    scanner.skip_trivia()?;
    let mut text = String::new();
    while let Some(c) = scanner.peek() {
        if c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E') {
            text.push(c);
            scanner.bump();
        } else {
            break;
        }
    }
    if text.is_empty() {
        return Err(scanner.syntax(String::from("expected branch length after ':'")));
    }
    text.parse::<f64>()
        .map_err(|_| scanner.syntax(format!("invalid branch length '{text}'")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_leaf_labels_and_lengths() {
        let tree = NewickTree::parse("(aaa:1.5,bbb:2)root;").unwrap();
        assert_eq!(tree.leaf_names(), vec!["aaa", "bbb"]);
        assert_eq!(tree.root.name.as_deref(), Some("root"));
        let first = tree.root.children.first().unwrap();
        assert!(first.length.is_some_and(|l| (l - 1.5).abs() < 1e-12));
    }

    #[test]
    fn parses_nested_clades() {
        let tree = NewickTree::parse("((A:1,B:1)ab:2,(C:1,D:1)cd:2);").unwrap();
        assert_eq!(tree.root.children.len(), 2);
        assert_eq!(tree.root.leaf_count(), 4);
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn parses_unnamed_and_lengthless_nodes() {
        let tree = NewickTree::parse("((A,B),C);").unwrap();
        assert_eq!(tree.root.leaf_count(), 3);
        let first = tree.root.children.first().unwrap();
        assert!(first.name.is_none());
        assert!(first.length.is_none());
    }

    #[test]
    fn skips_bracket_comments() {
        let tree = NewickTree::parse("[&R] (A:1,B:2)[note];").unwrap();
        assert_eq!(tree.leaf_names(), vec!["A", "B"]);
    }

    #[test]
    fn parses_quoted_labels() {
        let tree = NewickTree::parse("('Sa''a':1,B:1);").unwrap();
        assert_eq!(tree.leaf_names(), vec!["Sa'a", "B"]);
    }

    #[test]
    fn parses_scientific_notation_lengths() {
        let tree = NewickTree::parse("(A:1e-3,B:2.5E2);").unwrap();
        let first = tree.root.children.first().unwrap();
        assert!(first.length.is_some_and(|l| (l - 0.001).abs() < 1e-12));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(NewickTree::parse("  "), Err(NewickError::Empty));
    }

    #[test]
    fn rejects_missing_terminator() {
        let result = NewickTree::parse("(A:1,B:2)");
        assert!(matches!(result, Err(NewickError::Syntax { .. })));
    }

    #[test]
    fn rejects_unbalanced_parens() {
        let result = NewickTree::parse("((A:1,B:2);");
        assert!(matches!(result, Err(NewickError::Syntax { .. })));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let result = NewickTree::parse("(A,B); (C,D);");
        assert!(matches!(result, Err(NewickError::Syntax { .. })));
    }

    #[test]
    fn round_trips_through_display() {
        let text = "((stan1295:1,russ1263:2)slav:3,finn1318:9);";
        let tree = NewickTree::parse(text).unwrap();
        assert_eq!(tree.to_newick(), text);
    }
}
