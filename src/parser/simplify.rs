//! Raw tree → semantic tree
//!
//! The parser's tree still carries syntax: `;` separators chaining top-level
//! statements and empty statements. [`simplify`] rewrites every separator into
//! a binary `sequence` node (previous statement left, next statement right) and
//! drops empty statements. Every other node is rebuilt with the same kind and
//! child roles, its children and statement list simplified recursively.
//!
//! The transform never fails, and running it on its own output changes nothing.

use crate::parser::ast::{Node, NodeKind};

/// Simplify a raw syntax tree into its semantic form.
///
/// A tree with no statements left after dropping empties simplifies to an
/// empty `block`.
pub fn simplify(node: &Node) -> Node {
    simplify_node(node).unwrap_or_else(|| Node::block(Vec::new(), node.location))
}

/// `None` when the node contributes nothing to the program.
fn simplify_node(node: &Node) -> Option<Node> {
    match node.kind {
        NodeKind::Empty => None,
        NodeKind::Separator | NodeKind::Sequence => simplify_sequence(node),
        _ => Some(Node {
            kind: node.kind.clone(),
            left: node.left().and_then(simplify_node).map(Box::new),
            right: node.right().and_then(simplify_node).map(Box::new),
            statements: node.statements.iter().filter_map(simplify_node).collect(),
            location: node.location,
        }),
    }
}

/// Rebuild a separator chain as a left-deep `sequence` chain.
///
/// Each `sequence` sits at the location of the statement on its right, as
/// the parser places separators. A chain left with a single statement
/// collapses to it.
fn simplify_sequence(node: &Node) -> Option<Node> {
    let mut joints = Vec::new();
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        if current.is_sequence() {
            pending.extend(current.right());
            pending.extend(current.left());
            continue;
        }
        if let Some(statement) = simplify_node(current) {
            joints.push((current.location, statement));
        }
    }

    let mut items = joints.into_iter();
    let (_, first) = items.next()?;
    Some(items.fold(first, |previous, (location, next)| {
        Node::new(NodeKind::Sequence, location)
            .with_left(previous)
            .with_right(next)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn simplified(source: &str) -> Node {
        simplify(&Parser::from_source(source).parse().unwrap())
    }

    fn contains_kind(node: &Node, kind: &NodeKind) -> bool {
        &node.kind == kind
            || node.left().is_some_and(|n| contains_kind(n, kind))
            || node.right().is_some_and(|n| contains_kind(n, kind))
            || node.statements.iter().any(|n| contains_kind(n, kind))
    }

    #[test]
    fn test_separators_become_sequences() {
        let root = simplified("a = 1; b = 2; c = 3;");
        assert_eq!(root.kind, NodeKind::Sequence);
        assert_eq!(root.tag(), "sequence");
        assert_eq!(root.right().unwrap().left().unwrap().tag(), "c");

        let inner = root.left().unwrap();
        assert_eq!(inner.kind, NodeKind::Sequence);
        assert_eq!(inner.left().unwrap().left().unwrap().tag(), "a");
        assert_eq!(inner.right().unwrap().left().unwrap().tag(), "b");
        assert!(!contains_kind(&root, &NodeKind::Separator));
    }

    #[test]
    fn test_empty_statements_are_dropped() {
        let root = simplified("; a = 1; ; { ; b = 2; }");
        assert!(!contains_kind(&root, &NodeKind::Empty));
        assert_eq!(root.kind, NodeKind::Sequence);
        assert_eq!(root.left().unwrap().kind, NodeKind::Assign);
        let block = root.right().unwrap();
        assert_eq!(block.kind, NodeKind::Block);
        assert_eq!(block.statements.len(), 1);
    }

    #[test]
    fn test_only_empty_statements() {
        let root = simplified(";;;");
        assert_eq!(root.kind, NodeKind::Block);
        assert!(root.statements.is_empty());
    }

    #[test]
    fn test_control_roles_survive() {
        let root = simplified("for (i = 0; i < 3; i++) { ; x = i; }");
        assert_eq!(root.kind, NodeKind::For);
        assert_eq!(root.left().unwrap().tag(), "<");
        assert_eq!(root.statements.len(), 2);
        assert_eq!(root.statements[0].tag(), "=");
        assert_eq!(root.statements[1].tag(), "++");
        assert_eq!(root.right().unwrap().statements.len(), 1);

        let root = simplified("if (a) { b = 1; } else { ; b = 2; }");
        let else_body = root.else_branch().unwrap().right().unwrap();
        assert_eq!(else_body.statements.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let sources = [
            "a = 1; b = 2; c = 3;",
            "; x = (a + b) * c; ;",
            "if (a < b) { x = 1; } else { x = 2; } y = x;",
            "while (i < 10) { i = i + 1; ; } return i;",
            "switch (k) { case 1: a = 1; default: ; }",
        ];
        for source in sources {
            let once = simplified(source);
            assert_eq!(simplify(&once), once, "not idempotent for {:?}", source);
        }
    }

    #[test]
    fn test_long_program_simplifies_without_recursion() {
        let source = "x = 1;\n".repeat(100_000);
        let root = simplified(&source);
        assert_eq!(root.kind, NodeKind::Sequence);
        assert_eq!(root.sequence_items().len(), 100_000);
        assert_eq!(root.right().unwrap().location.line, 100_000);
    }

    #[test]
    fn test_expression_is_unchanged() {
        let raw = Parser::from_source("x = a - b - c;").parse().unwrap();
        assert_eq!(simplify(&raw), raw);
    }
}
