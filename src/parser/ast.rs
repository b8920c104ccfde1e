// Syntax tree definitions shared by the parser, the simplifier and the generator

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators, loosest to tightest binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    Mod,
    // Power
    Pow,
}

impl BinOp {
    /// Map an operator lexeme to its binary operator, if it is one.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "<=" => BinOp::Le,
            ">=" => BinOp::Ge,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Mod,
            "^" => BinOp::Pow,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
        }
    }

    /// Binding strength used by the expression parser. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Pow => 4,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 3,
            BinOp::Add | BinOp::Sub => 2,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne => 1,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Increment or decrement applied by a step statement (`i++`, `i--`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOp {
    Inc,
    Dec,
}

impl StepOp {
    pub fn symbol(self) -> &'static str {
        match self {
            StepOp::Inc => "++",
            StepOp::Dec => "--",
        }
    }

    /// The arithmetic operator the step lowers to.
    pub fn arithmetic(self) -> BinOp {
        match self {
            StepOp::Inc => BinOp::Add,
            StepOp::Dec => BinOp::Sub,
        }
    }
}

/// Node discriminant. Determines which child slots carry which role:
///
/// | kind       | left           | right        | statements              |
/// |------------|----------------|--------------|-------------------------|
/// | `Binary`   | left operand   | right operand| -                       |
/// | `Assign`   | target ident   | value        | -                       |
/// | `Step`     | target ident   | -            | -                       |
/// | `Return`   | -              | value        | -                       |
/// | `If`       | condition      | then block   | optional `Else`         |
/// | `Else`     | -              | else block   | -                       |
/// | `While`    | condition      | body         | -                       |
/// | `DoWhile`  | condition      | body         | -                       |
/// | `For`      | condition      | body         | `[init, increment]`     |
/// | `Switch`   | discriminant   | -            | `Case` / `Default` arms |
/// | `Case`     | constant       | body         | -                       |
/// | `Default`  | -              | body         | -                       |
/// | `Block`    | -              | -            | statements in order     |
/// | `Separator`/`Sequence` | previous | next   | -                       |
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Number(String),
    Identifier(String),
    Binary(BinOp),
    Assign,
    Step(StepOp),
    Return,
    If,
    Else,
    While,
    DoWhile,
    For,
    Switch,
    Case,
    Default,
    Block,
    /// Raw statement separator produced by the parser (`;`)
    Separator,
    /// Semantic statement sequence produced by the simplifier
    Sequence,
    /// Empty statement (a lone `;`)
    Empty,
}

/// A syntax tree node: a discriminant plus exclusively owned child slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
    pub statements: Vec<Node>,
    pub location: SourceLocation,
}

impl Node {
    pub fn new(kind: NodeKind, location: SourceLocation) -> Self {
        Node {
            kind,
            left: None,
            right: None,
            statements: Vec::new(),
            location,
        }
    }

    pub fn number(text: impl Into<String>, location: SourceLocation) -> Self {
        Node::new(NodeKind::Number(text.into()), location)
    }

    pub fn identifier(name: impl Into<String>, location: SourceLocation) -> Self {
        Node::new(NodeKind::Identifier(name.into()), location)
    }

    pub fn binary(op: BinOp, left: Node, right: Node, location: SourceLocation) -> Self {
        Node::new(NodeKind::Binary(op), location)
            .with_left(left)
            .with_right(right)
    }

    pub fn block(statements: Vec<Node>, location: SourceLocation) -> Self {
        Node::new(NodeKind::Block, location).with_statements(statements)
    }

    pub fn with_left(mut self, node: Node) -> Self {
        self.left = Some(Box::new(node));
        self
    }

    pub fn with_right(mut self, node: Node) -> Self {
        self.right = Some(Box::new(node));
        self
    }

    pub fn with_statements(mut self, statements: Vec<Node>) -> Self {
        self.statements = statements;
        self
    }

    /// The node's tag: operator symbol, keyword, literal text or structural marker.
    pub fn tag(&self) -> &str {
        match &self.kind {
            NodeKind::Number(text) | NodeKind::Identifier(text) => text.as_str(),
            NodeKind::Binary(op) => op.symbol(),
            NodeKind::Assign => "=",
            NodeKind::Step(op) => op.symbol(),
            NodeKind::Return => "return",
            NodeKind::If => "if",
            NodeKind::Else => "else",
            NodeKind::While => "while",
            NodeKind::DoWhile => "do",
            NodeKind::For => "for",
            NodeKind::Switch => "switch",
            NodeKind::Case => "case",
            NodeKind::Default => "default",
            NodeKind::Block => "block",
            NodeKind::Separator | NodeKind::Empty => ";",
            NodeKind::Sequence => "sequence",
        }
    }

    /// Literals and identifiers: no children, no statements.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Number(_) | NodeKind::Identifier(_))
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// The `else` companion of an `if` node, if one was parsed.
    pub fn else_branch(&self) -> Option<&Node> {
        self.statements
            .iter()
            .find(|stmt| stmt.kind == NodeKind::Else)
    }

    /// Direct children in display order: left, right, then the statement list.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.left()
            .into_iter()
            .chain(self.right())
            .chain(self.statements.iter())
    }

    /// True for `;` separators and the `sequence` nodes they simplify into.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, NodeKind::Separator | NodeKind::Sequence)
    }

    /// Statements chained under a separator/sequence node, in execution order.
    ///
    /// Chains are as deep as the program is long, so they are walked with an
    /// explicit stack. A node that is not a sequence yields only itself.
    pub fn sequence_items(&self) -> Vec<&Node> {
        let mut items = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.is_sequence() {
                pending.extend(node.right());
                pending.extend(node.left());
            } else {
                items.push(node);
            }
        }
        items
    }

    /// Number of nodes in this subtree, this node included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Render the subtree one node per line, children indented beneath their parent.
    ///
    /// A separator/sequence chain is shown as one node with every chained
    /// statement directly beneath it, so indentation follows block nesting
    /// rather than program length.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            lines.push(format!("{}{}", "  ".repeat(depth), node.tag()));
            let children: Vec<&Node> = if node.is_sequence() {
                node.sequence_items()
            } else {
                node.children().collect()
            };
            pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
        lines
    }
}

// Separator chains grow one level per statement; the derived drop would
// recurse that deep.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = Vec::new();
        pending.extend(self.left.take().map(|node| *node));
        pending.extend(self.right.take().map(|node| *node));
        pending.append(&mut self.statements);

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take().map(|child| *child));
            pending.extend(node.right.take().map(|child| *child));
            pending.append(&mut node.statements);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_precedence_table() {
        assert!(BinOp::Pow.precedence() > BinOp::Mul.precedence());
        assert!(BinOp::Mul.precedence() > BinOp::Add.precedence());
        assert!(BinOp::Add.precedence() > BinOp::Lt.precedence());
        assert_eq!(BinOp::Mod.precedence(), BinOp::Div.precedence());
        assert_eq!(BinOp::Ne.precedence(), 1);
    }

    #[test]
    fn test_symbol_round_trip_for_every_operator() {
        for symbol in ["<", ">", "<=", ">=", "==", "!=", "+", "-", "*", "/", "%", "^"] {
            let op = BinOp::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert_eq!(BinOp::from_symbol("="), None);
        assert_eq!(BinOp::from_symbol("&&"), None);
    }

    #[test]
    fn test_tags() {
        let add = Node::binary(
            BinOp::Add,
            Node::identifier("a", loc()),
            Node::number("1", loc()),
            loc(),
        );
        assert_eq!(add.tag(), "+");
        assert_eq!(add.left().unwrap().tag(), "a");
        assert_eq!(add.right().unwrap().tag(), "1");
        assert_eq!(Node::block(vec![], loc()).tag(), "block");
        assert_eq!(Node::new(NodeKind::Sequence, loc()).tag(), "sequence");
    }

    #[test]
    fn test_outline_and_size() {
        let tree = Node::new(NodeKind::Assign, loc())
            .with_left(Node::identifier("x", loc()))
            .with_right(Node::binary(
                BinOp::Mul,
                Node::identifier("y", loc()),
                Node::number("2", loc()),
                loc(),
            ));

        assert_eq!(tree.size(), 5);
        assert_eq!(tree.outline(), vec!["=", "  x", "  *", "    y", "    2"]);
    }

    fn separator_chain(count: usize) -> Node {
        let mut root = Node::identifier("s0", loc());
        for i in 1..count {
            root = Node::new(NodeKind::Separator, loc())
                .with_left(root)
                .with_right(Node::identifier(format!("s{}", i), loc()));
        }
        root
    }

    #[test]
    fn test_sequence_items_in_order() {
        let chain = separator_chain(4);
        let tags: Vec<&str> = chain.sequence_items().iter().map(|n| n.tag()).collect();
        assert_eq!(tags, ["s0", "s1", "s2", "s3"]);

        let leaf = Node::identifier("x", loc());
        assert_eq!(leaf.sequence_items().len(), 1);
    }

    #[test]
    fn test_long_chain_walks_and_drops_without_recursion() {
        let chain = separator_chain(200_000);
        assert_eq!(chain.size(), 399_999);
        assert_eq!(chain.sequence_items().len(), 200_000);
        let outline = chain.outline();
        assert_eq!(outline.len(), 200_001);
        assert_eq!(outline[0], ";");
        assert_eq!(outline[200_000], "  s199999");
        drop(chain);
    }
}
