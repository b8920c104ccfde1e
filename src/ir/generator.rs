//! Quadruple generator
//!
//! [`QuadrupleGenerator`] walks a simplified tree and appends quadruples to
//! its listing in execution order. Temporaries (`t0`, `t1`, ...) and labels
//! (`L0`, `L1`, ...) come from two counters owned by the instance; neither is
//! ever reset or reused, so lowering several trees with one generator keeps
//! every name unique across the whole listing.
//!
//! Names are allocated at their first appearance in the listing: a
//! temporary when the quadruple computing it is emitted, a label when the
//! first jump to it or its definition is emitted. Numeric suffixes therefore
//! increase in listing order of first appearance.
//!
//! This module covers statements that lower without jumps (assignments,
//! steps, returns, sequences, blocks) and expressions. Control flow lives in
//! `control`.

use crate::ir::errors::StructuralError;
use crate::ir::quadruple::{Label, Operand, Quadruple, Temp};
use crate::ir::constants::STEP_AMOUNT;
use crate::parser::ast::{Node, NodeKind};

/// Lowers syntax trees into an append-only quadruple listing
#[derive(Debug, Default)]
pub struct QuadrupleGenerator {
    quadruples: Vec<Quadruple>,
    next_temp: u32,
    next_label: u32,
}

impl QuadrupleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower `node` and return the whole listing produced by this instance so far.
    ///
    /// On error the listing may hold the quadruples emitted before the failure
    /// and should be discarded.
    pub fn lower(&mut self, node: &Node) -> Result<&[Quadruple], StructuralError> {
        self.lower_statement(node)?;
        Ok(&self.quadruples)
    }

    pub fn quadruples(&self) -> &[Quadruple] {
        &self.quadruples
    }

    pub fn into_quadruples(self) -> Vec<Quadruple> {
        self.quadruples
    }

    /// Number of temporaries allocated so far
    pub fn temp_count(&self) -> u32 {
        self.next_temp
    }

    /// Number of labels allocated so far
    pub fn label_count(&self) -> u32 {
        self.next_label
    }

    pub(crate) fn new_temp(&mut self) -> Temp {
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub(crate) fn new_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    pub(crate) fn emit(&mut self, quad: Quadruple) {
        self.quadruples.push(quad);
    }

    /// Lower a node in statement position
    pub(crate) fn lower_statement(&mut self, node: &Node) -> Result<(), StructuralError> {
        match node.kind {
            NodeKind::Assign => self.lower_assignment(node),
            NodeKind::Step(_) => self.lower_step(node),
            NodeKind::Return => self.lower_return(node),
            NodeKind::If => self.lower_if(node),
            NodeKind::While => self.lower_while(node),
            NodeKind::DoWhile => self.lower_do_while(node),
            NodeKind::For => self.lower_for(node),
            NodeKind::Switch => self.lower_switch(node),
            NodeKind::Sequence | NodeKind::Separator => {
                // One level per statement; walked flat
                for statement in node.sequence_items() {
                    self.lower_statement(statement)?;
                }
                Ok(())
            }
            NodeKind::Block => {
                for statement in &node.statements {
                    self.lower_statement(statement)?;
                }
                Ok(())
            }
            NodeKind::Empty => Ok(()),
            NodeKind::Number(_) | NodeKind::Identifier(_) | NodeKind::Binary(_) => {
                // Expression statement: computed for its quadruples, result unused
                self.lower_expression(node).map(|_| ())
            }
            NodeKind::Else => Err(misplaced(node, "outside an if statement")),
            NodeKind::Case | NodeKind::Default => Err(misplaced(node, "outside a switch")),
        }
    }

    /// Lower an expression and return the operand holding its value.
    ///
    /// Leaves emit nothing and yield their own text.
    pub(crate) fn lower_expression(&mut self, node: &Node) -> Result<Operand, StructuralError> {
        match &node.kind {
            NodeKind::Number(text) | NodeKind::Identifier(text) => Ok(Operand::Name(text.clone())),
            NodeKind::Binary(op) => {
                let left = self.lower_expression(required(node.left(), node, "left operand")?)?;
                let right = self.lower_expression(required(node.right(), node, "right operand")?)?;
                let temp = self.new_temp();
                self.emit(Quadruple::binary(*op, left, right, temp));
                Ok(Operand::Temp(temp))
            }
            _ => Err(misplaced(node, "inside an expression")),
        }
    }

    /// `x = e` → lower `e`, then `(=, e, _, x)`
    fn lower_assignment(&mut self, node: &Node) -> Result<(), StructuralError> {
        let target = assignment_target(node)?;
        let value = self.lower_expression(required(node.right(), node, "value")?)?;
        self.emit(Quadruple::assign(value, target));
        Ok(())
    }

    /// `x++` → `(+, x, 1, tN)` then `(=, tN, _, x)`
    fn lower_step(&mut self, node: &Node) -> Result<(), StructuralError> {
        let NodeKind::Step(step) = node.kind else {
            return Err(misplaced(node, "as a step statement"));
        };
        let target = assignment_target(node)?;
        let temp = self.new_temp();
        self.emit(Quadruple::binary(
            step.arithmetic(),
            Operand::Name(target.to_string()),
            Operand::Name(STEP_AMOUNT.to_string()),
            temp,
        ));
        self.emit(Quadruple::assign(Operand::Temp(temp), target));
        Ok(())
    }

    /// `return e` → lower `e`, then `(return, e, _, _)`
    fn lower_return(&mut self, node: &Node) -> Result<(), StructuralError> {
        let value = self.lower_expression(required(node.right(), node, "value")?)?;
        self.emit(Quadruple::ret(value));
        Ok(())
    }
}

/// Lower a whole tree with a fresh generator.
pub fn lower(node: &Node) -> Result<Vec<Quadruple>, StructuralError> {
    let mut generator = QuadrupleGenerator::new();
    generator.lower(node)?;
    Ok(generator.into_quadruples())
}

/// Unwrap a child slot the node's kind requires.
pub(crate) fn required<'a>(
    child: Option<&'a Node>,
    parent: &Node,
    role: &'static str,
) -> Result<&'a Node, StructuralError> {
    child.ok_or_else(|| StructuralError::MissingChild {
        node: parent.tag().to_string(),
        role,
        location: parent.location,
    })
}

pub(crate) fn misplaced(node: &Node, context: &'static str) -> StructuralError {
    StructuralError::Misplaced {
        node: node.tag().to_string(),
        context,
        location: node.location,
    }
}

/// Name on the left of `=`, `++` or `--`
fn assignment_target(node: &Node) -> Result<&str, StructuralError> {
    let target = required(node.left(), node, "target")?;
    match &target.kind {
        NodeKind::Identifier(name) => Ok(name),
        _ => Err(StructuralError::InvalidTarget {
            found: target.tag().to_string(),
            location: target.location,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::quadruple::Operator;
    use crate::parser::ast::{BinOp, SourceLocation};
    use crate::parser::parse::Parser;
    use crate::parser::simplify::simplify;

    fn generate(source: &str) -> Vec<Quadruple> {
        let raw = Parser::from_source(source).parse().unwrap();
        lower(&simplify(&raw)).unwrap()
    }

    fn rows(quads: &[Quadruple]) -> Vec<String> {
        quads
            .iter()
            .map(|q| format!("{} {} {} {}", q.op, q.arg1, q.arg2, q.result).trim_end().to_string())
            .collect()
    }

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_assignment_of_leaf_emits_one_quadruple() {
        let quads = generate("x = 5;");
        assert_eq!(quads, vec![Quadruple::assign(Operand::Name("5".into()), "x")]);
    }

    #[test]
    fn test_expression_temporaries_follow_evaluation_order() {
        let quads = generate("x = a + b * c;");
        assert_eq!(rows(&quads), ["* b c t0", "+ a t0 t1", "= t1  x"]);
    }

    #[test]
    fn test_left_deep_expression() {
        let quads = generate("y = (a - b) - c;");
        assert_eq!(rows(&quads), ["- a b t0", "- t0 c t1", "= t1  y"]);
    }

    #[test]
    fn test_sequence_lowers_in_order() {
        let quads = generate("a = 1; b = a * 2; return b;");
        assert_eq!(rows(&quads), ["= 1  a", "* a 2 t0", "= t0  b", "return b"]);
    }

    #[test]
    fn test_step_statement() {
        let quads = generate("i++; j--;");
        assert_eq!(rows(&quads), ["+ i 1 t0", "= t0  i", "- j 1 t1", "= t1  j"]);
    }

    #[test]
    fn test_bare_leaf_statement_emits_nothing() {
        assert!(generate("x;").is_empty());
    }

    #[test]
    fn test_counters_persist_across_calls() {
        let mut generator = QuadrupleGenerator::new();
        let first = simplify(&Parser::from_source("a = b + c;").parse().unwrap());
        let second = simplify(&Parser::from_source("d = e + f;").parse().unwrap());

        generator.lower(&first).unwrap();
        let listing = generator.lower(&second).unwrap();
        assert_eq!(listing.len(), 4);
        assert_eq!(listing[2].result, Operand::Temp(Temp(1)));
        assert_eq!(generator.temp_count(), 2);
    }

    #[test]
    fn test_invalid_assignment_target() {
        let node = Node::new(NodeKind::Assign, loc())
            .with_left(Node::number("3", loc()))
            .with_right(Node::number("4", loc()));
        let err = lower(&node).unwrap_err();
        assert_eq!(
            err,
            StructuralError::InvalidTarget {
                found: "3".to_string(),
                location: loc(),
            }
        );
    }

    #[test]
    fn test_binary_missing_operand() {
        let node = Node::new(NodeKind::Binary(BinOp::Add), loc()).with_left(Node::identifier("a", loc()));
        let err = lower(&node).unwrap_err();
        assert!(matches!(
            err,
            StructuralError::MissingChild { role: "right operand", .. }
        ));
    }

    #[test]
    fn test_statement_inside_expression_is_rejected() {
        let node = Node::new(NodeKind::Return, loc()).with_right(Node::block(vec![], loc()));
        let err = lower(&node).unwrap_err();
        assert!(matches!(err, StructuralError::Misplaced { .. }));
        assert_eq!(err.to_string(), "'block' at line 1, column 1 cannot appear inside an expression");
    }

    #[test]
    fn test_stray_arms_are_rejected() {
        let case = Node::new(NodeKind::Case, loc()).with_left(Node::number("1", loc()));
        assert!(matches!(lower(&case), Err(StructuralError::Misplaced { .. })));
        let else_node = Node::new(NodeKind::Else, loc());
        assert!(matches!(lower(&else_node), Err(StructuralError::Misplaced { .. })));
    }

    #[test]
    fn test_long_program_lowers_without_recursion() {
        let quads = generate(&"x = 1;\n".repeat(100_000));
        assert_eq!(quads.len(), 100_000);
        assert_eq!(quads[99_999], Quadruple::assign(Operand::Name("1".into()), "x"));
    }

    #[test]
    fn test_operator_field() {
        let quads = generate("z = p % q;");
        assert_eq!(quads[0].op, Operator::Binary(BinOp::Mod));
        assert_eq!(quads[1].op, Operator::Assign);
    }
}
