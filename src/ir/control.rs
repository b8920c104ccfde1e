//! Control-flow lowering (`if`/`else`, `while`, `for`, `do`-`while`, `switch`).
//!
//! Adds `impl QuadrupleGenerator` methods that turn structured control nodes
//! into labels and jumps. A label is allocated right before the quadruple
//! that first names it (a jump or its definition), never ahead of a body, so
//! labels of nested constructs are numbered between their parent's labels in
//! listing order. Definitions still follow control flow: a `switch` places
//! its shared end label after every per-arm label.

use crate::ir::errors::StructuralError;
use crate::ir::generator::{misplaced, required, QuadrupleGenerator};
use crate::ir::quadruple::{Operand, Quadruple};
use crate::parser::ast::{BinOp, Node, NodeKind};

impl QuadrupleGenerator {
    /// `if (c) { then } else { other }`:
    ///
    /// ```text
    /// <c>; if_false c Lelse; <then>; goto Lend; Lelse:; <other>; Lend:
    /// ```
    ///
    /// Without an else block the same shape is emitted with nothing between
    /// `Lelse:` and `Lend:`.
    pub(crate) fn lower_if(&mut self, node: &Node) -> Result<(), StructuralError> {
        let condition = required(node.left(), node, "condition")?;
        let then_body = required(node.right(), node, "then block")?;

        let mut else_body = None;
        for companion in &node.statements {
            match companion.kind {
                NodeKind::Else if else_body.is_none() => {
                    else_body = Some(required(companion.right(), companion, "else block")?);
                }
                _ => return Err(misplaced(companion, "as a companion of this if statement")),
            }
        }

        let cond = self.lower_expression(condition)?;
        let else_label = self.new_label();
        self.emit(Quadruple::if_false(cond, else_label));
        self.lower_statement(then_body)?;
        let end_label = self.new_label();
        self.emit(Quadruple::goto(end_label));
        self.emit(Quadruple::label(else_label));
        if let Some(body) = else_body {
            self.lower_statement(body)?;
        }
        self.emit(Quadruple::label(end_label));
        Ok(())
    }

    /// `Lstart:; <c>; if_false c Lend; <body>; goto Lstart; Lend:`
    pub(crate) fn lower_while(&mut self, node: &Node) -> Result<(), StructuralError> {
        let condition = required(node.left(), node, "condition")?;
        let body = required(node.right(), node, "body")?;
        self.lower_loop(condition, body, None)
    }

    /// The init statement runs once ahead of a `while`-shaped loop whose body
    /// is followed by the increment.
    pub(crate) fn lower_for(&mut self, node: &Node) -> Result<(), StructuralError> {
        let condition = required(node.left(), node, "condition")?;
        let body = required(node.right(), node, "body")?;
        let [init, increment] = node.statements.as_slice() else {
            return Err(StructuralError::MissingChild {
                node: node.tag().to_string(),
                role: "init and increment",
                location: node.location,
            });
        };

        self.lower_statement(init)?;
        self.lower_loop(condition, body, Some(increment))
    }

    fn lower_loop(
        &mut self,
        condition: &Node,
        body: &Node,
        increment: Option<&Node>,
    ) -> Result<(), StructuralError> {
        let start_label = self.new_label();
        self.emit(Quadruple::label(start_label));
        let cond = self.lower_expression(condition)?;
        let end_label = self.new_label();
        self.emit(Quadruple::if_false(cond, end_label));
        self.lower_statement(body)?;
        if let Some(step) = increment {
            self.lower_statement(step)?;
        }
        self.emit(Quadruple::goto(start_label));
        self.emit(Quadruple::label(end_label));
        Ok(())
    }

    /// `Lstart:; <body>; <c>; if c Lstart`
    pub(crate) fn lower_do_while(&mut self, node: &Node) -> Result<(), StructuralError> {
        let condition = required(node.left(), node, "condition")?;
        let body = required(node.right(), node, "body")?;

        let start_label = self.new_label();
        self.emit(Quadruple::label(start_label));
        self.lower_statement(body)?;
        let cond = self.lower_expression(condition)?;
        self.emit(Quadruple::if_true(cond, start_label));
        Ok(())
    }

    /// The discriminant is evaluated once. Arms are tested in source order;
    /// each `case` compares against its constant and skips to the next arm
    /// when unequal, a `default` runs untested. Every arm ends with a jump to
    /// the shared end label, so arms never fall through into each other.
    ///
    /// This is not C's `switch`: a `default` is taken as soon as it is
    /// reached, so any `case` written after it is unreachable.
    pub(crate) fn lower_switch(&mut self, node: &Node) -> Result<(), StructuralError> {
        let discriminant = required(node.left(), node, "discriminant")?;
        let value = self.lower_expression(discriminant)?;

        // Allocated by the first arm that jumps to it
        let mut end_label = None;

        for arm in &node.statements {
            match arm.kind {
                NodeKind::Case => {
                    let constant = required(arm.left(), arm, "constant")?;
                    let body = required(arm.right(), arm, "body")?;

                    let constant = self.lower_expression(constant)?;
                    let test = self.new_temp();
                    self.emit(Quadruple::binary(BinOp::Eq, value.clone(), constant, test));
                    let next_label = self.new_label();
                    self.emit(Quadruple::if_false(Operand::Temp(test), next_label));
                    self.lower_statement(body)?;
                    let end = *end_label.get_or_insert_with(|| self.new_label());
                    self.emit(Quadruple::goto(end));
                    self.emit(Quadruple::label(next_label));
                }
                NodeKind::Default => {
                    let body = required(arm.right(), arm, "body")?;
                    self.lower_statement(body)?;
                    let end = *end_label.get_or_insert_with(|| self.new_label());
                    self.emit(Quadruple::goto(end));
                }
                _ => return Err(misplaced(arm, "as a switch arm")),
            }
        }

        let end = end_label.unwrap_or_else(|| self.new_label());
        self.emit(Quadruple::label(end));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::errors::StructuralError;
    use crate::ir::generator::lower;
    use crate::ir::quadruple::{label_positions, Label, Operator, Quadruple};
    use crate::parser::ast::{Node, NodeKind, SourceLocation};
    use crate::parser::parse::Parser;
    use crate::parser::simplify::simplify;

    fn generate(source: &str) -> Vec<Quadruple> {
        let raw = Parser::from_source(source).parse().unwrap();
        lower(&simplify(&raw)).unwrap()
    }

    /// Non-empty fields joined by single spaces
    fn rows(quads: &[Quadruple]) -> Vec<String> {
        quads
            .iter()
            .map(|q| {
                [q.op.to_string(), q.arg1.to_string(), q.arg2.to_string(), q.result.to_string()]
                    .into_iter()
                    .filter(|field| !field.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn count(quads: &[Quadruple], pred: impl Fn(&Quadruple) -> bool) -> usize {
        quads.iter().filter(|q| pred(q)).count()
    }

    #[test]
    fn test_if_else_listing() {
        let quads = generate("if (a < b) { x = 1; } else { x = 2; }");
        assert_eq!(
            rows(&quads),
            [
                "< a b t0",
                "if_false t0 L0",
                "= 1 x",
                "goto L1",
                "L0:",
                "= 2 x",
                "L1:",
            ]
        );
    }

    #[test]
    fn test_if_else_jumps_land_on_else_body() {
        let quads = generate("if (a < b) { x = 1; } else { x = 2; }");
        assert_eq!(count(&quads, |q| q.op == Operator::IfFalse), 1);
        assert_eq!(count(&quads, |q| q.op == Operator::Goto), 1);
        assert_eq!(count(&quads, |q| q.defined_label().is_some()), 2);

        let if_false = quads.iter().find(|q| q.op == Operator::IfFalse).unwrap();
        let target = if_false.jump_target().unwrap();
        let else_start = quads
            .iter()
            .position(|q| q.to_string().contains("| 2 "))
            .unwrap();
        assert_eq!(quads[else_start - 1].defined_label(), Some(target));
    }

    #[test]
    fn test_if_without_else_keeps_both_labels() {
        let quads = generate("if (a) { b = 1; }");
        assert_eq!(
            rows(&quads),
            ["if_false a L0", "= 1 b", "goto L1", "L0:", "L1:"]
        );
    }

    #[test]
    fn test_while_listing() {
        let quads = generate("while (i < 10) { i = i + 1; }");
        assert_eq!(
            rows(&quads),
            [
                "L0:",
                "< i 10 t0",
                "if_false t0 L1",
                "+ i 1 t1",
                "= t1 i",
                "goto L0",
                "L1:",
            ]
        );
    }

    #[test]
    fn test_while_backward_jump_precedes_condition() {
        let quads = generate("x = 0; while (x < n) { x = x + 2; } y = x;");
        let positions = label_positions(&quads);

        let gotos: Vec<usize> = quads
            .iter()
            .enumerate()
            .filter(|(_, q)| q.op == Operator::Goto)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(gotos.len(), 1);

        let back = positions[&quads[gotos[0]].jump_target().unwrap()];
        assert!(back < gotos[0]);
        assert_eq!(rows(&quads[back + 1..back + 2]), ["< x n t0"]);

        let exit = positions[&quads
            .iter()
            .find(|q| q.op == Operator::IfFalse)
            .and_then(Quadruple::jump_target)
            .unwrap()];
        assert_eq!(exit, gotos[0] + 1);
        assert_eq!(rows(&quads[exit + 1..]), ["= x y"]);
    }

    #[test]
    fn test_for_listing() {
        let quads = generate("for (i = 0; i < n; i++) { s = s + i; }");
        assert_eq!(
            rows(&quads),
            [
                "= 0 i",
                "L0:",
                "< i n t0",
                "if_false t0 L1",
                "+ s i t1",
                "= t1 s",
                "+ i 1 t2",
                "= t2 i",
                "goto L0",
                "L1:",
            ]
        );
    }

    #[test]
    fn test_do_while_listing() {
        let quads = generate("do { n = n - 1; } while (n > 0);");
        assert_eq!(
            rows(&quads),
            ["L0:", "- n 1 t0", "= t0 n", "> n 0 t1", "if t1 L0"]
        );
    }

    #[test]
    fn test_switch_listing() {
        let quads = generate("switch (k) { case 1: a = 1; case 2: a = 2; default: a = 0; }");
        assert_eq!(
            rows(&quads),
            [
                "== k 1 t0",
                "if_false t0 L0",
                "= 1 a",
                "goto L1",
                "L0:",
                "== k 2 t1",
                "if_false t1 L2",
                "= 2 a",
                "goto L1",
                "L2:",
                "= 0 a",
                "goto L1",
                "L1:",
            ]
        );
    }

    #[test]
    fn test_switch_discriminant_evaluated_once() {
        let quads = generate("switch (a + b) { case 1: x = 1; case 2: x = 2; }");
        assert_eq!(count(&quads, |q| q.to_string().starts_with("+ ")), 1);
        assert_eq!(rows(&quads[1..2]), ["== t0 1 t1"]);
        assert_eq!(rows(&quads[6..7]), ["== t0 2 t2"]);
    }

    #[test]
    fn test_nested_labels_are_unique() {
        let quads = generate(
            "while (a) { if (b) { c = 1; } else { while (d) { d = d - 1; } } }",
        );
        let labels: Vec<Label> = quads.iter().filter_map(Quadruple::defined_label).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), labels.len());
        assert_eq!(sorted, (0..6).map(Label).collect::<Vec<_>>());
    }

    /// Labels in order of first mention, as a jump target or a definition
    fn labels_by_first_mention(quads: &[Quadruple]) -> Vec<Label> {
        let mut seen = Vec::new();
        for label in quads
            .iter()
            .filter_map(|q| q.defined_label().or_else(|| q.jump_target()))
        {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    #[test]
    fn test_label_suffixes_increase_in_listing_order() {
        let sources = [
            "if (a) { x = 1; } else { x = 2; }",
            "switch (k) { case 1: a = 1; case 2: a = 2; default: a = 0; }",
            "while (a) { if (b) { c = 1; } else { while (d) { d--; } } } e = 1;",
            "for (i = 0; i < n; i++) { switch (i) { default: do { j--; } while (j); } }",
            "if (a) { if (b) { x = 1; } } else { switch (c) { case 1: y = 2; } }",
        ];
        for source in sources {
            let quads = generate(source);
            let labels = labels_by_first_mention(&quads);
            let count = labels.len() as u32;
            assert_eq!(labels, (0..count).map(Label).collect::<Vec<_>>(), "{}", source);
        }
    }

    #[test]
    fn test_switch_end_label_is_defined_last() {
        let quads = generate("switch (k) { case 1: a = 1; case 2: a = 2; }");
        let defined: Vec<Label> = quads.iter().filter_map(Quadruple::defined_label).collect();
        assert_eq!(defined, [Label(0), Label(2), Label(1)]);
    }

    #[test]
    fn test_switch_without_arms() {
        let quads = generate("switch (k) { }");
        assert_eq!(rows(&quads), ["L0:"]);
    }

    #[test]
    fn test_default_before_case_shadows_it() {
        let quads = generate("switch (k) { default: a = 0; case 1: a = 1; }");
        assert_eq!(
            rows(&quads),
            [
                "= 0 a",
                "goto L0",
                "== k 1 t0",
                "if_false t0 L1",
                "= 1 a",
                "goto L0",
                "L1:",
                "L0:",
            ]
        );
        // Nothing jumps past the untested default, so the case test is dead
        let positions = label_positions(&quads);
        let case_test = 2;
        assert!(quads
            .iter()
            .filter_map(Quadruple::jump_target)
            .all(|target| positions[&target] + 1 != case_test));
    }

    #[test]
    fn test_while_missing_condition() {
        let loc = SourceLocation::new(3, 5);
        let node = Node::new(NodeKind::While, loc).with_right(Node::block(vec![], loc));
        let err = lower(&node).unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingChild {
                node: "while".to_string(),
                role: "condition",
                location: loc,
            }
        );
        assert_eq!(err.to_string(), "'while' at line 3, column 5 is missing its condition");
    }

    #[test]
    fn test_for_without_increment() {
        let loc = SourceLocation::new(1, 1);
        let node = Node::new(NodeKind::For, loc)
            .with_left(Node::identifier("c", loc))
            .with_right(Node::block(vec![], loc))
            .with_statements(vec![Node::identifier("i", loc)]);
        let err = lower(&node).unwrap_err();
        assert!(matches!(
            err,
            StructuralError::MissingChild { role: "init and increment", .. }
        ));
    }

    #[test]
    fn test_bad_switch_arm() {
        let loc = SourceLocation::new(1, 1);
        let node = Node::new(NodeKind::Switch, loc)
            .with_left(Node::identifier("k", loc))
            .with_statements(vec![Node::block(vec![], loc)]);
        assert!(matches!(lower(&node), Err(StructuralError::Misplaced { .. })));
    }
}
