//! Quadruple records and their textual listing
//!
//! A [`Quadruple`] is `(operator, operand1, operand2, result)`. Label
//! definitions live in the operator slot (`L3:`) with every operand empty;
//! jumps carry their target label in the result slot.

use crate::ir::constants::{LABEL_PREFIX, OPERAND_WIDTH, OPERATOR_WIDTH, TEMP_PREFIX};
use crate::parser::ast::BinOp;
use rustc_hash::FxHashMap;
use std::fmt;

/// Generator-allocated temporary (`t0`, `t1`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub u32);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TEMP_PREFIX, self.0)
    }
}

/// Generator-allocated jump target (`L0`, `L1`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", LABEL_PREFIX, self.0)
    }
}

/// Operand slot contents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    None,
    /// Identifier or literal text, exactly as written in the source
    Name(String),
    Temp(Temp),
    Label(Label),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Name(text) => f.write_str(text),
            Operand::Temp(temp) => write!(f, "{}", temp),
            Operand::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Operator slot contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Binary(BinOp),
    Assign,
    /// Jump to the result label when operand1 is false
    IfFalse,
    /// Jump to the result label when operand1 is true
    If,
    Goto,
    Return,
    /// Label definition
    Label(Label),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Binary(op) => f.write_str(op.symbol()),
            Operator::Assign => f.write_str("="),
            Operator::IfFalse => f.write_str("if_false"),
            Operator::If => f.write_str("if"),
            Operator::Goto => f.write_str("goto"),
            Operator::Return => f.write_str("return"),
            Operator::Label(label) => write!(f, "{}:", label),
        }
    }
}

/// One four-address instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quadruple {
    pub op: Operator,
    pub arg1: Operand,
    pub arg2: Operand,
    pub result: Operand,
}

impl Quadruple {
    pub fn binary(op: BinOp, left: Operand, right: Operand, result: Temp) -> Self {
        Quadruple {
            op: Operator::Binary(op),
            arg1: left,
            arg2: right,
            result: Operand::Temp(result),
        }
    }

    pub fn assign(value: Operand, target: impl Into<String>) -> Self {
        Quadruple {
            op: Operator::Assign,
            arg1: value,
            arg2: Operand::None,
            result: Operand::Name(target.into()),
        }
    }

    pub fn if_false(condition: Operand, target: Label) -> Self {
        Self::jump(Operator::IfFalse, condition, target)
    }

    pub fn if_true(condition: Operand, target: Label) -> Self {
        Self::jump(Operator::If, condition, target)
    }

    pub fn goto(target: Label) -> Self {
        Self::jump(Operator::Goto, Operand::None, target)
    }

    fn jump(op: Operator, condition: Operand, target: Label) -> Self {
        Quadruple {
            op,
            arg1: condition,
            arg2: Operand::None,
            result: Operand::Label(target),
        }
    }

    pub fn label(label: Label) -> Self {
        Quadruple {
            op: Operator::Label(label),
            arg1: Operand::None,
            arg2: Operand::None,
            result: Operand::None,
        }
    }

    pub fn ret(value: Operand) -> Self {
        Quadruple {
            op: Operator::Return,
            arg1: value,
            arg2: Operand::None,
            result: Operand::None,
        }
    }

    /// The label this quadruple defines, if it is a label definition.
    pub fn defined_label(&self) -> Option<Label> {
        match self.op {
            Operator::Label(label) => Some(label),
            _ => None,
        }
    }

    /// The label this quadruple may transfer control to.
    pub fn jump_target(&self) -> Option<Label> {
        match (self.op, &self.result) {
            (Operator::IfFalse | Operator::If | Operator::Goto, Operand::Label(label)) => {
                Some(*label)
            }
            _ => None,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self.op, Operator::IfFalse | Operator::If | Operator::Goto)
    }
}

impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(
            f,
            &self.op.to_string(),
            &self.arg1.to_string(),
            &self.arg2.to_string(),
            &self.result.to_string(),
        )
    }
}

fn write_row(
    f: &mut impl fmt::Write,
    op: &str,
    arg1: &str,
    arg2: &str,
    result: &str,
) -> fmt::Result {
    write!(
        f,
        "{:<ow$} | {:<aw$} | {:<aw$} | {}",
        op,
        arg1,
        arg2,
        result,
        ow = OPERATOR_WIDTH,
        aw = OPERAND_WIDTH
    )
}

/// Header line of the diagnostic listing
pub fn listing_header() -> String {
    let mut header = String::new();
    // Writing into a String cannot fail
    let _ = write_row(&mut header, "Operator", "Operand1", "Operand2", "Result");
    header
}

/// Render the header followed by one line per quadruple.
pub fn render_listing(quadruples: &[Quadruple]) -> String {
    let mut out = listing_header();
    for quad in quadruples {
        out.push('\n');
        out.push_str(&quad.to_string());
    }
    out
}

/// Index of each label definition within `quadruples`.
///
/// A label defined more than once maps to its last definition; use
/// [`verify`](crate::ir::verify::verify) to reject such listings.
pub fn label_positions(quadruples: &[Quadruple]) -> FxHashMap<Label, usize> {
    quadruples
        .iter()
        .enumerate()
        .filter_map(|(index, quad)| quad.defined_label().map(|label| (label, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_rendering() {
        let quad = Quadruple::binary(
            BinOp::Add,
            Operand::Name("a".into()),
            Operand::Name("b".into()),
            Temp(0),
        );
        assert_eq!(quad.to_string(), "+        | a         | b         | t0");

        assert_eq!(
            Quadruple::label(Label(3)).to_string(),
            "L3:      |           |           | "
        );
        assert_eq!(
            Quadruple::if_false(Operand::Temp(Temp(1)), Label(0)).to_string(),
            "if_false | t1        |           | L0"
        );
        assert_eq!(
            Quadruple::assign(Operand::Name("5".into()), "x").to_string(),
            "=        | 5         |           | x"
        );
    }

    #[test]
    fn test_listing_has_header() {
        let listing = render_listing(&[Quadruple::goto(Label(1))]);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Operator | Operand1  | Operand2  | Result");
        assert_eq!(lines[1], "goto     |           |           | L1");
    }

    #[test]
    fn test_jump_targets() {
        assert_eq!(Quadruple::goto(Label(2)).jump_target(), Some(Label(2)));
        assert_eq!(
            Quadruple::if_true(Operand::Name("c".into()), Label(4)).jump_target(),
            Some(Label(4))
        );
        assert_eq!(Quadruple::label(Label(2)).jump_target(), None);
        assert_eq!(Quadruple::label(Label(2)).defined_label(), Some(Label(2)));
        assert!(!Quadruple::ret(Operand::Name("x".into())).is_jump());
    }

    #[test]
    fn test_label_positions() {
        let quads = [
            Quadruple::label(Label(0)),
            Quadruple::goto(Label(1)),
            Quadruple::label(Label(1)),
        ];
        let positions = label_positions(&quads);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[&Label(0)], 0);
        assert_eq!(positions[&Label(1)], 2);
    }
}
