//! Listing verification: structural checks on a finished quadruple sequence.
//!
//! Catches lowering bugs (a jump to a label that never gets placed, a
//! temporary read before the instruction that computes it) before a listing
//! is handed to a later stage.

use crate::ir::errors::ListingError;
use crate::ir::quadruple::{Label, Operand, Quadruple, Temp};
use rustc_hash::FxHashSet;

/// Check that every label is defined exactly once, every jump targets a
/// defined label, and every temporary is assigned exactly once before it
/// is read.
///
/// Returns the first violation in listing order.
pub fn verify(quadruples: &[Quadruple]) -> Result<(), ListingError> {
    let labels = defined_labels(quadruples)?;

    let mut temps: FxHashSet<Temp> = FxHashSet::default();
    for (index, quad) in quadruples.iter().enumerate() {
        if let Some(label) = quad.jump_target() {
            if !labels.contains(&label) {
                return Err(ListingError::UndefinedLabel { label, index });
            }
        }

        for arg in [&quad.arg1, &quad.arg2] {
            if let Operand::Temp(temp) = arg {
                if !temps.contains(temp) {
                    return Err(ListingError::UndefinedTemp { temp: *temp, index });
                }
            }
        }

        if let Operand::Temp(temp) = quad.result {
            if !temps.insert(temp) {
                return Err(ListingError::DuplicateTemp { temp });
            }
        }
    }

    Ok(())
}

fn defined_labels(quadruples: &[Quadruple]) -> Result<FxHashSet<Label>, ListingError> {
    let mut labels = FxHashSet::default();
    for label in quadruples.iter().filter_map(Quadruple::defined_label) {
        if !labels.insert(label) {
            return Err(ListingError::DuplicateLabel { label });
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::generator::lower;
    use crate::parser::ast::BinOp;
    use crate::parser::parse::Parser;
    use crate::parser::simplify::simplify;

    fn name(text: &str) -> Operand {
        Operand::Name(text.to_string())
    }

    #[test]
    fn test_generated_listing_verifies() {
        let source = "
            total = 0;
            for (i = 0; i < n; i++) {
                if (i % 2 == 0) { total = total + i; } else { total = total - 1; }
            }
            switch (total) { case 0: r = 1; default: r = total ^ 2; }
            do { r = r / 2; } while (r > 1);
            return r;
        ";
        let tree = simplify(&Parser::from_source(source).parse().unwrap());
        let quads = lower(&tree).unwrap();
        assert_eq!(verify(&quads), Ok(()));
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(verify(&[]), Ok(()));
    }

    #[test]
    fn test_duplicate_label() {
        let quads = [Quadruple::label(Label(0)), Quadruple::label(Label(0))];
        assert_eq!(
            verify(&quads),
            Err(ListingError::DuplicateLabel { label: Label(0) })
        );
    }

    #[test]
    fn test_undefined_jump_target() {
        let quads = [Quadruple::label(Label(0)), Quadruple::goto(Label(4))];
        let err = verify(&quads).unwrap_err();
        assert_eq!(err, ListingError::UndefinedLabel { label: Label(4), index: 1 });
        assert_eq!(err.to_string(), "quadruple 1 jumps to undefined label L4");
    }

    #[test]
    fn test_forward_jumps_are_fine() {
        let quads = [
            Quadruple::if_false(name("c"), Label(1)),
            Quadruple::assign(name("1"), "x"),
            Quadruple::label(Label(1)),
        ];
        assert_eq!(verify(&quads), Ok(()));
    }

    #[test]
    fn test_temp_read_before_assignment() {
        let quads = [
            Quadruple::assign(Operand::Temp(Temp(0)), "x"),
            Quadruple::binary(BinOp::Add, name("a"), name("b"), Temp(0)),
        ];
        assert_eq!(
            verify(&quads),
            Err(ListingError::UndefinedTemp { temp: Temp(0), index: 0 })
        );
    }

    #[test]
    fn test_temp_assigned_twice() {
        let quads = [
            Quadruple::binary(BinOp::Add, name("a"), name("b"), Temp(2)),
            Quadruple::binary(BinOp::Mul, Operand::Temp(Temp(2)), name("c"), Temp(2)),
        ];
        assert_eq!(
            verify(&quads),
            Err(ListingError::DuplicateTemp { temp: Temp(2) })
        );
    }
}
