//! # Introduction
//!
//! quadc is the front end of a small imperative language: it parses program
//! text into a syntax tree, simplifies that tree into its semantic form, and
//! lowers the result into a flat listing of quadruples with synthetic
//! temporaries and labels. A terminal viewer built with
//! [ratatui](https://docs.rs/ratatui) shows every stage side by side.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → raw tree → Simplifier → semantic tree → Generator → quadruples
//! ```
//!
//! 1. [`parser`] — tokenises the source, builds the raw tree, and simplifies it.
//! 2. [`ir`] — lowers the semantic tree into [`ir::quadruple::Quadruple`]s and
//!    verifies the finished listing.
//! 3. [`ui`] — ratatui-based viewer; not part of the stable library API.
//!
//! ## Supported language
//!
//! Statements: assignment, `x++`/`x--`, expression statements, `return`,
//! `if`/`else`, `while`, `do`-`while`, `for`, `switch`/`case`/`default`,
//! nested `{ }` blocks. Expressions: numbers, identifiers, parentheses and
//! the binary operators `^ * / % + - < > <= >= == !=`.

pub mod ir;
pub mod parser;
pub mod ui;

use ir::errors::StructuralError;
use ir::quadruple::Quadruple;
use parser::parse::{Parser, SyntaxError};
use thiserror::Error;

/// Any failure of the one-call pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Lowering error: {0}")]
    Structure(#[from] StructuralError),
}

/// Lex, parse, simplify and lower `source` in one call.
pub fn compile(source: &str) -> Result<Vec<Quadruple>, CompileError> {
    let raw = Parser::from_source(source).parse()?;
    let tree = parser::simplify::simplify(&raw);
    Ok(ir::generator::lower(&tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_success() {
        let quads = compile("x = a + b;").unwrap();
        assert_eq!(quads.len(), 2);
    }

    #[test]
    fn test_compile_reports_syntax_error() {
        let err = compile("x = ;").unwrap_err();
        assert!(matches!(err, CompileError::Syntax(_)));
        assert!(err.to_string().starts_with("Syntax error at line 1, column 5"));
    }
}
