//! Expression parsing implementation
//!
//! Binary operators are parsed by precedence climbing. Each level parses an
//! operand one level tighter, then keeps folding `left op right` while the
//! next token is an operator of its own level, which makes every operator
//! left-associative:
//!
//! | level | operators                  |
//! |-------|----------------------------|
//! | 4     | `^`                        |
//! | 3     | `*` `/` `%`                |
//! | 2     | `+` `-`                    |
//! | 1     | `<` `>` `<=` `>=` `==` `!=`|
//!
//! Operands are numbers, identifiers, and parenthesized expressions.
//!
//! Each fold and each parenthesis opens a nesting level, so a chain of
//! operators counts towards the nesting limit just like explicit grouping.

use crate::parser::ast::{BinOp, Node, SourceLocation};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};

const LOWEST_PRECEDENCE: u8 = 1;
const HIGHEST_PRECEDENCE: u8 = 4;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.parse_binary(LOWEST_PRECEDENCE)
    }

    fn parse_binary(&mut self, level: u8) -> Result<Node, SyntaxError> {
        if level > HIGHEST_PRECEDENCE {
            return self.parse_operand();
        }

        let mut left = self.parse_binary(level + 1)?;
        let mut folds = 0;

        while let Some((op, loc)) = self.peek_binary_op() {
            if op.precedence() != level {
                break;
            }
            self.enter_nesting()?;
            folds += 1;
            self.advance();
            let right = self.parse_binary(level + 1)?;
            left = Node::binary(op, left, right, loc);
        }

        self.exit_nesting(folds);
        Ok(left)
    }

    fn peek_binary_op(&self) -> Option<(BinOp, SourceLocation)> {
        let token = self.peek()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        BinOp::from_symbol(&token.text).map(|op| (op, token.location))
    }

    /// Parse a number, an identifier, or `( expression )`
    fn parse_operand(&mut self) -> Result<Node, SyntaxError> {
        let Some(token) = self.peek() else {
            return Err(self.error_expected("operand"));
        };
        let loc = token.location;

        match token.kind {
            TokenKind::Number => {
                let node = Node::number(token.text.clone(), loc);
                self.advance();
                Ok(node)
            }
            TokenKind::Identifier => {
                let node = Node::identifier(token.text.clone(), loc);
                self.advance();
                Ok(node)
            }
            TokenKind::Delimiter if token.text == "(" => {
                self.enter_nesting()?;
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_delimiter(")")?;
                self.exit_nesting(1);
                Ok(inner)
            }
            _ => Err(self.error_expected("operand")),
        }
    }
}
