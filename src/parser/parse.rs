//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, the token cursor, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, cursor helpers, and coordination
//! - `statements`: Parsing statements (if, while, for, switch, assignments, ...)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Cursor
//!
//! The parser walks a single index over the token vector. Reading past the end
//! yields `None` rather than an error, and [`Parser::retreat`] rewinds exactly
//! one token; the grammar never needs more than that.
//!
//! # Nesting
//!
//! Parentheses, braces and each operator folded into a chain deepen the tree
//! by one level. The parser tracks that depth and refuses to go past
//! [`MAX_NESTING`], so later passes that recurse over expressions and blocks
//! stay within a bounded stack.

use crate::parser::ast::{Node, SourceLocation};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use thiserror::Error;

/// Maximum syntactic nesting depth
pub const MAX_NESTING: usize = 256;

/// Raised when a token does not match the expected grammar continuation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {location}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub location: SourceLocation,
}

/// Recursive descent parser over a classified token sequence
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Build a parser over `tokens`. Comment tokens carry no syntax and are dropped.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Scan `source` with the bundled [`Lexer`] and build a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).tokenize())
    }

    /// Parse the whole token sequence into a raw syntax tree.
    pub fn parse(&mut self) -> Result<Node, SyntaxError> {
        self.parse_program()
    }

    // ===== Cursor =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn advance(&mut self) -> Option<&Token> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;
        self.tokens.get(self.position - 1)
    }

    /// Step the cursor back by exactly one token.
    pub(crate) fn retreat(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Location of the next token, or just past the last one at end of input.
    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.location,
            None => self.end_location(),
        }
    }

    fn end_location(&self) -> SourceLocation {
        match self.tokens.last() {
            Some(last) => SourceLocation::new(
                last.location.line,
                last.location.column + last.text.chars().count(),
            ),
            None => SourceLocation::new(1, 1),
        }
    }

    // ===== Nesting =====

    /// Open one nesting level at the cursor, failing once [`MAX_NESTING`] are open.
    pub(crate) fn enter_nesting(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_expected(format!("nesting depth of at most {}", MAX_NESTING)));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    // ===== Matching helpers =====

    pub(crate) fn check_delimiter(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is_delimiter(symbol))
    }

    pub(crate) fn check_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    pub(crate) fn check_operator(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is_operator(symbol))
    }

    pub(crate) fn match_delimiter(&mut self, symbol: &str) -> bool {
        self.check_delimiter(symbol) && self.advance().is_some()
    }

    pub(crate) fn match_keyword(&mut self, word: &str) -> bool {
        self.check_keyword(word) && self.advance().is_some()
    }

    pub(crate) fn match_operator(&mut self, symbol: &str) -> bool {
        self.check_operator(symbol) && self.advance().is_some()
    }

    pub(crate) fn expect_delimiter(&mut self, symbol: &str) -> Result<(), SyntaxError> {
        if self.match_delimiter(symbol) {
            Ok(())
        } else {
            Err(self.error_expected(format!("'{}'", symbol)))
        }
    }

    pub(crate) fn expect_keyword(&mut self, word: &str) -> Result<(), SyntaxError> {
        if self.match_keyword(word) {
            Ok(())
        } else {
            Err(self.error_expected(format!("'{}'", word)))
        }
    }

    /// Build a [`SyntaxError`] describing the token at the cursor.
    pub(crate) fn error_expected(&self, expected: impl Into<String>) -> SyntaxError {
        let found = match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        SyntaxError {
            expected: expected.into(),
            found,
            location: self.current_location(),
        }
    }
}

/// Parse a token sequence into a raw syntax tree.
pub fn parse(tokens: Vec<Token>) -> Result<Node, SyntaxError> {
    Parser::new(tokens).parse()
}
