//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! program     ::= statement*
//! statement   ::= return_stmt | if_stmt | while_stmt | for_stmt | do_stmt
//!               | switch_stmt | block | ';' | simple ';'
//! simple      ::= ident '=' expression | ident ('++' | '--') | expression
//! block       ::= '{' statement* '}'
//! if_stmt     ::= 'if' '(' expression ')' block ('else' block)?
//! while_stmt  ::= 'while' '(' expression ')' block
//! for_stmt    ::= 'for' '(' simple ';' expression ';' simple ')' block
//! do_stmt     ::= 'do' block 'while' '(' expression ')' ';'
//! switch_stmt ::= 'switch' '(' expression ')' '{' arm* '}'
//! arm         ::= 'case' expression ':' statement* | 'default' ':' statement*
//! return_stmt ::= 'return' expression ';'
//! ```
//!
//! Top-level statements are chained with `;` separator nodes, folded to the
//! left so that each separator holds everything before it on the left and
//! the next statement on the right. Blocks keep their statements as a list.

use crate::parser::ast::{Node, NodeKind, SourceLocation, StepOp};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse statements until end of input
    pub(crate) fn parse_program(&mut self) -> Result<Node, SyntaxError> {
        let start = self.current_location();
        let mut root: Option<Node> = None;

        while !self.is_at_end() {
            let statement = self.parse_statement()?;
            root = Some(match root {
                None => statement,
                Some(previous) => Node::new(NodeKind::Separator, statement.location)
                    .with_left(previous)
                    .with_right(statement),
            });
        }

        Ok(root.unwrap_or_else(|| Node::block(Vec::new(), start)))
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Node, SyntaxError> {
        let loc = self.current_location();

        if self.match_keyword("return") {
            return self.parse_return_statement(loc);
        }

        if self.match_keyword("if") {
            return self.parse_if_statement(loc);
        }

        if self.match_keyword("while") {
            return self.parse_while_statement(loc);
        }

        if self.match_keyword("for") {
            return self.parse_for_statement(loc);
        }

        if self.match_keyword("do") {
            return self.parse_do_while_statement(loc);
        }

        if self.match_keyword("switch") {
            return self.parse_switch_statement(loc);
        }

        if self.check_delimiter("{") {
            return self.parse_block();
        }

        if self.match_delimiter(";") {
            return Ok(Node::new(NodeKind::Empty, loc));
        }

        if self.peek().is_some_and(|t| t.kind == TokenKind::Keyword) {
            return Err(self.error_expected("statement"));
        }

        let statement = self.parse_simple_statement()?;
        self.expect_delimiter(";")?;
        Ok(statement)
    }

    /// Parse an assignment, a step (`i++`), or a bare expression.
    ///
    /// An identifier is consumed speculatively; if neither `=` nor a step
    /// operator follows, the cursor retreats one token and the identifier is
    /// re-read as the start of an expression.
    pub(crate) fn parse_simple_statement(&mut self) -> Result<Node, SyntaxError> {
        let target = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                Node::identifier(token.text.clone(), token.location)
            }
            _ => return self.parse_expression(),
        };
        let loc = target.location;
        self.advance();

        if self.match_operator("=") {
            let value = self.parse_expression()?;
            return Ok(Node::new(NodeKind::Assign, loc)
                .with_left(target)
                .with_right(value));
        }

        if self.match_operator("++") {
            return Ok(Node::new(NodeKind::Step(StepOp::Inc), loc).with_left(target));
        }

        if self.match_operator("--") {
            return Ok(Node::new(NodeKind::Step(StepOp::Dec), loc).with_left(target));
        }

        self.retreat();
        self.parse_expression()
    }

    /// Parse `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Node, SyntaxError> {
        let loc = self.current_location();
        self.enter_nesting()?;
        self.expect_delimiter("{")?;
        let statements = self.parse_block_statements()?;
        self.expect_delimiter("}")?;
        self.exit_nesting(1);
        Ok(Node::block(statements, loc))
    }

    /// Parse block statements (inside braces, excluding the braces themselves)
    fn parse_block_statements(&mut self) -> Result<Vec<Node>, SyntaxError> {
        let mut statements = Vec::new();

        while !self.check_delimiter("}") && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse `( expression )` after a control keyword
    fn parse_condition(&mut self) -> Result<Node, SyntaxError> {
        self.expect_delimiter("(")?;
        let condition = self.parse_expression()?;
        self.expect_delimiter(")")?;
        Ok(condition)
    }

    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let value = self.parse_expression()?;
        self.expect_delimiter(";")?;
        Ok(Node::new(NodeKind::Return, loc).with_right(value))
    }

    /// Parse if statement. The else block rides along as an `else` entry in
    /// the statement list so the then-body keeps the right child.
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let condition = self.parse_condition()?;
        let then_branch = self.parse_block()?;

        let mut node = Node::new(NodeKind::If, loc)
            .with_left(condition)
            .with_right(then_branch);

        let else_loc = self.current_location();
        if self.match_keyword("else") {
            let else_branch = self.parse_block()?;
            node.statements
                .push(Node::new(NodeKind::Else, else_loc).with_right(else_branch));
        }

        Ok(node)
    }

    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(Node::new(NodeKind::While, loc)
            .with_left(condition)
            .with_right(body))
    }

    /// Parse for statement. Init and increment go into the statement list as
    /// `[init, increment]`, never into the body.
    fn parse_for_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        self.expect_delimiter("(")?;
        let init = self.parse_simple_statement()?;
        self.expect_delimiter(";")?;
        let condition = self.parse_expression()?;
        self.expect_delimiter(";")?;
        let increment = self.parse_simple_statement()?;
        self.expect_delimiter(")")?;

        let body = self.parse_block()?;

        Ok(Node::new(NodeKind::For, loc)
            .with_left(condition)
            .with_right(body)
            .with_statements(vec![init, increment]))
    }

    fn parse_do_while_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let body = self.parse_block()?;
        self.expect_keyword("while")?;
        let condition = self.parse_condition()?;
        self.expect_delimiter(";")?;

        Ok(Node::new(NodeKind::DoWhile, loc)
            .with_left(condition)
            .with_right(body))
    }

    /// Parse switch statement
    fn parse_switch_statement(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let discriminant = self.parse_condition()?;
        self.enter_nesting()?;
        self.expect_delimiter("{")?;

        let mut arms = Vec::new();

        while !self.check_delimiter("}") && !self.is_at_end() {
            let arm_loc = self.current_location();
            if self.match_keyword("case") {
                let constant = self.parse_expression()?;
                self.expect_delimiter(":")?;
                let body = self.parse_arm_body(arm_loc)?;
                arms.push(
                    Node::new(NodeKind::Case, arm_loc)
                        .with_left(constant)
                        .with_right(body),
                );
            } else if self.match_keyword("default") {
                self.expect_delimiter(":")?;
                let body = self.parse_arm_body(arm_loc)?;
                arms.push(Node::new(NodeKind::Default, arm_loc).with_right(body));
            } else {
                return Err(self.error_expected("'case' or 'default'"));
            }
        }

        self.expect_delimiter("}")?;
        self.exit_nesting(1);

        Ok(Node::new(NodeKind::Switch, loc)
            .with_left(discriminant)
            .with_statements(arms))
    }

    /// Statements of one switch arm, up to the next arm or the closing brace
    fn parse_arm_body(&mut self, loc: SourceLocation) -> Result<Node, SyntaxError> {
        let mut statements = Vec::new();
        while !self.check_keyword("case")
            && !self.check_keyword("default")
            && !self.check_delimiter("}")
            && !self.is_at_end()
        {
            statements.push(self.parse_statement()?);
        }
        Ok(Node::block(statements, loc))
    }
}
