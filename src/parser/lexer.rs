//! Lexer (scanner) for the statement language
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the parser.
//! The scanner never fails: anything it cannot classify becomes a
//! [`TokenKind::Error`] token whose text describes the problem, and the parser
//! turns the first such token it reaches into a syntax error.

use super::ast::SourceLocation;
use std::fmt;

pub(crate) const KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "return", "do", "switch", "case", "default",
];

/// Multi-character operators are listed before their single-character prefixes.
const OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+", "-", "*", "/", "%", "^", "=", "<", ">",
];

const DELIMITERS: &[char] = &['(', ')', '{', '}', '[', ']', ';', ',', '.', ':'];

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Number,
    Delimiter,
    Comment,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Number => "number",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Comment => "comment",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// An immutable classified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            text: text.into(),
            location,
        }
    }

    /// True when this token is of `kind` and spells exactly `text`.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenKind::Keyword, word)
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.is(TokenKind::Operator, symbol)
    }

    pub fn is_delimiter(&self, symbol: &str) -> bool {
        self.is(TokenKind::Delimiter, symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Error => write!(f, "invalid input ({})", self.text),
            TokenKind::Identifier | TokenKind::Number => write!(f, "{} '{}'", self.kind, self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Scanner over a source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    open_delimiters: Vec<char>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            open_delimiters: Vec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            tokens.push(self.next_token());
        }

        tokens
    }

    /// Get next token
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::Error, "unexpected end of input", loc),
        };

        if ch == '/' && self.peek_ahead(1) == Some('/') {
            return self.line_comment(loc);
        }
        if ch == '/' && self.peek_ahead(1) == Some('*') {
            return self.block_comment(loc);
        }
        if ch.is_ascii_digit() {
            return self.number_literal(loc);
        }
        if ch.is_ascii_alphabetic() {
            return self.identifier_or_keyword(loc);
        }
        if let Some(symbol) = self.match_operator() {
            return Token::new(TokenKind::Operator, symbol, loc);
        }
        if DELIMITERS.contains(&ch) {
            self.advance();
            return self.delimiter(ch, loc);
        }

        self.advance();
        let message = match ch {
            '!' | '&' | '|' => format!("invalid operator '{}'", ch),
            _ => format!("unrecognized character '{}'", ch),
        };
        Token::new(TokenKind::Error, message, loc)
    }

    fn match_operator(&mut self) -> Option<&'static str> {
        let symbol = OPERATORS.iter().copied().find(|op| {
            op.chars()
                .enumerate()
                .all(|(i, c)| self.peek_ahead(i) == Some(c))
        })?;
        for _ in symbol.chars() {
            self.advance();
        }
        Some(symbol)
    }

    /// Track bracket nesting; an unmatched closer is reported as an error token.
    fn delimiter(&mut self, ch: char, loc: SourceLocation) -> Token {
        match ch {
            '(' | '{' | '[' => self.open_delimiters.push(ch),
            ')' | '}' | ']' => {
                let opener = match ch {
                    ')' => '(',
                    '}' => '{',
                    _ => '[',
                };
                if self.open_delimiters.last() == Some(&opener) {
                    self.open_delimiters.pop();
                } else {
                    return Token::new(
                        TokenKind::Error,
                        format!("unmatched delimiter '{}'", ch),
                        loc,
                    );
                }
            }
            _ => {}
        }
        Token::new(TokenKind::Delimiter, ch.to_string(), loc)
    }

    /// Parse numeric literal (digits with at most one decimal point)
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        let mut seen_point = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else if ch == '.'
                && !seen_point
                && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
            {
                seen_point = true;
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, text, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if KEYWORDS.contains(&ident.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, ident, loc)
    }

    /// Single-line comment (// ...), newline excluded
    fn line_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        Token::new(TokenKind::Comment, text, loc)
    }

    /// Multi-line comment (/* ... */)
    fn block_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(self.advance().unwrap_or('/'));
        text.push(self.advance().unwrap_or('*'));

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                text.push_str("*/");
                return Token::new(TokenKind::Comment, text, loc);
            }
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }

        Token::new(TokenKind::Error, "unterminated block comment", loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
