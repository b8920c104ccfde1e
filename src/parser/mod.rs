//! Source text → syntax tree
//!
//! This module transforms program text into a semantic syntax tree:
//! - [`lexer`]: Scanning (source text → classified tokens)
//! - [`parse`]: The [`parse::Parser`] struct, token cursor, and [`parse::SyntaxError`]
//! - `statements` / `expressions`: grammar rules, split across `impl Parser` blocks
//! - [`simplify`]: Raw tree → semantic tree
//! - [`ast`]: Node definitions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod simplify;
mod statements;
