//! Error types for lowering and listing verification
//!
//! [`StructuralError`] is raised while lowering a tree whose shape the
//! generator does not recognize. [`ListingError`] is raised by
//! [`verify`](crate::ir::verify::verify) when a finished listing breaks one of
//! its own invariants. Both are fatal for the current run.

use crate::ir::quadruple::{Label, Temp};
use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// The tree handed to the generator has a shape no lowering rule covers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A node lacks a child its kind requires (e.g. a `while` without a condition)
    #[error("'{node}' at {location} is missing its {role}")]
    MissingChild {
        node: String,
        role: &'static str,
        location: SourceLocation,
    },

    /// A node appears where its kind has no meaning (e.g. `case` outside a `switch`)
    #[error("'{node}' at {location} cannot appear {context}")]
    Misplaced {
        node: String,
        context: &'static str,
        location: SourceLocation,
    },

    /// The left side of `=`, `++` or `--` is not an identifier
    #[error("assignment target at {location} must be an identifier, found '{found}'")]
    InvalidTarget {
        found: String,
        location: SourceLocation,
    },
}

/// A quadruple listing breaks its label or temporary invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("label {label} is defined more than once")]
    DuplicateLabel { label: Label },

    #[error("quadruple {index} jumps to undefined label {label}")]
    UndefinedLabel { label: Label, index: usize },

    #[error("temporary {temp} is assigned more than once")]
    DuplicateTemp { temp: Temp },

    #[error("quadruple {index} reads temporary {temp} before it is assigned")]
    UndefinedTemp { temp: Temp, index: usize },
}
