//! Semantic tree → quadruple listing
//!
//! - [`generator`]: The [`generator::QuadrupleGenerator`] struct, expression and
//!   assignment lowering
//! - `control`: `if`/`while`/`for`/`do`/`switch` lowering, a separate
//!   `impl QuadrupleGenerator` block
//! - [`quadruple`]: Instruction records, textual listing, label table
//! - [`verify`]: Integrity checks on a finished listing
//! - [`errors`]: [`errors::StructuralError`] and [`errors::ListingError`]
//! - [`constants`]: Naming prefixes and listing widths

pub mod constants;
mod control;
pub mod errors;
pub mod generator;
pub mod quadruple;
pub mod verify;
