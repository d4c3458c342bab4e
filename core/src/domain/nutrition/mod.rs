//! Best-effort extraction of nutrition values from generated recipe markdown.
//!
//! The parser is lossy and never fails: a field whose marker cannot be found
//! is simply `None`. Values are taken at face value, no unit conversion.

pub mod parser;

pub use parser::*;
