//! Multi-step suggestion session.
//!
//! [`machine::transition`] is a pure function over [`SessionState`]; the
//! async work it asks for is described by a [`SessionEffect`] and carried
//! out by [`driver::SuggestionSession`].

pub mod driver;
pub mod entities;
pub mod errors;
pub mod machine;

pub use driver::*;
pub use entities::*;
pub use errors::*;
pub use machine::*;
