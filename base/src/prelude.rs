//! The prelude exports the structs which are useful in representing
//! symbols and their values.  Providing this prelude is the main
//! purpose of the base crate.
pub use super::symbol::*;
pub use super::value::*;
