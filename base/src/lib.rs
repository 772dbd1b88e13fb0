//! The `base` crate defines the things about symbols which are
//! useful to every tool which reads or writes symbol tables.  The
//! idea is that a tool which only needs to render symbol values
//! would depend on the base crate but would not need to depend on
//! the decoders for the various input formats.

mod symbol;
mod value;

pub mod prelude;
