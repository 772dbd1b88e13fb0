use std::fmt::{self, Display, Formatter};

/// A symbol as it appears in a symbol table: a name and the value
/// bound to it.
///
/// Values are always held at full 64-bit precision, whatever the
/// native width of the format they were read from.  The width and
/// signedness used to display a value are chosen only when the value
/// is written out (see [`ValueFormat`](crate::prelude::ValueFormat)).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub value: i64,
}

impl Symbol {
    pub fn new<S: Into<String>>(name: S, value: i64) -> Symbol {
        Symbol {
            name: name.into(),
            value,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}={:#x}", self.name, self.value)
    }
}

#[test]
fn test_symbol_display() {
    assert_eq!(Symbol::new("start", 0x200).to_string(), "start=0x200");
}
