//! Rendering of symbol values as text.
//!
//! A symbol's value is stored as a signed 64-bit quantity.  When it
//! is written out, the user chooses an effective width and
//! signedness ([`ValueType`]) and a numeric base ([`NumberBase`]).
use std::error::Error;
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

#[cfg(test)]
use test_strategy::Arbitrary;

const LOW_32_BITS: u64 = 0xFFFF_FFFF;

/// Signals that a textual option (for example `u32` or `hex`) was
/// not one of the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub what: &'static str,
    pub got: String,
}

impl Display for UnknownOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "invalid {} \"{}\"", self.what, self.got)
    }
}

impl Error for UnknownOption {}

/// The width and signedness with which a value is displayed.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Unsigned32,
    Unsigned64,
    Signed32,
    Signed64,
}

impl ValueType {
    #[must_use]
    pub fn is_signed(self) -> bool {
        matches!(self, ValueType::Signed32 | ValueType::Signed64)
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            ValueType::Unsigned32 | ValueType::Signed32 => 32,
            ValueType::Unsigned64 | ValueType::Signed64 => 64,
        }
    }
}

impl FromStr for ValueType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<ValueType, UnknownOption> {
        match s.to_ascii_lowercase().as_str() {
            "u32" => Ok(ValueType::Unsigned32),
            "u64" => Ok(ValueType::Unsigned64),
            "s32" => Ok(ValueType::Signed32),
            "s64" => Ok(ValueType::Signed64),
            _ => Err(UnknownOption {
                what: "value type",
                got: s.to_string(),
            }),
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ValueType::Unsigned32 => "u32",
            ValueType::Unsigned64 => "u64",
            ValueType::Signed32 => "s32",
            ValueType::Signed64 => "s64",
        })
    }
}

/// The numeric base in which a value is displayed.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberBase {
    #[default]
    Hex,
    Decimal,
    Binary,
}

impl FromStr for NumberBase {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<NumberBase, UnknownOption> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(NumberBase::Hex),
            "dec" => Ok(NumberBase::Decimal),
            "bin" => Ok(NumberBase::Binary),
            _ => Err(UnknownOption {
                what: "numerical system",
                got: s.to_string(),
            }),
        }
    }
}

impl Display for NumberBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            NumberBase::Hex => "hex",
            NumberBase::Decimal => "dec",
            NumberBase::Binary => "bin",
        })
    }
}

/// How values are rendered in the text output formats.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueFormat {
    pub value_type: ValueType,
    pub base: NumberBase,
}

impl ValueFormat {
    #[must_use]
    pub fn new(value_type: ValueType, base: NumberBase) -> ValueFormat {
        ValueFormat { value_type, base }
    }

    /// Returns something which displays `value` in this format.
    #[must_use]
    pub fn display(self, value: i64) -> DisplayValue {
        DisplayValue {
            format: self,
            value,
        }
    }
}

/// A value paired with the format it should be displayed in.
///
/// Signed value types are always displayed with a leading sign
/// character: `-` for negative values, a space otherwise.  This keeps
/// the columns of a listing aligned.  The magnitude is then truncated
/// to 32 bits for the 32-bit value types and rendered in the chosen
/// base.  Hexadecimal uses upper-case digits and a `0x` prefix;
/// binary uses a `0b` prefix and always shows every bit of the
/// chosen width.
///
/// Unsigned 64-bit decimal output is unsigned too, so `-1` is shown
/// as `18446744073709551615` rather than `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayValue {
    format: ValueFormat,
    value: i64,
}

impl Display for DisplayValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let value_type = self.format.value_type;
        let mut magnitude: u64 = self.value as u64;
        if value_type.is_signed() {
            if self.value < 0 {
                f.write_char('-')?;
                // unsigned_abs() cannot overflow, even for i64::MIN.
                magnitude = self.value.unsigned_abs();
            } else {
                f.write_char(' ')?;
            }
        }
        if value_type.bits() == 32 {
            magnitude &= LOW_32_BITS;
        }
        match (self.format.base, value_type.bits()) {
            (NumberBase::Hex, _) => write!(f, "0x{magnitude:X}"),
            (NumberBase::Decimal, _) => write!(f, "{magnitude}"),
            (NumberBase::Binary, 32) => write!(f, "0b{magnitude:032b}"),
            (NumberBase::Binary, _) => write!(f, "0b{magnitude:064b}"),
        }
    }
}
