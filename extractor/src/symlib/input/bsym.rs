//! Binary symbol files, as written by this tool in its binary output
//! mode.
//!
//! Layout (all integers little-endian):
//!
//! | field   | size                          |
//! |---------|-------------------------------|
//! | magic   | 4 bytes, `BSYM`               |
//! | count   | u32                           |
//! | symbols | `count` times: u8 name length, name bytes, i64 value |
use std::io::BufRead;
use std::path::Path;

use base::prelude::Symbol;

use super::super::reader::{open_input, ByteReader};
use super::super::types::ExtractionFailure;
use super::{symbol_name, Decoded, InputFormat};

pub(crate) const BSYM_MAGIC: &[u8; 4] = b"BSYM";

/// Upper bound on how much space we reserve ahead of time, so that a
/// corrupt count cannot make us allocate a huge vector.
const MAX_PREALLOCATED_SYMBOLS: usize = 4096;

pub(super) fn decode(path: &Path) -> Result<Decoded, ExtractionFailure> {
    decode_from(open_input(path)?, path)
}

pub(super) fn decode_from<R: BufRead>(input: R, path: &Path) -> Result<Decoded, ExtractionFailure> {
    let mut reader = ByteReader::new(input, path);
    match reader.probe_magic(BSYM_MAGIC.len())? {
        Some(magic) if magic == BSYM_MAGIC => (),
        _ => {
            return Ok(Decoded::Rejected);
        }
    }
    let count = reader.read_u32_le()? as usize;
    let mut symbols: Vec<Symbol> = Vec::with_capacity(count.min(MAX_PREALLOCATED_SYMBOLS));
    for _ in 0..count {
        let name_len = usize::from(reader.read_u8()?);
        let name = symbol_name(
            reader.read_bytes(name_len)?,
            reader.filename(),
            InputFormat::SymbolBinary,
        )?;
        let value = reader.read_i64_le()?;
        symbols.push(Symbol { name, value });
    }
    Ok(Decoded::Accepted(symbols))
}
