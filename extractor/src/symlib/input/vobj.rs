//! Object files written by the vasm assembler ("vobj" format).
//!
//! Numbers in this format have a variable length.  The first byte
//! `b` holds the value itself when `b <= 0x7F`.  Otherwise `b - 0x80`
//! is the count of little-endian bytes which follow and hold the
//! value (zero such bytes means the value is zero).  Strings are
//! terminated by a NUL byte.
//!
//! After the `VOBJ` signature come a flags byte, the bits-per-byte
//! and bytes-per-address numbers, the CPU name, the number of
//! sections and the number of symbols.  Each symbol is a name, a
//! type, flags, a section index, a signed value and a size.  Only
//! symbols of type 3 are of interest to us.
use std::io::BufRead;
use std::path::Path;

use base::prelude::Symbol;

use super::super::reader::{open_input, ByteReader};
use super::super::types::ExtractionFailure;
use super::{malformed, symbol_name, Decoded, InputFormat};

const MAGIC: &[u8; 4] = b"VOBJ";
const MAX_NUMBER_BYTES: u8 = 8;
const WANTED_SYMBOL_TYPE: i64 = 3;

/// Reads a variable-length number.  When `signed` is set, the value
/// is sign-extended from the top bit of the bytes actually present.
pub(super) fn read_number<R: BufRead>(
    reader: &mut ByteReader<R>,
    signed: bool,
) -> Result<i64, ExtractionFailure> {
    let lead = reader.read_u8()?;
    if lead <= 0x7F {
        return Ok(i64::from(lead));
    }
    let byte_count = lead - 0x80;
    if byte_count == 0 {
        return Ok(0);
    }
    if byte_count > MAX_NUMBER_BYTES {
        return Err(malformed(
            reader.filename(),
            InputFormat::Vobj,
            None,
            format!("too many bytes specified for number ({byte_count})"),
        ));
    }
    let bytes = reader.read_bytes(usize::from(byte_count))?;
    let mut value: u64 = bytes
        .iter()
        .rev()
        .fold(0_u64, |acc, b| (acc << 8) | u64::from(*b));
    let bits = u32::from(byte_count) * 8;
    if signed && bits < 64 && value & (1_u64 << (bits - 1)) != 0 {
        value |= !((1_u64 << bits) - 1);
    }
    Ok(value as i64)
}

pub(super) fn read_string<R: BufRead>(reader: &mut ByteReader<R>) -> Result<Vec<u8>, ExtractionFailure> {
    let mut result: Vec<u8> = Vec::new();
    loop {
        match reader.read_u8()? {
            0 => {
                return Ok(result);
            }
            b => {
                result.push(b);
            }
        }
    }
}

pub(super) fn decode(path: &Path) -> Result<Decoded, ExtractionFailure> {
    decode_from(open_input(path)?, path)
}

pub(super) fn decode_from<R: BufRead>(input: R, path: &Path) -> Result<Decoded, ExtractionFailure> {
    let mut reader = ByteReader::new(input, path);
    match reader.probe_magic(MAGIC.len())? {
        Some(magic) if magic == MAGIC => (),
        _ => {
            return Ok(Decoded::Rejected);
        }
    }
    reader.skip(1)?; // flags
    read_number(&mut reader, false)?; // bits per byte
    read_number(&mut reader, false)?; // bytes per address
    read_string(&mut reader)?; // CPU name
    read_number(&mut reader, false)?; // number of sections
    let symbol_count = read_number(&mut reader, false)? as u64;

    let mut symbols: Vec<Symbol> = Vec::new();
    for _ in 0..symbol_count {
        let name = read_string(&mut reader)?;
        let symbol_type = read_number(&mut reader, false)?;
        read_number(&mut reader, false)?; // flags
        read_number(&mut reader, false)?; // section index
        let value = read_number(&mut reader, true)?;
        read_number(&mut reader, false)?; // size
        if symbol_type == WANTED_SYMBOL_TYPE {
            let name = symbol_name(name, reader.filename(), InputFormat::Vobj)?;
            symbols.push(Symbol { name, value });
        }
    }
    Ok(Decoded::Accepted(symbols))
}
