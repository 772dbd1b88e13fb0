//! Symbol files written by the Psy-Q linker.
//!
//! The file begins with the signature `MND` and a version byte (we
//! understand only version 1).  Symbol records start at offset 8 and
//! continue to the end of the file.  Each record is a 32-bit signed
//! little-endian value, a one-byte type tag and a name (one length
//! byte followed by that many bytes).  Only records with tag 1 or 2
//! describe symbols; the others are read (so that we stay in step
//! with the record structure) and ignored.
use std::io::BufRead;
use std::path::Path;

use tracing::{event, Level};

use base::prelude::Symbol;

use super::super::reader::{open_input, ByteReader};
use super::super::types::ExtractionFailure;
use super::{symbol_name, Decoded, InputFormat};

const MAGIC: &[u8; 3] = b"MND";
const SUPPORTED_VERSION: u8 = 1;
const FIRST_RECORD_OFFSET: usize = 8;

fn is_symbol_tag(tag: u8) -> bool {
    matches!(tag, 1 | 2)
}

pub(super) fn decode(path: &Path) -> Result<Decoded, ExtractionFailure> {
    decode_from(open_input(path)?, path)
}

pub(super) fn decode_from<R: BufRead>(input: R, path: &Path) -> Result<Decoded, ExtractionFailure> {
    let mut reader = ByteReader::new(input, path);
    if reader.at_end()? {
        return Ok(Decoded::Rejected);
    }
    let header_len = MAGIC.len() + 1;
    match reader.probe_magic(header_len)? {
        Some(header) if header[..MAGIC.len()] == MAGIC[..] => {
            let version = header[MAGIC.len()];
            if version != SUPPORTED_VERSION {
                event!(
                    Level::DEBUG,
                    "{} has a Psy-Q signature but unsupported version {version}",
                    path.display()
                );
                return Ok(Decoded::Rejected);
            }
        }
        _ => {
            return Ok(Decoded::Rejected);
        }
    }
    reader.skip(FIRST_RECORD_OFFSET - header_len)?;

    let mut symbols: Vec<Symbol> = Vec::new();
    while !reader.at_end()? {
        let value = reader.read_i32_le()?;
        let tag = reader.read_u8()?;
        let name_len = usize::from(reader.read_u8()?);
        let name = reader.read_bytes(name_len)?;
        if is_symbol_tag(tag) {
            let name = symbol_name(name, reader.filename(), InputFormat::PsyQ)?;
            symbols.push(Symbol { name, value });
        } else {
            event!(Level::TRACE, "skipping Psy-Q record with tag {tag}");
        }
    }
    Ok(Decoded::Accepted(symbols))
}
