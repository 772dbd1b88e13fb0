use std::io::Write;
use std::path::Path;

use tracing::{event, Level};

use base::prelude::Symbol;

use super::super::input::BSYM_MAGIC;
use super::super::types::ExtractionFailure;
use super::write_failure;

/// Encodes `symbols` in the binary symbol file format (see the
/// decoder in `input/bsym.rs` for the layout).  Values are written
/// in full; the value type chosen for the text formats plays no part.
fn encode(symbols: &[Symbol]) -> Result<Vec<u8>, ExtractionFailure> {
    let count = u32::try_from(symbols.len()).map_err(|_| {
        ExtractionFailure::OutputLimitExceeded(format!(
            "{} symbols is too many for a binary symbol file",
            symbols.len()
        ))
    })?;
    let mut buf: Vec<u8> = Vec::with_capacity(8 + symbols.len() * 16);
    buf.extend_from_slice(BSYM_MAGIC);
    buf.extend_from_slice(&count.to_le_bytes());
    for sym in symbols {
        let name = sym.name.as_bytes();
        let name_len = u8::try_from(name.len()).map_err(|_| {
            ExtractionFailure::OutputLimitExceeded(format!(
                "symbol name {} is longer than 255 bytes",
                sym.name
            ))
        })?;
        buf.push(name_len);
        buf.extend_from_slice(name);
        buf.extend_from_slice(&sym.value.to_le_bytes());
    }
    Ok(buf)
}

/// Writes `symbols` as a binary symbol file.
///
/// # Errors
///
/// - A symbol name is too long for the format, or there are too
///   many symbols.
/// - Failure to write the output file.
pub(crate) fn write_binary<W: Write>(
    symbols: &[Symbol],
    writer: &mut W,
    output_file_name: &Path,
) -> Result<(), ExtractionFailure> {
    let buf = encode(symbols)?;
    event!(
        Level::DEBUG,
        "writing {} symbols ({} bytes) in binary format",
        symbols.len(),
        buf.len()
    );
    writer
        .write_all(&buf)
        .map_err(|e| write_failure(output_file_name, e))
}
