//! Decoders for the symbol table formats we can read.
//!
//! There is no reliable way to tell the formats apart other than by
//! trying them, so each input file is offered to each decoder in
//! turn (in the order given by [`InputFormat::PRIORITY`]).  A decoder
//! which does not recognise the file says so by returning
//! [`Decoded::Rejected`], and the next decoder is tried.  Once a
//! decoder has recognised the signature of its format, it is
//! committed: malformed data from then on is an error, not a
//! rejection.
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use tracing::{event, span, Level};

use base::prelude::Symbol;

use super::types::{ExtractionFailure, LineNumber};

mod bsym;
mod listing;
mod psyq;
mod vlink;
mod vobj;

#[cfg(test)]
mod tests;

pub(crate) use bsym::BSYM_MAGIC;

/// The symbol table formats we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Binary symbol files written by this tool.
    SymbolBinary,
    /// Psy-Q linker symbol files.
    PsyQ,
    /// vasm object files (vobj).
    Vobj,
    /// vasm listing files.
    VasmListing,
    /// vlink symbol files (in vlink's default format).
    VlinkSymbols,
}

/// The result of offering a file to a decoder.
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    Accepted(Vec<Symbol>),
    Rejected,
}

impl InputFormat {
    /// The order in which decoders are tried.  The text formats come
    /// last because the vlink format has no signature at all.
    pub const PRIORITY: [InputFormat; 5] = [
        InputFormat::SymbolBinary,
        InputFormat::PsyQ,
        InputFormat::Vobj,
        InputFormat::VasmListing,
        InputFormat::VlinkSymbols,
    ];

    /// Tries to read the symbols in `path` as this format.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or if it has this format's
    /// signature but its contents are not valid.
    pub fn try_decode(self, path: &Path) -> Result<Decoded, ExtractionFailure> {
        match self {
            InputFormat::SymbolBinary => bsym::decode(path),
            InputFormat::PsyQ => psyq::decode(path),
            InputFormat::Vobj => vobj::decode(path),
            InputFormat::VasmListing => listing::decode(path),
            InputFormat::VlinkSymbols => vlink::decode(path),
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            InputFormat::SymbolBinary => "binary symbol file",
            InputFormat::PsyQ => "Psy-Q symbol file",
            InputFormat::Vobj => "vasm vobj file",
            InputFormat::VasmListing => "vasm listing file",
            InputFormat::VlinkSymbols => "vlink symbol file",
        })
    }
}

/// Reads all the symbols in `path`, using the first decoder which
/// recognises the file.
///
/// # Errors
///
/// [`ExtractionFailure::UnrecognizedFormat`] if no decoder accepts
/// the file; otherwise, whatever failure the accepting decoder
/// reports.
pub fn decode_file(path: &Path) -> Result<(InputFormat, Vec<Symbol>), ExtractionFailure> {
    let span = span!(Level::ERROR, "decode", file=%path.display());
    let _enter = span.enter();
    for format in InputFormat::PRIORITY {
        match format.try_decode(path)? {
            Decoded::Accepted(symbols) => {
                event!(
                    Level::DEBUG,
                    "recognised {} as a {format} containing {} symbols",
                    path.display(),
                    symbols.len()
                );
                return Ok((format, symbols));
            }
            Decoded::Rejected => {
                event!(Level::TRACE, "{} is not a {format}", path.display());
            }
        }
    }
    Err(ExtractionFailure::UnrecognizedFormat(path.to_path_buf()))
}

pub(crate) fn malformed<S: Into<String>>(
    filename: &Path,
    format: InputFormat,
    line: Option<LineNumber>,
    msg: S,
) -> ExtractionFailure {
    ExtractionFailure::MalformedRecord {
        filename: filename.to_path_buf(),
        format,
        line,
        msg: msg.into(),
    }
}

/// Converts the name of a symbol read from a binary format.
fn symbol_name(
    bytes: Vec<u8>,
    filename: &Path,
    format: InputFormat,
) -> Result<String, ExtractionFailure> {
    if bytes.is_empty() {
        return Err(malformed(filename, format, None, "symbol has an empty name"));
    }
    String::from_utf8(bytes).map_err(|e| {
        malformed(
            filename,
            format,
            None,
            format!(
                "symbol name {:?} is not valid UTF-8",
                String::from_utf8_lossy(e.as_bytes())
            ),
        )
    })
}
