//! Writing the final list of symbols.
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{span, Level};

use base::prelude::Symbol;

use super::options::{ExtractOptions, OutputMode};
use super::types::{ExtractionFailure, IoAction, IoFailed};

mod binary;
mod text;

pub(crate) use binary::write_binary;
pub(crate) use text::{write_assembly, write_c_header};

/// The width of the column in which symbol names are written by the
/// text output formats.  This is the smallest multiple of 8 which is
/// larger than the longest name, so there is always at least one
/// space after each name.
#[must_use]
pub fn column_width(symbols: &[Symbol]) -> usize {
    let longest = symbols
        .iter()
        .map(|sym| sym.name.chars().count())
        .max()
        .unwrap_or(0);
    (longest & !7) + 8
}

pub(crate) fn write_failure(output_file_name: &Path, error: std::io::Error) -> ExtractionFailure {
    ExtractionFailure::Io(IoFailed::on_file(IoAction::Write, output_file_name, error))
}

/// Writes `symbols` in the format selected by `options.mode`.
/// `inputs` names the files the symbols were read from; the text
/// formats mention them in a comment.
///
/// # Errors
///
/// - Failure to write the output.
/// - The symbols cannot be represented in the binary format.
pub fn write_symbols<W: Write>(
    symbols: &[Symbol],
    inputs: &[PathBuf],
    options: &ExtractOptions,
    writer: &mut W,
    output_file_name: &Path,
) -> Result<(), ExtractionFailure> {
    let span = span!(Level::ERROR, "write symbols", mode=%options.mode);
    let _enter = span.enter();
    let written = match options.mode {
        OutputMode::Binary => write_binary(symbols, writer, output_file_name),
        OutputMode::Assembly => write_assembly(
            symbols,
            inputs,
            options.value_format,
            writer,
            output_file_name,
        ),
        OutputMode::CHeader => write_c_header(
            symbols,
            inputs,
            options.value_format,
            options.value_offset.as_deref(),
            writer,
            output_file_name,
        ),
    };
    written?;
    writer
        .flush()
        .map_err(|e| write_failure(output_file_name, e))
}
