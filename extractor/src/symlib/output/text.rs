use std::io::Write;
use std::path::{Path, PathBuf};

use base::prelude::{Symbol, ValueFormat};

use super::super::types::ExtractionFailure;
use super::{column_width, write_failure};

const RULE: &str =
    "------------------------------------------------------------------------------";

/// Writes the comment at the top of a text output file, which says
/// where the symbols came from.
fn write_banner<W: Write>(
    writer: &mut W,
    comment: &str,
    inputs: &[PathBuf],
) -> Result<(), std::io::Error> {
    writeln!(writer, "{comment} {RULE}")?;
    if inputs.is_empty() {
        writeln!(writer, "{comment} No valid symbol files found")?;
    } else {
        writeln!(writer, "{comment} Symbols extracted from")?;
        for input in inputs {
            writeln!(writer, "{comment} {}", input.display())?;
        }
    }
    writeln!(writer, "{comment} {RULE}")?;
    writeln!(writer)
}

fn write_trailer<W: Write>(writer: &mut W, comment: &str) -> Result<(), std::io::Error> {
    writeln!(writer)?;
    writeln!(writer, "{comment} {RULE}")
}

/// Writes `symbols` as `equ` directives for inclusion in assembly
/// source.
///
/// # Errors
///
/// Failure to write the output file.
pub(crate) fn write_assembly<W: Write>(
    symbols: &[Symbol],
    inputs: &[PathBuf],
    format: ValueFormat,
    writer: &mut W,
    output_file_name: &Path,
) -> Result<(), ExtractionFailure> {
    const COMMENT: &str = ";";
    let width = column_width(symbols);
    let mut inner = || -> Result<(), std::io::Error> {
        write_banner(writer, COMMENT, inputs)?;
        for sym in symbols {
            writeln!(
                writer,
                "{:<width$}equ {}",
                sym.name,
                format.display(sym.value)
            )?;
        }
        write_trailer(writer, COMMENT)
    };
    inner().map_err(|e| write_failure(output_file_name, e))
}

/// Writes `symbols` as `#define` directives for inclusion in C
/// source.  When `value_offset` is given, it is added to each value.
///
/// # Errors
///
/// Failure to write the output file.
pub(crate) fn write_c_header<W: Write>(
    symbols: &[Symbol],
    inputs: &[PathBuf],
    format: ValueFormat,
    value_offset: Option<&str>,
    writer: &mut W,
    output_file_name: &Path,
) -> Result<(), ExtractionFailure> {
    const COMMENT: &str = "//";
    let width = column_width(symbols);
    let offset: String = match value_offset {
        Some(offset) => format!("+{offset}"),
        None => String::new(),
    };
    let mut inner = || -> Result<(), std::io::Error> {
        write_banner(writer, COMMENT, inputs)?;
        for sym in symbols {
            writeln!(
                writer,
                "#define {:<width$} ({}{offset})",
                sym.name,
                format.display(sym.value)
            )?;
        }
        write_trailer(writer, COMMENT)
    };
    inner().map_err(|e| write_failure(output_file_name, e))
}
