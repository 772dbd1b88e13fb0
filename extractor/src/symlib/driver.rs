//! Runs the whole extraction: read every input, then write the
//! output.
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{event, span, Level};

use super::filter::FilterRules;
use super::input::{decode_file, InputFormat};
use super::options::ExtractOptions;
use super::output::write_symbols;
use super::symtab::{Admission, SymbolTable};
use super::types::{ExtractionFailure, IoAction, IoFailed};


/// What happened to the symbols of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdmissionCounts {
    pub added: usize,
    pub already_present: usize,
    pub filtered: usize,
}

/// Reads the symbols in `path` and offers each of them to `symtab`.
///
/// # Errors
///
/// - The file cannot be read or is not in a known format.
/// - The file is damaged.
/// - A symbol in the file conflicts with one already in `symtab`.
pub fn absorb_file(
    path: &Path,
    rules: &FilterRules,
    symtab: &mut SymbolTable,
) -> Result<(InputFormat, AdmissionCounts), ExtractionFailure> {
    let (format, symbols) = decode_file(path)?;
    let mut counts = AdmissionCounts::default();
    for sym in symbols {
        match symtab.admit(rules, sym.name, sym.value)? {
            Admission::Added => counts.added += 1,
            Admission::AlreadyPresent => counts.already_present += 1,
            Admission::Filtered => counts.filtered += 1,
        }
    }
    event!(
        Level::INFO,
        "read {} as a {format}: {} symbols added, {} already known, {} filtered out",
        path.display(),
        counts.added,
        counts.already_present,
        counts.filtered
    );
    Ok((format, counts))
}

/// Reads all of `inputs`, in order, into a single symbol table.
///
/// # Errors
///
/// Any failure of [`absorb_file`].
pub fn load_symbols(
    inputs: &[PathBuf],
    rules: &FilterRules,
) -> Result<SymbolTable, ExtractionFailure> {
    let mut symtab = SymbolTable::new();
    for input in inputs {
        absorb_file(input, rules, &mut symtab)?;
    }
    Ok(symtab)
}

/// Reads the symbols in `inputs`, filters and merges them, and
/// writes the result to `output`.  Returns the number of symbols
/// written.
///
/// Nothing is written unless every input was read successfully.
///
/// # Errors
///
/// - Any failure to read or decode an input file.
/// - Conflicting definitions of a symbol.
/// - Failure to write the output file.
pub fn extract_symbols(
    inputs: &[PathBuf],
    output: &Path,
    options: &ExtractOptions,
) -> Result<usize, ExtractionFailure> {
    let span = span!(Level::ERROR, "extract", output=%output.display());
    let _enter = span.enter();

    let symtab = load_symbols(inputs, &options.filter)?;
    let symbols = symtab.output_symbols(&options.decoration);

    let output_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output)
        .map_err(|e| ExtractionFailure::Io(IoFailed::on_file(IoAction::Open, output, e)))?;
    let mut writer = BufWriter::new(output_file);
    write_symbols(&symbols, inputs, options, &mut writer, output)?;
    event!(
        Level::INFO,
        "wrote {} symbols to {} ({} format)",
        symbols.len(),
        output.display(),
        options.mode
    );
    Ok(symbols.len())
}
