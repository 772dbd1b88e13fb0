//! Listing files written by the vasm assembler.
//!
//! The first line of a listing is `Sections:`.  We skip everything up
//! to the line `Symbols by value:`; each non-empty line after that is
//! a hexadecimal value, a space and the symbol name.
use std::io::BufRead;
use std::path::Path;

use regex::Regex;

use base::prelude::Symbol;

use super::super::reader::{open_input, LineReader};
use super::super::types::ExtractionFailure;
use super::{malformed, Decoded, InputFormat};

const FIRST_LINE: &[u8] = b"Sections:";
const SYMBOLS_HEADING: &[u8] = b"Symbols by value:";
const SYMBOL_LINE_PATTERN: &str = r"^(?:0[xX])?([0-9A-Fa-f]+) (.+)$";

/// Explains why `line` is not a valid symbol line.
fn diagnose(line: &str) -> String {
    match line.split_once(' ') {
        None => "missing space between value and symbol name".to_string(),
        Some(("", _)) => "missing value".to_string(),
        Some((_, "")) => "missing symbol name".to_string(),
        Some((value, _)) => format!("value \"{value}\" is not a hexadecimal number"),
    }
}

fn parse_symbol_line(line_rx: &Regex, line: &str) -> Result<Symbol, String> {
    let Some(captures) = line_rx.captures(line) else {
        return Err(diagnose(line));
    };
    let (_, [digits, name]) = captures.extract();
    match u64::from_str_radix(digits, 16) {
        Ok(value) => Ok(Symbol::new(name, value as i64)),
        Err(_) => Err(format!("value \"{digits}\" does not fit into 64 bits")),
    }
}

pub(super) fn decode(path: &Path) -> Result<Decoded, ExtractionFailure> {
    decode_from(open_input(path)?, path)
}

pub(super) fn decode_from<R: BufRead>(input: R, path: &Path) -> Result<Decoded, ExtractionFailure> {
    let mut lines = LineReader::new(input, path);
    match lines.next_line()? {
        Some((_, first)) if first == FIRST_LINE => (),
        _ => {
            return Ok(Decoded::Rejected);
        }
    }
    loop {
        match lines.next_line()? {
            None => {
                return Ok(Decoded::Rejected);
            }
            Some((_, line)) if line == SYMBOLS_HEADING => {
                break;
            }
            Some(_) => (),
        }
    }

    let line_rx = Regex::new(SYMBOL_LINE_PATTERN).map_err(|e| {
        ExtractionFailure::InternalError(format!(
            "failed to compile regular expression '{SYMBOL_LINE_PATTERN}': {e}"
        ))
    })?;
    let mut symbols: Vec<Symbol> = Vec::new();
    while let Some((line_number, line)) = lines.next_line()? {
        if line.is_empty() {
            continue;
        }
        let parsed = match std::str::from_utf8(&line) {
            Ok(text) => parse_symbol_line(&line_rx, text),
            Err(_) => Err("line is not valid UTF-8 text".to_string()),
        };
        match parsed {
            Ok(symbol) => symbols.push(symbol),
            Err(msg) => {
                return Err(malformed(
                    lines.filename(),
                    InputFormat::VasmListing,
                    Some(line_number),
                    msg,
                ));
            }
        }
    }
    Ok(Decoded::Accepted(symbols))
}
