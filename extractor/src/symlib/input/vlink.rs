//! Symbol files written by the vlink linker, in its default format.
//!
//! Each non-empty line is `<value>:<name>`.  A value containing `0x`
//! is hexadecimal, one containing `0b` is binary, and anything else
//! is decimal.  The format has no signature, so we treat the first
//! non-empty line as one: if it does not have the expected form, the
//! file is not a vlink symbol file.
use std::io::BufRead;
use std::path::Path;

use tracing::{event, Level};

use base::prelude::Symbol;

use super::super::reader::{open_input, LineReader};
use super::super::types::ExtractionFailure;
use super::{malformed, Decoded, InputFormat};

/// Parses a value written as `0x` hex, `0b` binary or decimal, with
/// an optional leading `-` in each case.
fn parse_value(token: &str) -> Result<i64, String> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, digits)
    };
    if digits.starts_with('+') {
        return Err(format!("value \"{token}\" is not a valid number"));
    }
    match u64::from_str_radix(digits, radix) {
        Ok(n) if negative => Ok(n.wrapping_neg() as i64),
        Ok(n) => Ok(n as i64),
        Err(e) => Err(format!("value \"{token}\" is not a valid number: {e}")),
    }
}

fn parse_symbol_line(line: &str) -> Result<Symbol, String> {
    match line.split_once(':') {
        None => Err("missing ':' separator".to_string()),
        Some(("", _)) => Err("missing value".to_string()),
        Some((_, "")) => Err("missing symbol name".to_string()),
        Some((value, name)) => Ok(Symbol::new(name, parse_value(value)?)),
    }
}

pub(super) fn decode(path: &Path) -> Result<Decoded, ExtractionFailure> {
    decode_from(open_input(path)?, path)
}

pub(super) fn decode_from<R: BufRead>(input: R, path: &Path) -> Result<Decoded, ExtractionFailure> {
    let mut lines = LineReader::new(input, path);
    let mut symbols: Vec<Symbol> = Vec::new();
    while let Some((line_number, line)) = lines.next_line()? {
        if line.is_empty() {
            continue;
        }
        let parsed = match std::str::from_utf8(&line) {
            Ok(text) => parse_symbol_line(text),
            Err(_) => Err("line is not valid UTF-8 text".to_string()),
        };
        match parsed {
            Ok(symbol) => symbols.push(symbol),
            Err(msg) if symbols.is_empty() => {
                event!(
                    Level::TRACE,
                    "line {line_number} of {} is not a vlink symbol ({msg})",
                    path.display()
                );
                return Ok(Decoded::Rejected);
            }
            Err(msg) => {
                return Err(malformed(
                    lines.filename(),
                    InputFormat::VlinkSymbols,
                    Some(line_number),
                    msg,
                ));
            }
        }
    }
    if symbols.is_empty() {
        Ok(Decoded::Rejected)
    } else {
        Ok(Decoded::Accepted(symbols))
    }
}
