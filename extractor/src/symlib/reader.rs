//! Sequential readers over the contents of an input file.
//!
//! [`ByteReader`] is used by the binary formats and [`LineReader`] by
//! the text formats.  Both remember the name of the file they are
//! reading so that failures can say where they happened.
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use super::types::{ExtractionFailure, IoAction, IoFailed, LineNumber};

pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>, ExtractionFailure> {
    OpenOptions::new()
        .read(true)
        .open(path)
        .map(BufReader::new)
        .map_err(|e| ExtractionFailure::Io(IoFailed::on_file(IoAction::Open, path, e)))
}

pub(crate) struct ByteReader<R> {
    inner: R,
    filename: PathBuf,
}

impl<R: BufRead> ByteReader<R> {
    pub(crate) fn new(inner: R, filename: &Path) -> ByteReader<R> {
        ByteReader {
            inner,
            filename: filename.to_path_buf(),
        }
    }

    pub(crate) fn filename(&self) -> &Path {
        &self.filename
    }

    fn read_failure(&self, error: std::io::Error) -> ExtractionFailure {
        ExtractionFailure::Io(IoFailed::on_file(IoAction::Read, &self.filename, error))
    }

    /// Reads up to `n` bytes, stopping early only at end of input.
    fn read_up_to(&mut self, n: usize) -> Result<Vec<u8>, ExtractionFailure> {
        let mut buf: Vec<u8> = Vec::with_capacity(n);
        let outcome = (&mut self.inner).take(n as u64).read_to_end(&mut buf);
        match outcome {
            Ok(_) => Ok(buf),
            Err(e) => Err(self.read_failure(e)),
        }
    }

    /// Reads exactly `n` bytes.
    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ExtractionFailure> {
        let buf = self.read_up_to(n)?;
        if buf.len() < n {
            Err(ExtractionFailure::TruncatedInput {
                filename: self.filename.clone(),
                wanted: n,
                got: buf.len(),
            })
        } else {
            Ok(buf)
        }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ExtractionFailure> {
        let mut result = [0_u8; N];
        result.copy_from_slice(&self.read_bytes(N)?);
        Ok(result)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, ExtractionFailure> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, ExtractionFailure> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    /// Reads a 32-bit little-endian two's complement value and
    /// sign-extends it.
    pub(crate) fn read_i32_le(&mut self) -> Result<i64, ExtractionFailure> {
        self.read_array::<4>().map(|b| i64::from(i32::from_le_bytes(b)))
    }

    pub(crate) fn read_i64_le(&mut self) -> Result<i64, ExtractionFailure> {
        self.read_array::<8>().map(i64::from_le_bytes)
    }

    /// Reads the `n` bytes of a file signature.  A file too short to
    /// contain the signature yields `None`, since it simply isn't a
    /// file of the format being probed for.
    pub(crate) fn probe_magic(&mut self, n: usize) -> Result<Option<Vec<u8>>, ExtractionFailure> {
        let buf = self.read_up_to(n)?;
        Ok(if buf.len() == n { Some(buf) } else { None })
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), ExtractionFailure> {
        self.read_bytes(n).map(|_| ())
    }

    /// Returns true when no more bytes can be read.
    pub(crate) fn at_end(&mut self) -> Result<bool, ExtractionFailure> {
        let outcome = self.inner.fill_buf().map(|buf| buf.is_empty());
        outcome.map_err(|e| self.read_failure(e))
    }
}

pub(crate) struct LineReader<R> {
    inner: R,
    filename: PathBuf,
    line_number: LineNumber,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, filename: &Path) -> LineReader<R> {
        LineReader {
            inner,
            filename: filename.to_path_buf(),
            line_number: 0,
        }
    }

    pub(crate) fn filename(&self) -> &Path {
        &self.filename
    }

    /// Returns the next line (without its line terminator) and its
    /// line number, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<(LineNumber, Vec<u8>)>, ExtractionFailure> {
        let mut line: Vec<u8> = Vec::new();
        match self.inner.read_until(b'\n', &mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                self.line_number += 1;
                Ok(Some((self.line_number, line)))
            }
            Err(e) => Err(ExtractionFailure::Io(IoFailed::on_file(
                IoAction::Read,
                &self.filename,
                e,
            ))),
        }
    }
}
