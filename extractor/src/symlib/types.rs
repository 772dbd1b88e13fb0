use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use super::input::InputFormat;

/// Line numbers in the text input formats count from 1.
pub type LineNumber = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Open,
    Read,
    Write,
}

impl Display for IoAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            IoAction::Open => "open",
            IoAction::Read => "read",
            IoAction::Write => "write",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoTarget {
    File(PathBuf),
}

impl Display for IoTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            IoTarget::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: IoError,
}

impl IoFailed {
    pub(crate) fn on_file(action: IoAction, path: &Path, error: IoError) -> IoFailed {
        IoFailed {
            action,
            target: IoTarget::File(path.to_path_buf()),
            error,
        }
    }
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let IoFailed {
            action,
            target,
            error,
        } = self;
        write!(f, "failed to {action} {target}: {error}")
    }
}

/// Every way in which extracting symbols can fail.  All of them are
/// fatal to the run.
#[derive(Debug)]
pub enum ExtractionFailure {
    Io(IoFailed),
    TruncatedInput {
        filename: PathBuf,
        wanted: usize,
        got: usize,
    },
    UnrecognizedFormat(PathBuf),
    MalformedRecord {
        filename: PathBuf,
        format: InputFormat,
        line: Option<LineNumber>,
        msg: String,
    },
    DuplicateSymbolConflict {
        name: String,
        existing: i64,
        conflicting: i64,
    },
    ConfigurationError(String),
    OutputLimitExceeded(String),
    InternalError(String),
}

impl Display for ExtractionFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ExtractionFailure::Io(e) => e.fmt(f),
            ExtractionFailure::TruncatedInput {
                filename,
                wanted,
                got,
            } => {
                write!(
                    f,
                    "reached end of file {} prematurely (needed {wanted} more bytes but only {got} remain)",
                    filename.display()
                )
            }
            ExtractionFailure::UnrecognizedFormat(filename) => {
                write!(f, "\"{}\" is not a valid symbol file", filename.display())
            }
            ExtractionFailure::MalformedRecord {
                filename,
                format,
                line,
                msg,
            } => {
                write!(f, "{} ({format})", filename.display())?;
                if let Some(n) = line {
                    write!(f, " at line {n}")?;
                }
                write!(f, ": {msg}")
            }
            ExtractionFailure::DuplicateSymbolConflict {
                name,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "multiple definitions of symbol \"{name}\" detected ({existing:#x} and {conflicting:#x})"
                )
            }
            ExtractionFailure::ConfigurationError(msg) => {
                write!(f, "configuration error: {msg}")
            }
            ExtractionFailure::OutputLimitExceeded(msg) => {
                write!(f, "cannot write output: {msg}")
            }
            ExtractionFailure::InternalError(msg) => {
                write!(f, "internal error: {msg}")
            }
        }
    }
}

impl Error for ExtractionFailure {}

impl From<IoFailed> for ExtractionFailure {
    fn from(e: IoFailed) -> ExtractionFailure {
        ExtractionFailure::Io(e)
    }
}

#[test]
fn test_malformed_record_message() {
    let failure = ExtractionFailure::MalformedRecord {
        filename: PathBuf::from("game.sym"),
        format: InputFormat::VlinkSymbols,
        line: Some(3),
        msg: "missing ':' separator".to_string(),
    };
    assert_eq!(
        failure.to_string(),
        "game.sym (vlink symbol file) at line 3: missing ':' separator"
    );
}

#[test]
fn test_conflict_message() {
    let failure = ExtractionFailure::DuplicateSymbolConflict {
        name: "vblank".to_string(),
        existing: 0x10,
        conflicting: 0x20,
    };
    assert_eq!(
        failure.to_string(),
        "multiple definitions of symbol \"vblank\" detected (0x10 and 0x20)"
    );
}
