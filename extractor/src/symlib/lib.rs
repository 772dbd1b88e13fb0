#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::module_name_repetitions)]

//! Reads symbol tables produced by assemblers and linkers, merges
//! and filters them, and writes them out again in a form which can
//! be included in other programs.
mod driver;
mod filter;
mod input;
mod options;
mod output;
mod reader;
mod symtab;
mod types;

pub use driver::{absorb_file, extract_symbols, load_symbols, AdmissionCounts};
pub use filter::FilterRules;
pub use input::{decode_file, Decoded, InputFormat};
pub use options::{ExtractOptions, NameDecoration, OptionsBuilder, OutputMode};
pub use output::{column_width, write_symbols};
pub use symtab::{Admission, SymbolTable};
pub use types::{ExtractionFailure, IoAction, IoFailed, IoTarget, LineNumber};
