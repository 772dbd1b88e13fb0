use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::ArgAction::{Append, Set};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use base::prelude::{NumberBase, ValueType};
use symlib::{extract_symbols, ExtractOptions, ExtractionFailure, FilterRules, OptionsBuilder, OutputMode};

/// Extracts symbols from assembler and linker output, for use by
/// other programs
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Files from which symbols are read (any supported format).
    #[clap(action = Append, required = true)]
    inputs: Vec<PathBuf>,

    /// File to which the symbols are written.
    #[clap(action = Set, short = 'o', long)]
    output: PathBuf,

    /// Kind of output file: bin, asm or c.
    #[clap(action = Set, short = 'm', long, default_value_t = OutputMode::Binary)]
    mode: OutputMode,

    /// How symbol values are written: u32, u64, s32 or s64.
    #[clap(action = Set, short = 'v', long, default_value_t = ValueType::Unsigned32)]
    value_type: ValueType,

    /// Numerical system for symbol values: hex, dec or bin.
    #[clap(action = Set, short = 'b', long, default_value_t = NumberBase::Hex)]
    base: NumberBase,

    /// Keep the symbol with exactly this name.
    #[clap(action = Append, long)]
    include_symbol: Vec<String>,

    /// Drop the symbol with exactly this name.
    #[clap(action = Append, long)]
    exclude_symbol: Vec<String>,

    /// Keep symbols whose names start with this.
    #[clap(action = Append, long)]
    include_prefix: Vec<String>,

    /// Drop symbols whose names start with this.
    #[clap(action = Append, long)]
    exclude_prefix: Vec<String>,

    /// Keep symbols whose names end with this.
    #[clap(action = Append, long)]
    include_suffix: Vec<String>,

    /// Drop symbols whose names end with this.
    #[clap(action = Append, long)]
    exclude_suffix: Vec<String>,

    /// Prepended to every symbol name on output.
    #[clap(action = Append, long)]
    add_prefix: Vec<String>,

    /// Appended to every symbol name on output.
    #[clap(action = Append, long)]
    add_suffix: Vec<String>,

    /// Added to every value in C output (for example, a base
    /// address macro).
    #[clap(action = Append, long)]
    value_offset: Vec<String>,
}

#[derive(Debug)]
enum Fail {
    /// The options were valid but extraction failed.
    ExtractFail(ExtractionFailure),
    /// We were not able to correctly initialise.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::ExtractFail(failure) => failure.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn build_options(cli: Cli) -> Result<(Vec<PathBuf>, PathBuf, ExtractOptions), ExtractionFailure> {
    let mut builder = OptionsBuilder::new();
    builder
        .mode(cli.mode)
        .value_type(cli.value_type)
        .number_base(cli.base)
        .filter(FilterRules {
            include_symbols: cli.include_symbol,
            include_prefixes: cli.include_prefix,
            include_suffixes: cli.include_suffix,
            exclude_symbols: cli.exclude_symbol,
            exclude_prefixes: cli.exclude_prefix,
            exclude_suffixes: cli.exclude_suffix,
        });
    for prefix in cli.add_prefix {
        builder.prefix_add(prefix)?;
    }
    for suffix in cli.add_suffix {
        builder.suffix_add(suffix)?;
    }
    for offset in cli.value_offset {
        builder.value_offset(offset)?;
    }
    Ok((cli.inputs, cli.output, builder.build()))
}

fn run_extractor() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Set RUST_LOG (for example, RUST_LOG=debug) to choose which
    // trace messages get printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let (inputs, output, options) = build_options(cli).map_err(Fail::ExtractFail)?;
    let span = span!(Level::ERROR, "extasmsym", output=%output.display());
    let _enter = span.enter();
    match extract_symbols(&inputs, &output, &options) {
        Ok(count) => {
            event!(Level::INFO, "extracted {count} symbols from {} files", inputs.len());
            Ok(())
        }
        Err(e) => {
            event!(Level::ERROR, "extraction failed: {:?}", e);
            Err(Fail::ExtractFail(e))
        }
    }
}

fn main() {
    match run_extractor() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
