use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use base::prelude::{NumberBase, UnknownOption, ValueFormat, ValueType};

use super::filter::FilterRules;
use super::types::ExtractionFailure;

/// Which kind of file we write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Binary,
    Assembly,
    CHeader,
}

impl FromStr for OutputMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<OutputMode, UnknownOption> {
        match s.to_ascii_lowercase().as_str() {
            "bin" => Ok(OutputMode::Binary),
            "asm" => Ok(OutputMode::Assembly),
            "c" => Ok(OutputMode::CHeader),
            _ => Err(UnknownOption {
                what: "output mode",
                got: s.to_string(),
            }),
        }
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            OutputMode::Binary => "bin",
            OutputMode::Assembly => "asm",
            OutputMode::CHeader => "c",
        })
    }
}

/// Text added to the start and end of every symbol name on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDecoration {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl NameDecoration {
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        let prefix = self.prefix.as_deref().unwrap_or_default();
        let suffix = self.suffix.as_deref().unwrap_or_default();
        format!("{prefix}{name}{suffix}")
    }
}

/// Everything which controls a single run.  This is built once,
/// before any input is read, and does not change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: OutputMode,
    pub value_format: ValueFormat,
    pub filter: FilterRules,
    pub decoration: NameDecoration,
    /// Appended (after a `+`) to each value in C output.
    pub value_offset: Option<String>,
}

/// Assembles [`ExtractOptions`] from settings given one at a time
/// (typically, from the command line).  Settings which may only be
/// given once are checked here.
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: ExtractOptions,
}

fn set_once(
    slot: &mut Option<String>,
    value: String,
    what: &str,
) -> Result<(), ExtractionFailure> {
    if slot.is_some() {
        return Err(ExtractionFailure::ConfigurationError(format!(
            "{what} already defined"
        )));
    }
    *slot = Some(value);
    Ok(())
}

impl OptionsBuilder {
    #[must_use]
    pub fn new() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub fn mode(&mut self, mode: OutputMode) -> &mut OptionsBuilder {
        self.options.mode = mode;
        self
    }

    pub fn value_type(&mut self, value_type: ValueType) -> &mut OptionsBuilder {
        self.options.value_format.value_type = value_type;
        self
    }

    pub fn number_base(&mut self, base: NumberBase) -> &mut OptionsBuilder {
        self.options.value_format.base = base;
        self
    }

    pub fn filter(&mut self, rules: FilterRules) -> &mut OptionsBuilder {
        self.options.filter = rules;
        self
    }

    /// # Errors
    ///
    /// Fails if the value offset was already set.
    pub fn value_offset(&mut self, offset: String) -> Result<&mut OptionsBuilder, ExtractionFailure> {
        set_once(&mut self.options.value_offset, offset, "value offset")?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails if the prefix to add was already set.
    pub fn prefix_add(&mut self, prefix: String) -> Result<&mut OptionsBuilder, ExtractionFailure> {
        set_once(&mut self.options.decoration.prefix, prefix, "prefix addition")?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails if the suffix to add was already set.
    pub fn suffix_add(&mut self, suffix: String) -> Result<&mut OptionsBuilder, ExtractionFailure> {
        set_once(&mut self.options.decoration.suffix, suffix, "suffix addition")?;
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> ExtractOptions {
        self.options
    }
}
