use indexmap::IndexMap;
use tracing::{event, Level};

use base::prelude::Symbol;

use super::filter::FilterRules;
use super::options::NameDecoration;
use super::types::ExtractionFailure;

/// The outcome of offering a symbol to the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Added,
    /// The symbol was already present with the same value.
    AlreadyPresent,
    /// The filter rules do not allow this symbol.
    Filtered,
}

/// The symbols gathered from all the input files.
///
/// A name maps to exactly one value.  The same symbol may appear in
/// several input files, but only if it has the same value in each of
/// them.  Symbols are remembered in the order in which they were
/// first seen.
#[derive(Debug, Default)]
pub struct SymbolTable {
    definitions: IndexMap<String, i64>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.definitions.get(name).copied()
    }

    /// Offers a symbol to the table, subject to `rules`.
    ///
    /// # Errors
    ///
    /// [`ExtractionFailure::DuplicateSymbolConflict`] when the table
    /// already holds a different value for `name`.
    pub fn admit(
        &mut self,
        rules: &FilterRules,
        name: String,
        value: i64,
    ) -> Result<Admission, ExtractionFailure> {
        if !rules.admits(&name) {
            event!(Level::TRACE, "symbol {name} is excluded by the filter rules");
            return Ok(Admission::Filtered);
        }
        self.define(name, value)
    }

    fn define(&mut self, name: String, value: i64) -> Result<Admission, ExtractionFailure> {
        match self.definitions.get(&name).copied() {
            None => {
                self.definitions.insert(name, value);
                Ok(Admission::Added)
            }
            Some(existing) if existing == value => Ok(Admission::AlreadyPresent),
            Some(existing) => Err(ExtractionFailure::DuplicateSymbolConflict {
                name,
                existing,
                conflicting: value,
            }),
        }
    }

    /// Produces the list of symbols to be written out: each name is
    /// decorated, and the list is sorted by value.  Symbols with equal
    /// values stay in the order in which they were first seen.
    #[must_use]
    pub fn output_symbols(&self, decoration: &NameDecoration) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self
            .definitions
            .iter()
            .map(|(name, value)| Symbol::new(decoration.apply(name), *value))
            .collect();
        symbols.sort_by_key(|sym| sym.value);
        symbols
    }
}
