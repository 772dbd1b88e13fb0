/// Rules which decide which symbols make it into the output.
///
/// The rules are evaluated in a fixed order, each later step
/// overriding the ones before it:
///
/// 1. If there are no "include" rules of any kind, every symbol is
///    included by default; otherwise symbols are excluded by default.
/// 2. A symbol matching an included prefix or suffix is included.
/// 3. A symbol matching an excluded prefix or suffix is excluded.
/// 4. A symbol named by an exact include is included.
/// 5. A symbol named by an exact exclude is excluded.
///
/// All matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRules {
    pub include_symbols: Vec<String>,
    pub include_prefixes: Vec<String>,
    pub include_suffixes: Vec<String>,
    pub exclude_symbols: Vec<String>,
    pub exclude_prefixes: Vec<String>,
    pub exclude_suffixes: Vec<String>,
}

fn has_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

fn has_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s.as_str()))
}

fn is_named(name: &str, names: &[String]) -> bool {
    names.iter().any(|n| n == name)
}

impl FilterRules {
    fn has_include_rules(&self) -> bool {
        !(self.include_symbols.is_empty()
            && self.include_prefixes.is_empty()
            && self.include_suffixes.is_empty())
    }

    /// Returns true if the symbol called `name` should be kept.
    #[must_use]
    pub fn admits(&self, name: &str) -> bool {
        let mut included = !self.has_include_rules();
        if has_prefix(name, &self.include_prefixes) || has_suffix(name, &self.include_suffixes) {
            included = true;
        }
        if has_prefix(name, &self.exclude_prefixes) || has_suffix(name, &self.exclude_suffixes) {
            included = false;
        }
        if is_named(name, &self.include_symbols) {
            included = true;
        }
        if is_named(name, &self.exclude_symbols) {
            included = false;
        }
        included
    }
}
