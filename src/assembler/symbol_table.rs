//! Symbol table for labels and constants

use std::collections::HashMap;

use crate::assembler::Symbol;

/// Symbols in definition order, with a name index for lookup.
///
/// Names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol.
    ///
    /// Returns the existing definition if `name` is already taken; the table
    /// is left unchanged in that case.
    pub fn add_symbol(&mut self, name: &str, value: u16, defined_at: usize) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(name) {
            return Err(existing.clone());
        }

        self.index.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            value,
            defined_at,
        });
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// Value of `name`, if defined.
    pub fn value(&self, name: &str) -> Option<u16> {
        self.lookup_symbol(name).map(|s| s.value)
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True until the first definition.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in definition order.
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}
