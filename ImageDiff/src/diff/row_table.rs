//! Row symbol table
//!
//! Maps each distinct row token to a compact `u32` symbol so the edit
//! script search compares integers instead of encoded scanlines.

use std::collections::HashMap;

use crate::codec::RowToken;

#[derive(Debug, Clone)]
pub(crate) struct RowTable<'a> {
    rows: Vec<&'a RowToken>,
    indices: HashMap<&'a str, u32>,
}

impl<'a> RowTable<'a> {
    #[must_use]
    pub fn new() -> Self {
        RowTable {
            rows: Vec::new(),
            indices: HashMap::new(),
        }
    }

    /// Add a row to the table, returns its symbol
    pub fn add(&mut self, row: &'a RowToken) -> u32 {
        if let Some(&symbol) = self.indices.get(row.as_str()) {
            return symbol;
        }

        let symbol = self.rows.len() as u32;
        self.rows.push(row);
        self.indices.insert(row.as_str(), symbol);
        symbol
    }

    /// Map a whole row sequence to symbols
    pub fn add_all(&mut self, rows: &'a [RowToken]) -> Vec<u32> {
        rows.iter().map(|row| self.add(row)).collect()
    }

    /// Get the row for a symbol
    #[must_use]
    pub fn get(&self, symbol: u32) -> Option<&'a RowToken> {
        self.rows.get(symbol as usize).copied()
    }

    /// Number of distinct rows in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
