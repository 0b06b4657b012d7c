//! Line diffing over row tokens
//!
//! Rows are compressed to symbols, diffed with Myers, expanded back into
//! newline-joined blocks, and then normalized to one entry per row.

use std::convert::Infallible;

use similar::algorithms::{DiffHook, myers};

use crate::codec::RowToken;

use super::row_table::RowTable;
use super::types::{DiffBlock, DiffEntry, DiffKind, EditScript};

/// Separator between rows inside a block
const ROW_SEPARATOR: &str = "\n";

/// Compute the edit script turning `old` rows into `new` rows.
#[must_use]
pub fn diff_rows(old: &[RowToken], new: &[RowToken]) -> EditScript {
    let mut table = RowTable::new();
    let old_symbols = table.add_all(old);
    let new_symbols = table.add_all(new);
    tracing::debug!(
        "Diffing {} against {} rows ({} distinct)",
        old.len(),
        new.len(),
        table.len()
    );

    let runs = diff_symbols(&old_symbols, &new_symbols);
    let blocks = expand_runs(&runs, &table);
    normalize(&blocks)
}

/// A run of same-kind symbols in script order
#[derive(Debug, Clone, PartialEq, Eq)]
struct SymbolRun {
    kind: DiffKind,
    symbols: Vec<u32>,
}

/// Collects Myers callbacks into coalesced runs.
///
/// Between two equal stretches all deletions are emitted as one block
/// followed by all insertions as one block.
struct RunCollector<'a> {
    old: &'a [u32],
    new: &'a [u32],
    runs: Vec<SymbolRun>,
    pending_delete: Vec<u32>,
    pending_insert: Vec<u32>,
}

impl<'a> RunCollector<'a> {
    fn new(old: &'a [u32], new: &'a [u32]) -> Self {
        Self {
            old,
            new,
            runs: Vec::new(),
            pending_delete: Vec::new(),
            pending_insert: Vec::new(),
        }
    }

    fn push(&mut self, kind: DiffKind, symbols: &[u32]) {
        if symbols.is_empty() {
            return;
        }
        if let Some(last) = self.runs.last_mut().filter(|last| last.kind == kind) {
            last.symbols.extend_from_slice(symbols);
            return;
        }
        self.runs.push(SymbolRun {
            kind,
            symbols: symbols.to_vec(),
        });
    }

    fn flush(&mut self) {
        let deleted = std::mem::take(&mut self.pending_delete);
        let inserted = std::mem::take(&mut self.pending_insert);
        self.push(DiffKind::Delete, &deleted);
        self.push(DiffKind::Insert, &inserted);
    }

    fn into_runs(mut self) -> Vec<SymbolRun> {
        self.flush();
        self.runs
    }
}

impl DiffHook for RunCollector<'_> {
    type Error = Infallible;

    fn equal(
        &mut self,
        old_index: usize,
        _new_index: usize,
        len: usize,
    ) -> Result<(), Self::Error> {
        self.flush();
        let old = self.old;
        self.push(DiffKind::Equal, &old[old_index..old_index + len]);
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        _new_index: usize,
    ) -> Result<(), Self::Error> {
        self.pending_delete
            .extend_from_slice(&self.old[old_index..old_index + old_len]);
        Ok(())
    }

    fn insert(
        &mut self,
        _old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.pending_insert
            .extend_from_slice(&self.new[new_index..new_index + new_len]);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.flush();
        Ok(())
    }
}

/// Run Myers over the symbol sequences.
fn diff_symbols(old: &[u32], new: &[u32]) -> Vec<SymbolRun> {
    let mut collector = RunCollector::new(old, new);
    myers::diff(&mut collector, old, 0..old.len(), new, 0..new.len())
        .unwrap_or_else(|never| match never {});
    collector.into_runs()
}

/// Turn symbol runs back into newline-joined blocks of row tokens.
fn expand_runs(runs: &[SymbolRun], table: &RowTable<'_>) -> Vec<DiffBlock> {
    runs.iter()
        .map(|run| {
            let rows: Vec<&str> = run
                .symbols
                .iter()
                .filter_map(|&symbol| table.get(symbol))
                .map(RowToken::as_str)
                .collect();
            DiffBlock {
                kind: run.kind,
                text: rows.join(ROW_SEPARATOR),
            }
        })
        .collect()
}

/// Split every block on its row separators, one entry per row.
///
/// Runs on every block, single-row ones included. Tokens never contain the
/// separator, so a block of `n` rows always yields exactly `n` entries.
#[must_use]
pub fn normalize(blocks: &[DiffBlock]) -> EditScript {
    let entries = blocks
        .iter()
        .flat_map(|block| {
            block
                .text
                .split(ROW_SEPARATOR)
                .map(move |line| DiffEntry::new(block.kind, RowToken::from_line(line)))
        })
        .collect();
    EditScript::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::diff::types::DiffKind::{Delete, Equal, Insert};

    fn tokens(rows: &[&str]) -> Vec<RowToken> {
        rows.iter().map(|s| RowToken::from_line(s)).collect()
    }

    fn script_pairs(script: &EditScript) -> Vec<(DiffKind, String)> {
        script
            .iter()
            .map(|e| (e.kind, e.token.as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_identical_rows_are_all_equal() {
        let rows = tokens(&["AA", "BB", "AA"]);
        let script = diff_rows(&rows, &rows);
        assert_eq!(script.kinds(), vec![Equal, Equal, Equal]);
        let script_tokens: Vec<RowToken> = script.iter().map(|e| e.token.clone()).collect();
        assert_eq!(script_tokens, rows);
    }

    #[test]
    fn test_append_and_remove_tail() {
        let old = tokens(&["AA", "BB"]);
        let new = tokens(&["AA", "BB", "CC"]);

        assert_eq!(diff_rows(&old, &new).kinds(), vec![Equal, Equal, Insert]);
        assert_eq!(diff_rows(&new, &old).kinds(), vec![Equal, Equal, Delete]);
    }

    #[test]
    fn test_replaced_row_deletes_before_inserting() {
        let old = tokens(&["AA", "BB", "CC"]);
        let new = tokens(&["AA", "XX", "CC"]);
        assert_eq!(
            script_pairs(&diff_rows(&old, &new)),
            vec![
                (Equal, "AA".to_string()),
                (Delete, "BB".to_string()),
                (Insert, "XX".to_string()),
                (Equal, "CC".to_string()),
            ]
        );
    }

    #[test]
    fn test_changed_region_is_grouped() {
        let old = tokens(&["AA", "B1", "B2", "B3", "ZZ"]);
        let new = tokens(&["AA", "C1", "B2", "C3", "ZZ"]);
        let kinds = diff_rows(&old, &new).kinds();

        assert_eq!(kinds.first(), Some(&Equal));
        assert_eq!(kinds.last(), Some(&Equal));
        // Every Insert directly inside a change region follows its Deletes
        for pair in kinds.windows(2) {
            assert!(!(pair[0] == Insert && pair[1] == Delete));
        }
    }

    #[test]
    fn test_empty_inputs() {
        let rows = tokens(&["AA", "BB"]);
        assert!(diff_rows(&[], &[]).is_empty());
        assert_eq!(diff_rows(&[], &rows).kinds(), vec![Insert, Insert]);
        assert_eq!(diff_rows(&rows, &[]).kinds(), vec![Delete, Delete]);
    }

    #[test]
    fn test_empty_tokens_keep_row_count() {
        // Zero-width images encode every row as ""
        let old = tokens(&["", "", ""]);
        let new = tokens(&["", ""]);
        assert_eq!(diff_rows(&old, &new).kinds(), vec![Equal, Equal, Delete]);
    }

    #[test]
    fn test_script_length_bounds() {
        let old = tokens(&["A", "B", "C", "D", "E"]);
        let new = tokens(&["E", "D", "C", "B"]);
        let script = diff_rows(&old, &new);
        assert!(script.len() >= old.len().max(new.len()));
        assert!(script.len() <= old.len() + new.len());

        let stats = script.stats();
        assert_eq!(stats.equal + stats.deleted, old.len());
        assert_eq!(stats.equal + stats.inserted, new.len());
    }

    #[test]
    fn test_rows_keep_relative_order() {
        let old = tokens(&["A", "B", "C", "D"]);
        let new = tokens(&["B", "X", "D", "A"]);
        let script = diff_rows(&old, &new);

        let from_old: Vec<&str> = script
            .iter()
            .filter(|e| e.kind != Insert)
            .map(|e| e.token.as_str())
            .collect();
        let from_new: Vec<&str> = script
            .iter()
            .filter(|e| e.kind != Delete)
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(from_old, vec!["A", "B", "C", "D"]);
        assert_eq!(from_new, vec!["B", "X", "D", "A"]);
    }

    #[test]
    fn test_deterministic() {
        let old = tokens(&["A", "B", "A", "C", "B", "A"]);
        let new = tokens(&["C", "B", "A", "B", "A", "C"]);
        assert_eq!(diff_rows(&old, &new), diff_rows(&old, &new));
    }

    #[test]
    fn test_normalize_splits_multi_row_blocks() {
        let blocks = vec![
            DiffBlock {
                kind: Equal,
                text: "AA\nBB".to_string(),
            },
            DiffBlock {
                kind: Delete,
                text: "CC".to_string(),
            },
            DiffBlock {
                kind: Insert,
                text: "DD\nEE\nFF".to_string(),
            },
        ];
        assert_eq!(
            script_pairs(&normalize(&blocks)),
            vec![
                (Equal, "AA".to_string()),
                (Equal, "BB".to_string()),
                (Delete, "CC".to_string()),
                (Insert, "DD".to_string()),
                (Insert, "EE".to_string()),
                (Insert, "FF".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_runs_joins_rows() {
        let rows = tokens(&["AA", "BB"]);
        let mut table = RowTable::new();
        let symbols = table.add_all(&rows);
        let runs = vec![SymbolRun { kind: Insert, symbols }];

        assert_eq!(
            expand_runs(&runs, &table),
            vec![DiffBlock {
                kind: Insert,
                text: "AA\nBB".to_string(),
            }]
        );
    }
}
