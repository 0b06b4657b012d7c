//! Core types for row diffing
//!

use std::fmt;

use serde::Serialize;

use crate::codec::RowToken;

/// Kind of a diff entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Row present in both images
    Equal,
    /// Row only in the second image
    Insert,
    /// Row only in the first image
    Delete,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Insert => write!(f, "+"),
            Self::Delete => write!(f, "-"),
        }
    }
}

/// One row of the edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub token: RowToken,
}

impl DiffEntry {
    #[must_use]
    pub fn new(kind: DiffKind, token: RowToken) -> Self {
        Self { kind, token }
    }
}

/// A coalesced run of consecutive same-kind rows, joined by newlines.
///
/// This is what the line differ produces before normalization splits it
/// back into one [`DiffEntry`] per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub kind: DiffKind,
    pub text: String,
}

/// Per-kind row counts of an edit script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub equal: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStats {
    /// Rows that differ between the two images
    #[must_use]
    pub fn changed(&self) -> usize {
        self.inserted + self.deleted
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.equal + self.changed()
    }
}

/// Ordered edit script turning the rows of one image into the other's
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    entries: Vec<DiffEntry>,
}

impl EditScript {
    #[must_use]
    pub fn new(entries: Vec<DiffEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds only, in script order
    #[must_use]
    pub fn kinds(&self) -> Vec<DiffKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    /// Count rows by kind
    #[must_use]
    pub fn stats(&self) -> DiffStats {
        self.entries
            .iter()
            .fold(DiffStats::default(), |mut stats, entry| {
                match entry.kind {
                    DiffKind::Equal => stats.equal += 1,
                    DiffKind::Insert => stats.inserted += 1,
                    DiffKind::Delete => stats.deleted += 1,
                }
                stats
            })
    }

    /// True when every entry is `Equal`
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.entries.iter().all(|e| e.kind == DiffKind::Equal)
    }

    /// Get a summary string
    #[must_use]
    pub fn summary(&self) -> String {
        let stats = self.stats();
        if stats.changed() == 0 {
            "No differences".to_string()
        } else {
            format!(
                "{} row(s) removed, {} row(s) added, {} unchanged",
                stats.deleted, stats.inserted, stats.equal
            )
        }
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One marker per output row, like a compact unified diff gutter
        for kind in self.kinds() {
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}
