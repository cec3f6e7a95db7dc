//! Alias lookup and prefix search over a vault's entries.
//!
//! `EntryIndex` is a read-only view recomputed from the entry list on
//! every call.  At the sizes a personal vault reaches, a linear scan is
//! cheaper than keeping a separate structure in sync with mutations.

use super::entry::Entry;

/// Borrowed, read-only view over the entry list.
#[derive(Debug, Clone, Copy)]
pub struct EntryIndex<'a> {
    entries: &'a [Entry],
}

impl<'a> EntryIndex<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self { entries }
    }

    /// Position of the first entry whose alias equals `alias` exactly.
    pub fn find_exact(&self, alias: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.alias == alias)
    }

    /// Aliases starting with `token` (case-sensitive), shortest first.
    ///
    /// Aliases of equal length keep their insertion order.  An empty
    /// token matches every alias.
    pub fn prefix_search(&self, token: &str) -> Vec<&'a str> {
        let mut matches: Vec<&'a str> = self
            .entries
            .iter()
            .map(|e| e.alias.as_str())
            .filter(|alias| alias.starts_with(token))
            .collect();

        // `sort_by_key` is stable, which gives the insertion-order tie-break.
        matches.sort_by_key(|alias| alias.chars().count());
        matches
    }
}
