//! First-octet bucketed range index.

use ahash::AHashMap;

use super::{RangeEntry, RangeIndex};
use crate::addr::{first_octet, parse_address};

/// BucketedIndex routes ranges into one [`RangeIndex`] per first octet.
///
/// Buckets are created on first insert. Entries are split before routing, so a
/// bucket keyed `k` only ever holds ranges whose start and end both begin with `k`.
#[derive(Debug, Clone, Default)]
pub struct BucketedIndex {
    buckets: AHashMap<u8, RangeIndex>,
}

impl BucketedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split an entry and append each piece to its own bucket, unordered.
    pub fn append(&mut self, entry: RangeEntry) {
        for piece in entry.split() {
            self.buckets
                .entry(piece.first_octet())
                .or_default()
                .push_piece(piece);
        }
    }

    /// Append every entry; call [`sort`](Self::sort) before searching.
    pub fn append_batch<I: IntoIterator<Item = RangeEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.append(entry);
        }
    }

    /// Sort every bucket.
    pub fn sort(&mut self) {
        for list in self.buckets.values_mut() {
            list.sort();
        }
    }

    /// Split an entry and insert each piece into its own bucket at the sorted position.
    pub fn insert_sorted(&mut self, entry: RangeEntry) {
        for piece in entry.split() {
            self.buckets
                .entry(piece.first_octet())
                .or_default()
                .insert_piece(piece);
        }
    }

    /// Insert every entry at its sorted position.
    pub fn insert_sorted_batch<I: IntoIterator<Item = RangeEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert_sorted(entry);
        }
    }

    /// Find the range containing the address, looking only at its octet's bucket.
    pub fn search(&self, ip: &str) -> Option<&RangeEntry> {
        self.buckets.get(&first_octet(parse_address(ip)))?.search(ip)
    }

    /// Get the bucket for a first octet, if one exists.
    pub fn bucket(&self, octet: u8) -> Option<&RangeIndex> {
        self.buckets.get(&octet)
    }

    /// Get the number of buckets created so far.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Get the total number of stored (split) ranges.
    pub fn len(&self) -> usize {
        self.buckets.values().map(RangeIndex::len).sum()
    }

    /// Check if no range has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
