//! Ordered range list for a single first-octet bucket.

use std::fmt;

use super::RangeEntry;
use crate::addr::parse_address;
use crate::{RangeType, Result};

/// RangeIndex holds the ranges of one bucket, searchable once sorted by start.
///
/// Entries go in either through [`append`](Self::append) (unordered, call
/// [`sort`](Self::sort) before searching) or through
/// [`insert_sorted`](Self::insert_sorted), which keeps the order on every call.
/// Ranges are assumed not to overlap; when they do, whichever one the binary
/// search lands on first is returned.
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    entries: Vec<RangeEntry>,
}

impl RangeIndex {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unsorted list by appending every line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], kind: RangeType) -> Result<Self> {
        let mut list = Self::new();
        for line in lines {
            list.append(RangeEntry::parse(line.as_ref(), kind)?);
        }

        if log::log_enabled!(log::Level::Debug) {
            for entry in &list.entries {
                log::debug!("Ranges: {}", entry.range());
            }
        }
        Ok(list)
    }

    /// Split the entry and push every piece to the back, unordered.
    pub fn append(&mut self, entry: RangeEntry) {
        for piece in entry.split() {
            self.push_piece(piece);
        }
    }

    /// Split the entry and insert every piece at its sorted position.
    ///
    /// Each piece lands before the first entry whose start is not less than its
    /// own. O(n) per piece because of the shift.
    pub fn insert_sorted(&mut self, entry: RangeEntry) {
        for piece in entry.split() {
            self.insert_piece(piece);
        }
    }

    /// Push an already split entry.
    pub(crate) fn push_piece(&mut self, piece: RangeEntry) {
        self.entries.push(piece);
    }

    /// Insert an already split entry at its sorted position.
    pub(crate) fn insert_piece(&mut self, piece: RangeEntry) {
        let pos = self.entries.partition_point(|e| e.start() < piece.start());
        self.entries.insert(pos, piece);
    }

    /// Stable sort by start address.
    pub fn sort(&mut self) {
        self.entries.sort_by_key(RangeEntry::start);
    }

    /// Check that starts are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].start() <= w[1].start())
    }

    /// Binary search for the range containing the address.
    ///
    /// Requires the list to be sorted by start. On a list built with
    /// [`append`](Self::append) and never sorted this can miss ranges that are
    /// present.
    pub fn search(&self, ip: &str) -> Option<&RangeEntry> {
        let found = self.search_packed(parse_address(ip));
        match found {
            Some(entry) => log::debug!("IP {} is in range {}", ip, entry.range()),
            None => log::debug!("IP {} is not in any of {} ranges", ip, self.entries.len()),
        }
        found
    }

    fn search_packed(&self, ip: u32) -> Option<&RangeEntry> {
        let mut lo = 0;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = &self.entries[mid];
            if entry.contains(ip) {
                return Some(entry);
            }
            if ip < entry.start() {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        None
    }

    /// Get the number of stored ranges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    /// One `start - end` line per entry.
    pub fn ranges(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.range() + "\n")
            .collect()
    }
}

impl fmt::Display for RangeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RangeIndex {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
