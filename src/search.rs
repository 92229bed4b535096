//! Search engine facade: build once from lines, then query.

use std::path::Path;

use crate::index::{BucketedIndex, RangeEntry};
use crate::{source, RangeType, Result};

/// SearchEngine answers "which range contains this IPv4 address?".
///
/// Each engine owns its own [`BucketedIndex`]. Building parses every line,
/// splits ranges that cross a first-octet boundary, appends them in bulk and
/// sorts each bucket once, so the engine is ready to query as soon as it is
/// returned.
///
/// Searching takes `&self` and never mutates, so a built engine can be shared
/// across threads. [`insert`](Self::insert) needs `&mut self`; callers that
/// want to update a shared engine must wrap it in their own lock.
///
/// # Examples
/// ```
/// use ipsearch::{RangeType, SearchEngine};
///
/// let engine = SearchEngine::new(&["1.0.1.0/24", "1.0.2.0/23"], RangeType::Cidr).unwrap();
/// assert_eq!(engine.search("1.0.1.24").unwrap().cidr(), "1.0.1.0/24");
/// assert!(engine.search("8.8.8.8").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
    range_type: RangeType,
    index: BucketedIndex,
}

impl SearchEngine {
    /// Build an engine from range lines.
    ///
    /// Blank lines and `#` comments are skipped. Fails only on a Geo line with
    /// fewer than three fields.
    pub fn new<S: AsRef<str>>(lines: &[S], range_type: RangeType) -> Result<Self> {
        let mut entries = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(RangeEntry::parse(line, range_type)?);
        }
        let parsed = entries.len();

        let mut index = BucketedIndex::new();
        index.append_batch(entries);
        index.sort();

        log::info!(
            "Built {} index: {} lines, {} ranges in {} buckets",
            range_type,
            parsed,
            index.len(),
            index.bucket_count()
        );

        Ok(Self { range_type, index })
    }

    /// Build an engine from a local file.
    pub fn from_file(path: impl AsRef<Path>, range_type: RangeType) -> Result<Self> {
        let lines = source::read_file(path)?;
        Self::new(&lines, range_type)
    }

    /// Build an engine from an HTTP(S) URL.
    pub fn from_url(url: &str, range_type: RangeType) -> Result<Self> {
        let lines = source::read_url(url)?;
        Self::new(&lines, range_type)
    }

    /// Build an engine from a URL or a local path.
    pub fn from_source(location: &str, range_type: RangeType) -> Result<Self> {
        let lines = source::read_source(location)?;
        Self::new(&lines, range_type)
    }

    /// Find the range containing the address.
    pub fn search(&self, ip: &str) -> Option<&RangeEntry> {
        self.index.search(ip)
    }

    /// Check if any range contains the address.
    pub fn contains(&self, ip: &str) -> bool {
        self.search(ip).is_some()
    }

    /// Insert one more range, keeping its buckets sorted.
    pub fn insert(&mut self, entry: RangeEntry) {
        self.index.insert_sorted(entry);
    }

    /// Get the range type this engine was built with.
    pub fn range_type(&self) -> RangeType {
        self.range_type
    }

    /// Get the underlying index.
    pub fn index(&self) -> &BucketedIndex {
        &self.index
    }

    /// Get the number of stored (split) ranges.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the engine holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
