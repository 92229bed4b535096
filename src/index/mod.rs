//! Range storage: entries, per-octet lists and the bucketed index.

mod bucket;
mod entry;
mod list;

pub use bucket::BucketedIndex;
pub use entry::{RangeEntry, RangeMatch};
pub use list::RangeIndex;
