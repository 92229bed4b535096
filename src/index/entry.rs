//! A single IPv4 address range.

use serde::Serialize;
use std::fmt;

use crate::addr::{first_octet, format_address, parse_address, parse_cidr_range};
use crate::{Error, RangeType, Result};

/// RangeEntry is one inclusive IPv4 range, keyed by the first octet of its start.
///
/// Entries come from either CIDR text (`1.0.1.0/24`) or a Geo CSV record
/// (`1.0.32.0,1.0.63.255,CN`). They are immutable once built; [`split`](Self::split)
/// produces new entries instead of changing this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    kind: RangeType,
    first_octet: u8,
    start: u32,
    end: u32,
    /// Original CIDR text, or an `N.0.0.0/8` label after splitting; empty for unsplit Geo
    cidr: String,
    /// Country code, empty for CIDR
    country: String,
}

impl RangeEntry {
    /// Build an entry from a line of the given range type.
    pub fn parse(line: &str, kind: RangeType) -> Result<Self> {
        match kind {
            RangeType::Cidr => Ok(Self::from_cidr(line)),
            RangeType::Geo => Self::from_geo(line),
        }
    }

    /// Build one entry per line, without splitting.
    pub fn parse_all<S: AsRef<str>>(lines: &[S], kind: RangeType) -> Result<Vec<Self>> {
        lines
            .iter()
            .map(|line| Self::parse(line.as_ref(), kind))
            .collect()
    }

    /// Build an entry from `a.b.c.d/mask`.
    ///
    /// Never fails; see [`crate::addr`] for how malformed text is read.
    pub fn from_cidr(cidr: &str) -> Self {
        let cidr = cidr.trim();
        let (start, end) = parse_cidr_range(cidr);
        Self {
            kind: RangeType::Cidr,
            first_octet: first_octet(start),
            start,
            end,
            cidr: cidr.to_string(),
            country: String::new(),
        }
    }

    /// Build an entry from a `start,end,country` CSV record.
    ///
    /// Address fields are read permissively; only a record with fewer than three
    /// fields is rejected.
    pub fn from_geo(csv: &str) -> Result<Self> {
        let fields: Vec<&str> = csv.trim().split(',').collect();
        if fields.len() < 3 {
            return Err(Error::MalformedLine(csv.to_string()));
        }

        let start = parse_address(fields[0]);
        let end = parse_address(fields[1]);
        if first_octet(start) != first_octet(end) {
            log::debug!("First octet of range is not the same: {}", csv);
        }

        Ok(Self {
            kind: RangeType::Geo,
            first_octet: first_octet(start),
            start,
            end,
            cidr: String::new(),
            country: fields[2].trim().to_string(),
        })
    }

    /// Get the range type this entry was built from.
    pub fn kind(&self) -> RangeType {
        self.kind
    }

    /// First octet of the start address (the bucket key).
    pub fn first_octet(&self) -> u8 {
        self.first_octet
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// CIDR text; empty for Geo entries that were never split.
    pub fn cidr(&self) -> &str {
        &self.cidr
    }

    /// Country code; empty for CIDR entries.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Bounds rendered as `start - end`.
    pub fn range(&self) -> String {
        format!("{} - {}", format_address(self.start), format_address(self.end))
    }

    /// Check if a packed address falls inside this range.
    #[inline]
    pub fn contains(&self, ip: u32) -> bool {
        crate::addr::in_range(ip, self.start, self.end)
    }

    /// Decompose into sub-ranges that each stay within one first octet.
    ///
    /// A range already confined to one octet comes back as a single clone.
    /// Otherwise octet `i` receives `[max(start, i.0.0.0), min(end, i.255.255.255)]`;
    /// every piece is labelled `i.0.0.0/8` and keeps the country.
    pub fn split(&self) -> Vec<RangeEntry> {
        let last = first_octet(self.end);
        if self.first_octet == last {
            return vec![self.clone()];
        }

        (self.first_octet..=last)
            .map(|octet| {
                let lower = u32::from(octet) << 24;
                let upper = lower | 0x00FF_FFFF;
                RangeEntry {
                    kind: self.kind,
                    first_octet: octet,
                    start: lower.max(self.start),
                    end: upper.min(self.end),
                    cidr: format!("{}.0.0.0/8", octet),
                    country: self.country.clone(),
                }
            })
            .collect()
    }

    /// Snapshot for reporting.
    pub fn to_match(&self) -> RangeMatch {
        RangeMatch {
            display: self.to_string(),
            start: format_address(self.start),
            end: format_address(self.end),
            country: self.country.clone(),
        }
    }
}

impl fmt::Display for RangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RangeType::Cidr => f.write_str(&self.cidr),
            RangeType::Geo => write!(
                f,
                "{},{},{}",
                format_address(self.start),
                format_address(self.end),
                self.country
            ),
        }
    }
}

/// Serializable view of a matched range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeMatch {
    /// CIDR text or `start,end,country`
    pub display: String,
    /// First address, dotted
    pub start: String,
    /// Last address, dotted
    pub end: String,
    /// Country code (empty for CIDR ranges)
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIDRS: &[&str] = &[
        "1.4.1.0/24",
        "1.0.1.0/24",
        "1.0.2.0/23",
        "36.0.16.0/20",
        "43.224.242.0/24",
        "59.83.0.0/18",
        "103.196.64.0/22",
        "101.236.0.0/14",
        "45.119.116.0/22",
    ];

    const GEO: &[&str] = &[
        "1.0.64.0,1.0.127.255,JP",
        "1.0.32.0,1.0.63.255,CN",
        "185.123.184.0,185.123.187.255,BY",
        "2.56.172.0,2.56.179.255,CY",
    ];

    #[test]
    fn test_cidr_entries() {
        let entries = RangeEntry::parse_all(CIDRS, RangeType::Cidr).unwrap();
        assert_eq!(entries.len(), CIDRS.len());
        for (entry, cidr) in entries.iter().zip(CIDRS) {
            assert_eq!(entry.kind(), RangeType::Cidr);
            assert_eq!(entry.cidr(), *cidr);
            assert_eq!(entry.to_string(), *cidr);
            assert!(entry.country().is_empty());
            assert_eq!(entry.first_octet(), first_octet(entry.start()));
        }
    }

    #[test]
    fn test_geo_entries() {
        let entries = RangeEntry::parse_all(GEO, RangeType::Geo).unwrap();
        assert_eq!(entries.len(), GEO.len());
        for (entry, line) in entries.iter().zip(GEO) {
            assert_eq!(entry.kind(), RangeType::Geo);
            assert_eq!(entry.to_string(), *line);
            assert!(!entry.country().is_empty());
            assert!(entry.cidr().is_empty());
        }
        assert_eq!(entries[1].range(), "1.0.32.0 - 1.0.63.255");
        assert_eq!(entries[1].country(), "CN");
    }

    #[test]
    fn test_geo_malformed() {
        assert!(matches!(
            RangeEntry::from_geo("1.0.0.0,1.0.0.255"),
            Err(Error::MalformedLine(_))
        ));
        assert!(RangeEntry::parse("1.0.0.0", RangeType::Geo).is_err());
        assert!(RangeEntry::parse_all(&["1.0.0.0,1.0.0.255,AU", ""], RangeType::Geo).is_err());
    }

    #[test]
    fn test_contains() {
        let entry = RangeEntry::from_cidr("192.168.1.0/24");
        assert!(entry.contains(parse_address("192.168.1.0")));
        assert!(entry.contains(parse_address("192.168.1.255")));
        assert!(!entry.contains(parse_address("192.168.2.0")));
    }

    #[test]
    fn test_split_two_octets() {
        let entry = RangeEntry::parse("3.0.0.0,4.255.255.255,US", RangeType::Geo).unwrap();
        let parts = entry.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].range(), "3.0.0.0 - 3.255.255.255");
        assert_eq!(parts[1].range(), "4.0.0.0 - 4.255.255.255");
        assert!(parts.iter().all(|p| p.country() == "US"));
        assert_eq!(parts[0].cidr(), "3.0.0.0/8");
        assert_eq!(parts[1].cidr(), "4.0.0.0/8");
        assert_eq!(parts[1].first_octet(), 4);
        // Geo pieces still display as start,end,country
        assert_eq!(parts[0].to_string(), "3.0.0.0,3.255.255.255,US");
    }

    #[test]
    fn test_split_three_octets() {
        let entry = RangeEntry::parse("6.0.0.0,8.127.255.255,US", RangeType::Geo).unwrap();
        let parts = entry.split();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].range(), "6.0.0.0 - 6.255.255.255");
        assert_eq!(parts[1].range(), "7.0.0.0 - 7.255.255.255");
        assert_eq!(parts[2].range(), "8.0.0.0 - 8.127.255.255");
    }

    #[test]
    fn test_split_partial_octets() {
        let entry = RangeEntry::parse("67.231.224.0,68.65.215.255,US", RangeType::Geo).unwrap();
        let parts = entry.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].range(), "67.231.224.0 - 67.255.255.255");
        assert_eq!(parts[1].range(), "68.0.0.0 - 68.65.215.255");
    }

    #[test]
    fn test_split_single_octet() {
        let entry = RangeEntry::parse("1.1.1.2,1.1.1.4,TEST", RangeType::Geo).unwrap();
        let parts = entry.split();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], entry);
        assert_eq!(parts[0].range(), "1.1.1.2 - 1.1.1.4");
    }

    #[test]
    fn test_split_wide_cidr() {
        let entry = RangeEntry::from_cidr("254.0.0.0/7");
        let parts = entry.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].to_string(), "254.0.0.0/8");
        assert_eq!(parts[1].to_string(), "255.0.0.0/8");
        assert_eq!(parts[1].end(), u32::MAX);
        // source entry untouched
        assert_eq!(entry.to_string(), "254.0.0.0/7");
    }

    #[test]
    fn test_first_octet_follows_packed_start() {
        let entry = RangeEntry::from_cidr("300.1.1.0/24");
        assert_eq!(entry.first_octet(), 44);
        assert_eq!(entry.range(), "44.1.1.0 - 44.1.1.255");
        assert_eq!(entry.split(), vec![entry.clone()]);

        let entry = RangeEntry::from_geo("256.0.0.1,256.0.0.9,XX").unwrap();
        assert_eq!(entry.first_octet(), 0);
        assert_eq!(entry.range(), "0.0.0.1 - 0.0.0.9");
    }

    #[test]
    fn test_cidr_without_mask_spans_to_top() {
        let entry = RangeEntry::from_cidr("254.1.1.1");
        assert_eq!(entry.end(), u32::MAX);
        let parts = entry.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].range(), "254.1.1.1 - 254.255.255.255");
        assert_eq!(parts[1].range(), "255.0.0.0 - 255.255.255.255");
    }

    #[test]
    fn test_to_match() {
        let m = RangeEntry::from_geo("1.0.32.0,1.0.63.255,CN").unwrap().to_match();
        assert_eq!(m.display, "1.0.32.0,1.0.63.255,CN");
        assert_eq!(m.start, "1.0.32.0");
        assert_eq!(m.end, "1.0.63.255");
        assert_eq!(m.country, "CN");
    }
}
