//! Range type definitions.

use serde::Deserialize;
use std::fmt;

/// RangeType selects how a source line is turned into a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    /// One `a.b.c.d/mask` per line
    #[default]
    Cidr,
    /// One `start,end,country` CSV record per line
    Geo,
}

impl RangeType {
    /// Parse a range type from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CIDR" | "IP-CIDR" | "IPCIDR" => Some(RangeType::Cidr),
            "GEO" | "GEOIP" | "CSV" => Some(RangeType::Geo),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::Cidr => "CIDR",
            RangeType::Geo => "GEO",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RangeType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeType::parse(s).ok_or_else(|| crate::Error::InvalidRangeType(s.to_string()))
    }
}
