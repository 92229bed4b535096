//! IPSearch - Fast IPv4 range lookup.
//!
//! This crate answers "which range contains this IPv4 address?" against a list
//! of CIDR blocks or of `start,end,country` records, such as a China IP list or
//! an ASN country CSV.
//!
//! # Features
//!
//! - **CIDR lists**: One `a.b.c.d/mask` per line
//! - **Geo lists**: One `start,end,country` CSV record per line
//! - **First-octet buckets**: Queries only binary-search the ranges sharing the address's first octet
//! - **Range splitting**: Ranges crossing a first-octet boundary are stored once per octet
//! - **Local and remote sources**: Files or HTTP(S) URLs, optionally gzip compressed
//!
//! # Quick Start
//!
//! ```
//! use ipsearch::{RangeType, SearchEngine};
//!
//! let lines = ["1.0.32.0,1.0.63.255,CN", "1.0.64.0,1.0.127.255,JP"];
//! let engine = SearchEngine::new(&lines, RangeType::Geo).unwrap();
//!
//! let found = engine.search("1.0.110.10").unwrap();
//! assert_eq!(found.country(), "JP");
//! assert!(engine.search("8.8.8.8").is_none());
//! ```
//!
//! # Loading Sources
//!
//! ```ignore
//! use ipsearch::{RangeType, SearchEngine};
//!
//! let china = SearchEngine::from_file("./data/china_ip_list.txt", RangeType::Cidr)?;
//! let geo = SearchEngine::from_url("https://example.com/asn-country-ipv4.csv", RangeType::Geo)?;
//! ```
//!
//! # Address Parsing
//!
//! Address text is parsed permissively: malformed components read as `0`
//! instead of failing. See [`addr`] for the exact rules.

mod error;
mod range_type;
mod search;

pub mod addr;
pub mod config;
pub mod index;
pub mod source;

// Re-export core types
pub use error::{Error, Result};
pub use range_type::RangeType;
pub use search::SearchEngine;

// Re-export index types
pub use index::{BucketedIndex, RangeEntry, RangeIndex, RangeMatch};

// Re-export configuration
pub use config::{SearchConfig, SourceConfig};
