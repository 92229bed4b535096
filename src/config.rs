//! Source configuration.
//!
//! A configuration file lists named range sources:
//!
//! ```yaml
//! sources:
//!   - name: china
//!     location: data/china_ip_list.txt
//!     range_type: cidr
//!   - name: country
//!     location: https://example.com/asn-country-ipv4.csv
//!     range_type: geo
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{Error, RangeType, Result, SearchEngine};

/// Configuration for a set of range sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Sources in the order they are reported
    pub sources: Vec<SourceConfig>,
}

/// One named range source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Name used when reporting matches
    pub name: String,
    /// Local path or HTTP(S) URL
    pub location: String,
    /// How each line is parsed
    #[serde(default)]
    pub range_type: RangeType,
}

impl SearchConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("no sources configured".to_string()));
        }
        for (i, source) in self.sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                return Err(Error::Config(format!("source #{} has an empty name", i + 1)));
            }
            if source.location.trim().is_empty() {
                return Err(Error::Config(format!(
                    "source '{}' has an empty location",
                    source.name
                )));
            }
            if self.sources[..i].iter().any(|s| s.name == source.name) {
                return Err(Error::Config(format!(
                    "duplicate source name: {}",
                    source.name
                )));
            }
        }
        Ok(())
    }
}

impl SourceConfig {
    /// Create a new SourceConfig.
    pub fn new(name: impl Into<String>, location: impl Into<String>, range_type: RangeType) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            range_type,
        }
    }

    /// Read the source and build its engine.
    pub fn build(&self) -> Result<SearchEngine> {
        log::info!("Loading source '{}' from {}", self.name, self.location);
        SearchEngine::from_source(&self.location, self.range_type)
    }
}
