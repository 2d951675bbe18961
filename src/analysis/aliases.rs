//! Maps raw author identities to canonical developer names.
//!
//! The people file holds one developer per line, pipe-delimited:
//!
//! ```text
//! Alice Example|alice@example.com|alice@users.noreply.github.com
//! ```
//!
//! Lookups are case-insensitive and never fail; identities without an entry
//! resolve to [`UNKNOWN_DEVELOPER`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ConfigError;

/// Name every unresolved identity collapses onto.
pub const UNKNOWN_DEVELOPER: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// A table with no entries: every identity resolves to "Unknown".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `Name|alias|alias...` lines. Lines without at least
    /// one alias are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aliases = HashMap::new();
        for line in lines {
            let mut parts = line.as_ref().split('|');
            let name = match parts.next().map(str::trim) {
                Some(name) if !name.is_empty() => name,
                _ => continue,
            };
            for alias in parts.map(normalize).filter(|alias| !alias.is_empty()) {
                aliases.insert(alias, name.to_string());
            }
        }
        Self { aliases }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Self::from_lines(lines))
    }

    /// Load a people file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        File::open(path)
            .map(BufReader::new)
            .and_then(Self::from_reader)
            .map_err(|source| ConfigError::AliasFile {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Canonical developer name for `identity`, or "Unknown".
    pub fn resolve(&self, identity: &str) -> &str {
        self.aliases
            .get(&normalize(identity))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DEVELOPER)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

fn normalize(identity: &str) -> String {
    identity.trim().to_lowercase()
}
