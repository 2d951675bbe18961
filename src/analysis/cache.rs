use chrono::{DateTime, FixedOffset};
use git2::Oid;
use std::collections::HashMap;

/// Memoizes last-modification lookups for one repository analysis.
///
/// Keyed by (file path, commit id): the value is the author time of the most
/// recent commit at or before that commit that modified the file. A single
/// history walk asks for each pair once, so hits only come from callers that
/// resolve the same file at the same commit again. Lookups borrow the path;
/// only a miss allocates.
pub struct ModificationCache {
    timestamps: HashMap<Oid, HashMap<String, DateTime<FixedOffset>>>,
    hits: usize,
    misses: usize,
}

impl ModificationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            timestamps: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached timestamp
    pub fn get(&mut self, path: &str, commit: Oid) -> Option<DateTime<FixedOffset>> {
        let found = self
            .timestamps
            .get(&commit)
            .and_then(|by_path| by_path.get(path))
            .copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store a resolved timestamp
    pub fn store(&mut self, path: &str, commit: Oid, timestamp: DateTime<FixedOffset>) {
        self.timestamps
            .entry(commit)
            .or_default()
            .insert(path.to_string(), timestamp);
    }

    /// Return the cached timestamp, resolving and storing it on a miss.
    pub fn get_or_resolve<E, F>(
        &mut self,
        path: &str,
        commit: Oid,
        resolve: F,
    ) -> Result<DateTime<FixedOffset>, E>
    where
        F: FnOnce() -> Result<DateTime<FixedOffset>, E>,
    {
        if let Some(timestamp) = self.get(path, commit) {
            return Ok(timestamp);
        }
        let timestamp = resolve()?;
        self.store(path, commit, timestamp);
        Ok(timestamp)
    }

    pub fn len(&self) -> usize {
        self.timestamps.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl Default for ModificationCache {
    fn default() -> Self {
        Self::new()
    }
}
