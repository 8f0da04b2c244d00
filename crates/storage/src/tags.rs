//! Tag store: absolute file path -> set of free-form tags, persisted as a JSON object.

use crate::{read_soft, tokenize, write_json, StoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a tag removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The file has no recorded tags; nothing was changed.
    NoTags,
    /// Tags were removed (possibly none matched) and some remain.
    Removed { remaining: Vec<String> },
    /// The last tag was removed and the path is no longer a key.
    Cleared,
}

#[derive(Debug, Clone)]
pub struct TagStore {
    file: PathBuf,
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl TagStore {
    /// Loads the store from `file`. Missing or malformed documents yield an empty store.
    pub fn load(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let entries = read_soft(&file)
            .map(|raw| parse_entries(&file, &raw))
            .unwrap_or_default();
        debug!("loaded {} tagged path(s) from {}", entries.len(), file.display());
        Self { file, entries }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Writes the full mapping back to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        write_json(&self.file, &self.entries)?;
        debug!("saved {} tagged path(s) to {}", self.entries.len(), self.file.display());
        Ok(())
    }

    pub fn tags(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(path)
    }

    /// Ordered snapshot of the tags for `path`; empty if it has none.
    pub fn tag_list(&self, path: &str) -> Vec<String> {
        self.entries
            .get(path)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unions the whitespace-separated tokens of `input` into the tags of `path`
    /// and saves. Returns the tokens that were not already present.
    pub fn add_tags(&mut self, path: &str, input: &str) -> Result<Vec<String>, StoreError> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let set = self.entries.entry(path.to_string()).or_default();
        let added: Vec<String> = tokens.into_iter().filter(|t| set.insert(t.clone())).collect();
        info!("tagged {} with {:?}", path, added);
        self.save()?;
        Ok(added)
    }

    /// Removes the whitespace-separated tokens of `input` from the tags of `path`.
    /// A path left without tags is dropped from the mapping.
    pub fn remove_tags(&mut self, path: &str, input: &str) -> Result<RemoveOutcome, StoreError> {
        let Some(set) = self.entries.get_mut(path) else {
            return Ok(RemoveOutcome::NoTags);
        };
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Ok(RemoveOutcome::Removed {
                remaining: set.iter().cloned().collect(),
            });
        }
        for t in &tokens {
            set.remove(t);
        }
        let outcome = if set.is_empty() {
            self.entries.remove(path);
            RemoveOutcome::Cleared
        } else {
            RemoveOutcome::Removed {
                remaining: set.iter().cloned().collect(),
            }
        };
        info!("removed {:?} from {}", tokens, path);
        self.save()?;
        Ok(outcome)
    }
}

/// Accepts only an object of string -> array of strings; anything else is an empty store.
fn parse_entries(file: &Path, raw: &str) -> BTreeMap<String, BTreeSet<String>> {
    let parsed: BTreeMap<String, Vec<String>> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("ignoring malformed tag file {}: {}", file.display(), e);
            return BTreeMap::new();
        }
    };
    parsed
        .into_iter()
        .filter_map(|(path, tags)| {
            let set: BTreeSet<String> = tags.into_iter().filter(|t| !t.trim().is_empty()).collect();
            (!set.is_empty()).then_some((path, set))
        })
        .collect()
}
