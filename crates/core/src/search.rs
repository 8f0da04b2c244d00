//! Filename and tag filtering over a scanned listing.

use crate::models::{file_name, DisplayRow};
use crate::scanner::{self, ScanOptions};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use storage::TagStore;
use tracing::debug;

/// Splits a search box into keywords. Blank input means "no filter".
pub fn split_keywords(input: &str) -> Option<Vec<String>> {
    let words: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    (!words.is_empty()).then_some(words)
}

/// AND-combination of filename substrings (case-insensitive) and exact tag members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub filename_keywords: Vec<String>,
    pub tag_keywords: Vec<String>,
}

impl Filter {
    pub fn new(filename_keywords: Option<Vec<String>>, tag_keywords: Option<Vec<String>>) -> Self {
        Self {
            filename_keywords: filename_keywords.unwrap_or_default(),
            tag_keywords: tag_keywords.unwrap_or_default(),
        }
    }

    pub fn from_inputs(filename_input: &str, tag_input: &str) -> Self {
        Self::new(split_keywords(filename_input), split_keywords(tag_input))
    }

    pub fn is_empty(&self) -> bool {
        self.filename_keywords.is_empty() && self.tag_keywords.is_empty()
    }

    pub fn matches(&self, path: &Path, tags: Option<&BTreeSet<String>>) -> bool {
        if !self.filename_keywords.is_empty() {
            let name = file_name(path).to_lowercase();
            if !self
                .filename_keywords
                .iter()
                .all(|k| name.contains(&k.to_lowercase()))
            {
                return false;
            }
        }
        self.tag_keywords
            .iter()
            .all(|k| tags.map(|set| set.contains(k)).unwrap_or(false))
    }
}

/// Keeps the paths that satisfy `filter`, preserving order.
pub fn filter(paths: &[PathBuf], filter: &Filter, store: &TagStore) -> Vec<PathBuf> {
    if filter.is_empty() {
        return paths.to_vec();
    }
    paths
        .iter()
        .filter(|p| filter.matches(p, store.tags(&p.to_string_lossy())))
        .cloned()
        .collect()
}

/// Scans `folder`, filters, and joins each survivor with its current tags.
pub fn list(folder: &Path, f: &Filter, store: &TagStore, opts: &ScanOptions) -> Vec<DisplayRow> {
    let scanned = scanner::scan(folder, opts);
    let kept = filter(&scanned, f, store);
    debug!("listing {}: {} of {} kept", folder.display(), kept.len(), scanned.len());
    kept.iter()
        .map(|p| DisplayRow::new(p, store.tag_list(&p.to_string_lossy())))
        .collect()
}
