//! Walks a folder tree and collects presentation files.

use crate::config::ScanSettings;
use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    extensions: Vec<String>,
    excludes: GlobSet,
    follow_links: bool,
}

impl ScanOptions {
    pub fn from_settings(settings: &ScanSettings) -> anyhow::Result<Self> {
        let excludes = build_globset(&settings.exclude).context("invalid scan.exclude pattern")?;
        Ok(Self {
            extensions: settings
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            excludes,
            follow_links: settings.follow_links,
        })
    }

    /// True if the file name ends in `.<ext>` for a recognized extension, ignoring case.
    /// A bare `.pptx` counts.
    pub fn is_presentation(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: ScanSettings::default().extensions,
            excludes: GlobSet::empty(),
            follow_links: false,
        }
    }
}

/// Recursively lists every presentation file under `folder`, in traversal order.
/// A missing root yields an empty listing.
pub fn scan(folder: &Path, opts: &ScanOptions) -> Vec<PathBuf> {
    if !folder.is_dir() {
        warn!("{} is not a directory, nothing to scan", folder.display());
        return Vec::new();
    }
    let mut out = Vec::new();
    for entry in WalkDir::new(folder)
        .follow_links(opts.follow_links)
        .into_iter()
        .filter_entry(|e| !is_excluded(e.path(), &opts.excludes))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        // Symlinked files are listed even when links are not followed into directories.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if opts.is_presentation(entry.path()) {
            out.push(entry.into_path());
        }
    }
    debug!("scanned {}: {} presentation file(s)", folder.display(), out.len());
    out
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_excluded(path: &Path, excludes: &GlobSet) -> bool {
    excludes.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_only_presentations_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.pptx"));
        touch(&root.join("B.PPT"));
        touch(&root.join("sub/deeper/c.PpTx"));
        touch(&root.join("notes.txt"));
        touch(&root.join("pptx"));
        touch(&root.join("sub/d.pptx.bak"));

        let mut found = scan(root, &ScanOptions::default());
        found.sort();
        let mut expected = vec![
            root.join("B.PPT"),
            root.join("a.pptx"),
            root.join("sub/deeper/c.PpTx"),
        ];
        expected.sort();
        assert_eq!(found, expected);
        assert!(found.iter().all(|p| p.starts_with(root)));
    }

    #[test]
    fn directories_named_like_presentations_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("deck.pptx")).unwrap();
        assert!(scan(dir.path(), &ScanOptions::default()).is_empty());
    }

    #[test]
    fn bare_extension_names_are_presentations() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".pptx"));
        touch(&dir.path().join(".PPT"));
        let mut found = scan(dir.path(), &ScanOptions::default());
        found.sort();
        assert_eq!(found, vec![dir.path().join(".PPT"), dir.path().join(".pptx")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed_but_linked_dirs_are_not_entered() {
        use std::os::unix::fs::symlink;

        let outside = tempfile::tempdir().unwrap();
        touch(&outside.path().join("real.pptx"));
        touch(&outside.path().join("nested/inner.pptx"));

        let dir = tempfile::tempdir().unwrap();
        symlink(outside.path().join("real.pptx"), dir.path().join("link.pptx")).unwrap();
        symlink(outside.path().join("nested"), dir.path().join("linked_dir")).unwrap();
        symlink(outside.path().join("gone.pptx"), dir.path().join("dangling.pptx")).unwrap();

        assert_eq!(
            scan(dir.path(), &ScanOptions::default()),
            vec![dir.path().join("link.pptx")]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("nope"), &ScanOptions::default()).is_empty());
    }

    #[test]
    fn excludes_prune_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("keep.pptx"));
        touch(&dir.path().join("archive/old.pptx"));
        let settings = ScanSettings {
            exclude: vec!["**/archive".into()],
            ..Default::default()
        };
        let opts = ScanOptions::from_settings(&settings).unwrap();
        assert_eq!(scan(dir.path(), &opts), vec![dir.path().join("keep.pptx")]);
    }

    #[test]
    fn bad_exclude_pattern_is_rejected() {
        let settings = ScanSettings {
            exclude: vec!["[".into()],
            ..Default::default()
        };
        assert!(ScanOptions::from_settings(&settings).is_err());
    }
}
