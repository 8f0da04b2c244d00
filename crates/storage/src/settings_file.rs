use crate::{read_soft, write_json, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// The small per-user document remembering the last browsed folder.
/// Unknown keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_folder: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FolderConfig {
    pub fn load(path: &Path) -> Self {
        let Some(raw) = read_soft(path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }

    /// Records `folder` as the last folder and persists immediately.
    pub fn remember_folder(&mut self, path: &Path, folder: &Path) -> Result<(), StoreError> {
        self.last_folder = Some(folder.to_string_lossy().into_owned());
        info!("remembering folder {}", folder.display());
        self.save(path)
    }

    /// The last folder, if it still names an existing directory.
    pub fn startup_folder(&self) -> Option<&Path> {
        self.last_folder
            .as_deref()
            .map(Path::new)
            .filter(|p| p.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_and_corrupt_load_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(FolderConfig::load(&path), FolderConfig::default());
        fs::write(&path, "[1, 2").unwrap();
        assert_eq!(FolderConfig::load(&path), FolderConfig::default());
    }

    #[test]
    fn remember_folder_round_trips_and_keeps_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut cfg = FolderConfig::load(&path);
        cfg.remember_folder(&path, dir.path()).unwrap();

        let reloaded = FolderConfig::load(&path);
        assert_eq!(
            reloaded.last_folder.as_deref(),
            Some(dir.path().to_string_lossy().as_ref())
        );
        assert_eq!(reloaded.extra.get("theme"), Some(&serde_json::json!("dark")));
        assert_eq!(reloaded.startup_folder(), Some(dir.path()));
    }

    #[test]
    fn stale_folder_is_not_a_startup_folder() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FolderConfig {
            last_folder: Some(dir.path().join("gone").to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(cfg.startup_folder().is_none());
    }
}
