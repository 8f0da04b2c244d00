use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = ".PPTView";
pub const TAG_FILE: &str = "tags.json";
pub const CONFIG_FILE: &str = "config.json";

/// Locations of the two per-user JSON documents.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub tags: PathBuf,
    pub config: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            tags: dir.join(TAG_FILE),
            config: dir.join(CONFIG_FILE),
            dir,
        }
    }

    /// Picks the explicit override first, then the settings value, then `~/.PPTView`,
    /// and makes sure the directory exists.
    pub fn resolve(flag: Option<&Path>, setting: Option<&str>) -> Result<Self> {
        let dir = match (flag, setting) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(s)) => PathBuf::from(s),
            (None, None) => dirs::home_dir()
                .context("could not determine the home directory")?
                .join(DATA_DIR_NAME),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self::in_dir(dir))
    }
}

/// Turns a user-supplied path into the form used as a tag key: canonical when the
/// path exists, otherwise merely absolute.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }
    std::path::absolute(path).with_context(|| format!("invalid path {}", path.display()))
}
