use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Overrides the per-user data directory holding `tags.json` and `config.json`.
    pub data_dir: Option<String>,
    pub scan: ScanSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Recognized presentation extensions, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip during the walk.
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["ppt".into(), "pptx".into()],
            exclude: Vec::new(),
            follow_links: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Config(#[from] config::ConfigError),
}

/// Loads settings from `path` (or an optional `config/default`) layered under
/// `PPTVIEW__*` environment variables.
pub fn load(path: Option<&str>) -> Result<AppSettings, SettingsError> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(config::Environment::with_prefix("PPTVIEW").separator("__"));
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_recognize_ppt_and_pptx() {
        let s = AppSettings::default();
        assert_eq!(s.scan.extensions, vec!["ppt", "pptx"]);
        assert!(s.data_dir.is_none());
    }

    #[test]
    fn file_overrides_are_merged_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.toml");
        fs::write(
            &file,
            "data_dir = \"/tmp/pptview\"\n[scan]\nexclude = [\"**/archive/**\"]\n",
        )
        .unwrap();
        let s = load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(s.data_dir.as_deref(), Some("/tmp/pptview"));
        assert_eq!(s.scan.exclude, vec!["**/archive/**"]);
        assert_eq!(s.scan.extensions, vec!["ppt", "pptx"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nope.toml");
        assert!(load(Some(file.to_str().unwrap())).is_err());
    }
}
