use serde::Serialize;
use std::path::Path;

/// One displayed listing entry. Rebuilt on every scan/filter cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub file_path: String,
    pub filename: String,
    pub tag_list: Vec<String>,
}

impl DisplayRow {
    pub fn new(path: &Path, tag_list: Vec<String>) -> Self {
        Self {
            file_path: path.to_string_lossy().into_owned(),
            filename: file_name(path),
            tag_list,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.file_path)
    }

    pub fn tags_joined(&self) -> String {
        self.tag_list.join(" ")
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
