//! Application state: the tag store, the remembered folder, the search boxes and
//! the rows currently on display. Every handler replaces the display set in full.

use crate::launch::Launcher;
use crate::paths::{self, DataPaths};
use anyhow::{bail, Context, Result};
use pptview_core::models::DisplayRow;
use pptview_core::scanner::ScanOptions;
use pptview_core::search::{self, Filter};
use std::fmt;
use std::path::{Path, PathBuf};
use storage::{FolderConfig, RemoveOutcome, TagStore};
use tracing::{info, warn};

/// User-visible outcome of a row operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoSelection,
    Tagged { file: String, added: Vec<String> },
    Untagged { file: String, remaining: Vec<String> },
    Cleared { file: String },
    NoTags { file: String },
    Opened { file: String },
    OpenFailed { file: String, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoSelection => write!(f, "no file selected"),
            Notice::Tagged { file, added } if added.is_empty() => {
                write!(f, "{file}: no new tags")
            }
            Notice::Tagged { file, added } => write!(f, "{file}: added {}", added.join(" ")),
            Notice::Untagged { file, remaining } => {
                write!(f, "{file}: remaining tags {}", remaining.join(" "))
            }
            Notice::Cleared { file } => write!(f, "{file}: all tags removed"),
            Notice::NoTags { file } => write!(f, "{file} has no tags"),
            Notice::Opened { file } => write!(f, "opened {file}"),
            Notice::OpenFailed { file, reason } => write!(f, "could not open {file}: {reason}"),
        }
    }
}

pub struct App {
    store: TagStore,
    folder_config: FolderConfig,
    config_path: PathBuf,
    scan: ScanOptions,
    current_folder: Option<PathBuf>,
    filename_input: String,
    tag_input: String,
    rows: Vec<DisplayRow>,
}

impl App {
    /// Loads both documents and, if the remembered folder still exists, lists it.
    pub fn open(paths: &DataPaths, scan: ScanOptions) -> Self {
        let store = TagStore::load(&paths.tags);
        let folder_config = FolderConfig::load(&paths.config);
        let current_folder = folder_config.startup_folder().map(Path::to_path_buf);
        let mut app = Self {
            store,
            folder_config,
            config_path: paths.config.clone(),
            scan,
            current_folder,
            filename_input: String::new(),
            tag_input: String::new(),
            rows: Vec::new(),
        };
        if let Some(folder) = &app.current_folder {
            info!("restoring last folder {}", folder.display());
        }
        app.refresh();
        app
    }

    pub fn store(&self) -> &TagStore {
        &self.store
    }

    pub fn current_folder(&self) -> Option<&Path> {
        self.current_folder.as_deref()
    }

    pub fn filename_input(&self) -> &str {
        &self.filename_input
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn filter(&self) -> Filter {
        Filter::from_inputs(&self.filename_input, &self.tag_input)
    }

    pub fn status_line(&self) -> String {
        format!("found {} file(s) (filtered)", self.rows.len())
    }

    /// Remembers `folder` in canonical form, then switches to it and lists it with the
    /// current search inputs. If the config cannot be saved nothing changes.
    pub fn choose_folder(&mut self, folder: &Path) -> Result<usize> {
        if !folder.is_dir() {
            bail!("{} is not a directory", folder.display());
        }
        let folder = paths::absolutize(folder)?;
        self.folder_config
            .remember_folder(&self.config_path, &folder)
            .context("failed to save config")?;
        self.current_folder = Some(folder);
        Ok(self.refresh())
    }

    pub fn search(&mut self, filename_input: &str, tag_input: &str) -> usize {
        self.filename_input = filename_input.trim().to_string();
        self.tag_input = tag_input.trim().to_string();
        self.refresh()
    }

    pub fn set_filename_input(&mut self, input: &str) -> usize {
        let tags = std::mem::take(&mut self.tag_input);
        self.search(input, &tags)
    }

    pub fn set_tag_input(&mut self, input: &str) -> usize {
        let names = std::mem::take(&mut self.filename_input);
        self.search(&names, input)
    }

    /// Clears both search inputs and re-lists the whole folder.
    pub fn reset(&mut self) -> usize {
        self.search("", "")
    }

    /// Re-scans the current folder with the current inputs. Without a folder the
    /// listing is left as is.
    pub fn refresh(&mut self) -> usize {
        if let Some(folder) = &self.current_folder {
            self.rows = search::list(folder, &self.filter(), &self.store, &self.scan);
        }
        self.rows.len()
    }

    /// Maps a displayed row index back to its file. Out-of-range means nothing selected.
    pub fn resolve_selection(&self, index: Option<usize>) -> Option<&Path> {
        index.and_then(|i| self.rows.get(i)).map(DisplayRow::path)
    }

    fn selected_key(&self, index: Option<usize>) -> Option<String> {
        self.resolve_selection(index)
            .map(|p| p.to_string_lossy().into_owned())
    }

    pub fn add_tags(&mut self, index: Option<usize>, input: &str) -> Result<Notice> {
        let Some(file) = self.selected_key(index) else {
            return Ok(Notice::NoSelection);
        };
        let added = self
            .store
            .add_tags(&file, input)
            .context("failed to save tags")?;
        self.refresh();
        Ok(Notice::Tagged { file, added })
    }

    pub fn remove_tags(&mut self, index: Option<usize>, input: &str) -> Result<Notice> {
        let Some(file) = self.selected_key(index) else {
            return Ok(Notice::NoSelection);
        };
        let outcome = self
            .store
            .remove_tags(&file, input)
            .context("failed to save tags")?;
        let notice = match outcome {
            RemoveOutcome::NoTags => return Ok(Notice::NoTags { file }),
            RemoveOutcome::Removed { remaining } => Notice::Untagged { file, remaining },
            RemoveOutcome::Cleared => Notice::Cleared { file },
        };
        self.refresh();
        Ok(notice)
    }

    /// Launches the selected file. Failures come back as a notice, never an error.
    pub fn open_selection(&self, index: Option<usize>, launcher: &dyn Launcher) -> Notice {
        let Some(path) = self.resolve_selection(index) else {
            return Notice::NoSelection;
        };
        let file = path.display().to_string();
        match launcher.launch(path) {
            Ok(()) => Notice::Opened { file },
            Err(e) => {
                warn!("launch failed: {}", e);
                Notice::OpenFailed {
                    file,
                    reason: e.to_string(),
                }
            }
        }
    }
}
