//! Hands files to the platform's default application.

use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("file not found: {0}")]
    Missing(String),
    #[error("could not open {path}: {source}")]
    Handler {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait Launcher {
    fn launch(&self, path: &Path) -> Result<(), LaunchError>;
}

/// Opens files with whatever the OS associates with them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, path: &Path) -> Result<(), LaunchError> {
        if !path.exists() {
            return Err(LaunchError::Missing(path.display().to_string()));
        }
        info!("opening {}", path.display());
        open::that(path).map_err(|source| LaunchError::Handler {
            path: path.display().to_string(),
            source,
        })
    }
}
