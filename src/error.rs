//! Error types for the installer

use std::io;
use std::path::{Path, PathBuf};

/// Everything that can abort an installation run
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("template folder not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, InstallError>;

impl InstallError {
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        InstallError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Attach the failed action and path to a bare `io::Result`
pub trait IoContext<T> {
    fn io_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| InstallError::io(action, path, e))
    }
}
