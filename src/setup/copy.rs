//! Recursive template copy

use crate::error::{InstallError, IoContext, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Mirror `src` into `dest`, creating `dest` and any missing parents
///
/// Directories (including empty ones) are recreated and files are copied
/// byte for byte, depth first. The first failure aborts the copy and
/// whatever was already written stays in place.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).io_context("create folder", dest)?;

    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(|_| {
            InstallError::io(
                "copy",
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidInput, "entry outside template root"),
            )
        })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).io_context("create folder", &target)?;
        } else {
            fs::copy(entry.path(), &target).io_context("copy file to", &target)?;
            debug!("Copied {}", relative.display());
        }
    }

    Ok(())
}
