use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Returns the first free backup path for `path`.
///
/// Backups live next to the original and are named `#<file name>.<n>#`, where `n` is the
/// smallest positive integer whose backup does not exist yet.
pub fn next_backup_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Cannot derive a backup name for '{}'", path.display()),
        )
    })?;
    let file_name = file_name.to_string_lossy();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (1u64..)
        .map(|n| parent.join(format!("#{}.{}#", file_name, n)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| io::Error::other("Exhausted backup name counter"))
}

/// Moves an existing file at `path` out of the way.
///
/// Returns the backup path when a file was moved, or `None` if nothing existed at `path`.
/// The original bytes are preserved by renaming, never copying or truncating.
pub fn backup_existing(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.try_exists()? {
        return Ok(None);
    }
    let backup = next_backup_path(path)?;
    fs::rename(path, &backup)?;
    info!("Backed up '{}' to '{}'.", path.display(), backup.display());
    Ok(Some(backup))
}
