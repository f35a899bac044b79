//! Placing harvested artifacts on disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::{Error, Result};

/// Reduces a free-text display title to a name safe for any filesystem:
/// only ASCII alphanumerics and spaces survive, trailing whitespace is
/// trimmed, and the result is lower-cased. Idempotent.
pub fn sanitize(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim_end()
        .to_lowercase()
}

/// Creates `path` and any missing parents; a no-op if already present.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Moves a finished download from the staging path to its final home. The
/// staging file vanishing first means another download raced us, which the
/// sequential flow rules out; treat it as fatal.
pub fn move_into_place(staging: &Path, target: &Path) -> Result<()> {
    if !staging.exists() {
        return Err(Error::Placement(staging.to_path_buf()));
    }
    match fs::rename(staging, target) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(Error::Placement(staging.to_path_buf()))
        }
        other => Ok(other?),
    }
}
