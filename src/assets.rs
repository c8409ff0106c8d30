//! Static asset mirroring.
//!
//! Each configured top-level directory (`css/`, `js/`, `gallery/`, `images/`)
//! is copied into the output directory under the same name. Every file is
//! re-copied on every build; there is no change detection. Directories that
//! don't exist in the project are skipped without error.
//!
//! ```text
//! images/rooms/a.jpg  →  dist/images/rooms/a.jpg
//! ```

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What happened to one configured asset directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssetStatus {
    Copied { files: usize, dirs: usize },
    Skipped,
}

/// Mirror `name` from `root` into `output`, if it exists.
pub fn copy_asset_dir(root: &Path, output: &Path, name: &str) -> Result<AssetStatus, AssetError> {
    let src = root.join(name);
    if !src.is_dir() {
        log::debug!("asset directory {} not present, skipping", src.display());
        return Ok(AssetStatus::Skipped);
    }
    let (files, dirs) = copy_dir_recursive(&src, &output.join(name))?;
    Ok(AssetStatus::Copied { files, dirs })
}

/// Copy every file and directory under `src` into `dst`, depth-first in file
/// name order. Returns `(files, directories)` copied, `dst` itself included in
/// the directory count.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(usize, usize), AssetError> {
    let mut files = 0;
    let mut dirs = 0;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let dst_path = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst_path)?;
            dirs += 1;
        } else {
            fs::copy(entry.path(), &dst_path)?;
            log::debug!("copied {} → {}", entry.path().display(), dst_path.display());
            files += 1;
        }
    }
    Ok((files, dirs))
}
