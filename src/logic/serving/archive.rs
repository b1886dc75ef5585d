//! Legacy Artifact Archival
//!
//! Superseded model files are moved into the archive directory under a
//! `_DEPRECATED` suffix rather than deleted, so a bad rollout can always be
//! rolled back by hand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Move each existing path into `archive_dir`. Missing paths are silently
/// skipped; a per-file move failure is logged and the rest of the batch
/// continues. Returns the destinations of the files actually archived.
pub fn archive_legacy(paths: &[PathBuf], archive_dir: &Path) -> Vec<PathBuf> {
    let mut archived = Vec::new();

    if let Err(err) = fs::create_dir_all(archive_dir) {
        tracing::warn!(
            dir = %archive_dir.display(),
            error = %err,
            "cannot create archive directory"
        );
        return archived;
    }

    for path in paths {
        if !path.exists() {
            continue;
        }
        let dest = deprecated_destination(path, archive_dir);
        match move_file(path, &dest) {
            Ok(()) => {
                tracing::info!(
                    from = %path.display(),
                    to = %dest.display(),
                    "archived legacy artifact"
                );
                archived.push(dest);
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to archive artifact"
                );
            }
        }
    }

    archived
}

/// `<stem>_DEPRECATED<ext>`, with `_<n>` appended until the name is free.
fn deprecated_destination(path: &Path, archive_dir: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut dest = archive_dir.join(format!("{stem}_DEPRECATED{ext}"));
    let mut n = 1u32;
    while dest.exists() {
        dest = archive_dir.join(format!("{stem}_DEPRECATED_{n}{ext}"));
        n += 1;
    }
    dest
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    // Cross-device renames fail; fall back to copy + delete.
    fs::rename(from, to).or_else(|_| fs::copy(from, to).and_then(|_| fs::remove_file(from)))
}
