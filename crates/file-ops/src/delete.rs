//! Best-effort recursive deletion.

use std::io;
use std::path::{Path, PathBuf};

use crate::FileOpsError;

/// Recursively removes `path`, continuing past individual failures.
///
/// Symlinks are removed as links and never followed. A missing path is not
/// an error. When anything could not be removed the tree is left partially
/// deleted and the first failure is returned as
/// [`FileOpsError::DeleteFailed`].
pub fn remove_tree(path: &Path) -> Result<(), FileOpsError> {
    remove_tree_with(path, &|file: &Path| std::fs::remove_file(file))
}

type RemoveFile<'a> = &'a dyn Fn(&Path) -> io::Result<()>;

fn remove_tree_with(path: &Path, remove_file: RemoveFile<'_>) -> Result<(), FileOpsError> {
    let mut failures: Vec<(PathBuf, io::Error)> = Vec::new();
    remove_entry(path, remove_file, &mut failures);

    if failures.is_empty() {
        tracing::debug!(path = %path.display(), "removed tree");
        return Ok(());
    }

    for (failed, error) in &failures {
        tracing::warn!(path = %failed.display(), error = %error, "failed to remove entry");
    }
    tracing::warn!(
        path = %path.display(),
        failed = failures.len(),
        "tree only partially removed"
    );

    let (failed, source) = failures.swap_remove(0);
    Err(FileOpsError::DeleteFailed {
        path: failed.display().to_string(),
        source,
    })
}

fn remove_entry(path: &Path, remove_file: RemoveFile<'_>, failures: &mut Vec<(PathBuf, io::Error)>) {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return,
        Err(e) => {
            failures.push((path.to_path_buf(), e));
            return;
        }
    };

    let file_type = meta.file_type();
    if file_type.is_symlink() {
        // Directory symlinks on Windows need remove_dir.
        if let Err(e) = std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path)) {
            failures.push((path.to_path_buf(), e));
        }
        return;
    }

    if !file_type.is_dir() {
        if let Err(e) = remove_file(path) {
            failures.push((path.to_path_buf(), e));
        }
        return;
    }

    match std::fs::read_dir(path) {
        Ok(entries) => {
            for entry in entries {
                match entry {
                    Ok(entry) => remove_entry(&entry.path(), remove_file, failures),
                    Err(e) => failures.push((path.to_path_buf(), e)),
                }
            }
        }
        Err(e) => {
            failures.push((path.to_path_buf(), e));
            return;
        }
    }

    if let Err(e) = std::fs::remove_dir(path) {
        failures.push((path.to_path_buf(), e));
    }
}
