//! Recursive copy.

use std::path::Path;

use studiofs_sandbox::SandboxError;

use crate::FileOpsError;

/// Recursively duplicates `source` at `target` and returns the number of
/// files copied.
///
/// Directories are copied entry by entry and merged into an existing target;
/// files are copied byte for byte and overwrite an existing file. Symlinks
/// inside the source are skipped, never followed, and an existing link at
/// any target location is refused rather than written through. A failure
/// part way leaves whatever was already written in place.
pub fn copy_tree(source: &Path, target: &Path) -> Result<u64, FileOpsError> {
    let meta = std::fs::symlink_metadata(source)
        .map_err(|_| FileOpsError::NotFound(source.display().to_string()))?;

    if meta.file_type().is_symlink() {
        return Err(FileOpsError::Sandbox(SandboxError::AccessDenied(format!(
            "refusing to copy symbolic link: {}",
            source.display()
        ))));
    }

    if target == source || (meta.is_dir() && target.starts_with(source)) {
        return Err(FileOpsError::InvalidDestination(format!(
            "cannot copy {} into itself",
            source.display()
        )));
    }

    let copied = if meta.is_dir() {
        copy_dir(source, target)?
    } else {
        copy_file(source, target)?;
        1
    };

    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        files = copied,
        "copied tree"
    );
    Ok(copied)
}

fn copy_dir(source: &Path, target: &Path) -> Result<u64, FileOpsError> {
    refuse_link(target)?;
    std::fs::create_dir_all(target)
        .map_err(|e| FileOpsError::io(target.display().to_string(), e))?;

    let entries =
        std::fs::read_dir(source).map_err(|e| FileOpsError::io(source.display().to_string(), e))?;

    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| FileOpsError::io(source.display().to_string(), e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| FileOpsError::io(from.display().to_string(), e))?;

        if file_type.is_symlink() {
            tracing::warn!(path = %from.display(), "skipping symbolic link while copying");
        } else if file_type.is_dir() {
            copied += copy_dir(&from, &to)?;
        } else {
            copy_file(&from, &to)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(source: &Path, target: &Path) -> Result<(), FileOpsError> {
    refuse_link(target)?;
    std::fs::copy(source, target)
        .map_err(|e| FileOpsError::io(target.display().to_string(), e))?;
    Ok(())
}

/// Fails if `target` is an existing symlink, which could point anywhere.
fn refuse_link(target: &Path) -> Result<(), FileOpsError> {
    match std::fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => {
            tracing::warn!(path = %target.display(), "refusing to write through symbolic link");
            Err(FileOpsError::Sandbox(SandboxError::AccessDenied(format!(
                "refusing to write through symbolic link: {}",
                target.display()
            ))))
        }
        _ => Ok(()),
    }
}
