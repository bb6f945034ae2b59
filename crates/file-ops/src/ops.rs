//! Single-entry file and folder operations.

use std::io::{self, Write};

use studiofs_sandbox::{PathResolver, validate_name};

use crate::FileOpsError;
use crate::delete::remove_tree;

/// Reads a text file.
///
/// Fails with [`FileOpsError::NotFound`] if the path is missing or is a
/// folder, and with [`FileOpsError::NotText`] if the content is not UTF-8.
pub fn read_file(resolver: &PathResolver, relative: &str) -> Result<String, FileOpsError> {
    let path = resolver.resolve(relative)?;
    if !path.is_file() {
        return Err(FileOpsError::NotFound(relative.to_string()));
    }

    let bytes = std::fs::read(&path).map_err(|e| FileOpsError::io(relative, e))?;
    let content =
        String::from_utf8(bytes).map_err(|_| FileOpsError::NotText(relative.to_string()))?;

    tracing::debug!(path = relative, bytes = content.len(), "read file");
    Ok(content)
}

/// Writes `content` to a file, creating parent folders and replacing any
/// existing content.
pub fn write_file(
    resolver: &PathResolver,
    relative: &str,
    content: &str,
) -> Result<(), FileOpsError> {
    let path = resolver.resolve(relative)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FileOpsError::io(relative, e))?;
    }

    let mut file = std::fs::File::create(&path).map_err(|e| FileOpsError::io(relative, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| FileOpsError::io(relative, e))?;

    tracing::info!(path = relative, bytes = content.len(), "wrote file");
    Ok(())
}

/// Creates an empty file. Missing parent folders are created.
pub fn create_file(resolver: &PathResolver, relative: &str) -> Result<(), FileOpsError> {
    let path = resolver.resolve(relative)?;
    if std::fs::symlink_metadata(&path).is_ok() {
        return Err(FileOpsError::AlreadyExists(relative.to_string()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FileOpsError::io(relative, e))?;
    }

    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => FileOpsError::AlreadyExists(relative.to_string()),
            _ => FileOpsError::io(relative, e),
        })?;

    tracing::info!(path = relative, "created file");
    Ok(())
}

/// Creates a folder and any missing intermediate folders.
pub fn create_folder(resolver: &PathResolver, relative: &str) -> Result<(), FileOpsError> {
    let path = resolver.resolve(relative)?;
    if std::fs::symlink_metadata(&path).is_ok() {
        return Err(FileOpsError::AlreadyExists(relative.to_string()));
    }

    std::fs::create_dir_all(&path).map_err(|e| FileOpsError::io(relative, e))?;

    tracing::info!(path = relative, "created folder");
    Ok(())
}

/// Deletes a file, a symlink or a whole folder tree.
pub fn delete_path(resolver: &PathResolver, relative: &str) -> Result<(), FileOpsError> {
    let path = resolver.resolve_entry(relative)?;
    let meta = std::fs::symlink_metadata(&path)
        .map_err(|_| FileOpsError::NotFound(relative.to_string()))?;

    if meta.is_dir() {
        remove_tree(&path)?;
    } else {
        std::fs::remove_file(&path).map_err(|source| FileOpsError::DeleteFailed {
            path: relative.to_string(),
            source,
        })?;
    }

    tracing::info!(path = relative, "deleted path");
    Ok(())
}

/// Renames an entry within its parent folder.
///
/// `new_name` must be a single name; moving across folders is done with
/// cut and paste.
pub fn rename(resolver: &PathResolver, relative: &str, new_name: &str) -> Result<(), FileOpsError> {
    validate_name(new_name)?;
    let source = resolver.resolve_entry(relative)?;

    if std::fs::symlink_metadata(&source).is_err() {
        return Err(FileOpsError::NotFound(relative.to_string()));
    }

    let target = match source.parent() {
        Some(parent) => parent.join(new_name),
        None => return Err(FileOpsError::NotFound(relative.to_string())),
    };

    if std::fs::symlink_metadata(&target).is_ok() {
        return Err(FileOpsError::AlreadyExists(new_name.to_string()));
    }

    std::fs::rename(&source, &target).map_err(|e| FileOpsError::io(relative, e))?;

    tracing::info!(path = relative, new_name, "renamed entry");
    Ok(())
}
