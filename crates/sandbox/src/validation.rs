use std::path::{Component, Path};

use crate::SandboxError;

/// Validates a single entry or project name.
///
/// Rejects:
/// - Empty or whitespace-only names
/// - Names containing `/`, `\` or NUL
/// - `.` and `..`
pub fn validate_name(name: &str) -> Result<(), SandboxError> {
    if name.trim().is_empty() {
        return Err(SandboxError::InvalidName("name must not be empty".into()));
    }

    if name.contains(['/', '\\', '\0']) {
        return Err(SandboxError::InvalidName(format!(
            "name must not contain path separators: {name}"
        )));
    }

    if name == "." || name == ".." {
        return Err(SandboxError::InvalidName(format!("reserved name: {name}")));
    }

    Ok(())
}

/// Lexically validates a caller-supplied relative path.
///
/// The empty path and `.` address the root itself and are accepted. Rejects:
/// - Absolute paths (Unix `/` or Windows `C:\`)
/// - Parent directory traversal (`..`) anywhere in the path
/// - Windows prefix components (`C:`, `\\server`)
/// - Embedded NUL bytes
pub fn validate_relative_path(relative: &str) -> Result<(), SandboxError> {
    if relative.contains('\0') {
        return Err(SandboxError::AccessDenied(format!(
            "path contains NUL byte: {relative:?}"
        )));
    }

    let path = Path::new(relative);

    if path.is_absolute() {
        return Err(SandboxError::AccessDenied(format!(
            "absolute path not allowed: {relative}"
        )));
    }

    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(SandboxError::AccessDenied(format!(
                    "parent directory traversal not allowed: {relative}"
                )));
            }
            Component::Prefix(_) => {
                return Err(SandboxError::AccessDenied(format!(
                    "path prefix not allowed: {relative}"
                )));
            }
            Component::RootDir => {
                return Err(SandboxError::AccessDenied(format!(
                    "absolute path not allowed: {relative}"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Validates `relative` and returns its normal components joined by `/`.
///
/// `.` components and repeated separators are dropped, so `./css//main.css`
/// becomes `css/main.css` and the root itself becomes the empty string.
pub fn normalize_relative_path(relative: &str) -> Result<String, SandboxError> {
    validate_relative_path(relative)?;
    let parts: Vec<String> = Path::new(relative)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}
