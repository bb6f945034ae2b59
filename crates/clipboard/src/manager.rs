//! Clipboard slot and paste logic.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use studiofs_file_ops::{FileOpsError, copy_tree};
use studiofs_protocol::{ClipboardInfo, ClipboardMode};
use studiofs_sandbox::{ProjectsRoot, SandboxError, normalize_relative_path, validate_name};

use crate::ClipboardError;

/// An entry marked for copy or cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub project: String,
    pub relative_path: String,
    /// Absolute path at the time the entry was marked. Only lexical if the
    /// project did not exist yet.
    pub source: PathBuf,
    pub mode: ClipboardMode,
}

/// Contents of the clipboard slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipboardState {
    #[default]
    Empty,
    Holding(ClipboardEntry),
}

impl From<&ClipboardState> for ClipboardInfo {
    fn from(state: &ClipboardState) -> Self {
        match state {
            ClipboardState::Empty => ClipboardInfo::Empty,
            ClipboardState::Holding(entry) => ClipboardInfo::Holding {
                project_name: entry.project.clone(),
                relative_path: entry.relative_path.clone(),
                mode: entry.mode,
            },
        }
    }
}

/// Single-slot clipboard shared by all requests.
///
/// The lock is only held to read or swap the slot, never across
/// filesystem calls.
#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Mutex<ClipboardState>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an entry for copy. Neither the entry nor its project is required
    /// to exist yet; both are looked up again on paste.
    pub fn copy(
        &self,
        root: &ProjectsRoot,
        project: &str,
        relative: &str,
    ) -> Result<(), ClipboardError> {
        self.mark(root, project, relative, ClipboardMode::Copy)
    }

    /// Marks an entry for cut. Nothing moves until it is pasted.
    pub fn cut(
        &self,
        root: &ProjectsRoot,
        project: &str,
        relative: &str,
    ) -> Result<(), ClipboardError> {
        self.mark(root, project, relative, ClipboardMode::Cut)
    }

    /// Snapshot of the slot.
    pub fn state(&self) -> ClipboardState {
        self.lock().clone()
    }

    /// Empties the slot if it holds an entry from `project`. Returns true if
    /// it did.
    pub fn clear_project(&self, project: &str) -> bool {
        let mut slot = self.lock();
        let held = matches!(&*slot, ClipboardState::Holding(entry) if entry.project == project);
        if held {
            *slot = ClipboardState::Empty;
            tracing::debug!(project, "cleared clipboard entry of removed project");
        }
        held
    }

    /// Pastes the held entry into the folder `destination` of `project`.
    ///
    /// The held source is resolved again against its own project, so an
    /// entry deleted or moved since it was marked is reported as not found.
    /// A copied entry overwrites and merges into an existing target; a cut
    /// entry never replaces anything.
    pub fn paste(
        &self,
        root: &ProjectsRoot,
        project: &str,
        destination: &str,
    ) -> Result<(), ClipboardError> {
        let entry = {
            let mut slot = self.lock();
            let entry = match std::mem::take(&mut *slot) {
                ClipboardState::Empty => return Err(ClipboardError::Empty),
                ClipboardState::Holding(entry) => entry,
            };
            // A cut entry stays taken so a second paste sees an empty slot.
            if entry.mode == ClipboardMode::Copy {
                *slot = ClipboardState::Holding(entry.clone());
            }
            entry
        };

        let result = paste_entry(&entry, root, project, destination);

        if result.is_err() && entry.mode == ClipboardMode::Cut {
            let mut slot = self.lock();
            if *slot == ClipboardState::Empty {
                *slot = ClipboardState::Holding(entry);
            }
        }
        result
    }

    fn mark(
        &self,
        root: &ProjectsRoot,
        project: &str,
        relative: &str,
        mode: ClipboardMode,
    ) -> Result<(), ClipboardError> {
        let (source, relative_path) = match root.project(project) {
            Ok(resolver) => {
                let source = resolver.resolve_entry(relative)?;
                let relative_path = resolver
                    .relative_of(&source)
                    .unwrap_or_else(|| relative.to_string());
                (source, relative_path)
            }
            Err(SandboxError::ProjectNotFound(_)) => {
                validate_name(project)?;
                let relative_path = normalize_relative_path(relative)?;
                if relative_path.is_empty() {
                    return Err(SandboxError::AccessDenied(
                        "operation not allowed on the project root".into(),
                    )
                    .into());
                }
                (root.path().join(project).join(&relative_path), relative_path)
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(project, path = %relative_path, ?mode, "marked clipboard entry");
        *self.lock() = ClipboardState::Holding(ClipboardEntry {
            project: project.to_string(),
            relative_path,
            source,
            mode,
        });
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ClipboardState> {
        // The slot is replaced whole, so a poisoned value is still consistent.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn paste_entry(
    entry: &ClipboardEntry,
    root: &ProjectsRoot,
    project: &str,
    destination: &str,
) -> Result<(), ClipboardError> {
    let dest_resolver = root.project(project)?;
    let dest_dir = dest_resolver.resolve(destination)?;
    if !dest_dir.is_dir() {
        return Err(ClipboardError::NotADirectory(destination.to_string()));
    }

    let source = match root.project(&entry.project) {
        Ok(resolver) => resolver.resolve_entry(&entry.relative_path)?,
        Err(SandboxError::ProjectNotFound(_)) => {
            return Err(ClipboardError::SourceNotFound(source_label(entry)));
        }
        Err(e) => return Err(e.into()),
    };
    let source_meta = std::fs::symlink_metadata(&source)
        .map_err(|_| ClipboardError::SourceNotFound(source_label(entry)))?;

    let Some(name) = source.file_name() else {
        return Err(ClipboardError::InvalidDestination(source_label(entry)));
    };
    let target = dest_dir.join(name);
    if std::fs::symlink_metadata(&target).is_ok_and(|meta| meta.file_type().is_symlink()) {
        tracing::warn!(target = %target.display(), "paste target is a symbolic link");
        return Err(SandboxError::AccessDenied(format!(
            "refusing to paste over symbolic link: {}",
            target.display()
        ))
        .into());
    }

    if target == source {
        return Err(ClipboardError::InvalidDestination(format!(
            "{} is already in {destination:?}",
            entry.relative_path
        )));
    }
    if source_meta.is_dir() && dest_dir.starts_with(&source) {
        return Err(ClipboardError::InvalidDestination(format!(
            "cannot paste folder {} into itself",
            entry.relative_path
        )));
    }

    match entry.mode {
        ClipboardMode::Copy => {
            copy_tree(&source, &target).map_err(|e| match e {
                FileOpsError::NotFound(_) => ClipboardError::SourceNotFound(source_label(entry)),
                e => ClipboardError::FileOps(e),
            })?;
        }
        ClipboardMode::Cut => move_entry(&source, &target, entry)?,
    }

    tracing::info!(
        from_project = %entry.project,
        from = %entry.relative_path,
        to_project = project,
        to = %target.display(),
        mode = ?entry.mode,
        "pasted clipboard entry"
    );
    Ok(())
}

fn move_entry(source: &Path, target: &Path, entry: &ClipboardEntry) -> Result<(), ClipboardError> {
    if std::fs::symlink_metadata(target).is_ok() {
        return Err(ClipboardError::MoveFailed {
            path: entry.relative_path.clone(),
            reason: format!("{} already exists", target.display()),
        });
    }

    std::fs::rename(source, target).map_err(|e| ClipboardError::MoveFailed {
        path: entry.relative_path.clone(),
        reason: e.to_string(),
    })
}

fn source_label(entry: &ClipboardEntry) -> String {
    format!("{}/{}", entry.project, entry.relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studiofs_protocol::ErrorKind;

    fn setup() -> (tempfile::TempDir, ProjectsRoot) {
        let tmp = tempfile::tempdir().unwrap();
        let root = ProjectsRoot::new(tmp.path().join("Projects"));
        let base = root.ensure().unwrap();
        std::fs::create_dir_all(base.join("demo").join("css")).unwrap();
        std::fs::create_dir_all(base.join("other")).unwrap();
        std::fs::write(base.join("demo").join("index.html"), "<h1>demo</h1>").unwrap();
        std::fs::write(base.join("demo").join("css").join("main.css"), "body{}").unwrap();
        (tmp, root)
    }

    fn project_file(root: &ProjectsRoot, project: &str, rel: &str) -> PathBuf {
        root.path().join(project).join(rel)
    }

    #[test]
    fn starts_empty() {
        let clipboard = Clipboard::new();
        assert_eq!(clipboard.state(), ClipboardState::Empty);
    }

    #[test]
    fn paste_on_empty_fails() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        let err = clipboard.paste(&root, "demo", "").unwrap_err();
        assert!(matches!(err, ClipboardError::Empty));
        assert_eq!(err.kind(), ErrorKind::ClipboardEmpty);
    }

    #[test]
    fn copy_pastes_twice_and_keeps_slot() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();

        clipboard.paste(&root, "demo", "css").unwrap();
        clipboard.paste(&root, "other", "").unwrap();

        assert_eq!(
            std::fs::read_to_string(project_file(&root, "demo", "css/index.html")).unwrap(),
            "<h1>demo</h1>"
        );
        assert!(project_file(&root, "other", "index.html").exists());
        assert!(project_file(&root, "demo", "index.html").exists());
        assert!(matches!(clipboard.state(), ClipboardState::Holding(_)));
    }

    #[test]
    fn copy_paste_again_into_same_folder_overwrites() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "css").unwrap();

        clipboard.paste(&root, "other", "").unwrap();
        clipboard.paste(&root, "other", "").unwrap();
        assert!(project_file(&root, "other", "css/main.css").exists());
    }

    #[test]
    fn cut_moves_then_empties() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "index.html").unwrap();

        clipboard.paste(&root, "demo", "css").unwrap();
        assert!(!project_file(&root, "demo", "index.html").exists());
        assert!(project_file(&root, "demo", "css/index.html").exists());
        assert_eq!(clipboard.state(), ClipboardState::Empty);

        let err = clipboard.paste(&root, "demo", "css").unwrap_err();
        assert!(matches!(err, ClipboardError::Empty));
    }

    #[test]
    fn cut_folder_across_projects() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "css").unwrap();
        clipboard.paste(&root, "other", "").unwrap();

        assert!(!project_file(&root, "demo", "css").exists());
        assert!(project_file(&root, "other", "css/main.css").exists());
    }

    #[test]
    fn cut_onto_existing_target_fails_and_keeps_slot() {
        let (_tmp, root) = setup();
        std::fs::write(project_file(&root, "other", "index.html"), "existing").unwrap();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "index.html").unwrap();

        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveFailed);
        assert_eq!(
            std::fs::read_to_string(project_file(&root, "other", "index.html")).unwrap(),
            "existing"
        );
        assert!(project_file(&root, "demo", "index.html").exists());
        assert!(matches!(
            clipboard.state(),
            ClipboardState::Holding(ClipboardEntry { mode: ClipboardMode::Cut, .. })
        ));
    }

    #[test]
    fn paste_into_file_is_not_a_directory() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "css/main.css").unwrap();

        let err = clipboard.paste(&root, "demo", "index.html").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert!(matches!(clipboard.state(), ClipboardState::Holding(_)));
    }

    #[test]
    fn paste_into_missing_folder_is_not_a_directory() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();

        let err = clipboard.paste(&root, "demo", "nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert!(!project_file(&root, "demo", "nope").exists());
    }

    #[test]
    fn paste_into_same_folder_is_rejected() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();

        let err = clipboard.paste(&root, "demo", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDestination);
    }

    #[test]
    fn paste_folder_into_descendant_is_rejected() {
        let (_tmp, root) = setup();
        std::fs::create_dir_all(project_file(&root, "demo", "css/themes")).unwrap();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "css").unwrap();

        for dest in ["css", "css/themes"] {
            let err = clipboard.paste(&root, "demo", dest).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDestination, "{dest}");
        }
        assert!(project_file(&root, "demo", "css/main.css").exists());
        assert!(matches!(clipboard.state(), ClipboardState::Holding(_)));
    }

    #[test]
    fn vanished_source_is_not_found() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();
        std::fs::remove_file(project_file(&root, "demo", "index.html")).unwrap();

        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert!(matches!(err, ClipboardError::SourceNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!project_file(&root, "other", "index.html").exists());
    }

    #[test]
    fn vanished_source_project_is_not_found() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "index.html").unwrap();
        std::fs::remove_dir_all(root.path().join("demo")).unwrap();

        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn mark_rejects_escaping_paths() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        for rel in ["../other/index.html", "/etc/passwd", ""] {
            let err = clipboard.copy(&root, "demo", rel).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AccessDenied, "{rel}");
        }
        assert_eq!(clipboard.state(), ClipboardState::Empty);
    }

    #[test]
    fn paste_destination_escape_is_denied() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();

        let err = clipboard.paste(&root, "demo", "../other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(!project_file(&root, "other", "index.html").exists());
    }

    #[test]
    fn copy_does_not_require_existence() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "later.txt").unwrap();
        assert!(matches!(clipboard.state(), ClipboardState::Holding(_)));
    }

    #[test]
    fn new_mark_overwrites_slot() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "index.html").unwrap();
        clipboard.copy(&root, "demo", "css").unwrap();

        let ClipboardState::Holding(entry) = clipboard.state() else {
            panic!("expected holding");
        };
        assert_eq!(entry.relative_path, "css");
        assert_eq!(entry.mode, ClipboardMode::Copy);
    }

    #[test]
    fn copy_from_missing_project_is_held_until_paste() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "Later", "./a.txt").unwrap();

        let ClipboardState::Holding(entry) = clipboard.state() else {
            panic!("expected holding");
        };
        assert_eq!(entry.project, "Later");
        assert_eq!(entry.relative_path, "a.txt");

        let err = clipboard.paste(&root, "demo", "").unwrap_err();
        assert!(matches!(err, ClipboardError::SourceNotFound(_)));

        std::fs::create_dir_all(root.path().join("Later")).unwrap();
        std::fs::write(root.path().join("Later").join("a.txt"), "later").unwrap();
        clipboard.paste(&root, "demo", "").unwrap();
        assert_eq!(
            std::fs::read_to_string(project_file(&root, "demo", "a.txt")).unwrap(),
            "later"
        );
    }

    #[test]
    fn mark_in_missing_project_still_validates() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        for (project, rel, kind) in [
            ("Later", "../demo/index.html", ErrorKind::AccessDenied),
            ("Later", "", ErrorKind::AccessDenied),
            ("../Later", "a.txt", ErrorKind::InvalidName),
        ] {
            let err = clipboard.cut(&root, project, rel).unwrap_err();
            assert_eq!(err.kind(), kind, "{project}/{rel}");
        }
        assert_eq!(clipboard.state(), ClipboardState::Empty);
    }

    #[test]
    fn concurrent_cut_pastes_move_once() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.cut(&root, "demo", "index.html").unwrap();

        let (shared, root_ref) = (&clipboard, &root);
        let results: Vec<Result<(), ClipboardError>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(move |_| s.spawn(move || shared.paste(root_ref, "demo", "css")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(ClipboardError::Empty | ClipboardError::MoveFailed { .. })
        )));
        assert!(!project_file(&root, "demo", "index.html").exists());
        assert_eq!(
            std::fs::read_to_string(project_file(&root, "demo", "css/index.html")).unwrap(),
            "<h1>demo</h1>"
        );
        assert_eq!(clipboard.state(), ClipboardState::Empty);
    }

    #[cfg(unix)]
    #[test]
    fn paste_refuses_linked_file_target() {
        let (tmp, root) = setup();
        let outside = tmp.path().join("outside.html");
        std::fs::write(&outside, "original").unwrap();
        std::os::unix::fs::symlink(&outside, project_file(&root, "other", "index.html")).unwrap();

        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();
        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(std::fs::read_to_string(&outside).unwrap(), "original");
    }

    #[cfg(unix)]
    #[test]
    fn paste_refuses_linked_folder_target() {
        let (tmp, root) = setup();
        let outside = tmp.path().join("outside");
        std::fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, project_file(&root, "other", "css")).unwrap();

        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "css").unwrap();
        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(!outside.join("main.css").exists());

        clipboard.cut(&root, "demo", "css").unwrap();
        let err = clipboard.paste(&root, "other", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(project_file(&root, "demo", "css/main.css").exists());
    }

    #[test]
    fn clear_project_only_clears_matching_entry() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        clipboard.copy(&root, "demo", "index.html").unwrap();

        assert!(!clipboard.clear_project("other"));
        assert!(clipboard.clear_project("demo"));
        assert_eq!(clipboard.state(), ClipboardState::Empty);
    }

    #[test]
    fn info_reflects_state() {
        let (_tmp, root) = setup();
        let clipboard = Clipboard::new();
        assert_eq!(ClipboardInfo::from(&clipboard.state()), ClipboardInfo::Empty);

        clipboard.cut(&root, "demo", "css/main.css").unwrap();
        assert_eq!(
            ClipboardInfo::from(&clipboard.state()),
            ClipboardInfo::Holding {
                project_name: "demo".into(),
                relative_path: "css/main.css".into(),
                mode: ClipboardMode::Cut,
            }
        );
    }
}
