//! Ordered recursive listing of a project tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use studiofs_protocol::TreeEntry;
use studiofs_sandbox::PathResolver;

/// Default maximum number of levels listed below the project root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tree listing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Deepest level that is listed; top-level entries are level 1.
    pub max_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Lists the whole tree below the resolver's root.
///
/// Within each folder, folders come before files and each group is ordered
/// by name. A folder that cannot be read, that lies outside the project
/// once its symlinks are resolved, that closes a symlink cycle, or that sits
/// at the depth bound is returned with no children.
pub fn list_tree(resolver: &PathResolver, options: TreeOptions) -> Vec<TreeEntry> {
    let mut ancestors = HashSet::new();
    ancestors.insert(resolver.root().to_path_buf());

    let walker = Walker { resolver, options };
    walker.walk(resolver.root(), "", 1, &mut ancestors)
}

struct Walker<'a> {
    resolver: &'a PathResolver,
    options: TreeOptions,
}

struct Node {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl Walker<'_> {
    fn walk(
        &self,
        dir: &Path,
        prefix: &str,
        level: usize,
        ancestors: &mut HashSet<PathBuf>,
    ) -> Vec<TreeEntry> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "cannot list directory");
                return Vec::new();
            }
        };

        let mut nodes: Vec<Node> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable entry");
                    None
                }
            })
            .map(|entry| {
                let path = entry.path();
                // Follows symlinks; a dangling link is listed as a file.
                let is_dir = std::fs::metadata(&path).is_ok_and(|m| m.is_dir());
                Node {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    is_dir,
                }
            })
            .collect();

        nodes.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

        nodes
            .into_iter()
            .map(|node| {
                let rel = if prefix.is_empty() {
                    node.name.clone()
                } else {
                    format!("{prefix}/{}", node.name)
                };

                if node.is_dir {
                    let children = self.descend(&node.path, &rel, level, ancestors);
                    TreeEntry::folder(node.name, rel, children)
                } else {
                    TreeEntry::file(node.name, rel)
                }
            })
            .collect()
    }

    fn descend(
        &self,
        dir: &Path,
        rel: &str,
        level: usize,
        ancestors: &mut HashSet<PathBuf>,
    ) -> Vec<TreeEntry> {
        if level >= self.options.max_depth {
            tracing::warn!(path = rel, max_depth = self.options.max_depth, "depth bound reached");
            return Vec::new();
        }

        let canonical = match std::fs::canonicalize(dir) {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::warn!(path = rel, error = %e, "cannot resolve directory");
                return Vec::new();
            }
        };

        if !self.resolver.contains(&canonical) {
            tracing::warn!(path = rel, "directory resolves outside the project, not listing it");
            return Vec::new();
        }

        if !ancestors.insert(canonical.clone()) {
            tracing::warn!(path = rel, "symlink cycle detected, not descending");
            return Vec::new();
        }

        let children = self.walk(dir, rel, level + 1, ancestors);
        ancestors.remove(&canonical);
        children
    }
}
