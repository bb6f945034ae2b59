//! Host configuration.
//!
//! Reads/writes JSON at `~/.config/studiofs/config.json`. The projects root
//! can be overridden with the `STUDIOFS_PROJECTS_ROOT` environment variable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use studiofs_service::DEFAULT_MAX_DEPTH;

/// Environment variable that overrides the configured projects root.
pub const PROJECTS_ROOT_ENV: &str = "STUDIOFS_PROJECTS_ROOT";

pub(crate) const DEFAULT_LOG_FILTER: &str = "info,studiofs=debug";
const MAX_TREE_DEPTH_LIMIT: usize = 256;

/// On-disk config format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    projects_root: String,
    #[serde(default)]
    max_tree_depth: usize,
    #[serde(default)]
    log_filter: String,
}

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub projects_root: PathBuf,
    pub max_tree_depth: usize,
    pub log_filter: String,
    file_path: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            projects_root: default_projects_root(),
            max_tree_depth: DEFAULT_MAX_DEPTH,
            log_filter: DEFAULT_LOG_FILTER.into(),
            file_path: config_file_path(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from the default location and applies the
    /// environment override. Defaults are written out on first run.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(config_file_path())?;
        if !config.file_exists()
            && let Err(e) = config.save()
        {
            tracing::warn!("failed to write default config: {e}");
        }
        config.apply_projects_root_override(std::env::var(PROJECTS_ROOT_ENV).ok());
        Ok(config)
    }

    /// Loads configuration from `file_path`.
    ///
    /// A missing file yields defaults. An unparseable file also yields
    /// defaults, with a warning. Out-of-range values are ignored.
    pub fn load_from(file_path: PathBuf) -> anyhow::Result<Self> {
        let mut config = HostConfig {
            file_path: file_path.clone(),
            ..Default::default()
        };

        if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            if let Ok(file) = serde_json::from_str::<ConfigFile>(&content) {
                if !file.projects_root.trim().is_empty() {
                    config.projects_root = PathBuf::from(file.projects_root);
                }
                if (1..=MAX_TREE_DEPTH_LIMIT).contains(&file.max_tree_depth) {
                    config.max_tree_depth = file.max_tree_depth;
                }
                if !file.log_filter.trim().is_empty() {
                    config.log_filter = file.log_filter;
                }
            } else {
                tracing::warn!(
                    path = %file_path.display(),
                    "failed to parse host config, using defaults"
                );
            }
        }

        Ok(config)
    }

    /// Replaces the projects root when `value` is set and not blank.
    pub fn apply_projects_root_override(&mut self, value: Option<String>) {
        if let Some(root) = value.filter(|v| !v.trim().is_empty()) {
            self.projects_root = PathBuf::from(root);
        }
    }

    /// Returns true if the config file is present on disk.
    pub fn file_exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Saves configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = ConfigFile {
            projects_root: self.projects_root.display().to_string(),
            max_tree_depth: self.max_tree_depth,
            log_filter: self.log_filter.clone(),
        };

        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.file_path, &json)?;
        set_permissions_0600(&self.file_path);

        tracing::debug!("host configuration saved");
        Ok(())
    }
}

fn set_permissions_0600(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

fn config_file_path() -> PathBuf {
    config_base_dir().join("studiofs").join("config.json")
}

fn default_projects_root() -> PathBuf {
    data_base_dir().join("studiofs").join("Projects")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp")
    }
}

fn data_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Ok(dir) = std::env::var("XDG_DATA_HOME")
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".local").join("share")
    }

    #[cfg(not(target_os = "linux"))]
    {
        config_base_dir()
    }
}
