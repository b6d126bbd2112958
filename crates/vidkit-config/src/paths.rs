//! Application paths management.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "VIDKIT_CONFIG";

/// Manages application paths following platform conventions.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "vidkit", "vidkit")?;
        let config_dir = proj_dirs.config_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
        })
    }

    /// Resolve the config file, honouring `VIDKIT_CONFIG`.
    pub fn resolve() -> Option<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(file) if !file.is_empty() => Some(Self::for_file(PathBuf::from(file))),
            _ => Self::new(),
        }
    }

    /// Paths rooted at an explicit config file.
    pub fn for_file(config_file: PathBuf) -> Self {
        let config_dir = config_file
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        Self {
            config_dir,
            config_file,
        }
    }

    /// Create the config directory.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if !self.config_dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_paths_creation() {
        let paths = AppPaths::new();
        assert!(paths.is_some());

        let paths = paths.unwrap();
        assert!(paths.config_file.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_paths_for_explicit_file() {
        let paths = AppPaths::for_file(PathBuf::from("/tmp/vidkit/custom.toml"));
        assert_eq!(paths.config_dir, PathBuf::from("/tmp/vidkit"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/vidkit/custom.toml"));
    }

    #[test]
    fn test_bare_file_name_has_empty_dir() {
        let paths = AppPaths::for_file(PathBuf::from("vidkit.toml"));
        assert!(paths.config_dir.as_os_str().is_empty());
        assert!(paths.ensure_dirs().is_ok());
    }
}
