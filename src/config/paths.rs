//! Path management for UpScale
//!
//! ## Path Resolution Order
//!
//! 1. `UPSCALE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `upscale`
//!    (`~/.config/upscale` on Linux, `%APPDATA%\upscale\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::UpscaleError;

/// Manages all paths used by UpScale
#[derive(Debug, Clone)]
pub struct UpscalePaths {
    /// Base directory for all UpScale files
    base_dir: PathBuf,
}

impl UpscalePaths {
    /// Create a new UpscalePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, UpscaleError> {
        let base_dir = if let Ok(custom) = std::env::var("UPSCALE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create UpscalePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the activity log
    pub fn activity_log(&self) -> PathBuf {
        self.base_dir.join("activity.log")
    }

    /// Get the path of the optional curriculum override
    pub fn curriculum_file(&self) -> PathBuf {
        self.base_dir.join("curriculum.yaml")
    }

    /// Get the default directory for budget exports and chart images
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), UpscaleError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| UpscaleError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| UpscaleError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, UpscaleError> {
    ProjectDirs::from("", "", "upscale")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| UpscaleError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
        assert_eq!(paths.activity_log(), temp_dir.path().join("activity.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("UPSCALE_DATA_DIR", custom_path);

        let paths = UpscalePaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("UPSCALE_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
        assert!(!paths.settings_file().exists());
    }
}
