// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

The scheduler itself never touches the filesystem. Only the configuration
layer does, and it asks an `AppContext` where to look:

- `StandardContext`: uses `directories::ProjectDirs`, or an override root
  given with `--root`.
- `TestContext`: a unique temporary directory, removed when dropped.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Defines the file system context for the application.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }
}

fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(path)
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, configuration lives in `path/config`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_exists(root.join("config"));
        }
        let proj = ProjectDirs::from("com", "graissage", "graissage")
            .ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        ensure_exists(proj.config_dir().to_path_buf())
    }
}

// --- Test Implementation ---

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("graissage_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("config");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
