// File: ./src/storage.rs
// Locked, atomic writes for the few files the application owns (config.toml).
use anyhow::Result;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut name = file_path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Runs `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp sibling, then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
