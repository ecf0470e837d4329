mod paths;
mod store;

pub use paths::GalaPaths;
pub use store::{JsonlStore, StoreError};

use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the store root: explicit path > `GALA_STORE_DIR` > per-user
/// data dir (`<data>/gala/store`, falling back to `~/.gala/store`).
pub fn store_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(dir) = std::env::var("GALA_STORE_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("gala").join("store")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".gala").join("store")
    } else {
        PathBuf::from(".gala-store")
    }
}

/// File-based exclusive lock guard.
pub struct LockGuard {
    _file: fs::File,
}

/// Acquire an exclusive file lock. Creates the lock file if needed.
pub fn lock_file(path: &Path) -> anyhow::Result<LockGuard> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;
    file.lock_exclusive()?;
    Ok(LockGuard { _file: file })
}
