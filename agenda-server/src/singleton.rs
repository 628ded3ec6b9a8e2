//! Only one agenda-server may write a given database document.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// `data_base.json` is guarded by `data_base.json.lock` next to it.
fn lock_path(database: &Path) -> PathBuf {
    let mut name = database.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Acquire an exclusive lock, failing if another instance serves the same database
pub fn acquire_lock(database: &Path) -> Result<LockGuard> {
    let path = lock_path(database);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create lock file {}", path.display()))?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another agenda-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            database.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
