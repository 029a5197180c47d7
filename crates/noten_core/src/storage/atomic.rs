//! Load-or-create and atomic write primitives.
//!
//! Writes stage the full payload into a uniquely named temp file in the
//! destination directory, fsync it, then rename it over the destination.

use super::{StorageError, StorageResult};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Loads `path`, creating it from `default_factory` when it does not exist.
///
/// A file whose content decodes to JSON `null` (or is blank) yields
/// `default_factory()` without rewriting the file.
///
/// # Errors
/// - `StorageError::Io` when the file cannot be read or the default cannot be
///   persisted.
/// - `StorageError::Deserialize` when the file is not valid JSON for `T`.
pub fn load_or_create<T, F>(path: impl AsRef<Path>, default_factory: F) -> StorageResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    let path = path.as_ref();
    if !path.exists() {
        info!(
            "event=document_create module=storage status=start path={}",
            path.display()
        );
        let value = default_factory();
        write_atomic(path, &value)?;
        return Ok(value);
    }

    let raw = fs::read_to_string(path).map_err(|err| StorageError::io(path, err))?;
    if raw.trim().is_empty() {
        warn!(
            "event=document_load module=storage status=fallback reason=blank path={}",
            path.display()
        );
        return Ok(default_factory());
    }

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(Some(value)) => {
            info!(
                "event=document_load module=storage status=ok bytes={} path={}",
                raw.len(),
                path.display()
            );
            Ok(value)
        }
        Ok(None) => {
            warn!(
                "event=document_load module=storage status=fallback reason=null path={}",
                path.display()
            );
            Ok(default_factory())
        }
        Err(source) => Err(StorageError::Deserialize {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Serializes `value` as indented JSON and atomically replaces `path`.
///
/// Parent directories are created as needed.
pub fn write_atomic<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
    write_atomic_with(path.as_ref(), value, |_| Ok(()))
}

/// `write_atomic` with a hook that runs after the temp file is fully written
/// and before it is renamed into place.
pub(crate) fn write_atomic_with<T, H>(path: &Path, value: &T, before_commit: H) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    H: FnOnce(&Path) -> std::io::Result<()>,
{
    let started_at = Instant::now();
    let result = stage_and_commit(path, value, before_commit);
    match &result {
        Ok(bytes) => info!(
            "event=document_write module=storage status=ok bytes={} duration_ms={} path={}",
            bytes,
            started_at.elapsed().as_millis(),
            path.display()
        ),
        Err(err) => error!(
            "event=document_write module=storage status=error duration_ms={} path={} error={}",
            started_at.elapsed().as_millis(),
            path.display(),
            err
        ),
    }
    result.map(|_| ())
}

fn stage_and_commit<T, H>(path: &Path, value: &T, before_commit: H) -> StorageResult<usize>
where
    T: Serialize + ?Sized,
    H: FnOnce(&Path) -> std::io::Result<()>,
{
    let payload = serde_json::to_vec_pretty(value).map_err(StorageError::Serialize)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| StorageError::io(dir, err))?;

    // Dropping `staged` on any early return removes the temp file.
    let mut staged = NamedTempFile::new_in(dir).map_err(|err| StorageError::io(dir, err))?;
    fill_and_sync(&mut staged, &payload).map_err(|err| StorageError::io(staged.path(), err))?;

    before_commit(staged.path()).map_err(|err| StorageError::io(staged.path(), err))?;

    staged
        .persist(path)
        .map_err(|err| StorageError::io(path, err.error))?;
    Ok(payload.len())
}

fn fill_and_sync(file: &mut NamedTempFile, payload: &[u8]) -> std::io::Result<()> {
    file.write_all(payload)?;
    file.flush()?;
    file.as_file().sync_all()
}
