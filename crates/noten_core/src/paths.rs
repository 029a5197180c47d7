//! Data directory resolution.
//!
//! # Invariants
//! - Portable mode (env `NOTEN_PORTABLE=1` or a `noten.portable` marker next
//!   to the executable) keeps all data under `<exe_dir>/NotenData`.
//! - Otherwise data lives under `<local data dir>/Noten`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const PORTABLE_ENV_VAR: &str = "NOTEN_PORTABLE";
pub const PORTABLE_MARKER_FILE: &str = "noten.portable";
pub const PORTABLE_DATA_DIR_NAME: &str = "NotenData";
pub const APP_DIR_NAME: &str = "Noten";
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum PathError {
    EmptyExecutableDir,
    /// Platform exposes no per-user local data directory.
    NoLocalDataDir,
    CurrentExe(std::io::Error),
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExecutableDir => write!(f, "executable directory is required"),
            Self::NoLocalDataDir => write!(f, "no local data directory available on this platform"),
            Self::CurrentExe(err) => write!(f, "cannot locate current executable: {err}"),
        }
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentExe(err) => Some(err),
            _ => None,
        }
    }
}

/// Resolves the writable data directory for an executable living in
/// `exe_dir`, reading the portable override from the environment.
pub fn resolve_data_dir<F>(exe_dir: &Path, local_data_dir: F) -> Result<PathBuf, PathError>
where
    F: FnOnce() -> Option<PathBuf>,
{
    let env_value = std::env::var(PORTABLE_ENV_VAR).ok();
    resolve_with(exe_dir, env_value.as_deref(), local_data_dir)
}

/// Resolves the data directory for the running executable using the
/// platform local data directory.
pub fn default_data_dir() -> Result<PathBuf, PathError> {
    let exe = std::env::current_exe().map_err(PathError::CurrentExe)?;
    let exe_dir = exe.parent().ok_or(PathError::EmptyExecutableDir)?;
    resolve_data_dir(exe_dir, dirs::data_local_dir)
}

pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_DIR_NAME)
}

fn resolve_with<F>(
    exe_dir: &Path,
    portable_env: Option<&str>,
    local_data_dir: F,
) -> Result<PathBuf, PathError>
where
    F: FnOnce() -> Option<PathBuf>,
{
    if exe_dir.as_os_str().is_empty() {
        return Err(PathError::EmptyExecutableDir);
    }

    let env_portable = portable_env.is_some_and(|value| value.eq_ignore_ascii_case("1"));
    let marker_portable = exe_dir.join(PORTABLE_MARKER_FILE).is_file();
    if env_portable || marker_portable {
        return Ok(exe_dir.join(PORTABLE_DATA_DIR_NAME));
    }

    let base = local_data_dir().ok_or(PathError::NoLocalDataDir)?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::{resolve_with, PathError, PORTABLE_MARKER_FILE};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn local() -> Option<PathBuf> {
        Some(PathBuf::from("/tmp/localapp"))
    }

    #[test]
    fn default_uses_local_data_dir() {
        let exe_dir = TempDir::new().unwrap();
        let resolved = resolve_with(exe_dir.path(), None, local).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/localapp").join("Noten"));
    }

    #[test]
    fn marker_file_switches_to_portable_dir() {
        let exe_dir = TempDir::new().unwrap();
        fs::write(exe_dir.path().join(PORTABLE_MARKER_FILE), "1").unwrap();

        let resolved = resolve_with(exe_dir.path(), None, local).unwrap();
        assert_eq!(resolved, exe_dir.path().join("NotenData"));
    }

    #[test]
    fn env_flag_switches_to_portable_dir() {
        let exe_dir = TempDir::new().unwrap();
        let resolved = resolve_with(exe_dir.path(), Some("1"), local).unwrap();
        assert_eq!(resolved, exe_dir.path().join("NotenData"));

        let ignored = resolve_with(exe_dir.path(), Some("yes"), local).unwrap();
        assert_eq!(ignored, PathBuf::from("/tmp/localapp").join("Noten"));
    }

    #[test]
    fn empty_exe_dir_is_rejected() {
        let err = resolve_with(Path::new(""), None, local).unwrap_err();
        assert!(matches!(err, PathError::EmptyExecutableDir));
    }
}
