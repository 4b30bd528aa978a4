use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = "tasks.json";

pub fn default_store_path() -> PathBuf {
    PathBuf::from(STORE_FILE_NAME)
}

/// Reads the whole collection, creating an empty document first if none exists.
pub fn read_all(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "initializing empty task store");
        write_all(path, &[])?;
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::storage_io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content)
        .map_err(|err| AppError::corrupt_store(format!("{}: {}", path.display(), err)))
}

/// Replaces the whole document with `tasks`.
///
/// The content goes to a sibling file that is then renamed over the
/// document, so readers see either the previous or the new collection.
pub fn write_all(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::storage_io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(tasks)
        .map_err(|err| AppError::storage_io(err.to_string()))?;

    let staging = staging_path(path);
    if let Err(err) = replace_with_staging(&staging, path, content.as_bytes()) {
        std::fs::remove_file(&staging).ok();
        return Err(AppError::storage_io(err.to_string()));
    }

    tracing::debug!(path = %path.display(), tasks = tasks.len(), "task store written");
    Ok(())
}

fn replace_with_staging(staging: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    std::fs::write(staging, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(staging, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(staging, path)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| STORE_FILE_NAME.into());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
