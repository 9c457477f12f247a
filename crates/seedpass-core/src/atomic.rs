use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AugmentError, AugmentResult};

/// Symlink hops followed before giving up, as the kernel does with `ELOOP`.
const MAX_SYMLINK_HOPS: usize = 40;

/// Serializes `value` as pretty JSON and writes it atomically, creating
/// missing parent directories.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> AugmentResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = non_empty_parent(path) {
        create_dir_all(parent).map_err(|err| AugmentError::write(path, err))?;
    }
    write_bytes_atomic(path, &data)
}

/// Writes `data` to a uniquely named sibling temp file, syncs it, then renames
/// it over `path`.
///
/// Either the previous contents of `path` or the full new contents are visible
/// afterwards, never a partial write. The parent directory must already exist,
/// an existing target must be writable, and a symlinked target is written
/// through rather than replaced.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> AugmentResult<()> {
    let target = resolve_symlinks(path).map_err(|err| AugmentError::write(path, err))?;
    let tmp_path = temp_path(path, &target)?;
    write_and_rename(&target, &tmp_path, data).map_err(|err| {
        let _ = fs::remove_file(&tmp_path);
        AugmentError::write(path, err)
    })
}

fn write_and_rename(target: &Path, tmp_path: &Path, data: &[u8]) -> io::Result<()> {
    if fs::symlink_metadata(target).is_ok() {
        OpenOptions::new().write(true).open(target)?;
    }

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(tmp_path, target)?;
    if let Some(parent) = non_empty_parent(target) {
        sync_dir(parent)?;
    }

    Ok(())
}

fn resolve_symlinks(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current)?;
                current = match non_empty_parent(&current) {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                };
            }
            _ => return Ok(current),
        }
    }
    Err(io::Error::other("too many levels of symbolic links"))
}

fn temp_path(path: &Path, target: &Path) -> AugmentResult<PathBuf> {
    let file_name = target.file_name().ok_or_else(|| {
        AugmentError::write(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    let tmp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        uuid::Uuid::new_v4().simple()
    );
    Ok(target.with_file_name(tmp_name))
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
