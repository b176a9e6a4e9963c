//! Mapping from local files to remote object keys.
//!
//! A file `<source>/a/b.txt` lands at `<basename(source)>/a/b.txt`. The key
//! only depends on the two paths, so re-running an upload checks the same
//! keys and skips what is already there.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Folder has no name to use as key prefix: {}", .0.display())]
    NoFolderName(PathBuf),
    #[error("{} is not inside {}", file.display(), source_dir.display())]
    OutsideSource { file: PathBuf, source_dir: PathBuf },
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8(PathBuf),
}

/// Name of the source folder, used as the first key segment.
///
/// `data/` and `./data` both give `data`. Paths without a final normal
/// component (`.`, `..`) are canonicalized first.
pub fn folder_prefix(source: &Path) -> Result<String, KeyError> {
    let name = match source.file_name() {
        Some(name) => name.to_os_string(),
        None => {
            let resolved = source
                .canonicalize()
                .map_err(|_| KeyError::NoFolderName(source.to_path_buf()))?;
            resolved
                .file_name()
                .ok_or_else(|| KeyError::NoFolderName(source.to_path_buf()))?
                .to_os_string()
        }
    };

    name.into_string()
        .map_err(|_| KeyError::NonUtf8(source.to_path_buf()))
}

/// Key for `file` below `source`, given the prefix from [`folder_prefix`].
pub fn remote_key(prefix: &str, source: &Path, file: &Path) -> Result<String, KeyError> {
    let relative = file
        .strip_prefix(source)
        .map_err(|_| KeyError::OutsideSource {
            file: file.to_path_buf(),
            source_dir: source.to_path_buf(),
        })?;

    let mut key = String::from(prefix);
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment
                    .to_str()
                    .ok_or_else(|| KeyError::NonUtf8(file.to_path_buf()))?;
                key.push('/');
                key.push_str(segment);
            }
            Component::CurDir => {}
            _ => {
                return Err(KeyError::OutsideSource {
                    file: file.to_path_buf(),
                    source_dir: source.to_path_buf(),
                });
            }
        }
    }

    Ok(key)
}
