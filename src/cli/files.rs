//! Reading source files and replacing them atomically.
//!
//! A replacement is written to a temporary sibling named `.<name>.*.dpfmt` and renamed over the
//! original, so a failed write never leaves a truncated source file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::CliError;

/// File-system failure while handling a source file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl From<FileError> for CliError {
    fn from(err: FileError) -> Self {
        CliError::failure(err.to_string())
    }
}

/// Read the raw contents of a source file.
pub fn read_file(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `contents`.
///
/// The existing file's permissions carry over to the replacement.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<(), FileError> {
    let write_error = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".dpfmt")
        .tempfile_in(dir)
        .map_err(write_error)?;

    temp.write_all(contents).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions()).map_err(write_error)?;
    }

    temp.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_file_overwrites_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.dp");
        fs::write(&path, "x  =  1\n").unwrap();

        replace_file(&path, b"x = 1\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "main.dp")
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.dp");
        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().starts_with(&path.display().to_string()));
    }
}
