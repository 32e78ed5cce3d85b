use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Resolves `file_path` to an absolute path and reads the whole file as text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected. Errors
/// carry the path exactly as the user typed it.
pub fn read_source(file_path: &str) -> Result<String> {
    if file_path.is_empty() {
        return Err(Error::NoInput);
    }

    let absolute_path = std::path::absolute(Path::new(file_path)).map_err(|source| {
        Error::ResolvePath {
            path: PathBuf::from(file_path),
            source,
        }
    })?;
    debug!("Reading {}", absolute_path.display());

    let bytes = fs::read(&absolute_path).map_err(|source| Error::ReadFile {
        path: PathBuf::from(file_path),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    debug!("Read {} bytes from {}", content.len(), absolute_path.display());

    Ok(content)
}
