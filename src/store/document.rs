//! Whole-document JSON file access shared by the stores

use std::{fs, io::ErrorKind, path::Path};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use super::error::{Result, StoreError};

/// Read and parse a document. A missing file yields `None`.
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::malformed(path, e))
}

/// Serialize with four-space indentation and replace the file
pub(crate) fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| StoreError::malformed(path, e))?;

    fs::write(path, buf).map_err(|e| StoreError::io(path, e))
}
