use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use covers_core::{CoverUrl, UrlSet};
use serde::Serialize;
use thiserror::Error;

use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};

pub const DEFAULT_URL_STORE: &str = "urls.json";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("url store path {0:?} has no file name")]
    InvalidPath(PathBuf),
    #[error("could not read url store: {0}")]
    Read(#[from] io::Error),
    #[error("url store is not a json array of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// JSON list of canonical cover URLs, overwritten wholesale on each save.
#[derive(Debug, Clone)]
pub struct UrlStore {
    path: PathBuf,
}

impl UrlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, urls: &UrlSet) -> Result<PathBuf, StoreError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::InvalidPath(self.path.clone()))?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let entries: Vec<&str> = urls.iter().map(CoverUrl::as_str).collect();
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries.serialize(&mut serializer)?;
        buf.push(b'\n');

        ensure_output_dir(dir)?;
        Ok(AtomicFileWriter::new(dir).write(filename, &buf)?)
    }

    /// Raw entries in stored order. Callers re-normalize them before use.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
