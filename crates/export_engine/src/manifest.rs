use std::path::{Path, PathBuf};

use export_core::Domain;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::persist::{AtomicFileWriter, PersistError};
use crate::synth::Generated;

pub const DEFAULT_MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    pub domain: String,
    pub title: String,
    pub url: String,
    pub sha256: String,
}

/// Index of every document written in one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Manifest {
    pub doc_count: usize,
    pub files: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn record(&mut self, domain: Domain, relative: &Path, generated: &Generated, content: &str) {
        self.files.push(ManifestEntry {
            path: slash_path(relative),
            domain: domain.to_string(),
            title: generated.title.clone(),
            url: generated.url.clone(),
            sha256: content_hash(content),
        });
        self.doc_count = self.files.len();
    }

    /// Serializes the manifest sorted by path, so unchanged inputs give an
    /// identical file.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let mut sorted = self.clone();
        sorted.files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(serde_json::to_string_pretty(&sorted)?)
    }

    pub fn write(&self, writer: &AtomicFileWriter, filename: &str) -> Result<PathBuf, ManifestError> {
        let json = self.to_json()?;
        Ok(writer.write(Path::new(filename), &json)?)
    }
}

fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
