//! On-disk layout and atomic persistence of calibration artifacts.

use super::error::CalibrationError;
use super::fingerprint::CacheKey;
use crate::compute::PosteriorStore;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CALIBRATIONS_DIR: &str = "calibs";
const FIGURES_DIR: &str = "figures";
const ARTIFACT_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    /// `<root>/calibs/<model>_<fingerprint>/<dataset>.json`
    pub fn artifact_path(&self, key: &CacheKey) -> PathBuf {
        self.root
            .join(CALIBRATIONS_DIR)
            .join(format!("{}_{}", key.model, key.fingerprint))
            .join(format!("{}.{}", key.dataset, ARTIFACT_EXTENSION))
    }

    /// `<root>/figures/<model>_<fingerprint>/<dataset>/<file>`, creating the parent directory.
    pub fn figure_path(&self, key: &CacheKey, file: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = self
            .root
            .join(FIGURES_DIR)
            .join(format!("{}_{}", key.model, key.fingerprint))
            .join(&key.dataset)
            .join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Loads the artifact for `key`, or `None` when it was never persisted.
    pub fn load(&self, key: &CacheKey) -> Result<Option<PosteriorStore>, CalibrationError> {
        let path = self.artifact_path(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(artifact_error(key, &path, e)),
        };
        let store = serde_json::from_reader(BufReader::new(file)).map_err(|e| artifact_error(key, &path, e))?;
        Ok(Some(store))
    }

    /// Writes the artifact to a temporary file beside its final path, then
    /// renames it into place.
    pub fn persist(&self, key: &CacheKey, store: &PosteriorStore) -> Result<PathBuf, CalibrationError> {
        let path = self.artifact_path(key);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(|e| artifact_error(key, &path, e))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| artifact_error(key, &path, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, store).map_err(|e| artifact_error(key, &path, e))?;
            writer.flush().map_err(|e| artifact_error(key, &path, e))?;
        }
        tmp.as_file().sync_all().map_err(|e| artifact_error(key, &path, e))?;
        tmp.persist(&path).map_err(|e| artifact_error(key, &path, e.error))?;
        Ok(path)
    }
}

fn artifact_error(key: &CacheKey, path: &Path, err: impl std::fmt::Display) -> CalibrationError {
    CalibrationError::Artifact { key: key.clone(), path: path.to_path_buf(), reason: err.to_string() }
}
