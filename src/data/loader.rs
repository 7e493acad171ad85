//! Table loaders, dispatched by file extension.

use super::error::DataError;
use super::table::Table;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub trait TableLoader: Send + Sync {
    /// Lower-case file extensions this loader understands, without the dot.
    fn extensions(&self) -> &[&str];
    fn load(&self, path: &Path) -> Result<Table, DataError>;
}

/// Reads `{ "column": [numbers...] }` JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableLoader;

impl TableLoader for JsonTableLoader {
    fn extensions(&self) -> &[&str] { &["json"] }

    fn load(&self, path: &Path) -> Result<Table, DataError> {
        let file = File::open(path).map_err(|e| DataError::Io { path: path.to_path_buf(), message: e.to_string() })?;
        let columns: BTreeMap<String, Vec<f64>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DataError::Malformed { path: path.to_path_buf(), reason: e.to_string() })?;
        Table::new(columns)
    }
}

pub struct LoaderRegistry {
    loaders: Vec<Box<dyn TableLoader>>,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self { loaders: vec![Box::new(JsonTableLoader)] }
    }
}

impl LoaderRegistry {
    pub fn empty() -> Self { Self { loaders: Vec::new() } }

    pub fn register(&mut self, loader: Box<dyn TableLoader>) -> &mut Self {
        self.loaders.push(loader);
        self
    }

    pub fn load(&self, path: &Path) -> Result<Table, DataError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let loader = self
            .loaders
            .iter()
            .find(|l| l.extensions().contains(&extension.as_str()))
            .ok_or_else(|| DataError::UnsupportedDataFormat { path: path.to_path_buf(), extension: extension.clone() })?;

        tracing::debug!(path = %path.display(), %extension, "loading table");
        loader.load(path)
    }
}
